use crate::hit_objects::hit_window::HitWindow;

/// Fade out of hit circles after being hit or missed
pub const CIRCLE_FADEOUT_TIME: f64 = 150.0;
/// Fade out of judgment glyphs
pub const SCORE_FADEOUT_TIME: f64 = 600.0;
pub const SLIDER_FADEOUT_TIME: f64 = 300.0;
pub const FOLLOW_ZOOM_IN_TIME: f64 = 100.0;
pub const FOLLOW_FADEOUT_TIME: f64 = 100.0;
pub const BALL_FADEOUT_TIME: f64 = 100.0;

/// Scale growth of the hit burst over `CIRCLE_FADEOUT_TIME`
pub const BURST_SCALE_GROWTH: f64 = 0.4;
/// Scale growth of the slider ball over `BALL_FADEOUT_TIME`
pub const BALL_SCALE_GROWTH: f64 = 0.15;

/// Raw difficulty fields as stored in a chart
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Difficulty {
    pub cs: f64,
    pub od: f64,
    pub ar: f64,
    pub slider_multiplier: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            cs: 5.0,
            od: 5.0,
            ar: 5.0,
            slider_multiplier: 1.4,
        }
    }
}

/// Approach time (preempt) in milliseconds
pub fn approach_time(ar: f64) -> f64 {
    if ar < 5.0 {
        1800.0 - 120.0 * ar
    } else {
        1950.0 - 150.0 * ar
    }
}

pub fn object_fade_in_time(approach_time: f64) -> f64 {
    approach_time.min(350.0)
}

/// Hit circle radius in playfield coordinates
pub fn circle_radius(cs: f64) -> f64 {
    (109.0 - 9.0 * cs) / 2.0
}

/// Everything derived from [`Difficulty`] that the playback needs
pub struct DifficultyWindows {
    pub approach_time: f64,
    pub object_fade_in: f64,
    pub approach_fade_in: f64,
    pub circle_radius: f64,
    pub hit_window: HitWindow,
}

impl DifficultyWindows {
    pub fn new(difficulty: &Difficulty) -> Self {
        let approach_time = approach_time(difficulty.ar);

        Self {
            approach_time,
            object_fade_in: object_fade_in_time(approach_time),
            approach_fade_in: approach_time,
            circle_radius: circle_radius(difficulty.cs),
            hit_window: HitWindow::from_od(difficulty.od),
        }
    }

    /// Opacity of hit circles and slider bodies while approaching
    ///
    /// `diff` is the amount of milliseconds left until the object time
    pub fn fade_in_alpha(&self, diff: f64) -> Option<f64> {
        let full_appear = self.approach_time - self.object_fade_in;

        if diff <= self.approach_time && diff > full_appear {
            Some((self.approach_time - diff) / self.object_fade_in)
        } else {
            None
        }
    }

    /// Opacity of approach circles while approaching, `None` once
    /// the object time is reached
    pub fn approach_alpha(&self, diff: f64) -> Option<f64> {
        let full_appear = self.approach_time - self.approach_fade_in;

        if diff <= self.approach_time && diff > full_appear {
            Some((self.approach_time - diff) / self.approach_fade_in)
        } else if diff <= full_appear && diff > 0.0 {
            Some(1.0)
        } else {
            None
        }
    }

    /// Approach circle scale relative to the hit circle
    pub fn approach_scale(&self, diff: f64, approach_scale: f64) -> f64 {
        if diff > 0.0 && diff <= self.approach_time {
            diff / self.approach_time * approach_scale + 1.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::case;

    #[case(9.0, 600.0; "ar9")]
    #[case(4.0, 1320.0; "ar4")]
    #[case(5.0, 1200.0; "ar5")]
    #[case(10.0, 450.0; "ar10")]
    #[case(0.0, 1800.0; "ar0")]
    fn test_approach_time(ar: f64, expected: f64) {
        assert_eq!(approach_time(ar), expected);
    }

    #[test]
    fn test_fade_in_is_capped() {
        assert_eq!(object_fade_in_time(1200.0), 350.0);
        assert_eq!(object_fade_in_time(300.0), 300.0);
    }

    #[test]
    fn test_circle_radius() {
        assert_eq!(circle_radius(4.0), 36.5);
        assert_eq!(circle_radius(0.0), 54.5);
    }

    #[test]
    fn test_windows() {
        let windows = DifficultyWindows::new(&Difficulty {
            cs: 4.0,
            od: 8.0,
            ar: 9.0,
            slider_multiplier: 1.4,
        });

        assert_eq!(windows.approach_time, 600.0);
        assert_eq!(windows.object_fade_in, 350.0);
        assert_eq!(windows.hit_window.meh, 120.0);
        assert_eq!(windows.hit_window.good, 76.0);
        assert_eq!(windows.hit_window.great, 32.0);
    }

    #[test]
    fn test_visual_ramps() {
        let windows = DifficultyWindows::new(&Difficulty {
            ar: 9.0,
            ..Default::default()
        });

        // 600ms approach, 350ms fade in
        assert_eq!(windows.fade_in_alpha(700.0), None);
        assert_eq!(windows.fade_in_alpha(600.0), Some(0.0));
        assert_eq!(windows.fade_in_alpha(425.0), Some(0.5));
        assert_eq!(windows.fade_in_alpha(250.0), None);

        assert_eq!(windows.approach_scale(600.0, 3.0), 4.0);
        assert_eq!(windows.approach_scale(300.0, 3.0), 2.5);
        assert_eq!(windows.approach_scale(0.0, 3.0), 1.0);
        assert_eq!(windows.approach_scale(-50.0, 3.0), 1.0);

        assert_eq!(windows.approach_alpha(300.0), Some(0.5));
        assert_eq!(windows.approach_alpha(0.0), None);
    }
}
