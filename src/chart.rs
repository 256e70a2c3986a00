use thiserror::Error;

use crate::{
    difficulty::Difficulty,
    hit_objects::{HitObject, HitObjectKind},
    palette::ComboPalette,
    rgb::Rgb,
    timing::TimingPoint,
};

/// Beat length used when a chart has no uninherited timing point at all
const DEFAULT_BEAT_LENGTH: f64 = 500.0;

#[derive(Error, Debug, PartialEq)]
pub enum ChartError {
    #[error("chart has no timing points")]
    NoTimingPoints,
    #[error("timing point `{0}` is placed before the previous one")]
    UnsortedTimingPoints(usize),
    #[error("hit object `{0}` is placed before the previous one")]
    UnsortedObjects(usize),
    #[error("slider `{0}` has an invalid repeat count or length")]
    InvalidSlider(usize),
    #[error("spinner `{0}` ends before it starts")]
    InvalidSpinner(usize),
    #[error("slider multiplier `{0}` must be positive")]
    InvalidSliderMultiplier(f64),
}

/// Immutable, validated chart ready for playback
#[derive(Debug, Clone)]
pub struct Chart {
    objects: Vec<HitObject>,
    timing_points: Vec<TimingPoint>,
    difficulty: Difficulty,
    palette: ComboPalette,
}

impl Chart {
    pub fn new(
        objects: Vec<HitObject>,
        timing_points: Vec<TimingPoint>,
        difficulty: Difficulty,
    ) -> Result<Self, ChartError> {
        if timing_points.is_empty() {
            return Err(ChartError::NoTimingPoints);
        }

        if let Some(i) = (1..timing_points.len())
            .find(|&i| timing_points[i].offset < timing_points[i - 1].offset)
        {
            return Err(ChartError::UnsortedTimingPoints(i));
        }

        if let Some(i) = (1..objects.len()).find(|&i| objects[i].time < objects[i - 1].time) {
            return Err(ChartError::UnsortedObjects(i));
        }

        if !(difficulty.slider_multiplier > 0.0) {
            return Err(ChartError::InvalidSliderMultiplier(difficulty.slider_multiplier));
        }

        for (i, obj) in objects.iter().enumerate() {
            match &obj.kind {
                HitObjectKind::Slider(slider) => {
                    if slider.repeat_count < 1 || !slider.pixel_length.is_finite() {
                        return Err(ChartError::InvalidSlider(i));
                    }
                }
                HitObjectKind::Spinner(spinner) => {
                    if spinner.end_time < obj.time {
                        return Err(ChartError::InvalidSpinner(i));
                    }
                }
                HitObjectKind::Circle(_) => {}
            }
        }

        Ok(Self {
            objects,
            timing_points,
            difficulty,
            palette: ComboPalette::default(),
        })
    }

    pub fn with_palette(mut self, palette: ComboPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn objects(&self) -> &[HitObject] {
        &self.objects
    }

    pub fn object(&self, id: usize) -> Option<&HitObject> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn timing_points(&self) -> &[TimingPoint] {
        &self.timing_points
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn palette(&self) -> &ComboPalette {
        &self.palette
    }

    fn timing_index_at(&self, time: f64) -> usize {
        // Later points win when sharing an offset
        self.timing_points
            .partition_point(|p| p.offset <= time)
            .saturating_sub(1)
    }

    /// Last timing point with `offset <= time`, the first one for
    /// anything placed before it
    pub fn timing_point_at(&self, time: f64) -> &TimingPoint {
        &self.timing_points[self.timing_index_at(time)]
    }

    /// Beat length with the slider velocity of inherited points applied
    pub fn beat_length_at(&self, time: f64) -> f64 {
        let idx = self.timing_index_at(time);
        let active = &self.timing_points[idx];

        let base = self.timing_points[..=idx]
            .iter()
            .rev()
            .find(|p| !p.is_inherited())
            .or_else(|| self.timing_points.iter().find(|p| !p.is_inherited()))
            .map_or(DEFAULT_BEAT_LENGTH, |p| p.ms_per_beat);

        base / active.velocity_multiplier()
    }

    pub fn combo_color(&self, combo_index: usize) -> Rgb {
        self.palette.color(combo_index)
    }

    /// Time of the last moment any object needs attention
    pub fn end_time(&self) -> f64 {
        self.objects
            .iter()
            .map(|obj| match &obj.kind {
                HitObjectKind::Spinner(spinner) => spinner.end_time,
                _ => obj.time,
            })
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector2;
    use crate::{
        curve::CurveKind,
        hit_objects::{circle::Circle, slider::Slider, spinner::Spinner},
    };

    fn circle(time: f64) -> HitObject {
        HitObject::circle(time, Circle::new(Vector2::new(0.0, 0.0), 0))
    }

    fn chart(timing_points: Vec<TimingPoint>) -> Chart {
        Chart::new(vec![circle(0.0)], timing_points, Difficulty::default()).unwrap()
    }

    #[test]
    fn test_timing_point_selection() {
        let mut later = TimingPoint::new(1000.0, 400.0);
        later.volume = 50;

        let chart = chart(vec![
            TimingPoint::new(500.0, 300.0),
            TimingPoint::new(1000.0, 300.0),
            later,
        ]);

        // Before the first point
        assert_eq!(chart.timing_point_at(0.0).offset, 500.0);
        assert_eq!(chart.timing_point_at(999.0).offset, 500.0);
        // Same offset, later one wins
        assert_eq!(chart.timing_point_at(1000.0).volume, 50);
        assert_eq!(chart.timing_point_at(5000.0).ms_per_beat, 400.0);
    }

    #[test]
    fn test_beat_length_with_inherited_points() {
        let chart = chart(vec![
            TimingPoint::new(0.0, 500.0),
            TimingPoint::new(1000.0, -50.0),
            TimingPoint::new(2000.0, 250.0),
        ]);

        assert_eq!(chart.beat_length_at(500.0), 500.0);
        assert_eq!(chart.beat_length_at(1500.0), 250.0);
        assert_eq!(chart.beat_length_at(2500.0), 250.0);
    }

    #[test]
    fn test_inherited_before_any_uninherited() {
        let chart = chart(vec![TimingPoint::new(0.0, -200.0), TimingPoint::new(100.0, 400.0)]);

        assert_eq!(chart.beat_length_at(0.0), 800.0);
    }

    #[test]
    fn test_validation() {
        let tp = || vec![TimingPoint::new(0.0, 500.0)];

        assert_eq!(
            Chart::new(vec![circle(0.0)], vec![], Difficulty::default()).unwrap_err(),
            ChartError::NoTimingPoints
        );
        assert_eq!(
            Chart::new(vec![circle(10.0), circle(5.0)], tp(), Difficulty::default()).unwrap_err(),
            ChartError::UnsortedObjects(1)
        );
        assert_eq!(
            Chart::new(
                vec![HitObject::spinner(100.0, Spinner::new(50.0))],
                tp(),
                Difficulty::default()
            )
            .unwrap_err(),
            ChartError::InvalidSpinner(0)
        );

        let slider = Slider::new(Vector2::new(0.0, 0.0), 0, CurveKind::Linear, vec![], 100.0, 0);
        assert_eq!(
            Chart::new(vec![HitObject::slider(0.0, slider)], tp(), Difficulty::default())
                .unwrap_err(),
            ChartError::InvalidSlider(0)
        );
    }

    #[test]
    fn test_end_time() {
        let chart = Chart::new(
            vec![circle(100.0), HitObject::spinner(200.0, Spinner::new(900.0)), circle(300.0)],
            vec![TimingPoint::new(0.0, 500.0)],
            Difficulty::default(),
        )
        .unwrap();

        assert_eq!(chart.end_time(), 900.0);
    }
}
