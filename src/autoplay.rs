use cgmath::Vector2;

use crate::{
    hit_objects::{HitObjectKind, ObjectId},
    math::PLAYFIELD_CENTER,
    osu_input::InputSnapshot,
    processor::Playback,
};

/// Radians per millisecond, a bit under 10 spins per second
const SPIN_SPEED: f64 = 0.06;
/// Keeps frame to frame angle difference unambiguous on slow frame rates
const MAX_SPIN_STEP: f64 = 2.5;
const SPIN_RADIUS: f64 = 50.0;

/// Perfect player, produces inputs that hit every object on time
#[derive(Debug, Clone)]
pub struct Autoplay {
    /// Current target
    next: ObjectId,
    /// Last object which received a press
    pressed: Option<ObjectId>,
    /// Slider which already got its final held frame
    held_through: Option<ObjectId>,
    last_down: bool,
    last_time: Option<f64>,
    pos: Vector2<f64>,
    spin_angle: f64,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self {
            next: 0,
            pressed: None,
            held_through: None,
            last_down: false,
            last_time: None,
            pos: PLAYFIELD_CENTER,
            spin_angle: 0.0,
        }
    }
}

impl Autoplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the frame at `time`, has to be called before
    /// `playback` is advanced to the same time
    pub fn snapshot(&mut self, playback: &Playback, time: f64) -> InputSnapshot {
        let dt = (time - self.last_time.unwrap_or(time)).max(0.0);
        let snapshot = self.next_snapshot(playback, time, dt);

        self.last_down = snapshot.down;
        self.last_time = Some(time);
        self.pos = snapshot.pos;

        snapshot
    }

    fn next_snapshot(&mut self, playback: &Playback, time: f64, dt: f64) -> InputSnapshot {
        let chart = playback.chart();
        let meh = playback.windows().hit_window.meh;

        loop {
            let id = self.next;
            let Some(obj) = chart.object(id) else {
                return InputSnapshot::idle(self.pos);
            };

            let state = playback.active_object(id).map(|active| &active.state);
            let pressed = self.pressed == Some(id);

            match &obj.kind {
                HitObjectKind::Circle(circle) => {
                    if pressed || time > obj.time + meh {
                        self.next += 1;
                        continue;
                    }

                    if time < obj.time {
                        return InputSnapshot::idle(circle.pos);
                    }

                    return self.press(id, circle.pos);
                }
                HitObjectKind::Slider(slider) => {
                    let held_through = self.held_through == Some(id);

                    if held_through || (!pressed && time > obj.time + meh) {
                        self.next += 1;
                        continue;
                    }

                    if time < obj.time {
                        return InputSnapshot::idle(slider.pos);
                    }

                    let slider_state = state.and_then(|state| state.as_slider());
                    let pos = slider_state.map_or(slider.pos, |s| s.ball_pos(time - obj.time));

                    if !pressed {
                        return self.press(id, pos);
                    }

                    let end = obj.time + slider_state.map_or(0.0, |s| s.total_time);
                    if time >= end {
                        self.held_through = Some(id);
                    }

                    return InputSnapshot::new(pos, true);
                }
                HitObjectKind::Spinner(spinner) => {
                    if time > spinner.end_time {
                        self.next += 1;
                        continue;
                    }

                    if time >= obj.time {
                        self.spin_angle += (SPIN_SPEED * dt).min(MAX_SPIN_STEP);
                    }

                    let pos = PLAYFIELD_CENTER
                        + Vector2::new(self.spin_angle.cos(), self.spin_angle.sin()) * SPIN_RADIUS;

                    return InputSnapshot::new(pos, time >= obj.time);
                }
            }
        }
    }

    /// Presses need a released button on the previous frame
    fn press(&mut self, id: ObjectId, pos: Vector2<f64>) -> InputSnapshot {
        if self.last_down {
            return InputSnapshot::idle(pos);
        }

        self.pressed = Some(id);
        InputSnapshot::new(pos, true)
    }
}
