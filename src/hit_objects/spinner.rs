use std::f64::consts::TAU;

use crate::{
    math::{calc_direction, diff_rate, wrap_angle, PLAYFIELD_CENTER},
    processor::events::FrameEvents,
};

use super::{FrameContext, Judgment, ObjectId, ObjectState, StateKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Spinner {
    pub end_time: f64,
}

impl Spinner {
    pub fn new(end_time: f64) -> Self {
        Self { end_time }
    }

    pub fn update(
        &self,
        id: ObjectId,
        start_time: f64,
        state: &mut ObjectState,
        ctx: &FrameContext,
        events: &mut FrameEvents,
    ) {
        let time = ctx.time();

        let StateKind::Spinner(spinner) = &mut state.kind else {
            return;
        };

        let active = time >= start_time && time <= self.end_time;

        if active && ctx.input.down {
            let angle = calc_direction(PLAYFIELD_CENTER, ctx.input.pos);

            // First frame of a press only records where it started
            if let Some(last) = spinner.last_angle {
                spinner.rotation += wrap_angle(angle - last);
            }

            spinner.last_angle = Some(angle);
        } else {
            spinner.last_angle = None;
        }

        spinner.opacity = if active { 1.0 } else { 0.0 };

        if !state.judgment.is_judged() && time > self.end_time {
            state.judgment = spinner.judge();
            events.judge(id, state.judgment, time);
        }

        spinner.phase = if time < start_time {
            SpinnerPhase::Idle
        } else if time <= self.end_time {
            SpinnerPhase::Spinning
        } else {
            SpinnerPhase::Done
        };
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum SpinnerPhase {
    #[default]
    Idle,
    Spinning,
    Done,
}

#[derive(Debug, Clone)]
pub struct SpinnerState {
    /// Accumulated signed rotation in radians
    pub rotation: f64,
    /// Cursor angle of the previous frame while the button is held
    pub last_angle: Option<f64>,
    pub duration: f64,
    /// Full rotations needed for a Great
    pub required_spins: f64,
    pub phase: SpinnerPhase,
    pub opacity: f64,
}

impl SpinnerState {
    pub fn new(start_time: f64, spinner: &Spinner, od: f64) -> Self {
        let duration = (spinner.end_time - start_time).max(0.0);
        let spins_per_second = diff_rate(od, 3.0, 5.0, 7.5);

        Self {
            rotation: 0.0,
            last_angle: None,
            duration,
            required_spins: (duration / 1000.0 * spins_per_second).max(1.0),
            phase: SpinnerPhase::default(),
            opacity: 0.0,
        }
    }

    /// Completed rotations, direction doesn't matter
    pub fn spins(&self) -> f64 {
        self.rotation.abs() / TAU
    }

    pub fn judge(&self) -> Judgment {
        let ratio = self.spins() / self.required_spins;

        if ratio >= 1.0 {
            Judgment::Great
        } else if ratio >= 0.75 {
            Judgment::Good
        } else if ratio >= 0.5 {
            Judgment::Meh
        } else {
            Judgment::Miss
        }
    }
}
