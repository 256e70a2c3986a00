use cgmath::{InnerSpace, Vector2};

use crate::{
    difficulty::{BURST_SCALE_GROWTH, CIRCLE_FADEOUT_TIME, SCORE_FADEOUT_TIME},
    math::fade_out_easing,
    processor::events::FrameEvents,
    timing::{HitSoundMask, SampleInfo},
};

use super::{Burst, FrameContext, HitTier, Judgment, ObjectId, ObjectState, StateKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub pos: Vector2<f64>,
    pub combo_index: usize,
    pub hit_sound: HitSoundMask,
    pub sample: SampleInfo,
}

impl Circle {
    pub fn new(pos: Vector2<f64>, combo_index: usize) -> Self {
        Self {
            pos,
            combo_index,
            hit_sound: HitSoundMask::default(),
            sample: SampleInfo::default(),
        }
    }

    #[inline]
    pub fn contains(&self, pos: Vector2<f64>, radius: f64) -> bool {
        (pos - self.pos).magnitude2() <= radius * radius
    }

    /// Checks if circle is hittable as well as calculating hit result
    pub fn try_hit(&self, start_time: f64, ctx: &FrameContext) -> Option<HitTier> {
        if !self.contains(ctx.input.pos, ctx.windows.circle_radius) {
            return None;
        }

        ctx.windows.hit_window.judge(ctx.time() - start_time)
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
        let hit_window = &ctx.windows.hit_window;

        if !state.judgment.is_judged() && hit_window.is_missed(start_time, time) {
            state.judgment = Judgment::Miss;
            events.judge(id, Judgment::Miss, time);
        }

        let StateKind::Circle(circle_state) = &mut state.kind else {
            return;
        };

        circle_state.visual = circle_visual(start_time, state.judgment, state.click_time, ctx);
        circle_state.phase = circle_phase(start_time, state.judgment, state.click_time, &circle_state.visual, ctx);
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum CirclePhase {
    #[default]
    Approaching,
    Hit(HitTier),
    Missed,
    ResultFading,
    Expired,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CircleVisual {
    /// Hit circle, overlay and combo number
    pub opacity: f64,
    pub approach_opacity: f64,
    /// Relative to the hit circle
    pub approach_scale: f64,
    pub burst: Option<Burst>,
    pub result_opacity: f64,
}

#[derive(Debug, Default, Clone)]
pub struct CircleState {
    pub phase: CirclePhase,
    pub visual: CircleVisual,
}

/// Visuals of a hit circle, also used for slider heads
pub(crate) fn head_visual(
    start_time: f64,
    click_time: Option<f64>,
    ctx: &FrameContext,
) -> (f64, f64, Option<Burst>) {
    let time = ctx.time();
    let windows = ctx.windows;
    let diff = start_time - time;
    let meh = windows.hit_window.meh;

    if let Some(click_time) = click_time {
        let time_after = time - click_time;
        let burst = Burst {
            opacity: (1.0 - time_after / CIRCLE_FADEOUT_TIME).max(0.0),
            scale: 1.0 + BURST_SCALE_GROWTH * time_after / CIRCLE_FADEOUT_TIME,
        };

        return (0.0, 0.0, Some(burst));
    }

    let opacity = if let Some(alpha) = windows.fade_in_alpha(diff) {
        alpha
    } else if diff > windows.approach_time {
        0.0
    } else if -diff <= meh {
        1.0
    } else {
        fade_out_easing((-diff - meh) / CIRCLE_FADEOUT_TIME)
    };

    let approach_opacity = windows.approach_alpha(diff).unwrap_or(opacity);

    (opacity, approach_opacity, None)
}

fn circle_visual(
    start_time: f64,
    judgment: Judgment,
    click_time: Option<f64>,
    ctx: &FrameContext,
) -> CircleVisual {
    let time = ctx.time();
    let diff = start_time - time;

    let (opacity, approach_opacity, burst) = head_visual(start_time, click_time, ctx);

    let result_opacity = if judgment.is_hit() || time > start_time + ctx.windows.hit_window.meh {
        fade_out_easing(-diff / SCORE_FADEOUT_TIME)
    } else {
        0.0
    };

    CircleVisual {
        opacity,
        approach_opacity,
        approach_scale: ctx.windows.approach_scale(diff, ctx.config.approach_scale),
        burst,
        result_opacity,
    }
}

fn circle_phase(
    start_time: f64,
    judgment: Judgment,
    click_time: Option<f64>,
    visual: &CircleVisual,
    ctx: &FrameContext,
) -> CirclePhase {
    let time = ctx.time();

    match (judgment, click_time) {
        (Judgment::Unjudged, _) => CirclePhase::Approaching,
        (judgment, Some(click_time)) if time - click_time < CIRCLE_FADEOUT_TIME => {
            judgment.tier().map_or(CirclePhase::Missed, CirclePhase::Hit)
        }
        (Judgment::Miss, _)
            if time - start_time - ctx.windows.hit_window.meh < CIRCLE_FADEOUT_TIME =>
        {
            CirclePhase::Missed
        }
        _ if visual.result_opacity > 0.0 => CirclePhase::ResultFading,
        _ => CirclePhase::Expired,
    }
}
