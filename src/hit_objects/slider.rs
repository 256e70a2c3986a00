use cgmath::{InnerSpace, Vector2};

use crate::{
    curve::{self, CurveConfig, CurveKind, CurvePath},
    difficulty::{
        BALL_FADEOUT_TIME, BALL_SCALE_GROWTH, FOLLOW_FADEOUT_TIME, FOLLOW_ZOOM_IN_TIME,
        SCORE_FADEOUT_TIME, SLIDER_FADEOUT_TIME,
    },
    math::fade_out_easing,
    processor::events::FrameEvents,
    timing::{HitSoundMask, SampleInfo},
};

use super::{
    circle::head_visual, Burst, FrameContext, HitTier, Judgment, ObjectId, ObjectState,
    StateKind,
};

const MIN_FOLLOW_SIZE: f64 = 1.0;
const MAX_FOLLOW_SIZE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    /// Head position, also the first point of the curve
    pub pos: Vector2<f64>,
    pub combo_index: usize,
    /// Every control point after the head
    pub control_points: Vec<Vector2<f64>>,
    pub curve_kind: CurveKind,
    pub pixel_length: f64,

    /// Total slides
    /// Example:
    /// `*===R===R===*` => 3
    /// `*===R===*` => 2
    /// `*===*` => 1
    pub repeat_count: u32,

    /// Indexed by edge: head, every reverse, tail
    pub edge_hit_sounds: Vec<HitSoundMask>,
    pub edge_samples: Vec<SampleInfo>,
}

impl Slider {
    pub fn new(
        pos: Vector2<f64>,
        combo_index: usize,
        curve_kind: CurveKind,
        control_points: Vec<Vector2<f64>>,
        pixel_length: f64,
        repeat_count: u32,
    ) -> Self {
        Self {
            pos,
            combo_index,
            control_points,
            curve_kind,
            pixel_length,
            repeat_count,
            edge_hit_sounds: Vec::new(),
            edge_samples: Vec::new(),
        }
    }

    /// Control points including the head
    pub fn curve_points(&self) -> Vec<Vector2<f64>> {
        let mut points = Vec::with_capacity(self.control_points.len() + 1);
        points.push(self.pos);
        points.extend_from_slice(&self.control_points);
        points
    }

    /// Hit sound of an edge, missing entries fall back to defaults
    pub fn edge_sound(&self, edge: usize) -> (HitSoundMask, SampleInfo) {
        (
            self.edge_hit_sounds.get(edge).copied().unwrap_or_default(),
            self.edge_samples.get(edge).copied().unwrap_or_default(),
        )
    }

    /// Checks if the click lands on the head during its hit window
    ///
    /// Position is taken from the path, so a late click has to follow
    /// the ball instead of the starting head position
    pub fn try_hit_head(
        &self,
        start_time: f64,
        state: &SliderState,
        ctx: &FrameContext,
    ) -> Option<HitTier> {
        let elapsed = ctx.time() - start_time;
        let progress = state.progress(elapsed);
        let pos = state.path.point_at(progress.position);

        if (ctx.input.pos - pos).magnitude2() > ctx.windows.circle_radius.powi(2) {
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
        let timing = state.timing;
        let elapsed = time - start_time;
        let radius = ctx.windows.circle_radius;

        let StateKind::Slider(slider) = &mut state.kind else {
            return;
        };

        let progress = slider.progress(elapsed);
        let ball = slider.path.point_at(progress.position);
        let sliding = elapsed >= 0.0 && elapsed < slider.total_time;

        let follow_radius = slider.follow.size * radius;
        let following = ctx.input.down && (ctx.input.pos - ball).magnitude() <= follow_radius;

        let edge = progress.raw.floor() as u32;
        if edge > slider.last_edge {
            for n in (slider.last_edge + 1)..=edge.min(slider.repeat_count) {
                if !following {
                    continue;
                }

                slider.followed_edges += 1;

                let (mask, sample) = self.edge_sound(n as usize);
                events.hit_sound(id, n as usize, mask, sample.resolve(&timing));
            }

            slider.last_edge = edge;
        }

        slider.current_repeat = progress.leg + 1;

        let dt = (time - slider.last_update.unwrap_or(time)).max(0.0);
        slider.last_update = Some(time);
        slider.follow = if sliding {
            let direction = if following { 1.0 } else { -1.0 };
            resize_follow(slider.follow, dt, direction, FOLLOW_ZOOM_IN_TIME)
        } else {
            resize_follow(slider.follow, dt, -1.0, FOLLOW_FADEOUT_TIME)
        };

        let head_closed = slider.head.is_some() || ctx.windows.hit_window.is_missed(start_time, time);

        if !state.judgment.is_judged() && elapsed >= slider.total_time && head_closed {
            state.judgment = slider.head.map_or(Judgment::Miss, Judgment::from);
            events.judge(id, state.judgment, time);
        }

        slider.visual = slider_visual(self, start_time, slider, ball, state.judgment, state.click_time, ctx);
        slider.phase = slider_phase(elapsed, slider, state.judgment);
    }
}

/// Follow circle animation, size is relative to the hit circle
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FollowState {
    pub size: f64,
}

impl Default for FollowState {
    fn default() -> Self {
        Self { size: MIN_FOLLOW_SIZE }
    }
}

/// Grows (`direction > 0`) or shrinks the follow circle by `dt`
/// milliseconds worth of animation, a full resize takes `duration`
pub fn resize_follow(state: FollowState, dt: f64, direction: f64, duration: f64) -> FollowState {
    let step = direction.signum() * dt / duration;

    FollowState {
        size: (state.size + step).clamp(MIN_FOLLOW_SIZE, MAX_FOLLOW_SIZE),
    }
}

/// Where the ball is for a given elapsed time
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlideProgress {
    /// Elapsed slides, in `[0, repeat_count]`
    pub raw: f64,
    /// Zero based index of the current slide
    pub leg: u32,
    /// Fraction of the path, `1.0` is the tail
    pub position: f64,
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum SliderPhase {
    #[default]
    Approaching,
    Sliding,
    Completed,
    ResultFading,
    Expired,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReverseArrow {
    pub pos: Vector2<f64>,
    /// Radians
    pub angle: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BallVisual {
    pub pos: Vector2<f64>,
    pub opacity: f64,
    pub scale: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SliderVisual {
    pub body_opacity: f64,
    pub head_opacity: f64,
    pub approach_opacity: f64,
    pub approach_scale: f64,
    pub burst: Option<Burst>,
    pub ball: Option<BallVisual>,
    pub follow_scale: f64,
    pub follow_opacity: f64,
    pub end_arrow: Option<ReverseArrow>,
    pub start_arrow: Option<ReverseArrow>,
    pub result_opacity: f64,
}

#[derive(Debug, Clone)]
pub struct SliderState {
    pub path: CurvePath,
    /// Duration of a single slide
    pub slider_time: f64,
    pub total_time: f64,
    pub repeat_count: u32,
    /// Result of the head click, becomes the slider judgment
    pub head: Option<HitTier>,
    /// Last edge index the ball went through
    pub last_edge: u32,
    /// One based index of the current slide
    pub current_repeat: u32,
    /// Edges passed while following
    pub followed_edges: u32,
    pub follow: FollowState,
    pub last_update: Option<f64>,
    pub phase: SliderPhase,
    pub visual: SliderVisual,
}

impl SliderState {
    pub fn new(
        slider: &Slider,
        beat_length: f64,
        slider_multiplier: f64,
        curve_config: &CurveConfig,
    ) -> Self {
        let path = curve::generate(
            slider.curve_kind,
            &slider.curve_points(),
            slider.pixel_length,
            curve_config,
        );

        let repeat_count = slider.repeat_count.max(1);
        let slider_time = beat_length * slider.pixel_length / (slider_multiplier * 100.0);
        let slider_time = if slider_time.is_finite() { slider_time.max(0.0) } else { 0.0 };

        Self {
            path,
            slider_time,
            total_time: slider_time * repeat_count as f64,
            repeat_count,
            head: None,
            last_edge: 0,
            current_repeat: 1,
            followed_edges: 0,
            follow: FollowState::default(),
            last_update: None,
            phase: SliderPhase::default(),
            visual: SliderVisual::default(),
        }
    }

    /// Ball progress `elapsed` milliseconds after the slider start,
    /// odd slides go backwards
    pub fn progress(&self, elapsed: f64) -> SlideProgress {
        let repeat = self.repeat_count as f64;

        let raw = if self.slider_time > 0.0 {
            (elapsed / self.slider_time).clamp(0.0, repeat)
        } else if elapsed >= 0.0 {
            repeat
        } else {
            0.0
        };

        let leg = (raw.floor() as u32).min(self.repeat_count - 1);
        let frac = raw - leg as f64;
        let position = if leg % 2 == 1 { 1.0 - frac } else { frac };

        SlideProgress { raw, leg, position }
    }

    /// Ball position `elapsed` milliseconds after the slider start
    pub fn ball_pos(&self, elapsed: f64) -> Vector2<f64> {
        self.path.point_at(self.progress(elapsed).position)
    }
}

fn reverse_arrows(state: &SliderState, elapsed: f64) -> (Option<ReverseArrow>, Option<ReverseArrow>) {
    let repeat = state.repeat_count;

    if elapsed >= state.total_time {
        return (None, None);
    }

    let end_arrow = ReverseArrow {
        pos: state.path.end(),
        angle: state.path.end_arrow_angle(),
    };
    let start_arrow = ReverseArrow {
        pos: state.path.start(),
        angle: state.path.start_arrow_angle(),
    };

    if elapsed < 0.0 {
        return ((repeat > 1).then_some(end_arrow), None);
    }

    // Last slide in each direction doesn't need its arrow anymore
    let final_end = repeat - repeat % 2;
    let final_start = repeat - 1 + repeat % 2;

    let end = (repeat > 1 && state.current_repeat < final_end).then_some(end_arrow);
    let start = (repeat > 2 && state.current_repeat < final_start).then_some(start_arrow);

    (end, start)
}

fn slider_visual(
    slider: &Slider,
    start_time: f64,
    state: &SliderState,
    ball_pos: Vector2<f64>,
    judgment: Judgment,
    click_time: Option<f64>,
    ctx: &FrameContext,
) -> SliderVisual {
    let windows = ctx.windows;
    let time = ctx.time();
    let diff = start_time - time;
    let elapsed = -diff;
    let after = elapsed - state.total_time;

    let body_opacity = if let Some(alpha) = windows.fade_in_alpha(diff) {
        alpha
    } else if diff > windows.approach_time {
        0.0
    } else if after < 0.0 {
        1.0
    } else {
        fade_out_easing(after / SLIDER_FADEOUT_TIME)
    };

    let (head_opacity, approach_opacity, burst) = head_visual(start_time, click_time, ctx);

    let ball = if elapsed < 0.0 {
        None
    } else if after < 0.0 {
        Some(BallVisual { pos: ball_pos, opacity: 1.0, scale: 1.0 })
    } else {
        let opacity = fade_out_easing(after / BALL_FADEOUT_TIME);
        (opacity > 0.0).then_some(BallVisual {
            pos: ball_pos,
            opacity,
            scale: 1.0 + BALL_SCALE_GROWTH * after / BALL_FADEOUT_TIME,
        })
    };

    let (end_arrow, start_arrow) = if slider.repeat_count > 1 {
        reverse_arrows(state, elapsed)
    } else {
        (None, None)
    };

    let result_opacity = if judgment.is_judged() {
        fade_out_easing(after / SCORE_FADEOUT_TIME)
    } else {
        0.0
    };

    SliderVisual {
        body_opacity,
        head_opacity,
        approach_opacity,
        approach_scale: windows.approach_scale(diff, ctx.config.approach_scale),
        burst,
        ball,
        follow_scale: state.follow.size,
        follow_opacity: state.follow.size - MIN_FOLLOW_SIZE,
        end_arrow,
        start_arrow,
        result_opacity,
    }
}

fn slider_phase(elapsed: f64, state: &SliderState, judgment: Judgment) -> SliderPhase {
    if !judgment.is_judged() {
        return if elapsed < 0.0 {
            SliderPhase::Approaching
        } else {
            SliderPhase::Sliding
        };
    }

    let after = elapsed - state.total_time;

    if after < SLIDER_FADEOUT_TIME {
        SliderPhase::Completed
    } else if state.visual.result_opacity > 0.0 {
        SliderPhase::ResultFading
    } else {
        SliderPhase::Expired
    }
}
