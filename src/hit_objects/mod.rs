pub mod circle;
pub mod hit_window;
pub mod slider;
pub mod spinner;

use cgmath::Vector2;
use circle::{Circle, CircleState};
use slider::{Slider, SliderState};
use spinner::{Spinner, SpinnerState};

use crate::{
    chart::Chart,
    config::Config,
    difficulty::DifficultyWindows,
    osu_input::OsuInput,
    processor::events::FrameEvents,
    timing::TimingPoint,
};

/// Index of an object in its chart
pub type ObjectId = usize;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HitTier {
    Great,
    Good,
    Meh,
}

impl HitTier {
    pub fn points(&self) -> u32 {
        match self {
            HitTier::Great => 300,
            HitTier::Good => 100,
            HitTier::Meh => 50,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Judgment {
    #[default]
    Unjudged,
    Great,
    Good,
    Meh,
    Miss,
}

impl Judgment {
    pub fn tier(&self) -> Option<HitTier> {
        match self {
            Judgment::Great => Some(HitTier::Great),
            Judgment::Good => Some(HitTier::Good),
            Judgment::Meh => Some(HitTier::Meh),
            Judgment::Unjudged | Judgment::Miss => None,
        }
    }

    pub fn points(&self) -> u32 {
        self.tier().map_or(0, |tier| tier.points())
    }

    #[inline]
    pub fn is_judged(&self) -> bool {
        *self != Judgment::Unjudged
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.tier().is_some()
    }
}

impl From<HitTier> for Judgment {
    fn from(value: HitTier) -> Self {
        match value {
            HitTier::Great => Judgment::Great,
            HitTier::Good => Judgment::Good,
            HitTier::Meh => Judgment::Meh,
        }
    }
}

/// Visual state of a hit burst, scale is relative to the hit circle
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Burst {
    pub opacity: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitObject {
    pub time: f64,
    pub kind: HitObjectKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HitObjectKind {
    Circle(Circle),
    Slider(Slider),
    Spinner(Spinner),
}

impl HitObject {
    pub fn circle(time: f64, circle: Circle) -> Self {
        Self { time, kind: HitObjectKind::Circle(circle) }
    }

    pub fn slider(time: f64, slider: Slider) -> Self {
        Self { time, kind: HitObjectKind::Slider(slider) }
    }

    pub fn spinner(time: f64, spinner: Spinner) -> Self {
        Self { time, kind: HitObjectKind::Spinner(spinner) }
    }

    pub fn pos(&self) -> Option<Vector2<f64>> {
        match &self.kind {
            HitObjectKind::Circle(circle) => Some(circle.pos),
            HitObjectKind::Slider(slider) => Some(slider.pos),
            HitObjectKind::Spinner(_) => None,
        }
    }

    pub fn combo_index(&self) -> Option<usize> {
        match &self.kind {
            HitObjectKind::Circle(circle) => Some(circle.combo_index),
            HitObjectKind::Slider(slider) => Some(slider.combo_index),
            HitObjectKind::Spinner(_) => None,
        }
    }

    /// Builds runtime state once the object gets activated
    pub fn create_state(&self, chart: &Chart, config: &Config) -> ObjectState {
        let timing = *chart.timing_point_at(self.time);

        let kind = match &self.kind {
            HitObjectKind::Circle(_) => StateKind::Circle(CircleState::default()),
            HitObjectKind::Slider(slider) => {
                let beat_length = chart.beat_length_at(self.time);
                StateKind::Slider(SliderState::new(
                    slider,
                    beat_length,
                    chart.difficulty().slider_multiplier,
                    &config.curve,
                ))
            }
            HitObjectKind::Spinner(spinner) => StateKind::Spinner(SpinnerState::new(
                self.time,
                spinner,
                chart.difficulty().od,
            )),
        };

        ObjectState {
            judgment: Judgment::Unjudged,
            click_time: None,
            timing,
            kind,
        }
    }

    /// Tries to consume a click, returns `true` if the click
    /// was attributed to this object
    pub fn on_click(
        &self,
        id: ObjectId,
        state: &mut ObjectState,
        ctx: &FrameContext,
        events: &mut FrameEvents,
    ) -> bool {
        if state.judgment.is_judged() {
            return false;
        }

        match (&self.kind, &mut state.kind) {
            (HitObjectKind::Circle(circle), StateKind::Circle(_)) => {
                let Some(tier) = circle.try_hit(self.time, ctx) else {
                    return false;
                };

                state.judgment = tier.into();
                state.click_time = Some(ctx.input.ts);

                events.judge(id, state.judgment, ctx.input.ts);
                events.hit_sound(id, 0, circle.hit_sound, circle.sample.resolve(&state.timing));

                true
            }
            (HitObjectKind::Slider(slider), StateKind::Slider(slider_state)) => {
                if state.click_time.is_some() {
                    return false;
                }

                let Some(tier) = slider.try_hit_head(self.time, slider_state, ctx) else {
                    return false;
                };

                slider_state.head = Some(tier);
                state.click_time = Some(ctx.input.ts);

                let (mask, sample) = slider.edge_sound(0);
                events.hit_sound(id, 0, mask, sample.resolve(&state.timing));

                true
            }
            _ => false,
        }
    }

    /// Per frame update of visual and judgment state
    pub fn update(
        &self,
        id: ObjectId,
        state: &mut ObjectState,
        ctx: &FrameContext,
        events: &mut FrameEvents,
    ) {
        match &self.kind {
            HitObjectKind::Circle(circle) => circle.update(id, self.time, state, ctx, events),
            HitObjectKind::Slider(slider) => slider.update(id, self.time, state, ctx, events),
            HitObjectKind::Spinner(spinner) => spinner.update(id, self.time, state, ctx, events),
        }
    }
}

/// Runtime part of an object, lives only while the object is active
#[derive(Debug, Clone)]
pub struct ObjectState {
    /// Assigned at most once
    pub judgment: Judgment,
    pub click_time: Option<f64>,
    /// Timing point active at the object time
    pub timing: TimingPoint,
    pub kind: StateKind,
}

#[derive(Debug, Clone)]
pub enum StateKind {
    Circle(CircleState),
    Slider(SliderState),
    Spinner(SpinnerState),
}

impl ObjectState {
    /// Extra time the object stays relevant after its start time
    pub fn duration(&self) -> f64 {
        match &self.kind {
            StateKind::Circle(_) => 0.0,
            StateKind::Slider(slider) => slider.total_time,
            StateKind::Spinner(spinner) => spinner.duration,
        }
    }

    pub fn as_circle(&self) -> Option<&CircleState> {
        match &self.kind {
            StateKind::Circle(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_slider(&self) -> Option<&SliderState> {
        match &self.kind {
            StateKind::Slider(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_spinner(&self) -> Option<&SpinnerState> {
        match &self.kind {
            StateKind::Spinner(state) => Some(state),
            _ => None,
        }
    }
}

/// Inputs shared by every object update during a single frame
pub struct FrameContext<'a> {
    pub input: &'a OsuInput,
    pub windows: &'a DifficultyWindows,
    pub config: &'a Config,
}

impl FrameContext<'_> {
    #[inline]
    pub fn time(&self) -> f64 {
        self.input.ts
    }
}
