pub mod events;

use events::FrameEvents;

use crate::{
    chart::Chart,
    config::Config,
    difficulty::DifficultyWindows,
    draw_order::DrawOrder,
    hit_objects::{FrameContext, ObjectId},
    osu_input::{InputSnapshot, OsuInput},
    rgb::Rgb,
    scheduler::{ActiveObject, Scheduler},
    score::ScoreAccumulator,
    timer::Clock,
};

/// Responsible for
/// 1. Keeping the set of active objects up to date
/// 2. Handing inputs to them and collecting judgments
/// 3. Turning judgments into score
pub struct Playback {
    chart: Chart,
    windows: DifficultyWindows,
    config: Config,
    scheduler: Scheduler,
    score: ScoreAccumulator,
    last_down: bool,
}

impl Playback {
    pub fn new(chart: Chart, config: Config) -> Self {
        let windows = DifficultyWindows::new(chart.difficulty());

        tracing::info!(
            "Starting playback: {} objects, approach {}ms, windows {}/{}/{}ms",
            chart.len(),
            windows.approach_time,
            windows.hit_window.great,
            windows.hit_window.good,
            windows.hit_window.meh,
        );

        Self {
            chart,
            windows,
            config,
            scheduler: Scheduler::new(),
            score: ScoreAccumulator::new(),
            last_down: false,
        }
    }

    /// Moves playback to `time`, everything that happened in between is
    /// reported through returned events
    pub fn advance(&mut self, time: f64, snapshot: InputSnapshot) -> FrameEvents {
        let mut events = FrameEvents::default();

        let input = OsuInput::new(time, snapshot, self.last_down);
        self.last_down = input.down;

        self.scheduler.update(&self.chart, &self.config, time, &mut events);

        let ctx = FrameContext {
            input: &input,
            windows: &self.windows,
            config: &self.config,
        };

        if input.is_hit_no_hold() {
            // Only one object can take a click
            for active in self.scheduler.active_mut() {
                let id = active.id();
                let Some(obj) = self.chart.object(id) else {
                    continue;
                };

                if obj.on_click(id, &mut active.state, &ctx, &mut events) {
                    break;
                }
            }
        }

        for active in self.scheduler.active_mut() {
            let id = active.id();
            if let Some(obj) = self.chart.object(id) {
                obj.update(id, &mut active.state, &ctx, &mut events);
            }
        }

        for judgment in &events.judgments {
            if let Some(score) = self.score.apply(judgment) {
                events.scores.push(score);
            }
        }

        events
    }

    /// Same as [`Playback::advance`] with time taken from `clock`
    pub fn tick(&mut self, clock: &mut impl Clock, snapshot: InputSnapshot) -> FrameEvents {
        let time = clock.position_ms();
        self.advance(time, snapshot)
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn windows(&self) -> &DifficultyWindows {
        &self.windows
    }

    pub fn score(&self) -> &ScoreAccumulator {
        &self.score
    }

    pub fn active(&self) -> &[ActiveObject] {
        self.scheduler.active()
    }

    pub fn active_object(&self, id: ObjectId) -> Option<&ActiveObject> {
        self.scheduler.get(id)
    }

    /// Combo colour of a circle or slider, spinners have none
    pub fn object_color(&self, id: ObjectId) -> Option<Rgb> {
        let combo_index = self.chart.object(id)?.combo_index()?;
        Some(self.chart.combo_color(combo_index))
    }

    pub fn draw_order(&self) -> &DrawOrder {
        self.scheduler.draw_order()
    }

    pub fn is_finished(&self) -> bool {
        self.scheduler.is_finished(&self.chart)
    }
}
