use crate::{
    autoplay::Autoplay, math::PLAYFIELD_CENTER, osu_input::InputSnapshot, processor::Playback,
};

/// Drives a playback at a fixed frame step without a real clock.
/// Inputs come from [`Autoplay`] when the config enables it, otherwise
/// the cursor rests in the middle of the playfield.
pub struct Runner {
    start: f64,
    step: f64,
    autoplay: Option<Autoplay>,
}

impl Runner {
    /// Starts `lead_in` ms before the first object
    pub fn new(playback: &Playback, fps: f64, lead_in: f64) -> Self {
        let start = playback
            .chart()
            .objects()
            .first()
            .map_or(0.0, |obj| obj.time)
            - lead_in;

        Self {
            start,
            step: 1000.0 / fps,
            autoplay: playback.config().autoplay.then(Autoplay::new),
        }
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Runs until every object is done, returns the amount of frames
    pub fn run(&mut self, playback: &mut Playback) -> u64 {
        let mut frame = 0u64;

        while !playback.is_finished() {
            let time = self.start + frame as f64 * self.step;

            let input = match &mut self.autoplay {
                Some(autoplay) => autoplay.snapshot(playback, time),
                None => InputSnapshot::idle(PLAYFIELD_CENTER),
            };

            let events = playback.advance(time, input);

            for &id in &events.spawned {
                if let Some(color) = playback.object_color(id) {
                    tracing::debug!("[{time:.0}] object {id} spawned with colour {color:?}");
                }
            }

            for judgment in &events.judgments {
                tracing::debug!(
                    "[{:.0}] object {} -> {:?}",
                    judgment.time,
                    judgment.object,
                    judgment.judgment
                );
            }

            frame += 1;
        }

        frame
    }
}
