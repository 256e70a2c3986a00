use std::time::Instant;

/// Authoritative playback clock
pub trait Clock {
    /// Current position in milliseconds, frozen while paused
    fn position_ms(&mut self) -> f64;

    /// Starts (or resumes) playback from `offset_ms`
    fn play(&mut self, offset_ms: f64);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;
}

pub struct Timer {
    now: Instant,
    last_time: f64, // Milliseconds
    paused: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
            last_time: 0.0,
            paused: true,
        }
    }

    pub fn unpause(&mut self) {
        self.paused = false;

        self.now = Instant::now();
    }

    /// Updates and returns current time
    pub fn update(&mut self) -> f64 {
        if self.paused {
            return self.last_time
        };

        let now = Instant::now();

        let diff = now.duration_since(self.now);

        self.last_time += diff.as_secs_f64() * 1000.0;

        self.now = now;

        self.last_time
    }
}

impl Clock for Timer {
    fn position_ms(&mut self) -> f64 {
        self.update()
    }

    fn play(&mut self, offset_ms: f64) {
        self.last_time = offset_ms;
        self.unpause();
    }

    fn pause(&mut self) {
        self.update();
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
