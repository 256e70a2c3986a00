#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum SampleSet {
    /// Use whatever the surrounding context provides
    #[default]
    Auto,
    Normal,
    Soft,
    Drum,
}

impl SampleSet {
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Normal,
            2 => Self::Soft,
            3 => Self::Drum,
            _ => Self::Auto,
        }
    }

    /// `self` unless it's `Auto`
    #[inline]
    pub fn or(self, fallback: SampleSet) -> SampleSet {
        match self {
            SampleSet::Auto => fallback,
            set => set,
        }
    }
}

/// Additional sounds on top of the normal one, which is always played
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct HitSoundMask(pub u8);

impl HitSoundMask {
    pub const WHISTLE: u8 = 2;
    pub const FINISH: u8 = 4;
    pub const CLAP: u8 = 8;

    pub fn whistle(&self) -> bool {
        self.0 & Self::WHISTLE != 0
    }

    pub fn finish(&self) -> bool {
        self.0 & Self::FINISH != 0
    }

    pub fn clap(&self) -> bool {
        self.0 & Self::CLAP != 0
    }
}

/// Per object (or per slider edge) sample overrides
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct SampleInfo {
    pub normal_set: SampleSet,
    pub addition_set: SampleSet,
    /// `None` to use timing point volume
    pub volume: Option<u8>,
}

/// Sample info after every fallback has been applied
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedSample {
    pub normal_set: SampleSet,
    pub addition_set: SampleSet,
    pub volume: u8,
}

impl SampleInfo {
    pub fn resolve(&self, timing: &TimingPoint) -> ResolvedSample {
        let normal_set = self.normal_set.or(timing.sample_set).or(SampleSet::Normal);
        let addition_set = self.addition_set.or(normal_set);

        ResolvedSample {
            normal_set,
            addition_set,
            volume: self.volume.unwrap_or(timing.volume),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimingPoint {
    pub offset: f64,
    /// Negative values mark an inherited point which only
    /// changes slider velocity: `-100 / ms_per_beat`
    pub ms_per_beat: f64,
    pub sample_set: SampleSet,
    pub volume: u8,
}

impl TimingPoint {
    pub fn new(offset: f64, ms_per_beat: f64) -> Self {
        Self {
            offset,
            ms_per_beat,
            sample_set: SampleSet::Normal,
            volume: 100,
        }
    }

    #[inline]
    pub fn is_inherited(&self) -> bool {
        self.ms_per_beat < 0.0
    }

    /// Slider velocity multiplier of an inherited point
    pub fn velocity_multiplier(&self) -> f64 {
        if self.is_inherited() {
            (-100.0 / self.ms_per_beat).clamp(0.1, 10.0)
        } else {
            1.0
        }
    }
}
