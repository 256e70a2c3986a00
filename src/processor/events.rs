use smallvec::SmallVec;

use crate::{
    hit_objects::{Judgment, ObjectId},
    timing::{HitSoundMask, ResolvedSample},
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JudgmentEvent {
    pub object: ObjectId,
    pub judgment: Judgment,
    /// Time at which the judgment was made
    pub time: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HitSoundEvent {
    pub object: ObjectId,
    /// 0 for circles and slider heads, `n` for the n-th slider edge
    pub edge: usize,
    pub mask: HitSoundMask,
    pub sample: ResolvedSample,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ScoreEvent {
    pub object: ObjectId,
    /// Cumulative points after this judgment
    pub total: u64,
    pub hits: u32,
}

/// Everything that happened during a single `advance` call
#[derive(Debug, Default, Clone)]
pub struct FrameEvents {
    pub spawned: SmallVec<[ObjectId; 4]>,
    pub despawned: SmallVec<[ObjectId; 4]>,
    pub judgments: SmallVec<[JudgmentEvent; 4]>,
    pub hit_sounds: SmallVec<[HitSoundEvent; 4]>,
    pub scores: SmallVec<[ScoreEvent; 4]>,
}

impl FrameEvents {
    pub fn judge(&mut self, object: ObjectId, judgment: Judgment, time: f64) {
        tracing::trace!("[{time}] object {object} judged as {judgment:?}");

        self.judgments.push(JudgmentEvent {
            object,
            judgment,
            time,
        });
    }

    pub fn hit_sound(
        &mut self,
        object: ObjectId,
        edge: usize,
        mask: HitSoundMask,
        sample: ResolvedSample,
    ) {
        self.hit_sounds.push(HitSoundEvent {
            object,
            edge,
            mask,
            sample,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
            && self.despawned.is_empty()
            && self.judgments.is_empty()
            && self.hit_sounds.is_empty()
            && self.scores.is_empty()
    }
}
