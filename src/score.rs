use crate::{
    hit_objects::Judgment,
    processor::events::{JudgmentEvent, ScoreEvent},
};

/// Running score, only ever changed by judgment events
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreAccumulator {
    total: u64,
    hits: u32,
    greats: u32,
    goods: u32,
    mehs: u32,
    misses: u32,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a judgment, returns the updated score for hits
    pub fn apply(&mut self, event: &JudgmentEvent) -> Option<ScoreEvent> {
        match event.judgment {
            Judgment::Unjudged => return None,
            Judgment::Miss => {
                self.misses += 1;
                return None;
            }
            Judgment::Great => self.greats += 1,
            Judgment::Good => self.goods += 1,
            Judgment::Meh => self.mehs += 1,
        }

        self.total += event.judgment.points() as u64;
        self.hits += 1;

        Some(ScoreEvent {
            object: event.object,
            total: self.total,
            hits: self.hits,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn greats(&self) -> u32 {
        self.greats
    }

    pub fn goods(&self) -> u32 {
        self.goods
    }

    pub fn mehs(&self) -> u32 {
        self.mehs
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Weighted accuracy in `[0, 1]`, `1.0` before anything is judged
    pub fn accuracy(&self) -> f64 {
        let judged = self.hits + self.misses;

        if judged == 0 {
            return 1.0;
        }

        self.total as f64 / (judged as f64 * 300.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(object: usize, judgment: Judgment) -> JudgmentEvent {
        JudgmentEvent { object, judgment, time: 0.0 }
    }

    #[test]
    fn test_accumulates_hits() {
        let mut score = ScoreAccumulator::new();

        let first = score.apply(&event(0, Judgment::Great)).unwrap();
        assert_eq!((first.total, first.hits), (300, 1));

        let second = score.apply(&event(1, Judgment::Meh)).unwrap();
        assert_eq!((second.total, second.hits), (350, 2));
        assert_eq!(second.object, 1);
    }

    #[test]
    fn test_miss_keeps_score() {
        let mut score = ScoreAccumulator::new();
        score.apply(&event(0, Judgment::Good));

        assert_eq!(score.apply(&event(1, Judgment::Miss)), None);
        assert_eq!(score.total(), 100);
        assert_eq!(score.hits(), 1);
        assert_eq!(score.misses(), 1);
    }

    #[test]
    fn test_accuracy() {
        let mut score = ScoreAccumulator::new();
        assert_eq!(score.accuracy(), 1.0);

        score.apply(&event(0, Judgment::Great));
        score.apply(&event(1, Judgment::Miss));

        assert_eq!(score.accuracy(), 0.5);
    }
}
