use cgmath::Vector2;

use crate::math::denormalize;

/// Cursor and button state sampled by the host once per frame
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputSnapshot {
    /// Cursor position in playfield coordinates
    pub pos: Vector2<f64>,
    /// Any of the hit buttons is down
    pub down: bool,
}

impl InputSnapshot {
    pub fn new(pos: Vector2<f64>, down: bool) -> Self {
        Self { pos, down }
    }

    /// Cursor position sampled in `[0, 1]` space
    pub fn from_normalized(pos: Vector2<f64>, down: bool) -> Self {
        Self {
            pos: denormalize(pos),
            down,
        }
    }

    pub fn idle(pos: Vector2<f64>) -> Self {
        Self { pos, down: false }
    }
}

#[derive(Debug, Clone)]
pub struct OsuInput {
    /// A timestamp relative to the beginning of the map
    pub ts: f64,

    /// Cursors position
    pub pos: Vector2<f64>,

    /// Button pressed
    pub down: bool,

    /// Button was already down on the previous frame
    pub hold: bool,
}

impl OsuInput {
    pub fn new(ts: f64, snapshot: InputSnapshot, last_down: bool) -> Self {
        Self {
            ts,
            pos: snapshot.pos,
            down: snapshot.down,
            hold: last_down,
        }
    }

    /// Returns only there's input which is not currently hold
    #[inline]
    pub fn is_hit_no_hold(&self) -> bool {
        self.down && !self.hold
    }
}

#[test]
fn test_press_edge() {
    let snapshot = InputSnapshot::new(Vector2::new(0.0, 0.0), true);

    assert!(OsuInput::new(0.0, snapshot, false).is_hit_no_hold());
    assert!(!OsuInput::new(0.0, snapshot, true).is_hit_no_hold());
    assert!(!OsuInput::new(0.0, InputSnapshot::idle(snapshot.pos), false).is_hit_no_hold());
}

#[test]
fn test_from_normalized() {
    let snapshot = InputSnapshot::from_normalized(Vector2::new(0.5, 0.25), true);

    assert_eq!(snapshot.pos, Vector2::new(256.0, 96.0));
}
