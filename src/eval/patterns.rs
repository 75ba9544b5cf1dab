//! Pattern weights for gomoku evaluation
//!
//! A fixed table from run shape to score. Shapes missing from the table
//! (dead runs, long split runs, anything with no room to grow) weigh 0.

use super::shape::RunShape;

/// Scoring weights for run shapes
pub struct PatternScore;

impl PatternScore {
    /// Five or more in a row, per occurrence
    pub const FIVE: i64 = 1_000_000;

    /// Open four: _OOOO_
    pub const OPEN_FOUR: i64 = 1_000_000;
    /// Four with one live end
    pub const CLOSED_FOUR: i64 = 200_000;
    /// Split four with both outer ends live: _OO_OO_
    pub const OPEN_SPLIT_FOUR: i64 = 100_000;
    pub const CLOSED_SPLIT_FOUR: i64 = 15_000;
    /// Split four boxed in on both sides still wins by filling the gap
    pub const DEAD_SPLIT_FOUR: i64 = 10_000;

    /// Open three: _OOO_
    pub const OPEN_THREE: i64 = 10_000;
    pub const CLOSED_THREE: i64 = 1_000;
    pub const OPEN_SPLIT_THREE: i64 = 1_000;
    pub const CLOSED_SPLIT_THREE: i64 = 100;

    pub const OPEN_TWO: i64 = 100;
    pub const CLOSED_TWO: i64 = 10;
    pub const OPEN_ONE: i64 = 10;
    pub const CLOSED_ONE: i64 = 1;

    /// Bonus once a side holds two or more live threes
    pub const DOUBLE_THREE: i64 = 300;
}

/// Weight of one occurrence of `shape`
#[inline]
pub fn shape_weight(shape: RunShape) -> i64 {
    if shape.is_five() {
        return PatternScore::FIVE;
    }
    match (shape.length, shape.live_ends, shape.split) {
        (1, 1, false) => PatternScore::CLOSED_ONE,
        (1, 2, false) => PatternScore::OPEN_ONE,
        (2, 1, false) => PatternScore::CLOSED_TWO,
        (2, 2, false) => PatternScore::OPEN_TWO,
        (3, 1, true) => PatternScore::CLOSED_SPLIT_THREE,
        (3, 2, true) => PatternScore::OPEN_SPLIT_THREE,
        (3, 1, false) => PatternScore::CLOSED_THREE,
        (3, 2, false) => PatternScore::OPEN_THREE,
        (4, 0, true) => PatternScore::DEAD_SPLIT_FOUR,
        (4, 1, true) => PatternScore::CLOSED_SPLIT_FOUR,
        (4, 2, true) => PatternScore::OPEN_SPLIT_FOUR,
        (4, 1, false) => PatternScore::CLOSED_FOUR,
        (4, 2, false) => PatternScore::OPEN_FOUR,
        _ => 0,
    }
}
