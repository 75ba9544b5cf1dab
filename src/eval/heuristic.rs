//! Heuristic evaluation of pattern pairs
//!
//! Positions are never scored from the board directly: every score is a
//! function of the per-role shape counts kept by the pattern engine.
//!
//! The evaluation is deliberately asymmetric. The side being evaluated
//! weighs the opponent's shapes by [`DEFENSE_FACTOR`], so
//! `total_score(p, a) != -total_score(p, b)` in general and the engine
//! prefers blocking to building when the two are close.

use crate::board::Role;

use super::patterns::{shape_weight, PatternScore};
use super::shape::{PatternMap, PatternPair, RunShape};

/// Multiplier on the opponent's score in [`total_score`]
pub const DEFENSE_FACTOR: f64 = 1.4;

/// Number of live threes (plain and split) in a map
#[inline]
pub fn live_threes(map: &PatternMap) -> u32 {
    map.count(RunShape::plain(3, 2)) + map.count(RunShape::split(3, 2))
}

/// Weighted sum of one role's shapes, plus the double-three bonus
#[must_use]
pub fn score(map: &PatternMap) -> i64 {
    let mut total: i64 = map
        .iter()
        .map(|(shape, count)| shape_weight(shape) * i64::from(count))
        .sum();

    if live_threes(map) >= 2 {
        total += PatternScore::DOUBLE_THREE;
    }
    total
}

/// Score of `role`'s shapes minus the weighted score of the opponent's
#[must_use]
pub fn total_score(pair: &PatternPair, role: Role) -> f64 {
    let own = score(pair.get(role)) as f64;
    let opp = score(pair.get(role.opponent())) as f64;
    own - DEFENSE_FACTOR * opp
}

/// Role holding a run of five or more, the engine side first
#[inline]
pub fn check_winner(pair: &PatternPair) -> Option<Role> {
    Role::PLAYERS
        .into_iter()
        .find(|&role| pair.get(role).has_five())
}
