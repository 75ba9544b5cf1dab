//! Kill search: bounded forced-win detection
//!
//! A side "kills" when it can reach five through a chain of ever stronger
//! threats that the other side cannot out-threaten. Each step only considers
//! moves whose threat severity ([`check_kill`]) is strictly above the one
//! that started the branch, so chains are short even at generous depths.

use crate::board::{Board, Pos, Role};
use crate::eval::{check_winner, live_threes, PatternPair, RunShape};

use super::candidates::candidates;

/// Moves examined per kill-search node
pub const KILL_WIDTH: usize = 20;

/// Default recursion limit for the kill search
pub const DEFAULT_KILL_DEPTH: u8 = 10;

/// Severity of the strongest threat a side holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Threat {
    #[default]
    None = 0,
    /// Two or more live threes
    DoubleThree = 1,
    /// An open four, or a four backed by another four or a live three
    OpenFour = 2,
    /// Five or more in a row
    Five = 3,
}

/// Classify the strongest threat `role` holds in `pair`
pub fn check_kill(pair: &PatternPair, role: Role) -> Threat {
    let map = pair.get(role);
    if map.has_five() {
        return Threat::Five;
    }

    if map.count(RunShape::plain(4, 2)) + map.count(RunShape::split(4, 2)) > 0 {
        return Threat::OpenFour;
    }

    let fours = map.count(RunShape::plain(4, 1))
        + map.count(RunShape::split(4, 1))
        + map.count(RunShape::split(4, 0));
    let threes = live_threes(map);
    if fours >= 1 && fours + threes >= 2 {
        return Threat::OpenFour;
    }

    if threes >= 2 {
        return Threat::DoubleThree;
    }
    Threat::None
}

/// Forced-win searcher over the threat chain
#[derive(Debug, Clone)]
pub struct KillSearcher {
    /// Maximum recursion depth (moves of both sides)
    max_depth: u8,
    /// Node counter for statistics
    nodes: u64,
}

impl KillSearcher {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_KILL_DEPTH)
    }

    pub fn with_depth(max_depth: u8) -> Self {
        Self { max_depth, nodes: 0 }
    }

    /// Can `role`, to move, force a win from this position?
    ///
    /// `pair` must describe `board`; `last` anchors candidate generation.
    /// The board is returned unchanged.
    pub fn kill(&mut self, board: &mut Board, pair: &PatternPair, role: Role, last: Pos) -> bool {
        self.search(board, pair, role, last, self.max_depth, Threat::None)
    }

    fn search(
        &mut self,
        board: &mut Board,
        pair: &PatternPair,
        role: Role,
        last: Pos,
        depth: u8,
        severity: Threat,
    ) -> bool {
        self.nodes += 1;

        if let Some(winner) = check_winner(pair) {
            return winner == role;
        }
        if depth == 0 {
            return false;
        }

        for cand in candidates(board, pair, role, last).into_iter().take(KILL_WIDTH) {
            let threat = check_kill(&cand.patterns, role);
            if threat <= severity {
                continue;
            }
            let Ok(mut child) = board.play(cand.pos, role) else {
                continue;
            };
            let answered = self.search(
                &mut child,
                &cand.patterns,
                role.opponent(),
                cand.pos,
                depth - 1,
                threat,
            );
            if !answered {
                return true;
            }
        }
        false
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Get node count from the searches since the last reset
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }
}

impl Default for KillSearcher {
    fn default() -> Self {
        Self::new()
    }
}
