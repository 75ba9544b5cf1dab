//! Negamax search with alpha-beta pruning
//!
//! A shallow fixed-depth search over very narrow candidate lists:
//!
//! - At the root, up to [`ROOT_SCAN`] ranked candidates are tried and the
//!   first [`ROOT_KEEP`] that leave the opponent without a forced win (per the
//!   kill search) are searched. If every one of them loses, the top-ranked
//!   candidate is searched alone.
//! - Inner nodes search the top [`INNER_WIDTH`] candidates.
//! - Leaves are scored with `total_score` for the side to move.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Role};
//! use gomoku::eval::PatternPair;
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::new(15);
//! board.place(Pos::new(7, 7), Role::Opponent).unwrap();
//! let pair = PatternPair::scan(&board);
//!
//! let mut searcher = Searcher::new(2, 10);
//! let result = searcher.search(&mut board, &pair, Role::Engine, Pos::new(7, 7));
//! assert!(result.best_move.is_some());
//! ```

use log::trace;

use crate::board::{Board, Pos, Role};
use crate::eval::{total_score, PatternPair};

use super::candidates::{candidates, Candidate};
use super::threat::KillSearcher;

/// Ranked candidates examined at the root
pub const ROOT_SCAN: usize = 10;
/// Root candidates kept after the kill filter
pub const ROOT_KEEP: usize = 3;
/// Candidates searched at inner nodes
pub const INNER_WIDTH: usize = 2;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Negamax value of the best move for the side to move
    pub score: f64,
    /// Total nodes searched
    pub nodes: u64,
}

/// Fixed-depth negamax searcher
#[derive(Debug, Clone)]
pub struct Searcher {
    max_depth: u8,
    killer: KillSearcher,
    nodes: u64,
}

impl Searcher {
    /// `max_depth` below 1 is treated as 1
    pub fn new(max_depth: u8, kill_depth: u8) -> Self {
        Self {
            max_depth: max_depth.max(1),
            killer: KillSearcher::with_depth(kill_depth),
            nodes: 0,
        }
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// The kill searcher used by the root filter
    pub fn killer(&mut self) -> &mut KillSearcher {
        &mut self.killer
    }

    /// Best move for `role`; `pair` must describe `board`.
    ///
    /// `last` is the most recent move and anchors candidate generation.
    /// The board is returned unchanged.
    pub fn search(&mut self, board: &mut Board, pair: &PatternPair, role: Role, last: Pos) -> SearchResult {
        self.nodes = 0;
        self.killer.reset_nodes();

        let (best_move, score) = self.search_root(board, pair, role, last);

        SearchResult {
            best_move,
            score,
            nodes: self.nodes + self.killer.nodes(),
        }
    }

    /// Root candidates that survive the kill filter
    fn root_moves(&mut self, board: &mut Board, pair: &PatternPair, role: Role, last: Pos) -> Vec<Candidate> {
        let ranked = candidates(board, pair, role, last);
        let mut kept = Vec::with_capacity(ROOT_KEEP);

        for cand in ranked.iter().take(ROOT_SCAN) {
            let Ok(mut child) = board.play(cand.pos, role) else {
                continue;
            };
            if self.killer.kill(&mut child, &cand.patterns, role.opponent(), cand.pos) {
                trace!("root {:?}: opponent forces a win, skipped", cand.pos);
                continue;
            }
            kept.push(*cand);
            if kept.len() == ROOT_KEEP {
                break;
            }
        }

        if kept.is_empty() {
            kept.extend(ranked.first().copied());
        }
        kept
    }

    fn search_root(&mut self, board: &mut Board, pair: &PatternPair, role: Role, last: Pos) -> (Option<Pos>, f64) {
        self.nodes += 1;

        let moves = self.root_moves(board, pair, role, last);
        if moves.is_empty() {
            return (None, total_score(pair, role));
        }

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut value = f64::NEG_INFINITY;
        let mut best_move = None;

        for cand in &moves {
            let Ok(mut child) = board.play(cand.pos, role) else {
                continue;
            };
            let score = -self.negamax(
                &mut child,
                &cand.patterns,
                role.opponent(),
                cand.pos,
                self.max_depth - 1,
                -beta,
                -alpha,
            );
            trace!("root {:?}: {score}", cand.pos);

            value = value.max(score);
            if value > alpha {
                alpha = value;
                best_move = Some(cand.pos);
            }
        }

        (best_move, value)
    }

    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &mut Board,
        pair: &PatternPair,
        role: Role,
        last: Pos,
        depth: u8,
        mut alpha: f64,
        beta: f64,
    ) -> f64 {
        self.nodes += 1;

        if depth == 0 {
            return total_score(pair, role);
        }

        let moves = candidates(board, pair, role, last);
        if moves.is_empty() {
            return total_score(pair, role);
        }

        let mut value = f64::NEG_INFINITY;
        for cand in moves.iter().take(INNER_WIDTH) {
            let Ok(mut child) = board.play(cand.pos, role) else {
                continue;
            };
            let score = -self.negamax(
                &mut child,
                &cand.patterns,
                role.opponent(),
                cand.pos,
                depth - 1,
                -beta,
                -alpha,
            );
            value = value.max(score);
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn setup_board(size: usize, stones: &[(u8, u8, Role)]) -> Board {
        let mut board = Board::new(size);
        for &(x, y, role) in stones {
            board.place(Pos::new(x, y), role).unwrap();
        }
        board
    }

    /// Full-width negamax over the same inner candidate lists, no pruning
    fn brute_force(board: &mut Board, pair: &PatternPair, role: Role, last: Pos, depth: u8) -> f64 {
        if depth == 0 {
            return total_score(pair, role);
        }
        let moves = candidates(board, pair, role, last);
        if moves.is_empty() {
            return total_score(pair, role);
        }
        let mut value = f64::NEG_INFINITY;
        for cand in moves.iter().take(INNER_WIDTH) {
            let mut child = board.play(cand.pos, role).unwrap();
            let score = -brute_force(&mut child, &cand.patterns, role.opponent(), cand.pos, depth - 1);
            value = value.max(score);
        }
        value
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut board = setup_board(
            9,
            &[
                (0, 4, Role::Opponent),
                (1, 4, Role::Engine),
                (2, 4, Role::Engine),
                (3, 4, Role::Engine),
                (4, 4, Role::Engine),
                (6, 6, Role::Opponent),
            ],
        );
        let pair = PatternPair::scan(&board);
        let mut searcher = Searcher::new(2, 10);
        let result = searcher.search(&mut board, &pair, Role::Engine, Pos::new(6, 6));
        assert_eq!(result.best_move, Some(Pos::new(5, 4)));
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_search_blocks_opponent_four() {
        let mut board = setup_board(
            9,
            &[
                (0, 4, Role::Engine),
                (1, 4, Role::Opponent),
                (2, 4, Role::Opponent),
                (3, 4, Role::Opponent),
                (4, 4, Role::Opponent),
                (6, 6, Role::Engine),
            ],
        );
        let pair = PatternPair::scan(&board);
        let mut searcher = Searcher::new(2, 10);
        let result = searcher.search(&mut board, &pair, Role::Engine, Pos::new(4, 4));
        assert_eq!(result.best_move, Some(Pos::new(5, 4)));
    }

    #[test]
    fn test_search_leaves_board_unchanged() {
        let mut board = setup_board(
            9,
            &[(4, 4, Role::Engine), (5, 4, Role::Opponent), (4, 5, Role::Opponent)],
        );
        let before = board.clone();
        let pair = PatternPair::scan(&board);
        let mut searcher = Searcher::new(3, 10);
        let result = searcher.search(&mut board, &pair, Role::Engine, Pos::new(4, 5));
        assert_eq!(board, before);
        let best = result.best_move.unwrap();
        assert!(board.is_empty(best));
    }

    #[test]
    fn test_search_full_board() {
        let mut board = Board::new(5);
        let mut role = Role::Engine;
        for pos in board.positions().collect::<Vec<_>>() {
            board.place(pos, role).unwrap();
            role = role.opponent();
        }
        let pair = PatternPair::scan(&board);
        let mut searcher = Searcher::new(2, 10);
        let result = searcher.search(&mut board, &pair, Role::Engine, Pos::new(2, 2));
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_zero_depth_is_clamped() {
        assert_eq!(Searcher::new(0, 10).max_depth(), 1);
        assert_eq!(Searcher::new(4, 10).max_depth(), 4);
    }

    /// Alpha-beta returns the same value and the same first best move as a
    /// full-width search over identical candidate lists.
    #[test]
    fn test_alpha_beta_matches_brute_force() {
        let mut rng = Pcg64::seed_from_u64(2024);

        for round in 0..12 {
            let mut board = Board::new(9);
            let mut role = Role::Engine;
            let mut last = board.center();
            for _ in 0..rng.gen_range(4..14) {
                let x = rng.gen_range(1..8);
                let y = rng.gen_range(1..8);
                let pos = Pos::new(x, y);
                if board.place(pos, role).is_ok() {
                    last = pos;
                    role = role.opponent();
                }
            }
            let pair = PatternPair::scan(&board);
            // Skip positions that are already decided
            if crate::eval::check_winner(&pair).is_some() {
                continue;
            }

            for depth in [2u8, 3] {
                let mut searcher = Searcher::new(depth, 4);
                let result = searcher.search(&mut board, &pair, role, last);

                let roots = searcher.root_moves(&mut board, &pair, role, last);
                let mut expected_move = None;
                let mut expected = f64::NEG_INFINITY;
                for cand in &roots {
                    let mut child = board.play(cand.pos, role).unwrap();
                    let score = -brute_force(&mut child, &cand.patterns, role.opponent(), cand.pos, depth - 1);
                    if score > expected {
                        expected = score;
                        expected_move = Some(cand.pos);
                    }
                }

                assert_eq!(result.score, expected, "round {round} depth {depth}");
                assert_eq!(result.best_move, expected_move, "round {round} depth {depth}");
            }
        }
    }
}
