//! Main engine facade integrating board, patterns and search
//!
//! The [`Engine`] owns the game state the searches run on: the board, the
//! incrementally maintained pattern pair, the side to move and the last move
//! (which anchors candidate generation). A caller drives it with
//! [`Engine::apply_move`] for confirmed moves, [`Engine::takeback`] to undo,
//! and [`Engine::select_move`] when it wants the engine's pick.
//!
//! # Example
//!
//! ```
//! use gomoku::{Engine, Pos, Role};
//!
//! let mut engine = Engine::new(15, 15).unwrap();
//! engine.apply_move(Pos::new(7, 7), Role::Opponent).unwrap();
//!
//! let result = engine.select_move_with_stats();
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use log::{debug, warn};

use crate::board::{Board, Pos, Role, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::EngineError;
use crate::eval::{check_winner, PatternPair};
use crate::rules::find_five_positions;
use crate::search::threat::DEFAULT_KILL_DEPTH;
use crate::search::{check_kill, SearchResult, Searcher, Threat};

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Empty board: the centre cell, no search
    Opening,
    /// Negamax search with the root kill filter
    Negamax,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Negamax value for the side to move
    pub score: f64,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched, kill search included
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn opening(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0.0,
            search_type: SearchType::Opening,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_negamax(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::Negamax,
            time_ms,
            nodes: result.nodes,
        }
    }

    #[inline]
    fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0.0,
            search_type: SearchType::Negamax,
            time_ms: 0,
            nodes: 0,
        }
    }
}

/// Search limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Negamax depth in plies (at least 1)
    pub max_depth: u8,
    /// Kill search recursion limit
    pub kill_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            kill_depth: DEFAULT_KILL_DEPTH,
        }
    }
}

/// Gomoku move-selection engine.
///
/// `Clone + Send`: a caller can search on a copy in another thread and apply
/// the answer to its own engine afterwards.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    patterns: PatternPair,
    to_move: Role,
    last_move: Pos,
    /// Stones in play order, for restoring `last_move` on takeback
    history: Vec<Pos>,
    searcher: Searcher,
    config: EngineConfig,
    terminated: bool,
}

impl Engine {
    /// Create an engine for a `width` x `height` board with the default
    /// configuration.
    ///
    /// Only square boards from 5x5 to 100x100 are supported.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::with_config(width, height, EngineConfig::default())
    }

    /// Create an engine with custom search limits.
    ///
    /// # Example
    ///
    /// ```
    /// use gomoku::{Engine, EngineConfig};
    ///
    /// let config = EngineConfig { max_depth: 4, kill_depth: 6 };
    /// let engine = Engine::with_config(20, 20, config).unwrap();
    /// assert_eq!(engine.size(), 20);
    /// ```
    pub fn with_config(width: usize, height: usize, config: EngineConfig) -> Result<Self, EngineError> {
        let supported = (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&width) && width == height;
        if !supported {
            return Err(EngineError::UnsupportedSize { width, height });
        }

        let board = Board::new(width);
        debug!("engine ready: {width}x{height}, {config:?}");
        Ok(Self {
            last_move: board.center(),
            board,
            patterns: PatternPair::new(),
            to_move: Role::Engine,
            history: Vec::new(),
            searcher: Searcher::new(config.max_depth, config.kill_depth),
            config,
            terminated: false,
        })
    }

    /// Clear the board and return to the initial state, keeping size and
    /// configuration
    pub fn reset(&mut self) {
        self.board.clear_all();
        self.patterns = PatternPair::new();
        self.to_move = Role::Engine;
        self.last_move = self.board.center();
        self.history.clear();
        self.terminated = false;
    }

    /// Apply a confirmed move. The turn passes to the other role.
    pub fn apply_move(&mut self, pos: Pos, role: Role) -> Result<(), EngineError> {
        if let Err(err) = self.board.place(pos, role) {
            warn!("rejected {role:?} move: {err}");
            return Err(err);
        }
        self.patterns.apply(&self.board, pos, role);
        self.history.push(pos);
        self.last_move = pos;
        self.to_move = role.opponent();
        Ok(())
    }

    /// Remove the stone at `pos`, returning its role. The turn goes back to
    /// that role.
    pub fn takeback(&mut self, pos: Pos) -> Result<Role, EngineError> {
        let role = self.board.remove(pos).map_err(|_| {
            let (x, y) = pos.coords();
            warn!("rejected takeback at [{x},{y}]");
            EngineError::TakebackFailed { x, y }
        })?;
        self.patterns.remove(&self.board, pos, role);

        if let Some(idx) = self.history.iter().rposition(|&p| p == pos) {
            self.history.remove(idx);
        }
        self.last_move = self.history.last().copied().unwrap_or_else(|| self.board.center());
        self.to_move = role;
        Ok(role)
    }

    /// Best move for the side to move, or `None` when terminated or the board
    /// is full
    pub fn select_move(&mut self) -> Option<Pos> {
        self.select_move_with_stats().best_move
    }

    /// Best move with detailed search statistics.
    ///
    /// On an empty board this is the centre cell without search; otherwise
    /// a negamax search for [`Engine::to_move`] from the current position.
    pub fn select_move_with_stats(&mut self) -> MoveResult {
        if self.terminated {
            return MoveResult::no_move();
        }

        let start = Instant::now();
        if self.board.is_board_empty() {
            return MoveResult::opening(self.board.center(), start.elapsed().as_millis() as u64);
        }
        if self.board.is_full() {
            return MoveResult::no_move();
        }

        let role = self.to_move;
        let result = self
            .searcher
            .search(&mut self.board, &self.patterns, role, self.last_move);
        let time_ms = start.elapsed().as_millis() as u64;

        debug!(
            "{role:?} to move: {:?} score {} ({} nodes, {time_ms}ms)",
            result.best_move, result.score, result.nodes
        );
        MoveResult::from_negamax(result, time_ms)
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// When set, `select_move` returns `None` without searching
    pub fn set_terminated(&mut self, terminated: bool) {
        self.terminated = terminated;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    #[inline]
    pub fn patterns(&self) -> &PatternPair {
        &self.patterns
    }

    #[inline]
    pub fn to_move(&self) -> Role {
        self.to_move
    }

    /// Most recent move still on the board (the centre before any move)
    #[inline]
    pub fn last_move(&self) -> Pos {
        self.last_move
    }

    /// Moves still on the board, oldest first
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    #[inline]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Role holding five or more in a row
    pub fn winner(&self) -> Option<Role> {
        check_winner(&self.patterns)
    }

    /// Stones of the winning line, if the game is won
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        self.winner()
            .and_then(|role| find_five_positions(&self.board, role))
    }

    /// Strongest threat `role` currently holds
    pub fn threat(&self, role: Role) -> Threat {
        check_kill(&self.patterns, role)
    }

    /// Can `role`, moving now, force a win within the kill depth?
    pub fn can_force_win(&mut self, role: Role) -> bool {
        self.searcher
            .killer()
            .kill(&mut self.board, &self.patterns, role, self.last_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(engine: &mut Engine, stones: &[(u8, u8, Role)]) {
        for &(x, y, role) in stones {
            engine.apply_move(Pos::new(x, y), role).unwrap();
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = Engine::new(15, 15).unwrap();
        assert_eq!(engine.size(), 15);
        assert_eq!(engine.to_move(), Role::Engine);
        assert_eq!(engine.last_move(), Pos::new(7, 7));
        assert_eq!(engine.config(), EngineConfig::default());
        assert!(!engine.is_terminated());
    }

    #[test]
    fn test_engine_rejects_unsupported_sizes() {
        for (w, h) in [(4, 4), (101, 101), (10, 12), (0, 0)] {
            assert_eq!(
                Engine::new(w, h).err(),
                Some(EngineError::UnsupportedSize { width: w, height: h })
            );
        }
        assert!(Engine::new(5, 5).is_ok());
        assert!(Engine::new(100, 100).is_ok());
    }

    #[test]
    fn test_engine_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.kill_depth, 10);
    }

    #[test]
    fn test_empty_board_opening() {
        for (size, mid) in [(9, 4), (15, 7), (20, 9), (10, 4)] {
            let mut engine = Engine::new(size, size).unwrap();
            let result = engine.select_move_with_stats();
            assert_eq!(result.best_move, Some(Pos::new(mid, mid)));
            assert_eq!(result.search_type, SearchType::Opening);
            assert!(engine.board().is_board_empty());
        }
    }

    #[test]
    fn test_apply_move_updates_state() {
        let mut engine = Engine::new(9, 9).unwrap();
        engine.apply_move(Pos::new(3, 4), Role::Opponent).unwrap();
        assert_eq!(engine.to_move(), Role::Engine);
        assert_eq!(engine.last_move(), Pos::new(3, 4));

        engine.apply_move(Pos::new(4, 4), Role::Engine).unwrap();
        assert_eq!(engine.to_move(), Role::Opponent);
        assert_eq!(*engine.patterns(), PatternPair::scan(engine.board()));
        assert_eq!(engine.history(), &[Pos::new(3, 4), Pos::new(4, 4)]);
    }

    #[test]
    fn test_apply_move_rejects_illegal() {
        let mut engine = Engine::new(9, 9).unwrap();
        engine.apply_move(Pos::new(4, 4), Role::Engine).unwrap();
        let snapshot = *engine.patterns();

        assert_eq!(
            engine.apply_move(Pos::new(4, 4), Role::Opponent),
            Err(EngineError::InvalidMove { x: 4, y: 4 })
        );
        assert_eq!(
            engine.apply_move(Pos::new(9, 2), Role::Opponent),
            Err(EngineError::InvalidMove { x: 9, y: 2 })
        );
        assert!(engine.apply_move(Pos::new(1, 1), Role::Empty).is_err());

        assert_eq!(*engine.patterns(), snapshot);
        assert_eq!(engine.board().stone_count(), 1);
        assert_eq!(engine.to_move(), Role::Opponent);
    }

    #[test]
    fn test_takeback() {
        let mut engine = Engine::new(9, 9).unwrap();
        play(
            &mut engine,
            &[(4, 4, Role::Opponent), (5, 4, Role::Engine), (4, 5, Role::Opponent)],
        );

        assert_eq!(engine.takeback(Pos::new(4, 5)), Ok(Role::Opponent));
        assert_eq!(engine.to_move(), Role::Opponent);
        assert_eq!(engine.last_move(), Pos::new(5, 4));
        assert_eq!(*engine.patterns(), PatternPair::scan(engine.board()));

        // Out of order removal
        assert_eq!(engine.takeback(Pos::new(4, 4)), Ok(Role::Opponent));
        assert_eq!(engine.last_move(), Pos::new(5, 4));
        assert_eq!(engine.takeback(Pos::new(5, 4)), Ok(Role::Engine));
        assert_eq!(engine.to_move(), Role::Engine);
        assert_eq!(engine.last_move(), Pos::new(4, 4));
        assert!(engine.patterns().get(Role::Engine).is_empty());
    }

    #[test]
    fn test_takeback_rejects_empty_and_off_board() {
        let mut engine = Engine::new(9, 9).unwrap();
        assert_eq!(
            engine.takeback(Pos::new(2, 2)),
            Err(EngineError::TakebackFailed { x: 2, y: 2 })
        );
        assert_eq!(
            engine.takeback(Pos::new(12, 0)),
            Err(EngineError::TakebackFailed { x: 12, y: 0 })
        );
    }

    #[test]
    fn test_reset() {
        let mut engine = Engine::new(9, 9).unwrap();
        play(&mut engine, &[(4, 4, Role::Opponent), (5, 5, Role::Engine)]);
        engine.set_terminated(true);
        engine.reset();

        assert!(engine.board().is_board_empty());
        assert!(engine.history().is_empty());
        assert_eq!(engine.to_move(), Role::Engine);
        assert_eq!(engine.last_move(), Pos::new(4, 4));
        assert!(!engine.is_terminated());
        assert_eq!(*engine.patterns(), PatternPair::new());
    }

    #[test]
    fn test_terminated_skips_search() {
        let mut engine = Engine::new(9, 9).unwrap();
        engine.apply_move(Pos::new(4, 4), Role::Opponent).unwrap();
        engine.set_terminated(true);
        assert_eq!(engine.select_move(), None);
        engine.set_terminated(false);
        assert!(engine.select_move().is_some());
    }

    #[test]
    fn test_blocks_open_four() {
        let mut engine = Engine::new(9, 9).unwrap();
        play(
            &mut engine,
            &[
                (4, 3, Role::Opponent),
                (4, 4, Role::Opponent),
                (4, 5, Role::Opponent),
                (4, 6, Role::Opponent),
            ],
        );
        assert_eq!(engine.threat(Role::Opponent), Threat::OpenFour);
        assert_eq!(engine.to_move(), Role::Engine);

        let before = engine.board().clone();
        let pick = engine.select_move().unwrap();
        assert!(
            pick == Pos::new(4, 2) || pick == Pos::new(4, 7),
            "expected a block, got {pick:?}"
        );
        assert_eq!(*engine.board(), before);
    }

    #[test]
    fn test_takes_the_win() {
        let mut engine = Engine::new(15, 15).unwrap();
        play(
            &mut engine,
            &[
                (7, 7, Role::Engine),
                (6, 7, Role::Opponent),
                (8, 7, Role::Engine),
                (0, 0, Role::Opponent),
                (9, 7, Role::Engine),
                (0, 2, Role::Opponent),
                (10, 7, Role::Engine),
                (0, 4, Role::Opponent),
            ],
        );
        assert_eq!(engine.select_move(), Some(Pos::new(11, 7)));

        engine.apply_move(Pos::new(11, 7), Role::Engine).unwrap();
        assert_eq!(engine.winner(), Some(Role::Engine));
        assert_eq!(engine.winning_line().map(|line| line.len()), Some(5));
        assert_eq!(engine.select_move_with_stats().search_type, SearchType::Negamax);
    }

    #[test]
    fn test_selected_moves_are_legal() {
        let mut engine = Engine::new(9, 9).unwrap();
        let mut role = Role::Opponent;
        engine.apply_move(Pos::new(4, 4), role).unwrap();

        for _ in 0..12 {
            role = role.opponent();
            assert_eq!(engine.to_move(), role);
            let pick = engine.select_move().unwrap();
            assert!(engine.board().is_empty(pick));
            engine.apply_move(pick, role).unwrap();
            assert_eq!(*engine.patterns(), PatternPair::scan(engine.board()));
            if engine.winner().is_some() {
                break;
            }
        }
    }

    #[test]
    fn test_can_force_win() {
        let mut engine = Engine::new(15, 15).unwrap();
        play(
            &mut engine,
            &[
                (6, 7, Role::Engine),
                (12, 12, Role::Opponent),
                (7, 7, Role::Engine),
                (12, 0, Role::Opponent),
                (8, 7, Role::Engine),
            ],
        );
        let before = engine.board().clone();
        assert!(engine.can_force_win(Role::Engine));
        assert!(!engine.can_force_win(Role::Opponent));
        assert_eq!(*engine.board(), before);
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send + Clone>() {}
        assert_send::<Engine>();
    }
}
