//! Game state management for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error};

use crate::{Engine, EngineError, MoveResult, Pos, Role};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs engine
    PvE {
        engine_first: bool,
    },
    /// Player vs Player (hotseat)
    PvP {
        show_suggestions: bool,
    },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { engine_first: false }
    }
}

/// Engine computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Game result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Win {
        winner: Role,
        winning_line: Vec<Pos>,
    },
    Draw,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state.
///
/// In PvE the engine always plays `Role::Engine` and the human
/// `Role::Opponent`; in PvP the two humans take those roles in turn. Whoever
/// moves first plays black.
pub struct GameState {
    pub engine: Engine,
    pub mode: GameMode,
    pub current_turn: Role,
    pub first_player: Role,
    pub game_over: Option<GameResult>,
    pub move_history: Vec<(Pos, Role)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
}

impl GameState {
    /// Create a game on a `size` x `size` board.
    pub fn new(mode: GameMode, size: usize) -> Result<Self, EngineError> {
        let engine = Engine::new(size, size)?;
        let first_player = match mode {
            GameMode::PvE { engine_first: true } => Role::Engine,
            _ => Role::Opponent,
        };
        Ok(Self {
            engine,
            mode,
            current_turn: first_player,
            first_player,
            game_over: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
        })
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.current_turn = self.first_player;
        self.game_over = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.engine.size()
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.move_history.last().map(|&(pos, _)| pos)
    }

    /// Stones of the winning line, if any
    pub fn winning_line(&self) -> Option<&[Pos]> {
        match &self.game_over {
            Some(GameResult::Win { winning_line, .. }) => Some(winning_line),
            _ => None,
        }
    }

    /// Check if black plays `role`
    #[inline]
    pub fn is_black(&self, role: Role) -> bool {
        role == self.first_player
    }

    /// Check if it's a human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { .. } => self.current_turn == Role::Opponent,
            GameMode::PvP { .. } => true,
        }
    }

    /// Check if it's the engine's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { .. } => self.current_turn == Role::Engine,
            GameMode::PvP { .. } => false,
        }
    }

    /// Check if the engine is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("Engine is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.execute_move(pos)
    }

    /// Execute a move (for both human and engine)
    fn execute_move(&mut self, pos: Pos) -> Result<(), String> {
        let role = self.current_turn;
        self.engine
            .apply_move(pos, role)
            .map_err(|e| format!("Invalid move: {e}"))?;

        // Record move
        self.move_history.push((pos, role));
        self.suggested_move = None;
        self.message = None;

        // Stop timer
        self.move_timer.stop();

        if let Some(winner) = self.engine.winner() {
            self.game_over = Some(GameResult::Win {
                winner,
                winning_line: self.engine.winning_line().unwrap_or_default(),
            });
            return Ok(());
        }
        if self.engine.board().is_full() {
            self.game_over = Some(GameResult::Draw);
            return Ok(());
        }

        // Switch turn
        self.current_turn = role.opponent();
        self.move_timer.start();
        Ok(())
    }

    /// Start engine thinking on a copy of the engine
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }

        let mut engine = self.engine.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.select_move_with_stats();
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if the engine has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    error!("engine thread exited without a move");
                    self.ai_state = AiState::Idle;
                    self.message = Some("Engine error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.last_ai_result = Some(move_result);
            self.move_timer.set_ai_time(elapsed);

            match move_result.best_move {
                Some(pos) => {
                    if let Err(msg) = self.execute_move(pos) {
                        self.message = Some(msg);
                    }
                }
                None => self.message = Some("Engine could not find a move".to_string()),
            }
        }
    }

    /// Get engine thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request move suggestion for PvP mode
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() {
            return;
        }

        let result = self.engine.clone().select_move_with_stats();
        debug!("hint for {:?}: {:?}", self.current_turn, result.best_move);

        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
    }

    /// Undo last move; in PvE also the engine's reply
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        let undo_count = match self.mode {
            GameMode::PvE { .. } => {
                // Back to the human's turn
                match self.move_history.last() {
                    Some(&(_, Role::Engine)) if self.move_history.len() >= 2 => 2,
                    _ => 1,
                }
            }
            GameMode::PvP { .. } => 1,
        };

        for _ in 0..undo_count {
            let Some((pos, _)) = self.move_history.pop() else {
                break;
            };
            match self.engine.takeback(pos) {
                Ok(role) => self.current_turn = role,
                Err(e) => {
                    self.message = Some(e.to_string());
                    break;
                }
            }
        }

        self.game_over = None;
        self.suggested_move = None;
        self.move_timer.start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pvp(size: usize) -> GameState {
        GameState::new(GameMode::PvP { show_suggestions: false }, size).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_size() {
        assert!(GameState::new(GameMode::default(), 3).is_err());
    }

    #[test]
    fn test_turns_alternate() {
        let mut state = pvp(9);
        assert_eq!(state.current_turn, Role::Opponent);
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        assert_eq!(state.current_turn, Role::Engine);
        assert!(state.try_place_stone(Pos::new(4, 4)).is_err());
        assert_eq!(state.current_turn, Role::Engine);
        assert_eq!(state.last_move(), Some(Pos::new(4, 4)));
    }

    #[test]
    fn test_win_detected_with_line() {
        let mut state = pvp(9);
        for x in 0..4 {
            state.try_place_stone(Pos::new(x, 0)).unwrap();
            state.try_place_stone(Pos::new(x, 8)).unwrap();
        }
        state.try_place_stone(Pos::new(4, 0)).unwrap();

        match &state.game_over {
            Some(GameResult::Win { winner, winning_line }) => {
                assert_eq!(*winner, Role::Opponent);
                assert_eq!(winning_line.len(), 5);
            }
            other => panic!("expected a win, got {other:?}"),
        }
        assert!(state.try_place_stone(Pos::new(5, 5)).is_err());
    }

    #[test]
    fn test_undo_restores_turn_and_clears_result() {
        let mut state = pvp(9);
        for x in 0..4 {
            state.try_place_stone(Pos::new(x, 0)).unwrap();
            state.try_place_stone(Pos::new(x, 8)).unwrap();
        }
        state.try_place_stone(Pos::new(4, 0)).unwrap();
        assert!(state.game_over.is_some());

        state.undo();
        assert!(state.game_over.is_none());
        assert_eq!(state.current_turn, Role::Opponent);
        assert_eq!(state.move_history.len(), 8);
        assert!(state.engine.board().is_empty(Pos::new(4, 0)));
    }

    #[test]
    fn test_pve_undo_takes_back_engine_reply() {
        let mut state = GameState::new(GameMode::PvE { engine_first: false }, 9).unwrap();
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        assert!(state.is_ai_turn());
        assert!(state.try_place_stone(Pos::new(3, 3)).is_err());

        // Stand in for the worker thread
        let reply = state.engine.clone().select_move().unwrap();
        state.execute_move(reply).unwrap();
        assert!(state.is_human_turn());

        state.undo();
        assert!(state.move_history.is_empty());
        assert!(state.engine.board().is_board_empty());
        assert_eq!(state.current_turn, Role::Opponent);
    }

    #[test]
    fn test_engine_first_plays_black() {
        let state = GameState::new(GameMode::PvE { engine_first: true }, 15).unwrap();
        assert!(state.is_ai_turn());
        assert!(state.is_black(Role::Engine));
    }

    #[test]
    fn test_suggestion_is_empty_cell() {
        let mut state = pvp(9);
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        state.request_suggestion();
        let hint = state.suggested_move.unwrap();
        assert!(state.engine.board().is_empty(hint));
    }
}
