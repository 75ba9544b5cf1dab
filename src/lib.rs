//! Gomoku move-selection engine
//!
//! A freestyle gomoku engine for square boards from 5x5 to 100x100:
//! - Five or more in a row wins
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation and scoped make/unmake
//! - [`eval`]: Run-shape counting (full scan and incremental update) and scoring
//! - [`search`]: Candidate generation, kill search, negamax with alpha-beta
//! - [`rules`]: Direct five-in-a-row checks on the board
//! - [`engine`]: The facade a caller drives
//! - [`ui`]: Desktop front-end
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Engine, Pos, Role};
//!
//! let mut engine = Engine::new(15, 15).unwrap();
//!
//! // The opponent opens in the middle
//! engine.apply_move(Pos::new(7, 7), Role::Opponent).unwrap();
//!
//! // Engine responds
//! if let Some(pos) = engine.select_move() {
//!     engine.apply_move(pos, Role::Engine).unwrap();
//!     println!("Engine plays at ({}, {})", pos.x, pos.y);
//! }
//! ```
//!
//! # Move Selection
//!
//! 1. Empty board: the centre cell
//! 2. Rank empty cells around the last move by the position they produce
//! 3. At the root, drop candidates that let the opponent force a win
//! 4. Negamax with alpha-beta over the surviving candidates

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Role, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use engine::{Engine, EngineConfig, MoveResult, SearchType};
pub use error::EngineError;
pub use search::Threat;
