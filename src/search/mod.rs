//! Search module for the gomoku engine
//!
//! Contains:
//! - Ranked candidate generation around the last move
//! - Kill search for forced wins through escalating threats
//! - Negamax with alpha-beta pruning for move selection

pub mod alphabeta;
pub mod candidates;
pub mod threat;

pub use alphabeta::{SearchResult, Searcher};
pub use candidates::{candidates, Candidate};
pub use threat::{check_kill, KillSearcher, Threat};
