//! Error taxonomy for the engine facade

use thiserror::Error;

/// Conditions the engine reports back to its caller.
///
/// None of these are fatal to the process: the caller decides how to surface
/// them (status message, protocol error line, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Board dimensions outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE` or not square
    #[error("unsupported board size {width}x{height}")]
    UnsupportedSize { width: usize, height: usize },
    /// Target cell is occupied, off the board, or the role is `Empty`
    #[error("invalid move at [{x},{y}]")]
    InvalidMove { x: i32, y: i32 },
    /// Takeback on an empty or off-board cell
    #[error("nothing to take back at [{x},{y}]")]
    TakebackFailed { x: i32, y: i32 },
}
