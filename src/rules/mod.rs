//! Game rules for freestyle gomoku
//!
//! Five or more in a row wins. There are no captures and no forbidden moves.

pub mod win;

// Re-exports for convenient access
pub use win::{
    check_winner, find_five_line_at_pos, find_five_positions, has_five_at_pos, has_five_in_row,
};
