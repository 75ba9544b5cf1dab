//! GUI module for the Gomoku game
//!
//! A native front-end using egui/eframe. The engine searches on a worker
//! thread so the window stays responsive.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{GameMode, GameResult, GameState};
pub use theme::star_points;
