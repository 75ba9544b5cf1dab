//! Evaluation module for gomoku positions
//!
//! This module provides pattern recognition and scoring:
//! - Run shapes and per-role shape counters ([`shape`])
//! - Full-board scan and incremental update of those counters ([`lines`])
//! - The fixed weight table ([`patterns`])
//! - Scores and winner detection over pattern pairs ([`heuristic`])

pub mod heuristic;
pub mod lines;
pub mod patterns;
pub mod shape;

pub use heuristic::{check_winner, live_threes, score, total_score, DEFENSE_FACTOR};
pub use patterns::{shape_weight, PatternScore};
pub use shape::{PatternMap, PatternPair, RunShape};
