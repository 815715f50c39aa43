//! Wire data model for the arena game API.

pub mod action;
pub mod game_data;
pub mod payload;

pub use game_data::{GameStats, GameSummary, NodeBoard, Scoreboard};
pub use payload::{GamePayload, GameTarget};
