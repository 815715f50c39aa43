//! Backend actions triggered through `POST /do/{action}`.

use serde::{Deserialize, Serialize};

/// Switch the game mode (only accepted while no game is running).
pub const ACTION_GAME_MODE: &str = "ui:game:mode";

/// End the running game.
pub const ACTION_GAME_END: &str = "ui:game:end";

/// Mode that lets the backend drive a game without hardware nodes.
pub const MODE_SIMULATION: &str = "simulation";

/// Body shape the backend binds for its own actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionForm {
    pub payload: String,
}

impl ActionForm {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new("")
    }
}
