use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Team id -> score.
pub type Scoreboard = HashMap<String, i64>;

/// Node id -> status/score value.
pub type NodeBoard = HashMap<String, i64>;

/// Status shown before the first detail fetch lands.
pub const STATUS_NO_ACTIVE_GAME: &str = "no active game";

pub const STATUS_INIT: &str = "game:init";
pub const STATUS_RUNNING: &str = "game:running";
pub const STATUS_ENDED: &str = "game:over";
pub const STATUS_FAILED: &str = "game:failed";

/// Headline fields of a single game, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub status: String,
    pub start_at: String,
    pub end_at: String,
    pub length: i64,
    pub completed: bool,
    pub winner: String,
    pub highscore: i64,
}

impl Default for GameSummary {
    fn default() -> Self {
        Self {
            status: STATUS_NO_ACTIVE_GAME.to_string(),
            start_at: String::new(),
            end_at: String::new(),
            length: 0,
            completed: false,
            winner: String::new(),
            highscore: 0,
        }
    }
}

impl GameSummary {
    pub fn is_running(&self) -> bool {
        self.status == STATUS_RUNNING
    }

    /// Winner id, or None while nobody has scored a win.
    pub fn winner(&self) -> Option<&str> {
        if self.winner.is_empty() {
            None
        } else {
            Some(&self.winner)
        }
    }
}

/// The `stats` object of a single-game response.
///
/// Both the current field names (`start_at`, `end_at`, `length`, `events`)
/// and the older ones (`StartedAt`/`started_at`, `EndedAt`/`ended_at`,
/// `game_duration`/`GameDuration`, `timeline`) are accepted, also side by side;
/// the current name wins when both carry a value. Missing fields and `null`
/// fall back to defaults; a field of the wrong JSON type is an error.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawGameStats")]
pub struct GameStats {
    pub status: String,
    pub start_at: String,
    pub end_at: String,
    pub length: i64,
    pub completed: bool,
    pub winner: String,
    pub highscore: i64,
    pub scoreboard: Scoreboard,
    pub nodeboard: NodeBoard,
    pub nodes: Vec<String>,
    pub teams: Vec<String>,
    /// Event records are passed through untouched.
    pub events: Vec<Value>,
}

/// Wire form of [`GameStats`], one field per spelling.
#[derive(Deserialize)]
struct RawGameStats {
    #[serde(default, deserialize_with = "null_as_default")]
    status: String,

    #[serde(default)]
    start_at: Option<String>,
    #[serde(default)]
    started_at: Option<String>,
    #[serde(default, rename = "StartedAt")]
    started_at_go: Option<String>,

    #[serde(default)]
    end_at: Option<String>,
    #[serde(default)]
    ended_at: Option<String>,
    #[serde(default, rename = "EndedAt")]
    ended_at_go: Option<String>,

    #[serde(default)]
    length: Option<i64>,
    #[serde(default)]
    game_duration: Option<i64>,
    #[serde(default, rename = "GameDuration")]
    game_duration_go: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    completed: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    winner: String,

    #[serde(default, deserialize_with = "null_as_default")]
    highscore: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    scoreboard: Scoreboard,

    #[serde(default, deserialize_with = "null_as_default")]
    nodeboard: NodeBoard,

    #[serde(default, deserialize_with = "null_as_default")]
    nodes: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    teams: Vec<String>,

    #[serde(default)]
    events: Option<Vec<Value>>,
    #[serde(default)]
    timeline: Option<Vec<Value>>,
}

impl From<RawGameStats> for GameStats {
    fn from(raw: RawGameStats) -> Self {
        Self {
            status: raw.status,
            start_at: raw
                .start_at
                .or(raw.started_at)
                .or(raw.started_at_go)
                .unwrap_or_default(),
            end_at: raw
                .end_at
                .or(raw.ended_at)
                .or(raw.ended_at_go)
                .unwrap_or_default(),
            length: raw
                .length
                .or(raw.game_duration)
                .or(raw.game_duration_go)
                .unwrap_or_default(),
            completed: raw.completed,
            winner: raw.winner,
            highscore: raw.highscore,
            scoreboard: raw.scoreboard,
            nodeboard: raw.nodeboard,
            nodes: raw.nodes,
            teams: raw.teams,
            events: raw.events.or(raw.timeline).unwrap_or_default(),
        }
    }
}

impl GameStats {
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            status: self.status.clone(),
            start_at: self.start_at.clone(),
            end_at: self.end_at.clone(),
            length: self.length,
            completed: self.completed,
            winner: self.winner.clone(),
            highscore: self.highscore,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
