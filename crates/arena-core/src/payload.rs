//! Classification of `/games/{id}` response bodies.

use std::fmt;

use serde_json::Value;

use crate::game_data::GameStats;

/// Id the backend uses for the aggregate game listing.
pub const ALL_GAMES: &str = "all";

/// Id the backend resolves to the game in progress.
pub const CURRENT_GAME: &str = "current";

/// What a `/games/{id}` request asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameTarget {
    All,
    Game(String),
}

impl GameTarget {
    pub fn parse(id: &str) -> Self {
        if id == ALL_GAMES {
            GameTarget::All
        } else {
            GameTarget::Game(id.to_string())
        }
    }

    pub fn id(&self) -> &str {
        match self {
            GameTarget::All => ALL_GAMES,
            GameTarget::Game(id) => id,
        }
    }

    /// Request path relative to the API base.
    pub fn path(&self) -> String {
        format!("/games/{}", self.id())
    }
}

impl fmt::Display for GameTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A response body sorted by which top-level key it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum GamePayload {
    /// `{"stats": {...}}`
    Detail(GameStats),
    /// `{"games": [...]}`
    List(Vec<Value>),
    /// Anything else, kept for diagnostics.
    Unrecognized(Value),
}

impl GamePayload {
    /// `stats` wins over `games` when both are present. A key holding `null`
    /// counts as absent.
    pub fn classify(mut body: Value) -> Result<Self, serde_json::Error> {
        if let Some(stats) = take_key(&mut body, "stats") {
            return Ok(GamePayload::Detail(serde_json::from_value(stats)?));
        }
        if let Some(games) = take_key(&mut body, "games") {
            return Ok(GamePayload::List(serde_json::from_value(games)?));
        }
        Ok(GamePayload::Unrecognized(body))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GamePayload::Detail(_) => "stats",
            GamePayload::List(_) => "games",
            GamePayload::Unrecognized(_) => "unrecognized",
        }
    }
}

fn take_key(body: &mut Value, key: &str) -> Option<Value> {
    let object = body.as_object_mut()?;
    if object.get(key).map_or(true, Value::is_null) {
        return None;
    }
    object.remove(key)
}
