//! Client configuration from environment variables

use std::env;
use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_API_BASE: &str = "/api/v1";
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API base path, or a full URL when the API lives on another host
    pub api_base: String,

    /// Scheme and host a relative `api_base` is resolved against
    pub origin: String,

    /// Delay between poll ticks
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_base = env::var("ARENA_API").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let origin = env::var("ARENA_ORIGIN").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());

        let poll_interval_ms = match env::var("ARENA_POLL_INTERVAL_MS") {
            Ok(v) => v
                .parse::<u64>()
                .map_err(|_| ClientError::Config("ARENA_POLL_INTERVAL_MS is not a number"))?,
            Err(_) => DEFAULT_POLL_INTERVAL_MS,
        };
        if poll_interval_ms == 0 {
            return Err(ClientError::Config("ARENA_POLL_INTERVAL_MS must be positive"));
        }

        Ok(Self {
            api_base,
            origin,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }

    /// Absolute URL every request path is appended to.
    pub fn api_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            base.to_string()
        } else {
            format!("{}{}", self.origin.trim_end_matches('/'), base)
        }
    }
}
