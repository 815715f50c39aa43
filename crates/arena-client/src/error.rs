//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(&'static str),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("JSON serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ClientError {
    /// Status code of a non-success response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Request(e) => e.status(),
            _ => None,
        }
    }
}
