use arena_core::action::{ActionForm, ACTION_GAME_END, ACTION_GAME_MODE};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Thin wrapper over the arena REST API.
///
/// Cookies set by the backend are kept in a jar and sent back on every
/// request. Nothing is retried and no request timeout is applied.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_base(config.api_url())
    }

    /// Build a client for an absolute API base such as `http://host:8080/api/v1`.
    pub fn with_base(base: impl Into<String>) -> Result<Self, ClientError> {
        let base = base.into().trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|e| ClientError::InvalidUrl(format!("{base}: {e}")))?;

        let client = Client::builder()
            .user_agent("ArenaDashboard/1.0")
            .cookie_store(true)
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// GET `base + path`. The response is returned as-is, whatever its status.
    pub async fn get(&self, path: &str) -> Result<Response, ClientError> {
        let url = self.url(path);
        debug!(%url, "GET");
        Ok(self.client.get(&url).send().await?)
    }

    /// GET `base + path` and parse the body as JSON.
    /// Non-success statuses are reported before the body is parsed.
    pub async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let resp = self.get(path).await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ClientError::Parse)
    }

    /// POST a JSON-serialized payload to `base + /do/{action}`.
    /// No content-type header is set and the response is not inspected.
    pub async fn post_action<T>(&self, action: &str, payload: &T) -> Result<Response, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(ClientError::Serialize)?;
        let url = format!("{}/do/{}", self.base, urlencoding::encode(action));
        debug!(%url, action, "POST");
        Ok(self.client.post(&url).body(body).send().await?)
    }

    /// Switch the backend game mode, e.g. `simulation`.
    pub async fn set_game_mode(&self, mode: &str) -> Result<Response, ClientError> {
        self.post_action(ACTION_GAME_MODE, &ActionForm::new(mode)).await
    }

    pub async fn end_game(&self) -> Result<Response, ClientError> {
        self.post_action(ACTION_GAME_END, &ActionForm::empty()).await
    }
}
