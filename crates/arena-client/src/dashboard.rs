use std::sync::Arc;
use std::time::Duration;

use arena_core::GameTarget;
use reqwest::Response;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::fetch::{ApplyOutcome, Fetcher};
use crate::http::ApiClient;
use crate::poller::Poller;
use crate::store::DashboardStore;

/// Everything one dashboard view needs: the API client, the state store and
/// both poll timers. Dropping it stops the timers.
pub struct Dashboard {
    fetcher: Arc<Fetcher>,
    poller: Poller,
}

impl Dashboard {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = ApiClient::new(config)?;
        Ok(Self::with_client(client, config.poll_interval))
    }

    pub fn with_client(client: ApiClient, poll_interval: Duration) -> Self {
        let fetcher = Arc::new(Fetcher::new(client, DashboardStore::new()));
        let poller = Poller::new(Arc::clone(&fetcher), poll_interval);
        Self { fetcher, poller }
    }

    pub fn store(&self) -> &DashboardStore {
        self.fetcher.store()
    }

    pub fn client(&self) -> &ApiClient {
        self.fetcher.client()
    }

    /// One-shot fetch of a game id, `current`, or `all`.
    pub async fn fetch_game(&self, id: &str) -> Result<ApplyOutcome, ClientError> {
        self.fetcher.fetch(&GameTarget::parse(id)).await
    }

    pub async fn fetch_games(&self) -> Result<ApplyOutcome, ClientError> {
        self.fetcher.fetch(&GameTarget::All).await
    }

    pub async fn send_action<T>(&self, action: &str, payload: &T) -> Result<Response, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.fetcher.client().post_action(action, payload).await
    }

    /// Focus the dashboard on `id` and poll it instead of the previous game.
    pub fn select_game(&mut self, id: &str) {
        self.store().selected_game.replace(id.to_string());
        self.poller.start_game_polling(id);
    }

    pub fn start_game_polling(&mut self, id: &str) {
        self.poller.start_game_polling(id);
    }

    pub fn start_games_polling(&mut self) {
        self.poller.start_games_polling();
    }

    pub fn stop_game_polling(&mut self) {
        self.poller.stop_game_polling();
    }

    pub fn stop_games_polling(&mut self) {
        self.poller.stop_games_polling();
    }

    pub fn stop(&mut self) {
        self.poller.stop();
    }

    pub fn is_game_polling(&self) -> bool {
        self.poller.is_game_polling()
    }

    pub fn is_games_polling(&self) -> bool {
        self.poller.is_games_polling()
    }
}
