use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arena_client::{ApiClient, Dashboard};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use wiremock::MockServer;

pub const API_BASE: &str = "/api/v1";

/// Build an API path under the mock server's base.
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}

pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::with_base(format!("{}{}", server.uri(), API_BASE)).expect("valid base URL")
}

/// Dashboard against the mock server. Interval only matters for polling tests.
pub fn dashboard(server: &MockServer, poll_interval: Duration) -> Dashboard {
    Dashboard::with_client(client(server), poll_interval)
}

/// Counts WARN events emitted by the client crate.
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() == Level::WARN && meta.target().starts_with("arena_client") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Number of requests the mock server has seen for `path`.
pub async fn hits(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|req| req.url.path() == path)
        .count()
}
