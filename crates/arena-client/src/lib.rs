//! Data-access layer for the arena scoreboard dashboard: fetch game state from
//! the backend API, keep it in observable containers, and poll for updates.

pub use arena_core;

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod http;
pub mod poller;
pub mod store;

pub use config::ClientConfig;
pub use dashboard::Dashboard;
pub use error::ClientError;
pub use fetch::ApplyOutcome;
pub use http::ApiClient;
pub use store::{DashboardStore, Observable, Subscription};
