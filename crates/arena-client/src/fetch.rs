//! Fetch a game resource and copy the result into the store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use arena_core::{GamePayload, GameTarget};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::store::DashboardStore;

/// What a fetch did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Single-game containers were replaced.
    Detail,
    /// The game list was replaced.
    List,
    /// Neither key was present; nothing was written.
    Unrecognized,
    /// A newer request of the same kind had already been applied.
    Stale,
}

/// Sequence number drawn when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Last-request-wins fence for one kind of request.
///
/// Tickets are issued in request order. A response is applied only if no
/// later ticket has been applied already.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Run `apply` if `ticket` is newer than every ticket applied so far.
    /// The check and the write happen under one lock.
    pub fn apply_if_newer<R>(&self, ticket: Ticket, apply: impl FnOnce() -> R) -> Option<R> {
        let mut applied = self.applied.lock().unwrap_or_else(|e| e.into_inner());
        if ticket.0 <= *applied {
            return None;
        }
        *applied = ticket.0;
        Some(apply())
    }

    pub fn latest_applied(&self) -> u64 {
        *self.applied.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Write a classified payload into the store.
pub fn apply_payload(store: &DashboardStore, payload: GamePayload) -> ApplyOutcome {
    match payload {
        GamePayload::Detail(stats) => {
            store.apply_stats(stats);
            ApplyOutcome::Detail
        }
        GamePayload::List(games) => {
            store.apply_games(games);
            ApplyOutcome::List
        }
        GamePayload::Unrecognized(body) => {
            warn!(%body, "Unexpected API response, expected a 'stats' or 'games' key");
            ApplyOutcome::Unrecognized
        }
    }
}

/// Owns the client, the store and one sequencer per request kind.
pub struct Fetcher {
    client: ApiClient,
    store: DashboardStore,
    detail: RequestSequencer,
    list: RequestSequencer,
}

impl Fetcher {
    pub fn new(client: ApiClient, store: DashboardStore) -> Self {
        Self {
            client,
            store,
            detail: RequestSequencer::new(),
            list: RequestSequencer::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    fn sequencer(&self, target: &GameTarget) -> &RequestSequencer {
        match target {
            GameTarget::All => &self.list,
            GameTarget::Game(_) => &self.detail,
        }
    }

    /// GET `/games/{id}` and apply the response.
    ///
    /// Transport, status and JSON errors are returned without touching the
    /// store.
    pub async fn fetch(&self, target: &GameTarget) -> Result<ApplyOutcome, ClientError> {
        let sequencer = self.sequencer(target);
        let ticket = sequencer.issue();

        let body = self.client.get_json(&target.path()).await?;
        let payload = GamePayload::classify(body).map_err(ClientError::Parse)?;
        let kind = payload.kind();

        match sequencer.apply_if_newer(ticket, || apply_payload(&self.store, payload)) {
            Some(outcome) => {
                debug!(game = %target, ticket = ticket.value(), kind, "Applied response");
                Ok(outcome)
            }
            None => {
                debug!(
                    game = %target,
                    ticket = ticket.value(),
                    latest = sequencer.latest_applied(),
                    "Discarding stale response"
                );
                Ok(ApplyOutcome::Stale)
            }
        }
    }
}
