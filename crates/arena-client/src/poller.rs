//! Repeating timers that re-fetch a game resource.

use std::sync::Arc;
use std::time::Duration;

use arena_core::GameTarget;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::fetch::Fetcher;

/// At most one single-game timer and one game-list timer.
///
/// Starting a timer replaces any running timer of the same kind. Each tick
/// spawns its fetch as its own task, so a slow request never delays the next
/// tick; stale responses are dropped by the fetcher's sequencers. Stopping a
/// timer does not cancel fetches already in flight.
pub struct Poller {
    fetcher: Arc<Fetcher>,
    interval: Duration,
    game: Option<JoinHandle<()>>,
    games: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(fetcher: Arc<Fetcher>, interval: Duration) -> Self {
        Self {
            fetcher,
            // tokio intervals panic on a zero period
            interval: interval.max(Duration::from_millis(1)),
            game: None,
            games: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Must be called from within a tokio runtime.
    pub fn start_game_polling(&mut self, id: &str) {
        let target = GameTarget::parse(id);
        info!(game = %target, interval = ?self.interval, "Polling game");
        let handle = self.spawn_timer(target);
        if let Some(old) = self.game.replace(handle) {
            old.abort();
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn start_games_polling(&mut self) {
        info!(interval = ?self.interval, "Polling game list");
        let handle = self.spawn_timer(GameTarget::All);
        if let Some(old) = self.games.replace(handle) {
            old.abort();
        }
    }

    pub fn stop_game_polling(&mut self) {
        if let Some(handle) = self.game.take() {
            handle.abort();
            debug!("Stopped game polling");
        }
    }

    pub fn stop_games_polling(&mut self) {
        if let Some(handle) = self.games.take() {
            handle.abort();
            debug!("Stopped game list polling");
        }
    }

    pub fn stop(&mut self) {
        self.stop_game_polling();
        self.stop_games_polling();
    }

    pub fn is_game_polling(&self) -> bool {
        self.game.is_some()
    }

    pub fn is_games_polling(&self) -> bool {
        self.games.is_some()
    }

    fn spawn_timer(&self, target: GameTarget) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let period = self.interval;

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let fetcher = Arc::clone(&fetcher);
                let target = target.clone();
                tokio::spawn(async move {
                    if let Err(e) = fetcher.fetch(&target).await {
                        warn!(game = %target, error = %e, "Poll fetch failed");
                    }
                });
            }
        })
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
