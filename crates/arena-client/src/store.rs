//! Observable state containers the dashboard renders from.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use arena_core::payload::CURRENT_GAME;
use arena_core::{GameStats, GameSummary, NodeBoard, Scoreboard};
use serde_json::Value;
use tokio::sync::watch;

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// A value that is only ever replaced wholesale, with change notification.
///
/// Callbacks run synchronously on the replacing thread. A callback must not
/// subscribe to or unsubscribe from the container that invoked it.
pub struct Observable<T> {
    tx: watch::Sender<T>,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_id: AtomicU64,
    revision: AtomicU64,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self {
            tx,
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            revision: AtomicU64::new(0),
        }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn replace(&self, value: T) {
        self.tx.send_replace(value);
        self.revision.fetch_add(1, Ordering::SeqCst);

        let current = self.get();
        for (_, listener) in self.lock_listeners().iter() {
            listener(&current);
        }
    }

    /// Register a callback. It runs once with the current value, then after
    /// every replace.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        callback(&self.get());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.lock_listeners().push((id, Box::new(callback)));
        Subscription(id)
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription.0);
        listeners.len() != before
    }

    /// Receiver for async consumers; `changed()` resolves on each replace.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of replaces so far.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(u64, Listener<T>)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Every container the dashboard reads from.
pub struct DashboardStore {
    pub current_game: Observable<GameSummary>,
    pub scoreboard: Observable<Scoreboard>,
    pub nodeboard: Observable<NodeBoard>,
    pub nodes: Observable<Vec<String>>,
    pub teams: Observable<Vec<String>>,
    pub events: Observable<Vec<Value>>,
    pub games: Observable<Vec<Value>>,
    /// Game id the dashboard is focused on.
    pub selected_game: Observable<String>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self {
            current_game: Observable::default(),
            scoreboard: Observable::default(),
            nodeboard: Observable::default(),
            nodes: Observable::default(),
            teams: Observable::default(),
            events: Observable::default(),
            games: Observable::default(),
            selected_game: Observable::new(CURRENT_GAME.to_string()),
        }
    }
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every single-game container from one `stats` object.
    pub fn apply_stats(&self, stats: GameStats) {
        self.current_game.replace(stats.summary());
        self.scoreboard.replace(stats.scoreboard);
        self.nodeboard.replace(stats.nodeboard);
        self.nodes.replace(stats.nodes);
        self.teams.replace(stats.teams);
        self.events.replace(stats.events);
    }

    pub fn apply_games(&self, games: Vec<Value>) {
        self.games.replace(games);
    }

    /// Sum of all container revisions; unchanged means nothing was written.
    pub fn total_revision(&self) -> u64 {
        self.current_game.revision()
            + self.scoreboard.revision()
            + self.nodeboard.revision()
            + self.nodes.revision()
            + self.teams.revision()
            + self.events.revision()
            + self.games.revision()
            + self.selected_game.revision()
    }
}
