//! Subscribable holder for the latest fetched payload of one resource.
//!
//! Each resource shown by the admin UI (tenant detail, dashboard metrics,
//! billing, domains) keeps its last payload together with a loading flag and
//! an error message. Subscribers see every change, and the current value
//! immediately on subscribe.

use chrono::{DateTime, Utc};

/// Identifies a subscription for [`ResultStore::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Snapshot of a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    /// Last successfully fetched payload.
    pub data: Option<T>,
    /// A load is in progress.
    pub loading: bool,
    /// Message of the last failed load.
    pub error: Option<String>,
    /// When `data` was last replaced.
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            last_updated: None,
        }
    }
}

type Subscriber<T> = Box<dyn FnMut(&StoreState<T>)>;

/// Mutable, subscribable container for one resource.
pub struct ResultStore<T> {
    state: StoreState<T>,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
}

impl<T> ResultStore<T> {
    /// Empty store: no data, not loading, no error.
    pub fn new() -> Self {
        Self {
            state: StoreState::default(),
            subscribers: Vec::new(),
            next_id: 1,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &StoreState<T> {
        &self.state
    }

    /// Shortcut for `state().data`.
    pub fn data(&self) -> Option<&T> {
        self.state.data.as_ref()
    }

    /// Register a callback. It runs once right away with the current state.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&StoreState<T>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        callback(&self.state);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Mark a load as started and clear the previous error.
    pub fn start_loading(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        self.notify();
    }

    /// Finish a load. Failures keep the previous data.
    pub fn finish(&mut self, result: Result<T, String>) {
        self.state.loading = false;
        match result {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.error = None;
                self.state.last_updated = Some(Utc::now());
            }
            Err(message) => self.state.error = Some(message),
        }
        self.notify();
    }

    /// Background refresh: replaces data on success, ignores failures silently.
    pub fn refresh(&mut self, result: Result<T, String>) {
        if let Ok(data) = result {
            self.state.data = Some(data);
            self.state.last_updated = Some(Utc::now());
            self.notify();
        }
    }

    /// Back to the empty state.
    pub fn reset(&mut self) {
        self.state = StoreState::default();
        self.notify();
    }

    fn notify(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback(&self.state);
        }
    }
}

impl<T> Default for ResultStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ResultStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
