//! # Feature: Snapshot History
//!
//! Bounded, most-recent-first list of computed snapshots persisted through an
//! injectable storage backend. Listeners are told after every save and clear.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Optional move-to-front on re-save
//! - 1.1.0: Change subscriptions with unsubscribe handles
//! - 1.0.0: Initial release with file-backed history capped at 10 entries

pub mod storage;

pub use storage::{FileStorage, HistoryStorage, MemoryStorage};

use log::{debug, error, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::PipelineError;
use crate::features::playlist::PlaylistSnapshot;

/// Maximum number of snapshots kept
pub const HISTORY_CAPACITY: usize = 10;

/// What happens when a snapshot is saved for an id already in history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResavePolicy {
    /// Overwrite the entry where it sits
    #[default]
    ReplaceInPlace,
    /// Overwrite and move the entry to the front
    MoveToFront,
}

/// Change notification delivered to listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    Saved { id: String },
    Cleared,
}

/// Handle returned by [`SnapshotCache::on_history_changed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&HistoryEvent) + Send + Sync>;

pub struct SnapshotCache {
    storage: Arc<dyn HistoryStorage>,
    policy: ResavePolicy,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

impl SnapshotCache {
    pub fn new(storage: Arc<dyn HistoryStorage>) -> Self {
        Self {
            storage,
            policy: ResavePolicy::default(),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Cache backed by process memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn with_resave_policy(mut self, policy: ResavePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read the persisted list; unreadable or corrupt data counts as empty
    fn load(&self) -> Vec<PlaylistSnapshot> {
        let raw = match self.storage.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read playlist history: {e:#}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<PlaylistSnapshot>>(&raw) {
            Ok(history) => history,
            Err(e) => {
                warn!("{}", PipelineError::StorageCorrupt(e.to_string()));
                Vec::new()
            }
        }
    }

    fn persist(&self, history: &[PlaylistSnapshot]) -> bool {
        let encoded = match serde_json::to_string(history) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("Failed to encode playlist history: {e}");
                return false;
            }
        };

        match self.storage.write(&encoded) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save playlist history: {e:#}");
                false
            }
        }
    }

    /// Insert or replace a snapshot, evicting the oldest entry past capacity
    pub fn save(&self, snapshot: &PlaylistSnapshot) {
        let mut history = self.load();

        match history.iter().position(|entry| entry.id == snapshot.id) {
            Some(index) => match self.policy {
                ResavePolicy::ReplaceInPlace => history[index] = snapshot.clone(),
                ResavePolicy::MoveToFront => {
                    history.remove(index);
                    history.insert(0, snapshot.clone());
                }
            },
            None => {
                history.insert(0, snapshot.clone());
                if history.len() > HISTORY_CAPACITY {
                    if let Some(evicted) = history.pop() {
                        debug!("Evicted playlist {} from history", evicted.id);
                    }
                }
            }
        }

        if self.persist(&history) {
            self.notify(&HistoryEvent::Saved {
                id: snapshot.id.clone(),
            });
        }
    }

    /// Every stored snapshot, most recent insert first
    pub fn get_all(&self) -> Vec<PlaylistSnapshot> {
        self.load()
    }

    pub fn get_by_id(&self, id: &str) -> Option<PlaylistSnapshot> {
        self.load().into_iter().find(|entry| entry.id == id)
    }

    pub fn clear(&self) {
        match self.storage.remove() {
            Ok(()) => self.notify(&HistoryEvent::Cleared),
            Err(e) => error!("Failed to clear playlist history: {e:#}"),
        }
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a callback run after every successful save or clear
    pub fn on_history_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&HistoryEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, Arc::new(callback)));
        }
        id
    }

    /// Remove a callback; returns false when the handle was unknown
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if let Ok(mut listeners) = self.listeners.lock() {
            if let Some(pos) = listeners.iter().position(|(sub, _)| *sub == id) {
                listeners.remove(pos);
                return true;
            }
        }
        false
    }

    fn notify(&self, event: &HistoryEvent) {
        // Snapshot the listeners so callbacks may (un)subscribe without deadlocking
        let listeners: Vec<Listener> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            listener(event);
        }
    }
}
