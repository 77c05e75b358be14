use crate::storage::{KeyValueStore, StorageError};
use juststream_models::WatchHistoryEntry;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Storage slot holding the serialized history
pub const WATCH_HISTORY_KEY: &str = "watchHistory";

/// Hard cap on remembered entries
pub const MAX_HISTORY_ENTRIES: usize = 20;

/// Number of entries the home view shows
pub const DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Watch history storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize watch history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Capped, deduplicated, most-recent-first record of what the user watched.
///
/// The manager owns only its store. Every operation reads the whole list from
/// the `watchHistory` slot and, for writes, replaces it.
pub struct WatchHistoryManager<S> {
    store: S,
}

impl<S: KeyValueStore> WatchHistoryManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a viewing. Storage failures are logged and the previous
    /// history is left as it was.
    pub fn record(&mut self, entry: WatchHistoryEntry) {
        if let Err(e) = self.try_record(entry) {
            warn!("Failed to update watch history: {}", e);
        }
    }

    pub fn try_record(&mut self, entry: WatchHistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load();
        let key = entry.key();

        entries.retain(|existing| existing.key() != key);
        debug!("Recording {} {} ({:?}) at the front of watch history", entry.media_type, entry.id, key);
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY_ENTRIES);

        let serialized = serde_json::to_string(&entries)?;
        self.store.set(WATCH_HISTORY_KEY, serialized)?;
        Ok(())
    }

    /// Entries most recent first, truncated to `limit` when given.
    pub fn list(&self, limit: Option<usize>) -> Vec<WatchHistoryEntry> {
        let mut entries = self.load();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            warn!("Failed to clear watch history: {}", e);
        }
    }

    pub fn try_clear(&mut self) -> Result<(), HistoryError> {
        self.store.remove(WATCH_HISTORY_KEY)?;
        info!("Watch history cleared");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn load(&self) -> Vec<WatchHistoryEntry> {
        let raw = match self.store.get(WATCH_HISTORY_KEY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return Vec::new(),
            Err(e) => {
                warn!("Watch history unavailable, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<WatchHistoryEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(MAX_HISTORY_ENTRIES);
                entries
            }
            Err(e) => {
                warn!("Stored watch history is unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }
}
