pub mod display;
pub mod history;
pub mod links;
pub mod storage;
pub mod suggest;

pub use display::{HistoryEntryBuilder, MediaCard, LOAD_ERROR_MESSAGE};
pub use history::{HistoryError, WatchHistoryManager, DISPLAY_LIMIT, MAX_HISTORY_ENTRIES, WATCH_HISTORY_KEY};
pub use links::{EmbedUrls, ImageUrls, PLACEHOLDER_IMAGE_URL};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use suggest::{normalize_query, Debouncer, MAX_SUGGESTIONS};
