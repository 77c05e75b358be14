use chrono::Utc;
use serde::{Deserialize, Serialize};
use crate::media::{EpisodeRef, MediaType};

/// Display value used when a year or rating is unknown
pub const NOT_AVAILABLE: &str = "N/A";

/// Progress token recorded when playback starts
pub const DEFAULT_PROGRESS: &str = "10%";

/// One remembered viewing of a movie, a show, or a single episode.
///
/// The episode extension only exists for `MediaType::Tv`; the constructors
/// and the stored-format conversion both enforce that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredEntry", into = "StoredEntry")]
pub struct WatchHistoryEntry {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    /// Absolute image URL, resolved when the entry is created
    pub poster_url: String,
    pub year: String,
    pub rating: String,
    pub progress: String,
    episode: Option<EpisodeRef>,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
}

/// Identity used to deduplicate history entries.
///
/// Every episode of a show is tracked separately; a show-level record and
/// a movie are keyed by id and type only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKey {
    Title { id: u64, media_type: MediaType },
    Episode { id: u64, episode: EpisodeRef },
}

impl WatchHistoryEntry {
    pub fn new(id: u64, media_type: MediaType, title: impl Into<String>, poster_url: impl Into<String>) -> Self {
        Self {
            id,
            media_type,
            title: title.into(),
            poster_url: poster_url.into(),
            year: NOT_AVAILABLE.to_string(),
            rating: NOT_AVAILABLE.to_string(),
            progress: DEFAULT_PROGRESS.to_string(),
            episode: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = rating.into();
        self
    }

    pub fn with_progress(mut self, progress: impl Into<String>) -> Self {
        self.progress = progress.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach episode identity. Ignored for movies.
    pub fn with_episode(mut self, episode: EpisodeRef) -> Self {
        if self.media_type == MediaType::Tv {
            self.episode = Some(episode);
        }
        self
    }

    pub fn episode(&self) -> Option<EpisodeRef> {
        self.episode
    }

    pub fn key(&self) -> HistoryKey {
        match (self.media_type, self.episode) {
            (MediaType::Tv, Some(episode)) => HistoryKey::Episode { id: self.id, episode },
            (media_type, _) => HistoryKey::Title { id: self.id, media_type },
        }
    }
}

/// Persisted layout of an entry: camelCase keys, season/episode omitted
/// unless both are known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: u64,
    media_type: MediaType,
    #[serde(default)]
    title: String,
    #[serde(default)]
    poster_url: String,
    #[serde(default = "not_available")]
    year: String,
    #[serde(default = "not_available")]
    rating: String,
    #[serde(default = "default_progress")]
    progress: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    season_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    episode_number: Option<u32>,
    #[serde(default)]
    timestamp: i64,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn default_progress() -> String {
    DEFAULT_PROGRESS.to_string()
}

impl From<StoredEntry> for WatchHistoryEntry {
    fn from(stored: StoredEntry) -> Self {
        let episode = match (stored.media_type, stored.season_number, stored.episode_number) {
            (MediaType::Tv, Some(season), Some(episode)) => Some(EpisodeRef::new(season, episode)),
            _ => None,
        };

        Self {
            id: stored.id,
            media_type: stored.media_type,
            title: stored.title,
            poster_url: stored.poster_url,
            year: stored.year,
            rating: stored.rating,
            progress: stored.progress,
            episode,
            timestamp: stored.timestamp,
        }
    }
}

impl From<WatchHistoryEntry> for StoredEntry {
    fn from(entry: WatchHistoryEntry) -> Self {
        Self {
            id: entry.id,
            media_type: entry.media_type,
            title: entry.title,
            poster_url: entry.poster_url,
            year: entry.year,
            rating: entry.rating,
            progress: entry.progress,
            season_number: entry.episode.map(|e| e.season),
            episode_number: entry.episode.map(|e| e.episode),
            timestamp: entry.timestamp,
        }
    }
}
