pub mod catalog;
pub mod embed;
pub mod media;
pub mod watch_history;

pub use catalog::{
    CastMember, Credits, Episode, Genre, GenreList, Language, MovieDetails, Page, SeasonDetails,
    SeasonSummary, TitleSummary, TvDetails, Video, VideoList,
};
pub use embed::EmbedSource;
pub use media::{EpisodeRef, MediaType};
pub use watch_history::{HistoryKey, WatchHistoryEntry, DEFAULT_PROGRESS, NOT_AVAILABLE};
