use crate::error::TmdbError;
use crate::filters::{DiscoverFilters, SearchScope, TimeWindow};
use async_trait::async_trait;
use juststream_models::{
    Credits, GenreList, Language, MediaType, MovieDetails, Page, SeasonDetails, TitleSummary, TvDetails,
    VideoList,
};

/// Read-only movie/TV metadata lookup.
///
/// Listing methods take 1-based page numbers. Search and suggestion results
/// only contain movies and shows.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Trending titles; `None` mixes movies and shows
    async fn trending(
        &self,
        media_type: Option<MediaType>,
        window: TimeWindow,
        page: u32,
    ) -> Result<Page<TitleSummary>, TmdbError>;

    async fn popular(&self, media_type: MediaType, page: u32) -> Result<Page<TitleSummary>, TmdbError>;
    async fn top_rated(&self, media_type: MediaType, page: u32) -> Result<Page<TitleSummary>, TmdbError>;
    async fn upcoming_movies(&self, page: u32) -> Result<Page<TitleSummary>, TmdbError>;

    async fn genres(&self, media_type: MediaType) -> Result<GenreList, TmdbError>;
    async fn languages(&self) -> Result<Vec<Language>, TmdbError>;

    async fn movie_details(&self, id: u64) -> Result<MovieDetails, TmdbError>;
    async fn tv_details(&self, id: u64) -> Result<TvDetails, TmdbError>;
    async fn season(&self, id: u64, season_number: u32) -> Result<SeasonDetails, TmdbError>;
    async fn credits(&self, media_type: MediaType, id: u64) -> Result<Credits, TmdbError>;
    async fn videos(&self, media_type: MediaType, id: u64) -> Result<VideoList, TmdbError>;
    async fn similar(&self, media_type: MediaType, id: u64, page: u32) -> Result<Page<TitleSummary>, TmdbError>;

    async fn search(&self, scope: SearchScope, query: &str, page: u32) -> Result<Page<TitleSummary>, TmdbError>;

    /// First page of a mixed search, adult titles excluded
    async fn suggestions(&self, query: &str) -> Result<Vec<TitleSummary>, TmdbError>;

    async fn discover(
        &self,
        media_type: MediaType,
        filters: &DiscoverFilters,
        page: u32,
    ) -> Result<Page<TitleSummary>, TmdbError>;
}
