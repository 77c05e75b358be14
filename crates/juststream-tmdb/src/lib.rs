pub mod client;
pub mod error;
pub mod filters;
pub mod traits;

pub use client::{retain_titles, TmdbClient};
pub use error::TmdbError;
pub use filters::{DiscoverFilters, SearchScope, TimeWindow, DEFAULT_SORT};
pub use traits::CatalogSource;
