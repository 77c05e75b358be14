use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDB API key is not configured. Set it with `juststream config set-api-key` or the TMDB_API_KEY environment variable")]
    MissingApiKey,

    /// Carries no request URL; the query string holds the API key
    #[error("TMDB request failed: {0}")]
    Http(reqwest::Error),

    /// `body` is kept for debugging and left out of the message
    #[error("TMDB API error for {endpoint}: {status}")]
    Status {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("Failed to decode TMDB response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for TmdbError {
    fn from(e: reqwest::Error) -> Self {
        TmdbError::Http(e.without_url())
    }
}

impl TmdbError {
    /// True for 404 responses, e.g. an unknown title id
    pub fn is_not_found(&self) -> bool {
        matches!(self, TmdbError::Status { status: 404, .. })
    }
}
