use crate::error::TmdbError;
use crate::filters::{DiscoverFilters, SearchScope, TimeWindow};
use crate::traits::CatalogSource;
use async_trait::async_trait;
use juststream_config::TmdbConfig;
use juststream_models::{
    Credits, GenreList, Language, MediaType, MovieDetails, Page, SeasonDetails, TitleSummary, TvDetails,
    VideoList,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

type Params = Vec<(&'static str, String)>;

/// TMDB v3 client authenticated with an API key query parameter.
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, TmdbError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .user_agent(concat!("juststream/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: config.api_key.trim().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// `{base}{endpoint}?api_key=..&k=v`, every key and value percent-encoded
    pub(crate) fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        let query = std::iter::once(("api_key", self.api_key.as_str()))
            .chain(params.iter().map(|(k, v)| (*k, v.as_str())))
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}{}?{}", self.base_url, endpoint, query)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, params: Params) -> Result<T, TmdbError> {
        if !self.has_api_key() {
            return Err(TmdbError::MissingApiKey);
        }

        debug!("GET {} {:?}", endpoint, params);
        let url = self.build_url(endpoint, &params);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("TMDB returned {} for {}", status, endpoint);
            return Err(TmdbError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| TmdbError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn page_param(page: u32) -> Params {
    vec![("page", page.max(1).to_string())]
}

/// Keep only movies and shows; multi search also returns people
pub fn retain_titles(page: &mut Page<TitleSummary>) {
    page.results.retain(|r| r.resolved_media_type().is_some());
}

#[derive(serde::Deserialize)]
struct Languages(Vec<Language>);

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn trending(
        &self,
        media_type: Option<MediaType>,
        window: TimeWindow,
        page: u32,
    ) -> Result<Page<TitleSummary>, TmdbError> {
        let scope = media_type.map(|m| m.as_str()).unwrap_or("all");
        self.get_json(&format!("/trending/{}/{}", scope, window), page_param(page)).await
    }

    async fn popular(&self, media_type: MediaType, page: u32) -> Result<Page<TitleSummary>, TmdbError> {
        self.get_json(&format!("/{}/popular", media_type), page_param(page)).await
    }

    async fn top_rated(&self, media_type: MediaType, page: u32) -> Result<Page<TitleSummary>, TmdbError> {
        self.get_json(&format!("/{}/top_rated", media_type), page_param(page)).await
    }

    async fn upcoming_movies(&self, page: u32) -> Result<Page<TitleSummary>, TmdbError> {
        self.get_json("/movie/upcoming", page_param(page)).await
    }

    async fn genres(&self, media_type: MediaType) -> Result<GenreList, TmdbError> {
        self.get_json(&format!("/genre/{}/list", media_type), Vec::new()).await
    }

    async fn languages(&self) -> Result<Vec<Language>, TmdbError> {
        let Languages(languages) = self.get_json::<Languages>("/configuration/languages", Vec::new()).await?;
        Ok(languages)
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails, TmdbError> {
        self.get_json(&format!("/movie/{}", id), Vec::new()).await
    }

    async fn tv_details(&self, id: u64) -> Result<TvDetails, TmdbError> {
        self.get_json(&format!("/tv/{}", id), Vec::new()).await
    }

    async fn season(&self, id: u64, season_number: u32) -> Result<SeasonDetails, TmdbError> {
        self.get_json(&format!("/tv/{}/season/{}", id, season_number), Vec::new()).await
    }

    async fn credits(&self, media_type: MediaType, id: u64) -> Result<Credits, TmdbError> {
        self.get_json(&format!("/{}/{}/credits", media_type, id), Vec::new()).await
    }

    async fn videos(&self, media_type: MediaType, id: u64) -> Result<VideoList, TmdbError> {
        self.get_json(&format!("/{}/{}/videos", media_type, id), Vec::new()).await
    }

    async fn similar(&self, media_type: MediaType, id: u64, page: u32) -> Result<Page<TitleSummary>, TmdbError> {
        self.get_json(&format!("/{}/{}/similar", media_type, id), page_param(page)).await
    }

    async fn search(&self, scope: SearchScope, query: &str, page: u32) -> Result<Page<TitleSummary>, TmdbError> {
        let mut params = vec![("query", query.trim().to_string())];
        params.extend(page_param(page));

        let mut results: Page<TitleSummary> = self.get_json(scope.endpoint(), params).await?;
        retain_titles(&mut results);
        Ok(results)
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<TitleSummary>, TmdbError> {
        let params = vec![
            ("query", query.trim().to_string()),
            ("page", "1".to_string()),
            ("include_adult", "false".to_string()),
        ];

        let mut results: Page<TitleSummary> = self.get_json(SearchScope::All.endpoint(), params).await?;
        retain_titles(&mut results);
        Ok(results.results)
    }

    async fn discover(
        &self,
        media_type: MediaType,
        filters: &DiscoverFilters,
        page: u32,
    ) -> Result<Page<TitleSummary>, TmdbError> {
        let mut params = page_param(page);
        params.extend(filters.to_params(media_type));
        self.get_json(&format!("/discover/{}", media_type), params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(api_key: &str) -> TmdbClient {
        let config = TmdbConfig {
            api_key: api_key.to_string(),
            ..Default::default()
        };
        TmdbClient::new(&config).unwrap()
    }

    #[test]
    fn test_build_url_encodes_params() {
        let url = client("k3y").build_url("/search/multi", &[("query", "fight club & co".to_string())]);
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/search/multi?api_key=k3y&query=fight%20club%20%26%20co"
        );
    }

    #[test]
    fn test_build_url_dotted_keys() {
        let url = client("k").build_url("/discover/movie", &[("vote_average.gte", "7".to_string())]);
        assert!(url.ends_with("&vote_average.gte=7"));
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let err = client("  ").movie_details(550).await.unwrap_err();
        assert!(matches!(err, TmdbError::MissingApiKey));
    }

    #[test]
    fn test_retain_titles_drops_people() {
        let mut page: Page<TitleSummary> = serde_json::from_value(json!({
            "page": 1,
            "results": [
                { "id": 1, "media_type": "movie", "title": "Heat" },
                { "id": 2, "media_type": "person", "name": "Al Pacino" },
                { "id": 3, "media_type": "tv", "name": "Heat Wave" }
            ],
            "total_pages": 1,
            "total_results": 3
        }))
        .unwrap();

        retain_titles(&mut page);
        let ids: Vec<u64> = page.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_languages_payload() {
        let Languages(languages) = serde_json::from_value::<Languages>(json!([
            { "iso_639_1": "en", "english_name": "English", "name": "English" },
            { "iso_639_1": "ko", "english_name": "Korean", "name": "한국어/조선말" }
        ]))
        .unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[1].iso_639_1, "ko");
    }

    #[test]
    fn test_not_found_status() {
        let err = TmdbError::Status { status: 404, endpoint: "/movie/0".to_string(), body: String::new() };
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let config = TmdbConfig {
            api_key: "SECRET123".to_string(),
            base_url: "http://127.0.0.1:1/3".to_string(),
            timeout_seconds: 2,
            ..Default::default()
        };
        let err = TmdbClient::new(&config).unwrap().movie_details(550).await.unwrap_err();

        assert!(matches!(err, TmdbError::Http(_)));
        assert!(!err.to_string().contains("SECRET123"));
        assert!(!format!("{:?}", err).contains("SECRET123"));
    }

    #[test]
    fn test_status_message_omits_body() {
        let err = TmdbError::Status {
            status: 401,
            endpoint: "/movie/550".to_string(),
            body: r#"{"status_message":"Invalid API key: You must be granted a valid key."}"#.to_string(),
        };
        assert_eq!(err.to_string(), "TMDB API error for /movie/550: 401");
    }
}
