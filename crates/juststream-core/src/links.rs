use juststream_config::{EmbedConfig, TmdbConfig};
use juststream_models::{EmbedSource, EpisodeRef, MediaType, Video};

/// Shown wherever a title has no artwork
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Resolves catalog image paths (`/abc.jpg`) to absolute URLs.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
    poster_size: String,
    backdrop_size: String,
    profile_size: String,
    still_size: String,
}

impl ImageUrls {
    pub fn from_config(config: &TmdbConfig) -> Self {
        Self {
            base_url: config.image_base_url.trim_end_matches('/').to_string(),
            poster_size: config.poster_size.clone(),
            backdrop_size: config.backdrop_size.clone(),
            profile_size: config.profile_size.clone(),
            still_size: config.still_size.clone(),
        }
    }

    /// `{base}/{size}/{path}`, or the placeholder when the path is missing
    pub fn url(&self, path: Option<&str>, size: &str) -> String {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => format!("{}/{}/{}", self.base_url, size, path.trim_start_matches('/')),
            None => PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    pub fn poster(&self, path: Option<&str>) -> String {
        self.url(path, &self.poster_size)
    }

    pub fn backdrop(&self, path: Option<&str>) -> String {
        self.url(path, &self.backdrop_size)
    }

    pub fn profile(&self, path: Option<&str>) -> String {
        self.url(path, &self.profile_size)
    }

    pub fn still(&self, path: Option<&str>) -> String {
        self.url(path, &self.still_size)
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::from_config(&TmdbConfig::default())
    }
}

/// Builds third-party player URLs for a title.
#[derive(Debug, Clone)]
pub struct EmbedUrls {
    vip_base_url: String,
    multiembed_base_url: String,
    vidsrc_base_url: String,
}

impl EmbedUrls {
    pub fn from_config(config: &EmbedConfig) -> Self {
        Self {
            vip_base_url: config.vip_base_url.clone(),
            multiembed_base_url: config.multiembed_base_url.clone(),
            vidsrc_base_url: config.vidsrc_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Player URL for `source`. Season and episode are only appended for shows.
    pub fn url(&self, source: EmbedSource, media_type: MediaType, id: u64, episode: Option<EpisodeRef>) -> String {
        let episode = episode.filter(|_| media_type == MediaType::Tv);

        match source {
            EmbedSource::Vip => multiembed_url(&self.vip_base_url, id, episode),
            EmbedSource::Multiembed => multiembed_url(&self.multiembed_base_url, id, episode),
            EmbedSource::VidSrc => {
                let mut url = format!("{}/{}/{}", self.vidsrc_base_url, media_type, id);
                if let Some(ep) = episode {
                    url.push_str(&format!("/{}/{}", ep.season, ep.episode));
                }
                url
            }
        }
    }

    /// One URL per known source, in menu order
    pub fn all(&self, media_type: MediaType, id: u64, episode: Option<EpisodeRef>) -> Vec<(EmbedSource, String)> {
        EmbedSource::ALL
            .iter()
            .map(|source| (*source, self.url(*source, media_type, id, episode)))
            .collect()
    }
}

impl Default for EmbedUrls {
    fn default() -> Self {
        Self::from_config(&EmbedConfig::default())
    }
}

fn multiembed_url(base: &str, id: u64, episode: Option<EpisodeRef>) -> String {
    let mut url = format!("{}?video_id={}&tmdb=1", base, id);
    if let Some(ep) = episode {
        url.push_str(&format!("&s={}&e={}", ep.season, ep.episode));
    }
    url
}

pub fn watch_page_url(media_type: MediaType, id: u64, episode: Option<EpisodeRef>) -> String {
    let mut url = format!("watch.html?type={}&id={}", media_type, id);
    if let Some(ep) = episode.filter(|_| media_type == MediaType::Tv) {
        url.push_str(&format!("&season={}&episode={}", ep.season, ep.episode));
    }
    url
}

pub fn details_page_url(media_type: MediaType, id: u64) -> String {
    format!("details.html?type={}&id={}", media_type, id)
}

pub fn search_page_url(query: &str) -> String {
    format!("search.html?query={}", urlencoding::encode(query.trim()))
}

/// First YouTube trailer, as an embeddable URL
pub fn trailer_url(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.kind == "Trailer" && v.site == "YouTube")
        .map(|v| format!("{}/{}", YOUTUBE_EMBED_BASE, v.key))
}
