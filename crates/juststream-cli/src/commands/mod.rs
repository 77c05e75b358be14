pub mod catalog;
pub mod config;
pub mod history;
pub mod prompts;
pub mod serve;
pub mod ui;
pub mod watch;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use juststream_config::{Config, LoggingConfig, PathManager};
use juststream_core::{FileStore, WatchHistoryManager, LOAD_ERROR_MESSAGE};
use juststream_models::MediaType;
use juststream_tmdb::{TmdbClient, TmdbError};
use tracing::error;

/// Logging section of the config file, defaults when it cannot be read
pub fn logging_settings() -> LoggingConfig {
    let paths = PathManager::default();
    Config::load_or_default(&paths.config_file())
        .map(|c| c.logging)
        .unwrap_or_default()
}

pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

pub fn history_manager(paths: &PathManager) -> WatchHistoryManager<FileStore> {
    WatchHistoryManager::new(FileStore::new(paths.storage_file()))
}

pub fn tmdb_client(config: &Config) -> Result<TmdbClient> {
    if !config.is_tmdb_configured() {
        return Err(eyre!(
            "TMDB API key is not configured. Run 'juststream config set-api-key' or set TMDB_API_KEY."
        ));
    }
    TmdbClient::new(&config.tmdb).wrap_err("Failed to create TMDB client")
}

/// User-facing report for a failed lookup. The cause only goes to the log.
pub fn lookup_failure(what: &str, e: &TmdbError) -> color_eyre::Report {
    error!("Failed to load {}: {}", what, e);
    eyre!(LOAD_ERROR_MESSAGE)
}

/// Like [`lookup_failure`], but an unknown id gets its own message
pub fn title_lookup_failure(media_type: MediaType, id: u64, e: &TmdbError) -> color_eyre::Report {
    if e.is_not_found() {
        error!("No {} with id {}: {}", media_type, id, e);
        return eyre!("No {} found with id {}", media_type, id);
    }
    lookup_failure(&format!("{} {}", media_type, id), e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use juststream_config::TmdbConfig;
    use juststream_tmdb::CatalogSource;

    #[tokio::test]
    async fn test_failed_lookup_shows_only_friendly_message() {
        let config = TmdbConfig {
            api_key: "SECRET123".to_string(),
            base_url: "http://127.0.0.1:1/3".to_string(),
            timeout_seconds: 2,
            ..Default::default()
        };
        let err = TmdbClient::new(&config).unwrap().movie_details(550).await.unwrap_err();

        let report = title_lookup_failure(MediaType::Movie, 550, &err);
        assert_eq!(report.to_string(), LOAD_ERROR_MESSAGE);
        assert!(!format!("{:?}", report).contains("SECRET123"));
    }

    #[test]
    fn test_unknown_title_message() {
        let err = TmdbError::Status {
            status: 404,
            endpoint: "/tv/0".to_string(),
            body: "{\"status_code\":34}".to_string(),
        };
        let report = title_lookup_failure(MediaType::Tv, 0, &err);
        assert_eq!(report.to_string(), "No tv found with id 0");
    }
}
