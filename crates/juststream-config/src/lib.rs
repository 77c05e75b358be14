pub mod config;
pub mod paths;

pub use config::{Config, EmbedConfig, LoggingConfig, ServerConfig, TmdbConfig, PORT_ENV, TMDB_API_KEY_ENV};
pub use paths::{home_override, PathManager, HOME_ENV};
