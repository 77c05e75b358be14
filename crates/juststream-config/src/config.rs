use juststream_models::EmbedSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Listen port override
pub const PORT_ENV: &str = "PORT";
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub embed: EmbedConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
    #[serde(default = "default_backdrop_size")]
    pub backdrop_size: String,
    #[serde(default = "default_profile_size")]
    pub profile_size: String,
    #[serde(default = "default_still_size")]
    pub still_size: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedConfig {
    #[serde(default)]
    pub default_source: EmbedSource,
    #[serde(default = "default_vip_base_url")]
    pub vip_base_url: String,
    #[serde(default = "default_multiembed_base_url")]
    pub multiembed_base_url: String,
    #[serde(default = "default_vidsrc_base_url")]
    pub vidsrc_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding index.html and the static assets
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_poster_size() -> String {
    "w500".to_string()
}

fn default_backdrop_size() -> String {
    "original".to_string()
}

fn default_profile_size() -> String {
    "w185".to_string()
}

fn default_still_size() -> String {
    "w300".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_vip_base_url() -> String {
    "https://multiembed.mov/directstream.php".to_string()
}

fn default_multiembed_base_url() -> String {
    "https://multiembed.mov/".to_string()
}

fn default_vidsrc_base_url() -> String {
    "https://vidsrc.to/embed".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
            poster_size: default_poster_size(),
            backdrop_size: default_backdrop_size(),
            profile_size: default_profile_size(),
            still_size: default_still_size(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            default_source: EmbedSource::default(),
            vip_base_url: default_vip_base_url(),
            multiembed_base_url: default_multiembed_base_url(),
            vidsrc_base_url: default_vidsrc_base_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            root: default_root(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise start from defaults.
    /// Environment overrides are applied in both cases.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply `PORT` and `TMDB_API_KEY` from the given lookup.
    /// An unparseable port is ignored with a warning.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {} value: {:?}", PORT_ENV, port),
            }
        }

        if let Some(key) = lookup(TMDB_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.tmdb.api_key = key.trim().to_string();
        }
    }

    pub fn is_tmdb_configured(&self) -> bool {
        let key = self.tmdb.api_key.trim();
        !key.is_empty() && key != API_KEY_PLACEHOLDER
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("tmdb.base_url", &self.tmdb.base_url),
            ("tmdb.image_base_url", &self.tmdb.image_base_url),
            ("embed.vip_base_url", &self.embed.vip_base_url),
            ("embed.multiembed_base_url", &self.embed.multiembed_base_url),
            ("embed.vidsrc_base_url", &self.embed.vidsrc_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got {:?}", name, url));
            }
        }

        if self.tmdb.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("tmdb.timeout_seconds must be greater than zero"));
        }

        if self.server.host.trim().is_empty() {
            return Err(anyhow::anyhow!("server.host cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.tmdb.api_key = "test_key".to_string();
        config.embed.default_source = EmbedSource::VidSrc;
        config.server.port = 8080;

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.tmdb.api_key, "test_key");
        assert_eq!(loaded.embed.default_source, EmbedSource::VidSrc);
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.tmdb.poster_size, "w500");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[tmdb]\napi_key = \"abc\"\n").unwrap();
        assert_eq!(config.tmdb.api_key, "abc");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.embed.default_source, EmbedSource::Vip);
        assert_eq!(config.embed.vidsrc_base_url, "https://vidsrc.to/embed");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("PORT", "4321"), ("TMDB_API_KEY", " from-env ")].into_iter().collect();
        let mut config = Config::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 4321);
        assert_eq!(config.tmdb.api_key, "from-env");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides_from(|key| (key == PORT_ENV).then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.tmdb.image_base_url, "https://image.tmdb.org/t/p");
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_tmdb_configured());

        config.tmdb.api_key = "YOUR_API_KEY".to_string();
        assert!(!config.is_tmdb_configured());

        config.tmdb.api_key = "real_key".to_string();
        assert!(config.is_tmdb_configured());

        config.embed.vidsrc_base_url = "vidsrc.to/embed".to_string();
        assert!(config.validate().is_err());
    }
}
