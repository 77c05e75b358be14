use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable that relocates every JustStream directory
pub const HOME_ENV: &str = "JUSTSTREAM_HOME";

/// Base directory override from `JUSTSTREAM_HOME`, if set
pub fn home_override() -> Option<PathBuf> {
    std::env::var(HOME_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("juststream");

        Ok(Self::from_base(base_dir))
    }

    /// Config file at the base, data and logs in subdirectories
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Durable key-value storage backing the watch history
    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }

    pub fn server_log_file(&self) -> PathBuf {
        self.log_dir.join("juststream.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = home_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/juststream on Linux)
        Self::new().unwrap_or_else(|_| Self::from_base(".juststream"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base("/srv/juststream");
        assert_eq!(paths.config_file(), PathBuf::from("/srv/juststream/config.toml"));
        assert_eq!(paths.storage_file(), PathBuf::from("/srv/juststream/data/storage.json"));
        assert_eq!(paths.server_log_file(), PathBuf::from("/srv/juststream/logs/juststream.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().join("home"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
