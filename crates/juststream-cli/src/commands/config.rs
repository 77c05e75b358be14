use super::prompts;
use crate::output::{new_table, Output};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use juststream_config::{Config, PathManager, TMDB_API_KEY_ENV};
use juststream_models::EmbedSource;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init => init_config(output),
        ConfigCommands::SetApiKey { key } => set_api_key(key, output),
        ConfigCommands::Path => show_paths(output),
    }
}

/// Config as stored on disk, without environment overrides, so saving it
/// never persists a key that only lives in the environment
fn load_stored(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    if !config_file.exists() {
        return Ok(Config::default());
    }
    Config::load_from_file(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

fn save(config: &Config, path_manager: &PathManager) -> Result<()> {
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    let config_file = path_manager.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() && !output.is_json() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Showing defaults. Run 'juststream config init' to create one.");
    }

    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let api_key = if full {
        config.tmdb.api_key.clone()
    } else {
        mask_string(&config.tmdb.api_key)
    };

    if output.is_json() {
        output.data(&json!({
            "config_file": config_file.display().to_string(),
            "tmdb": {
                "api_key": api_key,
                "configured": config.is_tmdb_configured(),
                "base_url": config.tmdb.base_url,
                "image_base_url": config.tmdb.image_base_url,
                "timeout_seconds": config.tmdb.timeout_seconds,
            },
            "embed": {
                "default_source": config.embed.default_source,
                "vip_base_url": config.embed.vip_base_url,
                "multiembed_base_url": config.embed.multiembed_base_url,
                "vidsrc_base_url": config.embed.vidsrc_base_url,
            },
            "server": {
                "host": config.server.host,
                "port": config.server.port,
                "root": config.server.root.display().to_string(),
            },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
                "file": config.logging.file.as_ref().map(|f| f.display().to_string()),
            },
        }));
        return Ok(());
    }

    output.heading("Configuration");

    let mut tmdb = new_table(&["TMDB", ""]);
    tmdb.add_row(vec![
        Cell::new("Configured"),
        Cell::new(if config.is_tmdb_configured() { "✓".green().to_string() } else { "✗".red().to_string() }),
    ]);
    tmdb.add_row(vec![Cell::new("API Key"), Cell::new(api_key)]);
    tmdb.add_row(vec![Cell::new("Base URL"), Cell::new(&config.tmdb.base_url)]);
    tmdb.add_row(vec![Cell::new("Image URL"), Cell::new(&config.tmdb.image_base_url)]);
    tmdb.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{} seconds", config.tmdb.timeout_seconds))]);
    output.table(&tmdb);

    let mut embed = new_table(&["Player", ""]);
    embed.add_row(vec![Cell::new("Default Server"), Cell::new(config.embed.default_source.label())]);
    embed.add_row(vec![Cell::new("VIP"), Cell::new(&config.embed.vip_base_url)]);
    embed.add_row(vec![Cell::new("Multiembed"), Cell::new(&config.embed.multiembed_base_url)]);
    embed.add_row(vec![Cell::new("VidSrc"), Cell::new(&config.embed.vidsrc_base_url)]);
    output.table(&embed);

    let mut server = new_table(&["Server", ""]);
    server.add_row(vec![
        Cell::new("Listen"),
        Cell::new(format!("{}:{}", config.server.host, config.server.port)),
    ]);
    server.add_row(vec![Cell::new("Root"), Cell::new(config.server.root.display())]);
    server.add_row(vec![Cell::new("Log Level"), Cell::new(&config.logging.level)]);
    output.table(&server);

    output.info(format!("Config file: {}", config_file.display()));
    Ok(())
}

fn init_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let mut config = load_stored(&path_manager)?;

    output.heading("JustStream Setup");
    output.info("Get a free API key at https://www.themoviedb.org/settings/api");

    let api_key = if config.is_tmdb_configured() {
        prompts::prompt_string("TMDB API Key", Some(&config.tmdb.api_key))?
    } else {
        prompts::prompt_password("TMDB API Key")?
    };
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(eyre!("A TMDB API key is required"));
    }
    config.tmdb.api_key = api_key.to_string();

    let labels: Vec<&str> = EmbedSource::ALL.iter().map(|s| s.label()).collect();
    let current = EmbedSource::ALL
        .iter()
        .position(|s| *s == config.embed.default_source)
        .unwrap_or(0);
    let choice = prompts::prompt_select("Default server", &labels, current)?;
    config.embed.default_source = EmbedSource::ALL[choice];

    config.server.port = prompts::prompt_port("Server port", config.server.port, output)?;

    save(&config, &path_manager)?;
    output.success(format!("Configuration saved to {}", path_manager.config_file().display()));
    Ok(())
}

fn set_api_key(key: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let mut config = load_stored(&path_manager)?;

    let key = match key {
        Some(key) => key,
        None => prompts::prompt_password("TMDB API Key")?,
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    config.tmdb.api_key = key.to_string();
    save(&config, &path_manager)?;
    output.success(format!("TMDB API key saved ({})", mask_string(key)));

    if std::env::var(TMDB_API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        output.warn(format!("{} is set and takes precedence over the saved key", TMDB_API_KEY_ENV));
    }
    Ok(())
}

fn show_paths(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let paths = [
        ("config_file", path_manager.config_file()),
        ("storage_file", path_manager.storage_file()),
        ("log_file", path_manager.server_log_file()),
    ];

    if output.is_json() {
        let map: serde_json::Map<String, serde_json::Value> = paths
            .iter()
            .map(|(name, path)| (name.to_string(), json!(path.display().to_string())))
            .collect();
        output.data(&map);
        return Ok(());
    }

    let mut table = new_table(&["", "Path"]);
    for (name, path) in &paths {
        table.add_row(vec![Cell::new(name.replace('_', " ")), Cell::new(path.display())]);
    }
    output.table(&table);
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == "YOUR_API_KEY" {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("YOUR_API_KEY"), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("0123456789abcdef"), "01***ef");
    }
}
