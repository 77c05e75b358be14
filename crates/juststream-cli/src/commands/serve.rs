use super::load_config;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use juststream_config::{PathManager, ServerConfig};
use std::path::PathBuf;

/// Command-line flags win over `PORT` and the config file
pub fn effective_server_config(mut server: ServerConfig, port: Option<u16>, root: Option<PathBuf>) -> ServerConfig {
    if let Some(port) = port {
        server.port = port;
    }
    if let Some(root) = root {
        server.root = root;
    }
    server
}

pub async fn run_serve(port: Option<u16>, root: Option<PathBuf>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = load_config(&paths)?;
    let server = effective_server_config(config.server, port, root);

    if !server.root.is_dir() {
        return Err(eyre!("Site directory {} does not exist", server.root.display()));
    }

    output.info(format!("Serving {} at http://{}:{}/", server.root.display(), server.host, server.port));
    output.info("Press Ctrl-C to stop.");

    juststream_server::run(&server)
        .await
        .map_err(|e| eyre!("Server on {}:{} failed: {}", server.host, server.port, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = ServerConfig::default();
        config.port = 4000;

        let server = effective_server_config(config.clone(), None, None);
        assert_eq!(server.port, 4000);
        assert_eq!(server.root, PathBuf::from("."));

        let server = effective_server_config(config, Some(8080), Some(PathBuf::from("public")));
        assert_eq!(server.port, 8080);
        assert_eq!(server.root, PathBuf::from("public"));
    }
}
