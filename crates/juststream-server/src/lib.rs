//! Static file server for the JustStream browser front end.

pub mod static_files;

use axum::Router;
use juststream_config::ServerConfig;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use static_files::{content_type_for, SiteRoot, INDEX_FILE};

pub fn router(root: impl Into<PathBuf>) -> Router {
    let site = Arc::new(SiteRoot::new(root));
    Router::new()
        .fallback(static_files::serve_file)
        .with_state(site)
        .layer(TraceLayer::new_for_http())
}

/// Bind `host:port` from the config and serve until Ctrl-C.
pub async fn run(config: &ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    serve(listener, config.root.clone(), shutdown_signal()).await
}

pub async fn serve<F>(listener: TcpListener, root: PathBuf, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, root = %root.display(), "Server running at http://{}/", addr);
    if !root.join(INDEX_FILE).is_file() {
        warn!("No {} under {}; only direct file requests will succeed", INDEX_FILE, root.display());
    }

    axum::serve(listener, router(root))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
