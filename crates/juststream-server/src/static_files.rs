use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const INDEX_FILE: &str = "index.html";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Directory the site is served from
#[derive(Debug, Clone)]
pub struct SiteRoot {
    root: PathBuf,
}

impl SiteRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Map a request path onto a file below the root. `/` is the index page.
    /// Returns `None` for paths that would leave the root.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(request_path).ok()?;
        let relative = match decoded.trim_start_matches('/') {
            "" => INDEX_FILE,
            rest => rest,
        };

        let mut path = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(path)
    }
}

/// Content type by lowercase file extension
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn file_response(content_type: &'static str, content: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, content_type)], content).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// Serves any method on any path: files as-is, unknown pages through the
/// index so client-side routing can take over.
pub async fn serve_file(State(site): State<Arc<SiteRoot>>, uri: Uri) -> Response {
    let Some(path) = site.resolve(uri.path()) else {
        warn!(path = uri.path(), "Rejected path outside the site root");
        return not_found();
    };
    let extension = extension_of(&path);

    match tokio::fs::read(&path).await {
        Ok(content) => file_response(content_type_for(extension.as_deref()), content),
        Err(e) if e.kind() == ErrorKind::NotFound && extension.as_deref() == Some("html") => {
            debug!(path = uri.path(), "Page not found, serving {}", INDEX_FILE);
            match tokio::fs::read(site.path().join(INDEX_FILE)).await {
                Ok(content) => file_response(content_type_for(Some("html")), content),
                Err(e) => {
                    error!("Failed to read {}: {}", INDEX_FILE, e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => not_found(),
        Err(e) => {
            error!(path = uri.path(), "Failed to read file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Server Error: {:?}", e.kind())).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let site = SiteRoot::new("/srv/site");
        assert_eq!(site.resolve("/"), Some(PathBuf::from("/srv/site/index.html")));
        assert_eq!(site.resolve("/css/style.css"), Some(PathBuf::from("/srv/site/css/style.css")));
        assert_eq!(site.resolve("/./watch.html"), Some(PathBuf::from("/srv/site/watch.html")));
        assert_eq!(site.resolve("/my%20poster.png"), Some(PathBuf::from("/srv/site/my poster.png")));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let site = SiteRoot::new("/srv/site");
        assert_eq!(site.resolve("/../etc/passwd"), None);
        assert_eq!(site.resolve("/js/../../secret"), None);
        assert_eq!(site.resolve("/%2e%2e/secret"), None);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Some("html")), "text/html");
        assert_eq!(content_type_for(Some("js")), "text/javascript");
        assert_eq!(content_type_for(Some("jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Some("md")), "text/markdown");
        assert_eq!(content_type_for(Some("wasm")), "application/octet-stream");
        assert_eq!(content_type_for(None), "application/octet-stream");
        assert_eq!(extension_of(Path::new("/a/B.PNG")).as_deref(), Some("png"));
    }
}
