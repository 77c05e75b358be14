use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Queries shorter than this never hit the catalog
pub const MIN_QUERY_LEN: usize = 2;

pub const MAX_SUGGESTIONS: usize = 8;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Trimmed query, or `None` when too short to search
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        None
    } else {
        Some(query.to_string())
    }
}

/// Collapses bursts of keystrokes into a single lookup.
///
/// Each call to [`Debouncer::settle`] supersedes every call still waiting.
/// Only a call that is not superseded within the quiet period yields its query.
/// Clones share the same generation counter.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn settle(&self, raw: &str) -> Option<String> {
        // A short query still cancels whatever was pending
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = normalize_query(raw)?;

        tokio::time::sleep(self.quiet_period).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            trace!("Suggestion query {:?} superseded", query);
            return None;
        }
        Some(query)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  matrix "), Some("matrix".to_string()));
        assert_eq!(normalize_query("ab"), Some("ab".to_string()));
        assert_eq!(normalize_query(" a "), None);
        assert_eq!(normalize_query(""), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_query_settles() {
        let debouncer = Debouncer::default();
        assert_eq!(debouncer.settle("dune").await.as_deref(), Some("dune"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_keystroke_supersedes_earlier() {
        let debouncer = Debouncer::default();
        let first = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle("ma").await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = debouncer.settle("mat").await;

        assert_eq!(first.await.unwrap(), None);
        assert_eq!(second.as_deref(), Some("mat"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_queries_both_settle() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        assert_eq!(debouncer.settle("alien").await.as_deref(), Some("alien"));
        assert_eq!(debouncer.settle("aliens").await.as_deref(), Some("aliens"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_cancels_pending() {
        let debouncer = Debouncer::default();
        let pending = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle("star").await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(debouncer.settle("s").await, None);
        assert_eq!(pending.await.unwrap(), None);
    }
}
