//! Localized placeholder lookup with per-prefix caching.
//!
//! **Why this exists**: several blocks on a page resolve UI strings
//! from the same `placeholders.json`, often while the page is still
//! decorating. The cache guarantees at most one in-flight fetch per
//! locale prefix, with every concurrent and subsequent caller resolved
//! from that single fetch.
//!
//! **Design**:
//! - One `PlaceholderCache` per page/process, injected into decorators
//!   via `DecorateContext` — no ambient global.
//! - A prefix's table slot is installed synchronously (under the lock)
//!   before any await, so concurrent callers join the same pending
//!   load instead of racing to start a second one.
//! - Fetch failure or malformed JSON caches an *empty* table for the
//!   prefix: lookups degrade to `""` and the resource is not retried
//!   for the lifetime of the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::config;
use crate::fetch::ResourceFetcher;

/// A resolved placeholder table: camelCase key → localized text.
pub type PlaceholderTable = Arc<HashMap<String, String>>;

/// Row shape of the placeholders resource: `{data:[{Key, Text}]}`.
#[derive(Debug, Deserialize)]
struct PlaceholderRow {
    #[serde(default, rename = "Key")]
    key: String,
    #[serde(default, rename = "Text")]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceholderSheet {
    #[serde(default)]
    data: Vec<PlaceholderRow>,
}

// ═══════════════════════════════════════════════════════════
// PlaceholderCache
// ═══════════════════════════════════════════════════════════

/// Per-prefix memoized placeholder lookup.
pub struct PlaceholderCache {
    fetcher: Arc<dyn ResourceFetcher>,
    /// prefix → resolved-or-pending table. The `OnceCell` is the
    /// single-flight guard: first caller initializes, the rest await.
    prefixes: Mutex<HashMap<String, Arc<OnceCell<PlaceholderTable>>>>,
}

impl PlaceholderCache {
    /// Create an empty cache over the given fetch boundary.
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self {
            fetcher,
            prefixes: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the full table for a prefix, fetching it on first use.
    pub async fn table(&self, prefix: &str) -> PlaceholderTable {
        let cell = {
            let mut prefixes = self
                .prefixes
                .lock()
                .expect("placeholder prefix table poisoned");
            prefixes.entry(prefix.to_string()).or_default().clone()
        };
        cell.get_or_init(|| self.load(prefix)).await.clone()
    }

    /// Resolve one placeholder under a prefix. Keys may be kebab-case,
    /// snake_case, or camelCase. Unresolved keys yield `""`.
    pub async fn get(&self, key: &str, prefix: &str) -> String {
        self.table(prefix)
            .await
            .get(&to_camel_case(key))
            .cloned()
            .unwrap_or_default()
    }

    /// `get` against the site-root (`default`) prefix.
    pub async fn get_default(&self, key: &str) -> String {
        self.get(key, config::DEFAULT_PREFIX).await
    }

    async fn load(&self, prefix: &str) -> PlaceholderTable {
        let path = config::placeholders_path(prefix);
        let json = match self.fetcher.fetch_json(&path).await {
            Ok(json) => json,
            Err(err) => {
                tracing::debug!(prefix, error = %err, "Placeholders fetch failed; caching empty table");
                return Arc::new(HashMap::new());
            }
        };

        let sheet: PlaceholderSheet = match serde_json::from_value(json) {
            Ok(sheet) => sheet,
            Err(err) => {
                tracing::debug!(prefix, error = %err, "Placeholders resource malformed; caching empty table");
                return Arc::new(HashMap::new());
            }
        };

        let table: HashMap<String, String> = sheet
            .data
            .into_iter()
            .filter(|row| !row.key.is_empty())
            .map(|row| (to_camel_case(&row.key), row.text))
            .collect();
        Arc::new(table)
    }
}

/// Normalize a key to camelCase. Kebab-case, snake_case, camelCase,
/// and PascalCase forms of the same words all map to one storage key.
fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut boundary = false;
    for c in key.chars() {
        if c == '-' || c == '_' {
            boundary = true;
            continue;
        }
        if out.is_empty() {
            out.push(c.to_ascii_lowercase());
        } else if boundary {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        boundary = false;
    }
    out
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock fetcher serving canned JSON by path, counting calls.
    struct MockFetcher {
        routes: HashMap<String, Value>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl MockFetcher {
        fn new(routes: Vec<(&str, Value)>) -> Self {
            Self {
                routes: routes
                    .into_iter()
                    .map(|(path, body)| (path.to_string(), body))
                    .collect(),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResourceFetcher for MockFetcher {
        async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.routes.get(path).cloned().ok_or(FetchError::Http {
                status: 404,
                path: path.to_string(),
            })
        }
    }

    fn fr_routes() -> Vec<(&'static str, Value)> {
        vec![(
            "fr/placeholders.json",
            json!({"data": [{"Key": "QuoteOfTheDay", "Text": "Citation du jour"}]}),
        )]
    }

    #[test]
    fn camel_case_forms_are_interchangeable() {
        for key in ["quote-of-the-day", "quote_of_the_day", "quoteOfTheDay", "QuoteOfTheDay"] {
            assert_eq!(to_camel_case(key), "quoteOfTheDay", "input {key:?}");
        }
    }

    #[tokio::test]
    async fn resolves_key_in_any_case_style() {
        let cache = PlaceholderCache::new(Arc::new(MockFetcher::new(fr_routes())));
        assert_eq!(cache.get("quote-of-the-day", "fr").await, "Citation du jour");
        assert_eq!(cache.get("quote_of_the_day", "fr").await, "Citation du jour");
        assert_eq!(cache.get("quoteOfTheDay", "fr").await, "Citation du jour");
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let fetcher = Arc::new(
            MockFetcher::new(fr_routes()).with_delay(Duration::from_millis(20)),
        );
        let cache = PlaceholderCache::new(fetcher.clone());

        let (a, b) = tokio::join!(
            cache.get("quote-of-the-day", "fr"),
            cache.get("quote-of-the-day", "fr"),
        );

        assert_eq!(a, "Citation du jour");
        assert_eq!(b, "Citation du jour");
        assert_eq!(fetcher.calls(), 1, "second caller must join the in-flight fetch");
    }

    #[tokio::test]
    async fn subsequent_callers_hit_the_cache() {
        let fetcher = Arc::new(MockFetcher::new(fr_routes()));
        let cache = PlaceholderCache::new(fetcher.clone());

        cache.get("quote-of-the-day", "fr").await;
        cache.get("quote-of-the-day", "fr").await;
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn missing_key_resolves_empty() {
        let cache = PlaceholderCache::new(Arc::new(MockFetcher::new(vec![(
            "/placeholders.json",
            json!({"data": []}),
        )])));
        assert_eq!(cache.get_default("missingKey").await, "");
    }

    #[tokio::test]
    async fn default_prefix_fetches_site_root_resource() {
        let fetcher = Arc::new(MockFetcher::new(vec![(
            "/placeholders.json",
            json!({"data": [{"Key": "quote-of-the-day", "Text": "Quote of the day"}]}),
        )]));
        let cache = PlaceholderCache::new(fetcher.clone());
        assert_eq!(cache.get_default("quote-of-the-day").await, "Quote of the day");
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_caches_empty_table_without_retry() {
        let fetcher = Arc::new(MockFetcher::new(vec![]));
        let cache = PlaceholderCache::new(fetcher.clone());

        assert_eq!(cache.get("quote-of-the-day", "fr").await, "");
        assert_eq!(cache.get("quote-of-the-day", "fr").await, "");
        assert_eq!(fetcher.calls(), 1, "failed fetch must not be retried");
    }

    #[tokio::test]
    async fn malformed_resource_degrades_to_empty_table() {
        let cache = PlaceholderCache::new(Arc::new(MockFetcher::new(vec![(
            "/placeholders.json",
            json!({"data": "not-an-array"}),
        )])));
        assert_eq!(cache.get_default("quote-of-the-day").await, "");
    }

    #[tokio::test]
    async fn distinct_prefixes_fetch_independently() {
        let mut routes = fr_routes();
        routes.push((
            "/placeholders.json",
            json!({"data": [{"Key": "quote-of-the-day", "Text": "Quote of the day"}]}),
        ));
        let fetcher = Arc::new(MockFetcher::new(routes));
        let cache = PlaceholderCache::new(fetcher.clone());

        assert_eq!(cache.get("quote-of-the-day", "fr").await, "Citation du jour");
        assert_eq!(cache.get_default("quote-of-the-day").await, "Quote of the day");
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn rows_without_key_are_skipped() {
        let cache = PlaceholderCache::new(Arc::new(MockFetcher::new(vec![(
            "/placeholders.json",
            json!({"data": [{"Text": "orphan"}, {"Key": "kept", "Text": "Kept"}]}),
        )])));
        let table = cache.table(config::DEFAULT_PREFIX).await;
        assert_eq!(table.len(), 1);
        assert_eq!(cache.get_default("kept").await, "Kept");
    }
}
