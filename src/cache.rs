//! Session-scoped memo of TVL lookups keyed by protocol slug

use {
    crate::{llama::TvlSource, series::SeriesLookup},
    std::{
        collections::HashMap,
        sync::Arc,
        time::{Duration, Instant},
    },
    tokio::sync::RwLock,
};

/// Cached lookup outcome
struct CachedLookup {
    lookup: SeriesLookup,
    fetched_at: Instant,
}

/// Memoizes [`TvlSource`] results per slug
///
/// Both available series and no-data outcomes are cached. With `ttl = None`
/// entries live as long as the cache; otherwise an expired entry is refetched
/// on the next access.
pub struct TvlCache {
    source: Arc<dyn TvlSource>,
    entries: RwLock<HashMap<String, CachedLookup>>,
    ttl: Option<Duration>,
}

impl TvlCache {
    pub fn new(source: Arc<dyn TvlSource>, ttl: Option<Duration>) -> Self {
        Self {
            source,
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_fresh(&self, entry: &CachedLookup) -> bool {
        match self.ttl {
            Some(ttl) => entry.fetched_at.elapsed() <= ttl,
            None => true,
        }
    }

    /// Return the cached lookup for `slug`, fetching it on a miss
    pub async fn get_or_fetch(&self, slug: &str) -> SeriesLookup {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(slug) {
                if self.is_fresh(entry) {
                    log::trace!("cache hit: {}", slug);
                    return entry.lookup.clone();
                }
            }
        }

        // Lock is not held across the network call
        let lookup = self.source.fetch_tvl(slug).await;

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(slug) {
            if self.is_fresh(entry) {
                return entry.lookup.clone();
            }
        }

        log::debug!(
            "cached {} lookup for {} (available: {})",
            self.source.source_name(),
            slug,
            lookup.is_available()
        );
        entries.insert(
            slug.to_string(),
            CachedLookup {
                lookup: lookup.clone(),
                fetched_at: Instant::now(),
            },
        );
        lookup
    }

    /// Drop one slug so the next access refetches it
    pub async fn invalidate(&self, slug: &str) -> bool {
        self.entries.write().await.remove(slug).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached slugs, fresh or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
