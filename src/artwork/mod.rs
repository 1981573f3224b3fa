//! Cover art resolution
//!
//! Sources are tried in the configured order and the first non-empty answer
//! wins. The payload thumbnail is a source like any other; the placeholder is
//! always the last resort, so resolution never yields an empty string.

pub mod itunes;
pub mod search;

pub use itunes::ItunesClient;
pub use search::SearchClient;

use crate::config::{ArtworkConfig, ArtworkStep};
use crate::http::BoxFuture;
use crate::scrobble::{Track, TrackKey};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// A remote service that may know a cover URL for a track.
pub trait ArtworkSource: Send + Sync {
    fn lookup<'a>(&'a self, track: &'a Track) -> BoxFuture<'a, anyhow::Result<Option<String>>>;
}

type Cache = LruCache<(ArtworkStep, TrackKey), Option<String>>;

#[derive(Clone)]
pub struct ArtworkResolver {
    sources: Vec<(ArtworkStep, Arc<dyn ArtworkSource>)>,
    order: Vec<ArtworkStep>,
    placeholder: String,
    /// Remote answers per source, misses included.
    cache: Arc<Mutex<Cache>>,
}

impl ArtworkResolver {
    pub fn new(order: Vec<ArtworkStep>, placeholder: String, cache_size: usize) -> Self {
        let cap = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            sources: Vec::new(),
            order,
            placeholder,
            cache: Arc::new(Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn from_config(cfg: &ArtworkConfig, http: &reqwest::Client) -> Self {
        let mut resolver = Self::new(cfg.order.clone(), cfg.placeholder.clone(), cfg.cache_size);
        if let Some(url) = &cfg.search_url {
            resolver = resolver.with_source(
                ArtworkStep::Search,
                Arc::new(SearchClient::new(http.clone(), url.clone())),
            );
        }
        resolver.with_source(
            ArtworkStep::Itunes,
            Arc::new(ItunesClient::new(
                http.clone(),
                cfg.itunes_url.clone(),
                cfg.try_animated,
            )),
        )
    }

    pub fn with_source(mut self, step: ArtworkStep, source: Arc<dyn ArtworkSource>) -> Self {
        self.sources.retain(|(s, _)| *s != step);
        self.sources.push((step, source));
        self
    }

    /// Resolve a cover URL for `track`. Never fails and never returns "".
    pub async fn resolve(&self, track: &Track) -> String {
        for step in &self.order {
            let found = match step {
                ArtworkStep::Thumbnail => track.thumbnail.clone(),
                remote => self.remote(*remote, track).await,
            };
            if let Some(url) = found.filter(|u| !u.trim().is_empty()) {
                tracing::debug!(?step, %url, "artwork resolved");
                return url;
            }
        }
        self.placeholder.clone()
    }

    async fn remote(&self, step: ArtworkStep, track: &Track) -> Option<String> {
        let source = self
            .sources
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, src)| src.clone())?;

        let key = (step, track.key());
        if let Some(hit) = self.cache_get(&key) {
            tracing::debug!(?step, track = %key.1, "artwork cache hit");
            return hit;
        }

        let found = match source.lookup(track).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(?step, track = %key.1, "artwork lookup failed: {e:#}");
                // Errors are not cached so the next pass can retry.
                return None;
            }
        };
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, found.clone());
        }
        found
    }

    fn cache_get(&self, key: &(ArtworkStep, TrackKey)) -> Option<Option<String>> {
        self.cache.lock().ok()?.get(key).cloned()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixed-answer source that counts lookups.
    pub(crate) struct FakeArt {
        pub answer: Result<Option<String>, String>,
        pub calls: AtomicUsize,
    }

    impl FakeArt {
        pub fn new(answer: Result<Option<&str>, &str>) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.map(|a| a.map(str::to_string)).map_err(str::to_string),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ArtworkSource for FakeArt {
        fn lookup<'a>(&'a self, _track: &'a Track) -> BoxFuture<'a, anyhow::Result<Option<String>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let answer = self.answer.clone();
            Box::pin(async move { answer.map_err(|e| anyhow::anyhow!(e)) })
        }
    }

    pub(crate) fn track(title: &str, thumbnail: Option<&str>) -> Track {
        Track {
            title: title.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            timestamp: None,
            is_now_playing: true,
            source_url: "https://example.test/track".to_string(),
            thumbnail: thumbnail.map(str::to_string),
        }
    }

    fn resolver(order: Vec<ArtworkStep>) -> ArtworkResolver {
        ArtworkResolver::new(order, "placeholder.png".into(), 16)
    }

    const ALL: [ArtworkStep; 3] = [ArtworkStep::Search, ArtworkStep::Itunes, ArtworkStep::Thumbnail];

    #[tokio::test]
    async fn test_search_wins_first() {
        let search = FakeArt::new(Ok(Some("search.jpg")));
        let itunes = FakeArt::new(Ok(Some("itunes.jpg")));
        let r = resolver(ALL.to_vec())
            .with_source(ArtworkStep::Search, search.clone())
            .with_source(ArtworkStep::Itunes, itunes.clone());

        assert_eq!(r.resolve(&track("A", Some("thumb.jpg"))).await, "search.jpg");
        assert_eq!(itunes.calls(), 0);
    }

    #[tokio::test]
    async fn test_not_found_falls_through_to_thumbnail() {
        let search = FakeArt::new(Ok(None));
        let r = resolver(ALL.to_vec()).with_source(ArtworkStep::Search, search);
        assert_eq!(r.resolve(&track("A", Some("thumb.jpg"))).await, "thumb.jpg");
    }

    #[tokio::test]
    async fn test_everything_missing_uses_placeholder() {
        let search = FakeArt::new(Err("404"));
        let itunes = FakeArt::new(Ok(Some("  ")));
        let r = resolver(ALL.to_vec())
            .with_source(ArtworkStep::Search, search)
            .with_source(ArtworkStep::Itunes, itunes);
        assert_eq!(r.resolve(&track("A", Some(""))).await, "placeholder.png");
        assert_eq!(r.resolve(&track("B", None)).await, "placeholder.png");
    }

    #[tokio::test]
    async fn test_order_is_respected() {
        let itunes = FakeArt::new(Ok(Some("itunes.jpg")));
        let r = resolver(vec![ArtworkStep::Thumbnail, ArtworkStep::Itunes])
            .with_source(ArtworkStep::Itunes, itunes.clone());
        assert_eq!(r.resolve(&track("A", Some("thumb.jpg"))).await, "thumb.jpg");
        assert_eq!(itunes.calls(), 0);
        assert_eq!(r.resolve(&track("A", None)).await, "itunes.jpg");
    }

    #[tokio::test]
    async fn test_answers_and_misses_are_cached() {
        let search = FakeArt::new(Ok(None));
        let itunes = FakeArt::new(Ok(Some("itunes.jpg")));
        let r = resolver(ALL.to_vec())
            .with_source(ArtworkStep::Search, search.clone())
            .with_source(ArtworkStep::Itunes, itunes.clone());

        for _ in 0..3 {
            assert_eq!(r.resolve(&track("A", None)).await, "itunes.jpg");
        }
        assert_eq!(search.calls(), 1);
        assert_eq!(itunes.calls(), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let search = FakeArt::new(Err("boom"));
        let r = resolver(vec![ArtworkStep::Search]).with_source(ArtworkStep::Search, search.clone());
        r.resolve(&track("A", None)).await;
        r.resolve(&track("A", None)).await;
        assert_eq!(search.calls(), 2);
    }
}
