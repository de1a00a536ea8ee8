// SPDX-License-Identifier: MPL-2.0
//! Rendition prefetch cache for faster lightbox navigation.
//!
//! When the viewer cursor moves, the host asks the cache which of the
//! renditions around the new position still need fetching, loads them in the
//! background, and inserts the results. The lightbox consults the cache before
//! issuing its own request.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used renditions are evicted first
//! - **Memory-bounded**: Total encoded size limited by a configurable byte limit
//! - **URL-keyed**: Renditions indexed by the URL they were fetched from
//! - **Best effort**: Failed loads are logged and forgotten

use crate::application::query::MediaCursor;
use crate::error::Result;
use crate::infrastructure::http::HttpClient;
use iced::widget::image;
use lru::LruCache;
use reqwest::Url;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Default cache size in bytes (48 MB).
pub const DEFAULT_PREFETCH_CACHE_BYTES: usize = 48 * 1024 * 1024;

/// Minimum cache size in bytes (8 MB).
pub const MIN_PREFETCH_CACHE_BYTES: usize = 8 * 1024 * 1024;

/// Maximum cache size in bytes (256 MB).
pub const MAX_PREFETCH_CACHE_BYTES: usize = 256 * 1024 * 1024;

/// Default maximum number of cached renditions.
pub const DEFAULT_MAX_ENTRIES: usize = 24;

/// Minimum number of cached renditions.
pub const MIN_MAX_ENTRIES: usize = 4;

/// Maximum number of cached renditions.
pub const MAX_MAX_ENTRIES: usize = 128;

/// Cache limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchConfig {
    pub max_bytes: usize,
    pub max_entries: usize,
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_PREFETCH_CACHE_BYTES,
            max_entries: DEFAULT_MAX_ENTRIES,
            enabled: true,
        }
    }
}

impl PrefetchConfig {
    /// Creates an enabled configuration with limits clamped to the supported range.
    #[must_use]
    pub fn new(max_bytes: usize, max_entries: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_PREFETCH_CACHE_BYTES, MAX_PREFETCH_CACHE_BYTES),
            max_entries: max_entries.clamp(MIN_MAX_ENTRIES, MAX_MAX_ENTRIES),
            enabled: true,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// An encoded rendition ready for display.
#[derive(Debug, Clone)]
pub struct Rendition {
    pub handle: image::Handle,
    /// Encoded size as received from the service.
    pub size_bytes: usize,
}

impl Rendition {
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len();
        Self {
            handle: image::Handle::from_bytes(bytes),
            size_bytes,
        }
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetchStats {
    pub entry_count: usize,
    pub total_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub insertions: u64,
}

impl PrefetchStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache of renditions keyed by URL.
pub struct RenditionCache {
    cache: LruCache<String, Rendition>,
    /// URLs whose load has been scheduled but not yet completed.
    in_flight: HashSet<String>,
    config: PrefetchConfig,
    current_bytes: usize,
    stats: PrefetchStats,
}

impl RenditionCache {
    #[must_use]
    pub fn new(config: PrefetchConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            in_flight: HashSet::new(),
            config,
            current_bytes: 0,
            stats: PrefetchStats::default(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Inserts a rendition and clears its in-flight mark.
    ///
    /// Returns `false` if caching is disabled or the rendition is larger than
    /// half the cache.
    pub fn insert(&mut self, url: String, rendition: Rendition) -> bool {
        self.in_flight.remove(&url);
        if !self.config.enabled {
            return false;
        }

        let size = rendition.size_bytes;
        if size > self.config.max_bytes / 2 {
            return false;
        }

        if let Some(existing) = self.cache.pop(&url) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes);
        }

        while self.current_bytes + size > self.config.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes);
                self.stats.evictions += 1;
            }
        }

        // Entry-count eviction done by `push`.
        if let Some((evicted_url, evicted)) = self.cache.push(url.clone(), rendition) {
            if evicted_url != url {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes);
                self.stats.evictions += 1;
            }
        }
        self.current_bytes += size;
        self.stats.insertions += 1;
        self.stats.entry_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;
        true
    }

    /// Looks up a rendition, updating LRU order and hit/miss counters.
    pub fn get(&mut self, url: &str) -> Option<Rendition> {
        if !self.config.enabled {
            return None;
        }
        if let Some(rendition) = self.cache.get(url) {
            self.stats.hits += 1;
            Some(rendition.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Looks up a rendition without touching LRU order or statistics.
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<&Rendition> {
        if !self.config.enabled {
            return None;
        }
        self.cache.peek(url)
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.config.enabled && self.cache.contains(url)
    }

    /// Returns the URLs that still need loading and marks them in flight.
    ///
    /// URLs already cached or already being loaded are skipped, as are
    /// duplicates within `urls`.
    pub fn claim_for_prefetch(&mut self, urls: &[String]) -> Vec<String> {
        if !self.config.enabled {
            return Vec::new();
        }
        let mut claimed = Vec::new();
        for url in urls {
            if self.cache.contains(url) || self.in_flight.contains(url) {
                continue;
            }
            self.in_flight.insert(url.clone());
            claimed.push(url.clone());
        }
        claimed
    }

    /// Clears the in-flight mark of a load that failed.
    pub fn abandon(&mut self, url: &str) {
        self.in_flight.remove(url);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.in_flight.clear();
        self.current_bytes = 0;
        self.stats.entry_count = 0;
        self.stats.total_bytes = 0;
    }

    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }

    #[must_use]
    pub fn config(&self) -> &PrefetchConfig {
        &self.config
    }
}

impl std::fmt::Debug for RenditionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenditionCache")
            .field("enabled", &self.config.enabled)
            .field("entry_count", &self.cache.len())
            .field("in_flight", &self.in_flight.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_entries", &self.config.max_entries)
            .field("stats", &self.stats)
            .finish()
    }
}

/// URLs worth having ready around the cursor: the focused item, then the
/// next and previous ones with wrap-around.
///
/// Items for which `url` yields `None` (videos) are skipped.
pub fn prefetch_targets<T>(
    cursor: &MediaCursor<T>,
    url: impl Fn(&T) -> Option<String>,
) -> Vec<String> {
    cursor.neighbors().into_iter().filter_map(url).collect()
}

/// Decides which renditions to fetch after the cursor moved.
///
/// With caching enabled, every target not yet cached or in flight is claimed.
/// Without a cache nothing can be prefetched, so only `focused` is loaded.
pub fn preview_requests(
    cache: &mut RenditionCache,
    focused: Option<&str>,
    targets: &[String],
) -> Vec<String> {
    if cache.is_enabled() {
        cache.claim_for_prefetch(targets)
    } else {
        focused.map(str::to_owned).into_iter().collect()
    }
}

/// Loads one rendition for the cache.
///
/// Returns the URL alongside the result so the caller can file it.
pub async fn load_rendition(client: HttpClient, url: String) -> (String, Result<Rendition>) {
    let result = match Url::parse(&url) {
        Ok(parsed) => client.fetch_bytes(parsed).await.map(Rendition::from_bytes),
        Err(e) => Err(crate::error::Error::InvalidUrl(format!("{url}: {e}"))),
    };
    (url, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaItem;

    fn rendition(size: usize) -> Rendition {
        Rendition::from_bytes(vec![0u8; size])
    }

    fn url(i: usize) -> String {
        format!("http://localhost:8000/drive/file/{i}/preview?w=1600")
    }

    fn cache() -> RenditionCache {
        RenditionCache::new(PrefetchConfig::default())
    }

    fn small_config(max_bytes: usize, max_entries: usize) -> PrefetchConfig {
        PrefetchConfig {
            max_bytes,
            max_entries,
            enabled: true,
        }
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = cache();
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
    }

    #[test]
    fn insert_and_get() {
        let mut cache = cache();
        assert!(cache.insert(url(1), rendition(1000)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&url(1)).map(|r| r.size_bytes), Some(1000));
        assert_eq!(cache.memory_usage(), 1000);
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let mut cache = RenditionCache::new(PrefetchConfig::disabled());
        assert!(!cache.insert(url(1), rendition(10)));
        assert!(cache.get(&url(1)).is_none());
        assert!(cache.claim_for_prefetch(&[url(1)]).is_empty());
    }

    #[test]
    fn byte_limit_evicts_least_recently_used() {
        let mut cache = RenditionCache::new(small_config(10_000, 100));
        cache.insert(url(1), rendition(4_000));
        cache.insert(url(2), rendition(4_000));
        // Touch 1 so that 2 is the LRU entry.
        let _ = cache.get(&url(1));
        cache.insert(url(3), rendition(4_000));

        assert!(cache.contains(&url(1)));
        assert!(!cache.contains(&url(2)));
        assert!(cache.contains(&url(3)));
        assert!(cache.memory_usage() <= 10_000);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn entry_limit_evicts_and_tracks_bytes() {
        let mut cache = RenditionCache::new(small_config(1_000_000, 2));
        cache.insert(url(1), rendition(100));
        cache.insert(url(2), rendition(100));
        cache.insert(url(3), rendition(100));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.memory_usage(), 200);
        assert!(!cache.contains(&url(1)));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn replacing_an_entry_updates_size() {
        let mut cache = cache();
        cache.insert(url(1), rendition(100));
        cache.insert(url(1), rendition(300));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.memory_usage(), 300);
    }

    #[test]
    fn oversized_rendition_not_cached() {
        let mut cache = RenditionCache::new(small_config(1_000, 10));
        assert!(!cache.insert(url(1), rendition(600)));
        assert!(cache.is_empty());
    }

    #[test]
    fn claim_skips_cached_in_flight_and_duplicates() {
        let mut cache = cache();
        cache.insert(url(1), rendition(10));

        let first = cache.claim_for_prefetch(&[url(1), url(2), url(3), url(2)]);
        assert_eq!(first, vec![url(2), url(3)]);

        // Already in flight: not claimed again.
        assert!(cache.claim_for_prefetch(&[url(2), url(3)]).is_empty());

        // A failed load can be retried later.
        cache.abandon(&url(2));
        assert_eq!(cache.claim_for_prefetch(&[url(2)]), vec![url(2)]);

        // Completing a load clears the mark; the entry is now cached.
        cache.insert(url(3), rendition(10));
        assert!(cache.claim_for_prefetch(&[url(3)]).is_empty());
        assert!(cache.contains(&url(3)));
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let mut cache = cache();
        cache.insert(url(1), rendition(10));
        let _ = cache.get(&url(1));
        let _ = cache.get(&url(2));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn peek_does_not_count() {
        let mut cache = cache();
        cache.insert(url(1), rendition(10));
        assert!(cache.peek(&url(1)).is_some());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn clear_removes_everything() {
        let mut cache = cache();
        cache.insert(url(1), rendition(10));
        let _ = cache.claim_for_prefetch(&[url(2)]);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.claim_for_prefetch(&[url(2)]), vec![url(2)]);
        assert_eq!(cache.memory_usage(), 0);
    }

    #[test]
    fn config_clamps_values() {
        let config = PrefetchConfig::new(0, 0);
        assert_eq!(config.max_bytes, MIN_PREFETCH_CACHE_BYTES);
        assert_eq!(config.max_entries, MIN_MAX_ENTRIES);

        let config = PrefetchConfig::new(usize::MAX, usize::MAX);
        assert_eq!(config.max_bytes, MAX_PREFETCH_CACHE_BYTES);
        assert_eq!(config.max_entries, MAX_MAX_ENTRIES);
    }

    fn items(specs: &[(&str, &str)]) -> Vec<MediaItem> {
        specs
            .iter()
            .map(|(id, mime)| MediaItem::new(*id, format!("{id}.bin"), *mime).unwrap())
            .collect()
    }

    fn photos(ids: &[&str]) -> Vec<MediaItem> {
        items(&ids.iter().map(|id| (*id, "image/jpeg")).collect::<Vec<_>>())
    }

    fn url_of(id: &str) -> String {
        format!("http://localhost:8000/drive/file/{id}/preview?w=1600")
    }

    fn preview(item: &MediaItem) -> Option<String> {
        (!item.is_video()).then(|| url_of(&item.id))
    }

    #[test]
    fn targets_wrap_around_the_first_item() {
        let mut cursor = MediaCursor::new();
        cursor.open(photos(&["a", "b", "c"]), 0);
        assert_eq!(
            prefetch_targets(&cursor, preview),
            vec![url_of("a"), url_of("b"), url_of("c")]
        );

        cursor.open(photos(&["a", "b", "c"]), 2);
        assert_eq!(
            prefetch_targets(&cursor, preview),
            vec![url_of("c"), url_of("a"), url_of("b")]
        );
    }

    #[test]
    fn single_item_is_its_own_only_target() {
        let mut cursor = MediaCursor::new();
        cursor.open(photos(&["only"]), 0);
        assert_eq!(prefetch_targets(&cursor, preview), vec![url_of("only")]);
    }

    #[test]
    fn closed_cursor_has_no_targets() {
        let cursor: MediaCursor = MediaCursor::new();
        assert!(prefetch_targets(&cursor, preview).is_empty());
    }

    #[test]
    fn videos_are_skipped() {
        let mut cursor = MediaCursor::new();
        cursor.open(
            items(&[("a", "image/jpeg"), ("clip", "video/mp4"), ("c", "image/png")]),
            0,
        );
        assert_eq!(
            prefetch_targets(&cursor, preview),
            vec![url_of("a"), url_of("c")]
        );

        cursor.next();
        assert_eq!(
            prefetch_targets(&cursor, preview),
            vec![url_of("c"), url_of("a")]
        );
    }

    #[test]
    fn moving_onto_an_in_flight_neighbor_fetches_nothing_twice() {
        let mut cache = cache();
        let mut cursor = MediaCursor::new();
        cursor.open(photos(&["a", "b", "c", "d"]), 0);

        let targets = prefetch_targets(&cursor, preview);
        let first = preview_requests(&mut cache, Some(&url_of("a")), &targets);
        assert_eq!(first, vec![url_of("a"), url_of("b"), url_of("d")]);

        cursor.next();
        let targets = prefetch_targets(&cursor, preview);
        let second = preview_requests(&mut cache, Some(&url_of("b")), &targets);
        assert_eq!(second, vec![url_of("c")]);
    }

    #[test]
    fn failed_load_is_requested_again() {
        let mut cache = cache();
        let mut cursor = MediaCursor::new();
        cursor.open(photos(&["a", "b"]), 0);

        let targets = prefetch_targets(&cursor, preview);
        assert_eq!(
            preview_requests(&mut cache, Some(&url_of("a")), &targets),
            vec![url_of("a"), url_of("b")]
        );

        cache.abandon(&url_of("b"));
        cursor.next();
        let targets = prefetch_targets(&cursor, preview);
        assert_eq!(
            preview_requests(&mut cache, Some(&url_of("b")), &targets),
            vec![url_of("b")]
        );
    }

    #[test]
    fn cached_neighbors_are_not_requested() {
        let mut cache = cache();
        cache.insert(url_of("b"), rendition(10));
        let mut cursor = MediaCursor::new();
        cursor.open(photos(&["a", "b", "c"]), 0);

        let targets = prefetch_targets(&cursor, preview);
        assert_eq!(
            preview_requests(&mut cache, Some(&url_of("a")), &targets),
            vec![url_of("a"), url_of("c")]
        );
    }

    #[test]
    fn disabled_cache_loads_only_the_focused_item() {
        let mut cache = RenditionCache::new(PrefetchConfig::disabled());
        let mut cursor = MediaCursor::new();
        cursor.open(photos(&["a", "b", "c"]), 1);

        let targets = prefetch_targets(&cursor, preview);
        assert_eq!(
            preview_requests(&mut cache, Some(&url_of("b")), &targets),
            vec![url_of("b")]
        );
        // Every visit loads again, since nothing is kept.
        assert_eq!(
            preview_requests(&mut cache, Some(&url_of("b")), &targets),
            vec![url_of("b")]
        );
    }

    #[test]
    fn disabled_cache_loads_nothing_for_a_video() {
        let mut cache = RenditionCache::new(PrefetchConfig::disabled());
        let mut cursor = MediaCursor::new();
        cursor.open(items(&[("clip", "video/mp4"), ("b", "image/jpeg")]), 0);

        let targets = prefetch_targets(&cursor, preview);
        assert!(preview_requests(&mut cache, None, &targets).is_empty());
    }
}
