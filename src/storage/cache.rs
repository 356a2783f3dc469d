use std::hash::{BuildHasher, Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;
use ahash::RandomState;
use log::{debug, trace};
use lru::LruCache;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::ngram::FrequencyMap;
use crate::config::subsystems::CacheConfig;
use super::metrics::{CacheMetrics, CacheStats};

// (digest of the raw document text, ngram size)
type CacheKey = (u64, usize);

struct CacheEntry {
    text: Box<str>,
    freqs: Arc<FrequencyMap>,
}

/// Bounded read-through cache of frequency maps keyed by raw text and ngram size.
///
/// The LRU index holds a digest of the text; each entry keeps one copy of the
/// text, compared on lookup, so a digest collision is a miss rather than a
/// wrong answer. Entries are immutable once inserted. Only the LRU bookkeeping
/// sits behind the mutex; the frequency computation for a miss runs without
/// holding the lock.
pub struct FrequencyCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    hasher: RandomState,
    metrics: CacheMetrics,
}

impl FrequencyCache {
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| Error::config("cache capacity must be greater than 0"))?;
        debug!("Initializing frequency cache with capacity={}", capacity);
        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hasher: RandomState::new(),
            metrics: CacheMetrics::new(),
        })
    }

    /// Build a cache from configuration, or `None` when caching is disabled.
    pub fn from_config(config: &CacheConfig) -> Result<Option<Self>> {
        if !config.enabled {
            debug!("Frequency cache disabled by configuration");
            return Ok(None);
        }
        Self::new(config.capacity).map(Some)
    }

    /// Return the cached map for `(raw_text, ngram_size)`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&self, raw_text: &str, ngram_size: usize, compute: F) -> Result<Arc<FrequencyMap>>
    where
        F: FnOnce() -> Result<FrequencyMap>,
    {
        let key = self.key(raw_text, ngram_size);

        let cached = self.entries.lock()
            .get(&key)
            .filter(|entry| &*entry.text == raw_text)
            .map(|entry| Arc::clone(&entry.freqs));
        if let Some(found) = cached {
            self.metrics.increment_hits();
            trace!("Frequency cache hit (ngram size {}, {} bytes)", ngram_size, raw_text.len());
            return Ok(found);
        }

        self.metrics.increment_misses();
        trace!("Frequency cache miss (ngram size {}, {} bytes)", ngram_size, raw_text.len());

        let computed = Arc::new(compute()?);

        let entry = CacheEntry {
            text: raw_text.into(),
            freqs: Arc::clone(&computed),
        };
        let displaced = self.entries.lock().push(key, entry);
        self.metrics.increment_inserts();
        if let Some((old_key, old_entry)) = displaced {
            // push also hands back the old value when another thread raced us to the same key
            if old_key != key || &*old_entry.text != raw_text {
                self.metrics.increment_evictions();
            }
        }

        Ok(computed)
    }

    pub fn contains(&self, raw_text: &str, ngram_size: usize) -> bool {
        self.entries.lock()
            .peek(&self.key(raw_text, ngram_size))
            .map_or(false, |entry| &*entry.text == raw_text)
    }

    fn key(&self, raw_text: &str, ngram_size: usize) -> CacheKey {
        let mut hasher = self.hasher.build_hasher();
        raw_text.hash(&mut hasher);
        (hasher.finish(), ngram_size)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
        self.metrics.reset();
    }

    pub fn stats(&self) -> CacheStats {
        self.metrics.get_stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::ngram::ngram_frequencies;

    fn compute(text: &str, n: usize) -> impl FnOnce() -> Result<FrequencyMap> + '_ {
        move || ngram_frequencies(text, n)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(FrequencyCache::new(0), Err(Error::Config(_))));
    }

    #[test]
    fn test_read_through_computes_once() {
        let cache = FrequencyCache::new(4).unwrap();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let freqs = cache.get_or_compute("abcabc", 2, || {
                calls.fetch_add(1, Ordering::SeqCst);
                ngram_frequencies("abcabc", 2)
            }).unwrap();
            assert_eq!(freqs.get("ab"), Some(&2));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.inserts, 1);
    }

    #[test]
    fn test_key_includes_ngram_size() {
        let cache = FrequencyCache::new(4).unwrap();
        cache.get_or_compute("abcd", 2, compute("abcd", 2)).unwrap();
        cache.get_or_compute("abcd", 3, compute("abcd", 3)).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("abcd", 2));
        assert!(cache.contains("abcd", 3));
        assert!(!cache.contains("abcd", 4));
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let cache = FrequencyCache::new(2).unwrap();
        cache.get_or_compute("first", 2, compute("first", 2)).unwrap();
        cache.get_or_compute("second", 2, compute("second", 2)).unwrap();

        // touch "first" so "second" becomes the eviction candidate
        cache.get_or_compute("first", 2, compute("first", 2)).unwrap();
        cache.get_or_compute("third", 2, compute("third", 2)).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);
        assert!(cache.contains("first", 2));
        assert!(!cache.contains("second", 2));
        assert!(cache.contains("third", 2));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_hits_share_the_stored_map() {
        let cache = FrequencyCache::new(2).unwrap();
        let document = "机器学习是人工智能的一个分支。".repeat(4096);

        let first = cache.get_or_compute(&document, 2, compute(&document, 2)).unwrap();
        let second = cache.get_or_compute(&document, 2, || -> Result<FrequencyMap> {
            panic!("hit must not recompute")
        }).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_equal_length_texts_are_distinct() {
        let cache = FrequencyCache::new(4).unwrap();
        let a = cache.get_or_compute("abcd", 2, compute("abcd", 2)).unwrap();
        let b = cache.get_or_compute("abce", 2, compute("abce", 2)).unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert!(b.contains_key("ce"));
        assert!(!cache.contains("abcf", 2));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_compute_error_is_not_cached() {
        let cache = FrequencyCache::new(2).unwrap();
        let result = cache.get_or_compute("abc", 0, compute("abc", 0));
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = FrequencyCache::new(8).unwrap();
        let texts = ["alpha beta", "gamma delta", "epsilon zeta"];

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for text in texts {
                        let freqs = cache.get_or_compute(text, 2, compute(text, 2)).unwrap();
                        assert_eq!(freqs.values().sum::<usize>(), text.chars().count() - 1);
                    }
                });
            }
        });

        assert_eq!(cache.len(), texts.len());
        assert_eq!(cache.stats().lookups(), 12);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_disabled_config_builds_nothing() {
        let config = CacheConfig { enabled: false, capacity: 16 };
        assert!(FrequencyCache::from_config(&config).unwrap().is_none());

        let config = CacheConfig { enabled: true, capacity: 16 };
        let cache = FrequencyCache::from_config(&config).unwrap().unwrap();
        assert_eq!(cache.capacity(), 16);
    }
}
