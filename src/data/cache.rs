//! Time-bounded memoization for fetched series.
//!
//! An explicit map from cache key to `(value, fetched-at)` with one fixed
//! TTL. Entries expire individually on read; the refresh action clears the
//! whole map. The cache is owned by `DataFeed`, not a module-level global,
//! so tests can construct their own with a short TTL.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::domain::Series;

pub struct TtlCache {
    entries: HashMap<String, (Series, Instant)>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Return the cached series for `key` if it is still fresh.
    ///
    /// Stale entries are evicted on the spot rather than waiting for the next
    /// insert.
    pub fn get(&mut self, key: &str) -> Option<Series> {
        match self.entries.get(key) {
            Some((_, fetched_at)) if fetched_at.elapsed() > self.ttl => {
                self.entries.remove(key);
                None
            }
            Some((series, _)) => Some(series.clone()),
            None => None,
        }
    }

    pub fn put(&mut self, key: &str, series: Series) {
        self.entries.insert(key.to_string(), (series, Instant::now()));
    }

    /// Wholesale invalidation, used by the manual refresh trigger.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn one_point() -> Series {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Series::new(vec![(d, 1.0)])
    }

    #[test]
    fn fresh_entry_hits() {
        let mut cache = TtlCache::new(Duration::from_secs(900));
        cache.put("SPY", one_point());
        let hit = cache.get("SPY").expect("fresh entry should hit");
        assert_eq!(hit.latest(), Some(1.0));
    }

    #[test]
    fn stale_entry_misses_and_is_evicted() {
        let mut cache = TtlCache::new(Duration::ZERO);
        cache.put("SPY", one_point());
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("SPY").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_everything() {
        let mut cache = TtlCache::new(Duration::from_secs(900));
        cache.put("SPY", one_point());
        cache.put("HYG", one_point());
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.get("SPY").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn unknown_key_misses() {
        let mut cache = TtlCache::new(Duration::from_secs(900));
        assert!(cache.get("XLF").is_none());
    }
}
