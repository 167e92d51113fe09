//! TTL-bounded cache of formatted cookie strings, keyed by platform.
//!
//! Validity is always recomputed from wall-clock time at query time: no
//! entry self-expires and no background timer runs. Stale entries are
//! ignored, not deleted, until overwritten by the next successful fetch —
//! which is what lets a transient remote hiccup leave a previously good
//! value in place.

use dashmap::DashMap;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    fetched_at: OffsetDateTime,
}

/// Per-platform cache status, a pure read.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub cached: bool,
    pub age_seconds: i64,
    pub remaining_seconds: i64,
    pub is_valid: bool,
    pub last_update: Option<String>,
}

impl CacheStatus {
    fn absent() -> Self {
        CacheStatus {
            cached: false,
            age_seconds: 0,
            remaining_seconds: 0,
            is_valid: false,
            last_update: None,
        }
    }
}

/// TTL cache of the last formatted cookie string per platform.
pub struct TtlCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        TtlCache {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, only while `now - fetched_at < ttl`. A stale entry
    /// behaves as a miss but stays in place.
    pub fn get(&self, platform: &str) -> Option<String> {
        let entry = self.entries.get(platform)?;
        if self.is_fresh(&entry, OffsetDateTime::now_utc()) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Unconditionally overwrite the entry and stamp it with the current
    /// time.
    pub fn put(&self, platform: &str, value: impl Into<String>) {
        self.entries.insert(
            platform.to_string(),
            CacheEntry {
                value: value.into(),
                fetched_at: OffsetDateTime::now_utc(),
            },
        );
    }

    /// Freshness and age report for one platform. Does not mutate.
    pub fn status(&self, platform: &str) -> CacheStatus {
        let now = OffsetDateTime::now_utc();
        match self.entries.get(platform) {
            Some(entry) => {
                let age = (now - entry.fetched_at).whole_seconds().max(0);
                let remaining = (self.ttl.whole_seconds() - age).max(0);
                CacheStatus {
                    cached: true,
                    age_seconds: age,
                    remaining_seconds: remaining,
                    is_valid: self.is_fresh(&entry, now),
                    last_update: entry.fetched_at.format(&Rfc3339).ok(),
                }
            }
            None => CacheStatus::absent(),
        }
    }

    /// Administrative reset: drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    fn is_fresh(&self, entry: &CacheEntry, now: OffsetDateTime) -> bool {
        now - entry.fetched_at < self.ttl
    }

    #[cfg(test)]
    fn put_with_timestamp(&self, platform: &str, value: &str, fetched_at: OffsetDateTime) {
        self.entries.insert(
            platform.to_string(),
            CacheEntry {
                value: value.to_string(),
                fetched_at,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_on_empty_cache() {
        let cache = TtlCache::new(Duration::seconds(60));
        assert_eq!(cache.get("douyin"), None);
        assert!(!cache.status("douyin").cached);
    }

    #[test]
    fn test_put_then_get() {
        let cache = TtlCache::new(Duration::seconds(60));
        cache.put("douyin", "a=1; b=2");
        assert_eq!(cache.get("douyin").as_deref(), Some("a=1; b=2"));
    }

    #[test]
    fn test_validity_boundary() {
        let ttl = 60;
        let cache = TtlCache::new(Duration::seconds(ttl));
        let now = OffsetDateTime::now_utc();

        cache.put_with_timestamp("fresh", "v", now - Duration::seconds(ttl - 1));
        assert_eq!(cache.get("fresh").as_deref(), Some("v"));

        cache.put_with_timestamp("stale", "v", now - Duration::seconds(ttl));
        assert_eq!(cache.get("stale"), None);
    }

    #[test]
    fn test_stale_entry_is_kept_not_deleted() {
        let cache = TtlCache::new(Duration::seconds(10));
        let old = OffsetDateTime::now_utc() - Duration::seconds(100);
        cache.put_with_timestamp("bilibili", "old=1", old);

        assert_eq!(cache.get("bilibili"), None);
        let status = cache.status("bilibili");
        assert!(status.cached);
        assert!(!status.is_valid);
        assert!(status.age_seconds >= 100);
        assert_eq!(status.remaining_seconds, 0);
        assert!(status.last_update.is_some());
    }

    #[test]
    fn test_put_overwrites_stale_entry() {
        let cache = TtlCache::new(Duration::seconds(10));
        let old = OffsetDateTime::now_utc() - Duration::seconds(100);
        cache.put_with_timestamp("bilibili", "old=1", old);

        cache.put("bilibili", "new=2");
        assert_eq!(cache.get("bilibili").as_deref(), Some("new=2"));
        assert!(cache.status("bilibili").is_valid);
    }

    #[test]
    fn test_status_remaining_seconds() {
        let cache = TtlCache::new(Duration::seconds(100));
        let now = OffsetDateTime::now_utc();
        cache.put_with_timestamp("tiktok", "v", now - Duration::seconds(40));

        let status = cache.status("tiktok");
        assert!(status.is_valid);
        assert!((59..=60).contains(&status.remaining_seconds));
    }

    #[test]
    fn test_clear() {
        let cache = TtlCache::new(Duration::seconds(60));
        cache.put("a", "1");
        cache.put("b", "2");
        cache.clear();
        assert_eq!(cache.get("a"), None);
        assert!(!cache.status("b").cached);
    }
}
