//! Time-bounded cache of live exchange rates.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

use tripcalc_types::{RateQuery, RateResult};

/// Default freshness window: one hour.
pub const DEFAULT_RATE_TTL_MILLIS: i64 = 3_600_000;

#[derive(Debug, Clone)]
struct CacheEntry {
    result: RateResult,
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

/// Concurrent rate cache keyed by `FROM_TO`.
///
/// Stale entries are ignored on read and replaced by the next insert for the
/// same pair; nothing sweeps them in the background.
pub struct RateCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_RATE_TTL_MILLIS))
    }
}

impl RateCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached rate for `query` if it is still fresh.
    pub fn get(&self, query: &RateQuery) -> Option<RateResult> {
        self.get_at(query, Utc::now())
    }

    pub(crate) fn get_at(&self, query: &RateQuery, now: DateTime<Utc>) -> Option<RateResult> {
        let entry = self.entries.get(&query.cache_key())?;
        if entry.is_fresh(now, self.ttl) {
            debug!(pair = %query, "Rate cache hit");
            Some(entry.result.clone())
        } else {
            debug!(pair = %query, "Rate cache entry stale");
            None
        }
    }

    /// Stores a live rate, replacing any previous entry and timestamp.
    pub fn insert(&self, result: RateResult) {
        self.insert_at(result, Utc::now());
    }

    pub(crate) fn insert_at(&self, result: RateResult, fetched_at: DateTime<Utc>) {
        let key = result.query().cache_key();
        self.entries.insert(key, CacheEntry { result, fetched_at });
    }

    /// Number of entries held, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
