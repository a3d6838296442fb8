//! Result Cache
//!
//! In-memory map from the raw question text to the last pipeline outcome,
//! with a fixed wall-clock TTL shared by every entry. Expired entries are
//! evicted lazily, as a side effect of the read that finds them stale; no
//! background sweep runs, so `len()` may count entries past their TTL.
//!
//! The map is unbounded: no entry cap and no LRU eviction. Concurrent
//! writers to the same key race last-writer-wins; there is no single-flight
//! coordination, so two identical in-flight questions may each pay for a
//! synthesizer and executor round-trip.
//!
//! Keys are the question text verbatim. Whitespace or case variants of the
//! same intent miss the cache.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use querybi_core::QueryResponse;

/// Time-to-live applied to every cache entry.
pub const CACHE_TTL_SECONDS: u64 = 60;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: QueryResponse,
    expires_at: DateTime<Utc>,
}

/// TTL cache over pipeline responses, keyed by question text.
#[derive(Debug)]
pub struct ResultCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    /// Create a cache with the standard 60-second TTL.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::seconds(CACHE_TTL_SECONDS as i64),
        }
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: std::time::Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::seconds(CACHE_TTL_SECONDS as i64)),
        }
    }

    /// The configured TTL, for the health endpoint.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl.num_seconds().max(0) as u64
    }

    /// Return the cached response for a key, if present and unexpired.
    ///
    /// An expired entry is deleted as a side effect of the read and
    /// reported absent.
    pub fn get(&self, key: &str) -> Option<QueryResponse> {
        self.get_at(key, Utc::now())
    }

    fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<QueryResponse> {
        {
            let entry = self.entries.get(key)?;
            if now < entry.expires_at {
                return Some(entry.value.clone());
            }
        }
        // Guard dropped above; safe to take the write path.
        self.entries.remove(key);
        None
    }

    /// Store a response under a key, overwriting any existing entry.
    pub fn set(&self, key: &str, value: QueryResponse) {
        self.set_at(key, value, Utc::now());
    }

    fn set_at(&self, key: &str, value: QueryResponse, now: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Invalidate cache entries.
    ///
    /// - `Some(key)` removes one entry and reports whether it existed.
    /// - `None` clears the entire map unconditionally and reports success.
    pub fn invalidate(&self, key: Option<&str>) -> bool {
        match key {
            Some(key) => self.entries.remove(key).is_some(),
            None => {
                self.entries.clear();
                true
            }
        }
    }

    /// Number of resident entries, including any not-yet-swept expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
