//! In-process cache store with per-entry TTL.
//!
//! Suitable for single-node deployments and tests. Entries carry their own
//! TTL so trending and collaborative sequences can coexist with different
//! lifetimes in one store.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::sync::Cache;
use moka::Expiry;

use super::error::CacheError;
use super::{decode_ids, encode_ids, CacheStore};

#[derive(Clone)]
struct ExpiringEntry {
    payload: String,
    ttl: Duration,
}

struct PerEntryExpiry;

impl Expiry<String, ExpiringEntry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &ExpiringEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory [`CacheStore`] with LRU eviction and per-entry expiry.
pub struct MemoryCacheStore {
    entries: Cache<String, ExpiringEntry>,
}

impl MemoryCacheStore {
    const DEFAULT_CAPACITY: u64 = 10_000;

    /// Creates a store with the default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a store with a max entry capacity (LRU eviction).
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .expire_after(PerEntryExpiry)
                .build(),
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Removes all entries.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Returns `true` if `key` has a live entry.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheStore")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get_ids(&self, key: &str) -> Result<Option<Vec<String>>, CacheError> {
        self.entries
            .get(key)
            .map(|entry| decode_ids(&entry.payload))
            .transpose()
    }

    async fn put_ids(&self, key: &str, ids: &[String], ttl: Duration) -> Result<(), CacheError> {
        let payload = encode_ids(ids)?;
        self.entries
            .insert(key.to_string(), ExpiringEntry { payload, ttl });
        Ok(())
    }
}
