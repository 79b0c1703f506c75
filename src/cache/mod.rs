//! Cache facade over a TTL key-value store.
//!
//! Values are ordered vendor-id sequences serialized as a JSON string array
//! and parsed strictly on the way back out. Malformed content is rejected
//! with [`CacheError::Deserialization`]; cached data is never evaluated or
//! interpreted as anything but a list of identifiers.

pub mod error;
pub mod memory;
pub mod redis;


pub use error::CacheError;
pub use memory::MemoryCacheStore;
pub use redis::RedisCacheStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::constants::USER_RECOMMENDATIONS_KEY_PREFIX;

/// Key-value store with per-entry expiry, as consumed by the rankers.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the cached id sequence under `key`, or `None` on a miss or
    /// after expiry.
    async fn get_ids(&self, key: &str) -> Result<Option<Vec<String>>, CacheError>;

    /// Stores `ids` under `key` for `ttl`, overwriting any previous value.
    async fn put_ids(&self, key: &str, ids: &[String], ttl: Duration) -> Result<(), CacheError>;
}

/// Builds the cache key for a user's collaborative recommendations.
#[inline]
pub fn user_recommendations_key(user_id: &str) -> String {
    format!("{USER_RECOMMENDATIONS_KEY_PREFIX}{user_id}")
}

/// Serializes an id sequence into the cache wire format.
pub fn encode_ids(ids: &[String]) -> Result<String, CacheError> {
    serde_json::to_string(ids).map_err(|e| CacheError::Serialization {
        message: e.to_string(),
    })
}

/// Strictly parses a cached value back into an id sequence.
pub fn decode_ids(raw: &str) -> Result<Vec<String>, CacheError> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| CacheError::Deserialization {
        message: e.to_string(),
    })
}
