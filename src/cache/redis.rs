//! Redis-backed cache store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use super::error::CacheError;
use super::{decode_ids, encode_ids, CacheStore};

/// [`CacheStore`] over a Redis connection with automatic reconnection.
#[derive(Clone)]
pub struct RedisCacheStore {
    connection: ConnectionManager,
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore").finish()
    }
}

impl RedisCacheStore {
    /// Connects to the Redis instance at `url`.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(|e| CacheError::Unavailable {
            message: e.to_string(),
        })?;

        let connection =
            ConnectionManager::new(client)
                .await
                .map_err(|e| CacheError::Unavailable {
                    message: e.to_string(),
                })?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get_ids(&self, key: &str) -> Result<Option<Vec<String>>, CacheError> {
        let mut connection = self.connection.clone();
        let raw: Option<String> =
            connection
                .get(key)
                .await
                .map_err(|e| CacheError::Unavailable {
                    message: e.to_string(),
                })?;

        raw.as_deref().map(decode_ids).transpose()
    }

    async fn put_ids(&self, key: &str, ids: &[String], ttl: Duration) -> Result<(), CacheError> {
        let payload = encode_ids(ids)?;
        let mut connection = self.connection.clone();
        let _: () = connection
            .set_ex(key, payload, ttl.as_secs())
            .await
            .map_err(|e| CacheError::Unavailable {
                message: e.to_string(),
            })?;
        Ok(())
    }
}
