//! Collaborative filtering over neighbor users' order history.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::error::EngineError;
use super::{cached_ids, ensure_limit, store_ids};
use crate::cache::{user_recommendations_key, CacheStore};
use crate::constants::COLLABORATIVE_CACHE_TTL;
use crate::repository::Repository;

/// Scores unvisited vendors by how often neighbor users order from them.
///
/// A neighbor is any other customer sharing at least
/// [`MIN_SHARED_VENDORS`](crate::constants::MIN_SHARED_VENDORS) delivered
/// vendors with the target user; at most
/// [`MAX_NEIGHBORS`](crate::constants::MAX_NEIGHBORS) neighbors contribute.
pub struct CollaborativeRanker<R, C> {
    repo: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> Clone for CollaborativeRanker<R, C> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<R, C> CollaborativeRanker<R, C>
where
    R: Repository,
    C: CacheStore,
{
    pub fn new(repo: Arc<R>, cache: Arc<C>) -> Self {
        Self { repo, cache }
    }

    /// Returns up to `limit` vendor ids ranked by neighbor order frequency.
    ///
    /// Results are cached per user; a hit is truncated to `limit` and
    /// returned without re-ranking (same staleness trade-off as trending).
    #[instrument(skip(self))]
    pub async fn collaborative(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, EngineError> {
        ensure_limit(limit)?;

        let key = user_recommendations_key(user_id);
        if let Some(mut cached) = cached_ids(self.cache.as_ref(), &key).await {
            debug!(user_id, cached_len = cached.len(), "collaborative cache hit");
            cached.truncate(limit);
            return Ok(cached);
        }

        let mut rows = self.repo.neighbor_vendor_scores(user_id, limit).await?;
        rows.sort_by(|a, b| {
            b.score.cmp(&a.score).then_with(|| {
                b.average_rating
                    .partial_cmp(&a.average_rating)
                    .unwrap_or(Ordering::Equal)
            })
        });

        let ids: Vec<String> = rows.into_iter().map(|row| row.vendor_id).collect();
        debug!(
            user_id,
            computed = ids.len(),
            "collaborative candidates scored from neighbor history"
        );

        store_ids(self.cache.as_ref(), &key, &ids, COLLABORATIVE_CACHE_TTL).await;
        Ok(ids)
    }
}
