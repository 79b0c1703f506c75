//! Similar-vendor lookup by shared category or cuisine.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::error::EngineError;
use super::ensure_limit;
use crate::model::SimilarVendor;
use crate::repository::Repository;

/// Finds vendors sharing a category or cuisine with a reference vendor.
///
/// Independent of the fusion pipeline; a single lightweight query with no
/// caching.
pub struct SimilarityFinder<R> {
    repo: Arc<R>,
}

impl<R> Clone for SimilarityFinder<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: Repository> SimilarityFinder<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns up to `limit` vendors similar to `vendor_id`, best first.
    ///
    /// Fails with [`EngineError::VendorNotFound`] when the reference vendor
    /// does not exist. A known vendor with no overlapping peers yields an
    /// empty sequence.
    #[instrument(skip(self))]
    pub async fn similar(
        &self,
        vendor_id: &str,
        limit: usize,
    ) -> Result<Vec<SimilarVendor>, EngineError> {
        ensure_limit(limit)?;

        let profile = self
            .repo
            .vendor(vendor_id)
            .await?
            .ok_or_else(|| EngineError::VendorNotFound {
                vendor_id: vendor_id.to_string(),
            })?;

        let mut rows = self
            .repo
            .similar_vendors(vendor_id, &profile.category, &profile.cuisines, limit)
            .await?;

        rows.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.total_orders.cmp(&a.total_orders))
        });
        rows.truncate(limit);

        debug!(vendor_id, matches = rows.len(), "similarity lookup complete");
        Ok(rows.into_iter().map(SimilarVendor::from).collect())
    }
}
