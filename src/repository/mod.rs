//! Repository facade over the relational order/vendor store.
//!
//! The engine consumes exactly seven read-only aggregate queries. Heavy
//! aggregation (neighbor discovery, candidate matching, recency windows)
//! stays in the store; final ranking order is always recomputed by the
//! engine, so implementations only need to return the documented rows.

pub mod error;
pub mod postgres;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::RepositoryError;
pub use postgres::PgRepository;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockRepository;

use async_trait::async_trait;

use crate::model::{
    CandidateVendor, NeighborVendorScore, SimilarVendorRow, TrendingVendor, UserHistoryEntry,
    Vendor, VendorProfile,
};

/// Read-only data access contract consumed by the recommendation engine.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Per-vendor aggregates over the user's delivered orders, most-ordered
    /// first.
    async fn user_order_aggregates(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserHistoryEntry>, RepositoryError>;

    /// Candidate vendors ordered by users who share at least
    /// [`MIN_SHARED_VENDORS`](crate::constants::MIN_SHARED_VENDORS) delivered
    /// vendors with `user_id`, excluding vendors the user already visited.
    /// At most `limit` rows.
    async fn neighbor_vendor_scores(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<NeighborVendorScore>, RepositoryError>;

    /// Active+online vendors the user has not visited whose primary category
    /// is in `categories` or whose cuisine set intersects `cuisines`.
    /// At most `limit` rows, best matches first.
    async fn content_candidates(
        &self,
        categories: &[String],
        cuisines: &[String],
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<CandidateVendor>, RepositoryError>;

    /// Active+online vendors ranked by order volume over the trailing
    /// recency window. At most `limit` rows.
    async fn trending(&self, limit: usize) -> Result<Vec<TrendingVendor>, RepositoryError>;

    /// Full vendor records for `ids`, in store order (callers re-order).
    async fn vendors_by_id(&self, ids: &[String]) -> Result<Vec<Vendor>, RepositoryError>;

    /// Category and cuisine facts for one vendor, or `None` if it does not
    /// exist.
    async fn vendor(&self, vendor_id: &str) -> Result<Option<VendorProfile>, RepositoryError>;

    /// Other active+online vendors sharing `category` or intersecting
    /// `cuisines`. At most `limit` rows.
    async fn similar_vendors(
        &self,
        vendor_id: &str,
        category: &str,
        cuisines: &[String],
        limit: usize,
    ) -> Result<Vec<SimilarVendorRow>, RepositoryError>;
}
