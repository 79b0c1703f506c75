//! Postgres-backed repository.
//!
//! Expects the platform's `orders` and `vendors` tables (owned by the order
//! and vendor services): `orders(customer_id, vendor_id, status, created_at,
//! customer_rating)` and `vendors(id, business_name, primary_category,
//! cuisines text[], average_rating, total_orders, is_active, is_online,
//! average_delivery_time, price_range)`.
//!
//! Every call acquires a connection from the shared pool for the duration of
//! one query and releases it on all exit paths.

use sqlx::postgres::{PgPool, PgPoolOptions};

use super::error::RepositoryError;
use super::Repository;
use crate::constants::{MAX_NEIGHBORS, MIN_SHARED_VENDORS, TRENDING_WINDOW_DAYS};
use crate::model::{
    CandidateVendor, NeighborVendorScore, SimilarVendorRow, TrendingVendor, UserHistoryEntry,
    Vendor, VendorProfile,
};

/// Pooled Postgres implementation of [`Repository`].
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PgRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgRepository")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

impl PgRepository {
    /// Connects to `database_url` with a pool of at most `max_connections`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed {
                url: database_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl Repository for PgRepository {
    async fn user_order_aggregates(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserHistoryEntry>, RepositoryError> {
        sqlx::query_as::<_, UserHistoryEntry>(
            r#"
            SELECT v.id AS vendor_id,
                   v.business_name AS name,
                   v.primary_category AS category,
                   COALESCE(v.cuisines, '{}') AS cuisines,
                   COUNT(*) AS order_count,
                   COALESCE(AVG(o.customer_rating), 0) AS avg_rating
            FROM orders o
            JOIN vendors v ON o.vendor_id = v.id
            WHERE o.customer_id = $1 AND o.status = 'delivered'
            GROUP BY v.id, v.business_name, v.primary_category, v.cuisines
            ORDER BY order_count DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::for_query("user_order_aggregates"))
    }

    async fn neighbor_vendor_scores(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<NeighborVendorScore>, RepositoryError> {
        sqlx::query_as::<_, NeighborVendorScore>(
            r#"
            WITH user_vendors AS (
                SELECT customer_id, vendor_id
                FROM orders
                WHERE status = 'delivered'
                GROUP BY customer_id, vendor_id
            ),
            target_vendors AS (
                SELECT vendor_id
                FROM user_vendors
                WHERE customer_id = $1
            ),
            neighbors AS (
                SELECT uv.customer_id
                FROM user_vendors uv
                JOIN target_vendors tv ON uv.vendor_id = tv.vendor_id
                WHERE uv.customer_id != $1
                GROUP BY uv.customer_id
                HAVING COUNT(DISTINCT uv.vendor_id) >= $2
                ORDER BY COUNT(DISTINCT uv.vendor_id) DESC
                LIMIT $3
            )
            SELECT v.id AS vendor_id,
                   COUNT(*) AS score,
                   COALESCE(v.average_rating, 0) AS average_rating
            FROM orders o
            JOIN vendors v ON o.vendor_id = v.id
            JOIN neighbors n ON o.customer_id = n.customer_id
            WHERE v.id NOT IN (SELECT vendor_id FROM target_vendors)
              AND v.is_active
              AND v.is_online
            GROUP BY v.id, v.average_rating
            ORDER BY score DESC, average_rating DESC, v.id
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(MIN_SHARED_VENDORS)
        .bind(MAX_NEIGHBORS)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::for_query("neighbor_vendor_scores"))
    }

    async fn content_candidates(
        &self,
        categories: &[String],
        cuisines: &[String],
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<CandidateVendor>, RepositoryError> {
        sqlx::query_as::<_, CandidateVendor>(
            r#"
            SELECT v.id AS vendor_id,
                   v.primary_category AS category,
                   COALESCE(v.cuisines, '{}') AS cuisines,
                   COALESCE(v.average_rating, 0) AS average_rating,
                   v.total_orders
            FROM vendors v
            WHERE v.id NOT IN (SELECT vendor_id FROM orders WHERE customer_id = $3)
              AND v.is_active
              AND v.is_online
              AND (v.primary_category = ANY($1) OR v.cuisines && $2)
            ORDER BY (CASE WHEN v.primary_category = ANY($1) THEN 2 ELSE 0 END +
                      CASE WHEN v.cuisines && $2 THEN 1 ELSE 0 END) DESC,
                     v.average_rating DESC,
                     v.total_orders DESC,
                     v.id
            LIMIT $4
            "#,
        )
        .bind(categories)
        .bind(cuisines)
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::for_query("content_candidates"))
    }

    async fn trending(&self, limit: usize) -> Result<Vec<TrendingVendor>, RepositoryError> {
        sqlx::query_as::<_, TrendingVendor>(
            r#"
            SELECT v.id AS vendor_id,
                   COUNT(*) AS recent_orders,
                   COALESCE(v.average_rating, 0) AS average_rating
            FROM orders o
            JOIN vendors v ON o.vendor_id = v.id
            WHERE o.created_at >= NOW() - make_interval(days => $1)
              AND o.status IN ('delivered', 'in_transit', 'picked_up')
              AND v.is_active
              AND v.is_online
            GROUP BY v.id, v.average_rating
            ORDER BY recent_orders DESC, average_rating DESC, v.id
            LIMIT $2
            "#,
        )
        .bind(TRENDING_WINDOW_DAYS)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::for_query("trending"))
    }

    async fn vendors_by_id(&self, ids: &[String]) -> Result<Vec<Vendor>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Vendor>(
            r#"
            SELECT v.id,
                   v.business_name AS name,
                   v.primary_category AS category,
                   COALESCE(v.cuisines, '{}') AS cuisines,
                   COALESCE(v.average_rating, 0) AS average_rating,
                   v.total_orders,
                   v.is_active,
                   v.is_online,
                   v.average_delivery_time,
                   v.price_range
            FROM vendors v
            WHERE v.id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::for_query("vendors_by_id"))
    }

    async fn vendor(&self, vendor_id: &str) -> Result<Option<VendorProfile>, RepositoryError> {
        sqlx::query_as::<_, VendorProfile>(
            r#"
            SELECT v.primary_category AS category,
                   COALESCE(v.cuisines, '{}') AS cuisines
            FROM vendors v
            WHERE v.id = $1
            "#,
        )
        .bind(vendor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::for_query("vendor"))
    }

    async fn similar_vendors(
        &self,
        vendor_id: &str,
        category: &str,
        cuisines: &[String],
        limit: usize,
    ) -> Result<Vec<SimilarVendorRow>, RepositoryError> {
        sqlx::query_as::<_, SimilarVendorRow>(
            r#"
            SELECT v.id,
                   v.business_name AS name,
                   COALESCE(v.average_rating, 0) AS average_rating,
                   v.total_orders
            FROM vendors v
            WHERE v.id != $1
              AND v.is_active
              AND v.is_online
              AND (v.primary_category = $2 OR v.cuisines && $3)
            ORDER BY average_rating DESC, v.total_orders DESC, v.id
            LIMIT $4
            "#,
        )
        .bind(vendor_id)
        .bind(category)
        .bind(cuisines)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::for_query("similar_vendors"))
    }
}
