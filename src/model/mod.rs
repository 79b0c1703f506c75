//! Domain model: vendors, orders, and the derived aggregate rows the
//! repository queries return.
//!
//! Vendor and order identifiers are opaque strings assigned by the platform's
//! vendor and order services. Row types mirror the aggregate queries in
//! [`crate::repository::Repository`] one to one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// Only [`Delivered`](OrderStatus::Delivered) orders count toward preference
/// and history signals. `Delivered | InTransit | PickedUp` count toward
/// trending recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns the wire representation stored in the `orders.status` column.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Returns `true` if this status counts toward trending order volume.
    #[inline]
    pub fn counts_toward_trending(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::InTransit | OrderStatus::PickedUp
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer order as read from order history.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub customer_id: String,
    pub vendor_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Rating the customer left for this order, if any.
    pub customer_rating: Option<f64>,
}

/// Full vendor record, as hydrated for the final hybrid response.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    /// Single-valued primary category (e.g. "restaurant", "grocery").
    pub category: String,
    /// Cuisine tags; may be empty.
    pub cuisines: Vec<String>,
    /// Average customer rating, 0.0 if unrated.
    pub average_rating: f64,
    /// Total historical order count.
    pub total_orders: i64,
    pub is_active: bool,
    pub is_online: bool,
    /// Average delivery time in minutes, when the vendor reports one.
    pub average_delivery_time: Option<i32>,
    pub price_range: Option<String>,
}

impl Vendor {
    /// Returns `true` if this vendor is an eligible recommendation target.
    #[inline]
    pub fn is_recommendable(&self) -> bool {
        self.is_active && self.is_online
    }
}

/// Category and cuisine facts for a single vendor (similarity reference).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct VendorProfile {
    pub category: String,
    pub cuisines: Vec<String>,
}

/// Per-(user, vendor) aggregate over the user's delivered orders.
///
/// Recomputed on every content-based call; never persisted.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UserHistoryEntry {
    pub vendor_id: String,
    pub name: String,
    pub category: String,
    pub cuisines: Vec<String>,
    pub order_count: i64,
    /// Mean customer rating across this pair's orders, 0.0 if none rated.
    pub avg_rating: f64,
}

/// Candidate vendor scored by neighbor order frequency.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct NeighborVendorScore {
    pub vendor_id: String,
    /// Number of qualifying neighbor orders for this vendor.
    pub score: i64,
    pub average_rating: f64,
}

/// Candidate vendor matching a user's preferred categories or cuisines.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CandidateVendor {
    pub vendor_id: String,
    pub category: String,
    pub cuisines: Vec<String>,
    pub average_rating: f64,
    pub total_orders: i64,
}

/// Vendor ranked by recent order volume.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TrendingVendor {
    pub vendor_id: String,
    pub recent_orders: i64,
    pub average_rating: f64,
}

/// Row backing a similarity result, carrying the fields it is ranked by.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SimilarVendorRow {
    pub id: String,
    pub name: String,
    pub average_rating: f64,
    pub total_orders: i64,
}

/// Similar-vendor summary exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarVendor {
    pub id: String,
    pub name: String,
    pub rating: f64,
}

impl From<SimilarVendorRow> for SimilarVendor {
    fn from(row: SimilarVendorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            rating: row.average_rating,
        }
    }
}

/// Hydrated vendor summary emitted by the hybrid fuser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub cuisines: Vec<String>,
    pub rating: f64,
    pub delivery_time: Option<i32>,
    pub price_range: Option<String>,
}

impl From<Vendor> for VendorSummary {
    fn from(vendor: Vendor) -> Self {
        Self {
            id: vendor.id,
            name: vendor.name,
            category: vendor.category,
            cuisines: vendor.cuisines,
            rating: vendor.average_rating,
            delivery_time: vendor.average_delivery_time,
            price_range: vendor.price_range,
        }
    }
}
