//! In-memory mock repository for tests.
//!
//! Implements the same aggregate semantics as [`PgRepository`](super::PgRepository)
//! over plain vectors, so engine tests can exercise the full ranking
//! pipeline without a database.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::{Duration, Utc};

use super::error::RepositoryError;
use super::Repository;
use crate::constants::{MAX_NEIGHBORS, MIN_SHARED_VENDORS, TRENDING_WINDOW_DAYS};
use crate::model::{
    CandidateVendor, NeighborVendorScore, Order, OrderStatus, SimilarVendorRow, TrendingVendor,
    UserHistoryEntry, Vendor, VendorProfile,
};

/// In-memory [`Repository`] backed by `RwLock`-protected fixture data.
#[derive(Default)]
pub struct MockRepository {
    inner: RwLock<MockData>,
}

#[derive(Default)]
struct MockData {
    vendors: Vec<Vendor>,
    orders: Vec<Order>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vendor to the fixture set.
    pub fn insert_vendor(&self, vendor: Vendor) {
        self.inner
            .write()
            .expect("lock poisoned")
            .vendors
            .push(vendor);
    }

    /// Adds an order to the fixture set.
    pub fn insert_order(&self, order: Order) {
        self.inner
            .write()
            .expect("lock poisoned")
            .orders
            .push(order);
    }

    /// Removes a vendor, simulating deletion between scoring and hydration.
    pub fn remove_vendor(&self, vendor_id: &str) {
        self.inner
            .write()
            .expect("lock poisoned")
            .vendors
            .retain(|v| v.id != vendor_id);
    }

    /// Removes all orders, leaving the vendor fixtures in place.
    pub fn clear_orders(&self) {
        self.inner.write().expect("lock poisoned").orders.clear();
    }

    pub fn vendor_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").vendors.len()
    }

    pub fn order_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").orders.len()
    }
}

impl MockData {
    fn vendor(&self, vendor_id: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == vendor_id)
    }

    /// Distinct vendor ids the user has ordered from, regardless of status.
    fn visited_vendors(&self, user_id: &str) -> HashSet<String> {
        self.orders
            .iter()
            .filter(|o| o.customer_id == user_id)
            .map(|o| o.vendor_id.clone())
            .collect()
    }

    /// Distinct delivered (customer, vendor) pairs.
    fn delivered_pairs(&self) -> HashSet<(String, String)> {
        self.orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .map(|o| (o.customer_id.clone(), o.vendor_id.clone()))
            .collect()
    }
}

#[async_trait::async_trait]
impl Repository for MockRepository {
    async fn user_order_aggregates(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserHistoryEntry>, RepositoryError> {
        let data = self.inner.read().expect("lock poisoned");

        let mut entries: Vec<UserHistoryEntry> = Vec::new();
        let mut ratings: HashMap<String, Vec<f64>> = HashMap::new();

        for order in data
            .orders
            .iter()
            .filter(|o| o.customer_id == user_id && o.status == OrderStatus::Delivered)
        {
            let Some(vendor) = data.vendor(&order.vendor_id) else {
                continue;
            };

            if let Some(rating) = order.customer_rating {
                ratings.entry(vendor.id.clone()).or_default().push(rating);
            }

            match entries.iter_mut().find(|e| e.vendor_id == vendor.id) {
                Some(entry) => entry.order_count += 1,
                None => entries.push(UserHistoryEntry {
                    vendor_id: vendor.id.clone(),
                    name: vendor.name.clone(),
                    category: vendor.category.clone(),
                    cuisines: vendor.cuisines.clone(),
                    order_count: 1,
                    avg_rating: 0.0,
                }),
            }
        }

        for entry in &mut entries {
            if let Some(values) = ratings.get(&entry.vendor_id) {
                entry.avg_rating = values.iter().sum::<f64>() / values.len() as f64;
            }
        }

        entries.sort_by(|a, b| b.order_count.cmp(&a.order_count));
        Ok(entries)
    }

    async fn neighbor_vendor_scores(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<NeighborVendorScore>, RepositoryError> {
        let data = self.inner.read().expect("lock poisoned");

        let pairs = data.delivered_pairs();
        let target_vendors: HashSet<&String> = pairs
            .iter()
            .filter(|(customer, _)| customer == user_id)
            .map(|(_, vendor)| vendor)
            .collect();

        let mut shared_counts: HashMap<&String, i64> = HashMap::new();
        for (customer, vendor) in &pairs {
            if customer != user_id && target_vendors.contains(vendor) {
                *shared_counts.entry(customer).or_insert(0) += 1;
            }
        }

        let mut neighbors: Vec<(&String, i64)> = shared_counts
            .into_iter()
            .filter(|(_, shared)| *shared >= MIN_SHARED_VENDORS)
            .collect();
        neighbors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        neighbors.truncate(MAX_NEIGHBORS as usize);
        let neighbor_ids: HashSet<&String> = neighbors.iter().map(|(id, _)| *id).collect();

        let mut scores: HashMap<String, i64> = HashMap::new();
        for order in &data.orders {
            if !neighbor_ids.contains(&order.customer_id) {
                continue;
            }
            let Some(vendor) = data.vendor(&order.vendor_id) else {
                continue;
            };
            if target_vendors.contains(&vendor.id) || !vendor.is_recommendable() {
                continue;
            }
            *scores.entry(vendor.id.clone()).or_insert(0) += 1;
        }

        let mut rows: Vec<NeighborVendorScore> = scores
            .into_iter()
            .map(|(vendor_id, score)| {
                let average_rating = data
                    .vendor(&vendor_id)
                    .map(|v| v.average_rating)
                    .unwrap_or(0.0);
                NeighborVendorScore {
                    vendor_id,
                    score,
                    average_rating,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| {
                    b.average_rating
                        .partial_cmp(&a.average_rating)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.vendor_id.cmp(&b.vendor_id))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn content_candidates(
        &self,
        categories: &[String],
        cuisines: &[String],
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<CandidateVendor>, RepositoryError> {
        let data = self.inner.read().expect("lock poisoned");
        let visited = data.visited_vendors(user_id);

        let mut rows: Vec<(i64, CandidateVendor)> = data
            .vendors
            .iter()
            .filter(|v| !visited.contains(&v.id) && v.is_recommendable())
            .filter_map(|v| {
                let category_match = categories.contains(&v.category);
                let cuisine_match = v.cuisines.iter().any(|c| cuisines.contains(c));
                if !category_match && !cuisine_match {
                    return None;
                }
                let relevance = if category_match { 2 } else { 0 } + i64::from(cuisine_match);
                Some((
                    relevance,
                    CandidateVendor {
                        vendor_id: v.id.clone(),
                        category: v.category.clone(),
                        cuisines: v.cuisines.clone(),
                        average_rating: v.average_rating,
                        total_orders: v.total_orders,
                    },
                ))
            })
            .collect();

        rows.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| {
                    b.1.average_rating
                        .partial_cmp(&a.1.average_rating)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| b.1.total_orders.cmp(&a.1.total_orders))
                .then_with(|| a.1.vendor_id.cmp(&b.1.vendor_id))
        });
        rows.truncate(limit);
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn trending(&self, limit: usize) -> Result<Vec<TrendingVendor>, RepositoryError> {
        let data = self.inner.read().expect("lock poisoned");
        let cutoff = Utc::now() - Duration::days(i64::from(TRENDING_WINDOW_DAYS));

        let mut counts: HashMap<String, i64> = HashMap::new();
        for order in &data.orders {
            if order.created_at < cutoff || !order.status.counts_toward_trending() {
                continue;
            }
            let Some(vendor) = data.vendor(&order.vendor_id) else {
                continue;
            };
            if !vendor.is_recommendable() {
                continue;
            }
            *counts.entry(vendor.id.clone()).or_insert(0) += 1;
        }

        let mut rows: Vec<TrendingVendor> = counts
            .into_iter()
            .map(|(vendor_id, recent_orders)| {
                let average_rating = data
                    .vendor(&vendor_id)
                    .map(|v| v.average_rating)
                    .unwrap_or(0.0);
                TrendingVendor {
                    vendor_id,
                    recent_orders,
                    average_rating,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.recent_orders
                .cmp(&a.recent_orders)
                .then_with(|| {
                    b.average_rating
                        .partial_cmp(&a.average_rating)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.vendor_id.cmp(&b.vendor_id))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn vendors_by_id(&self, ids: &[String]) -> Result<Vec<Vendor>, RepositoryError> {
        let data = self.inner.read().expect("lock poisoned");
        Ok(data
            .vendors
            .iter()
            .filter(|v| ids.contains(&v.id))
            .cloned()
            .collect())
    }

    async fn vendor(&self, vendor_id: &str) -> Result<Option<VendorProfile>, RepositoryError> {
        let data = self.inner.read().expect("lock poisoned");
        Ok(data.vendor(vendor_id).map(|v| VendorProfile {
            category: v.category.clone(),
            cuisines: v.cuisines.clone(),
        }))
    }

    async fn similar_vendors(
        &self,
        vendor_id: &str,
        category: &str,
        cuisines: &[String],
        limit: usize,
    ) -> Result<Vec<SimilarVendorRow>, RepositoryError> {
        let data = self.inner.read().expect("lock poisoned");

        let mut rows: Vec<SimilarVendorRow> = data
            .vendors
            .iter()
            .filter(|v| v.id != vendor_id && v.is_recommendable())
            .filter(|v| {
                v.category == category || v.cuisines.iter().any(|c| cuisines.contains(c))
            })
            .map(|v| SimilarVendorRow {
                id: v.id.clone(),
                name: v.name.clone(),
                average_rating: v.average_rating,
                total_orders: v.total_orders,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.total_orders.cmp(&a.total_orders))
                .then_with(|| a.id.cmp(&b.id))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}
