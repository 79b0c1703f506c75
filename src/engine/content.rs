//! Content-based ranking from the user's preferred categories and cuisines.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::error::EngineError;
use super::{ensure_limit, TrendingRanker};
use crate::cache::CacheStore;
use crate::constants::TOP_PREFERENCE_COUNT;
use crate::model::{CandidateVendor, UserHistoryEntry};
use crate::repository::Repository;

/// Category-match weight in the relevance score.
const CATEGORY_WEIGHT: i64 = 2;
/// Cuisine-overlap weight in the relevance score.
const CUISINE_WEIGHT: i64 = 1;

/// Scores unvisited vendors by how well they match the user's top
/// categories and cuisines.
///
/// Never cached: preferences can shift with every new order, so this path
/// always recomputes from history.
pub struct ContentRanker<R, C> {
    repo: Arc<R>,
    trending: TrendingRanker<R, C>,
}

impl<R, C> Clone for ContentRanker<R, C> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            trending: self.trending.clone(),
        }
    }
}

impl<R, C> ContentRanker<R, C>
where
    R: Repository,
    C: CacheStore,
{
    pub fn new(repo: Arc<R>, trending: TrendingRanker<R, C>) -> Self {
        Self { repo, trending }
    }

    /// Returns up to `limit` vendor ids ranked by preference match.
    ///
    /// Users with no delivered-order history fall through to the trending
    /// ranking.
    #[instrument(skip(self))]
    pub async fn content_based(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, EngineError> {
        ensure_limit(limit)?;

        let history = self.repo.user_order_aggregates(user_id).await?;
        if history.is_empty() {
            debug!(user_id, "no order history, delegating to trending");
            return self.trending.trending(limit).await;
        }

        let (categories, cuisines) = preference_weights(&history);
        let top_categories = top_tags(categories, TOP_PREFERENCE_COUNT);
        let top_cuisines = top_tags(cuisines, TOP_PREFERENCE_COUNT);
        debug!(
            user_id,
            categories = ?top_categories,
            cuisines = ?top_cuisines,
            "derived preference profile"
        );

        let mut candidates = self
            .repo
            .content_candidates(&top_categories, &top_cuisines, user_id, limit)
            .await?;

        candidates.sort_by(|a, b| {
            let score_a = relevance(a, &top_categories, &top_cuisines);
            let score_b = relevance(b, &top_categories, &top_cuisines);
            score_b
                .cmp(&score_a)
                .then_with(|| {
                    b.average_rating
                        .partial_cmp(&a.average_rating)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| b.total_orders.cmp(&a.total_orders))
        });
        candidates.truncate(limit);

        Ok(candidates.into_iter().map(|c| c.vendor_id).collect())
    }
}

/// Accumulates category and cuisine weights from history, preserving first
/// appearance order. A vendor visited N times contributes N to its category
/// and to each of its cuisine tags.
fn preference_weights(history: &[UserHistoryEntry]) -> (Vec<(String, i64)>, Vec<(String, i64)>) {
    let mut categories: Vec<(String, i64)> = Vec::new();
    let mut cuisines: Vec<(String, i64)> = Vec::new();

    for entry in history {
        bump(&mut categories, &entry.category, entry.order_count);
        for cuisine in &entry.cuisines {
            bump(&mut cuisines, cuisine, entry.order_count);
        }
    }

    (categories, cuisines)
}

fn bump(weights: &mut Vec<(String, i64)>, tag: &str, count: i64) {
    match weights.iter_mut().find(|(existing, _)| existing == tag) {
        Some((_, weight)) => *weight += count,
        None => weights.push((tag.to_string(), count)),
    }
}

/// Takes the `n` heaviest tags; equal weights keep insertion order.
fn top_tags(mut weights: Vec<(String, i64)>, n: usize) -> Vec<String> {
    weights.sort_by(|a, b| b.1.cmp(&a.1));
    weights.truncate(n);
    weights.into_iter().map(|(tag, _)| tag).collect()
}

/// Relevance score: 2 for a category match, +1 for any cuisine overlap.
fn relevance(candidate: &CandidateVendor, categories: &[String], cuisines: &[String]) -> i64 {
    let mut score = 0;
    if categories.contains(&candidate.category) {
        score += CATEGORY_WEIGHT;
    }
    if candidate.cuisines.iter().any(|c| cuisines.contains(c)) {
        score += CUISINE_WEIGHT;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, cuisines: &[&str], order_count: i64) -> UserHistoryEntry {
        UserHistoryEntry {
            vendor_id: format!("vendor-{category}"),
            name: category.to_string(),
            category: category.to_string(),
            cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
            order_count,
            avg_rating: 0.0,
        }
    }

    #[test]
    fn test_preference_weights_accumulate_order_counts() {
        let history = vec![
            entry("pizza", &["italian"], 3),
            entry("sushi", &["japanese", "asian"], 1),
            entry("pasta", &["italian"], 2),
        ];

        let (categories, cuisines) = preference_weights(&history);
        assert_eq!(
            categories,
            vec![
                ("pizza".to_string(), 3),
                ("sushi".to_string(), 1),
                ("pasta".to_string(), 2),
            ]
        );
        assert_eq!(
            cuisines,
            vec![
                ("italian".to_string(), 5),
                ("japanese".to_string(), 1),
                ("asian".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_tags_breaks_ties_by_insertion_order() {
        let weights = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 1),
            ("d".to_string(), 2),
        ];

        // b and d tie at 2, a and c tie at 1; insertion order decides.
        assert_eq!(top_tags(weights, 3), vec!["b", "d", "a"]);
    }

    #[test]
    fn test_relevance_weights() {
        let categories = vec!["pizza".to_string()];
        let cuisines = vec!["italian".to_string()];

        let both = CandidateVendor {
            vendor_id: "v1".into(),
            category: "pizza".into(),
            cuisines: vec!["italian".into()],
            average_rating: 4.0,
            total_orders: 10,
        };
        let category_only = CandidateVendor {
            category: "pizza".into(),
            cuisines: vec!["mexican".into()],
            ..both.clone()
        };
        let cuisine_only = CandidateVendor {
            category: "burgers".into(),
            cuisines: vec!["italian".into()],
            ..both.clone()
        };
        let neither = CandidateVendor {
            category: "burgers".into(),
            cuisines: vec!["mexican".into()],
            ..both.clone()
        };

        assert_eq!(relevance(&both, &categories, &cuisines), 3);
        assert_eq!(relevance(&category_only, &categories, &cuisines), 2);
        assert_eq!(relevance(&cuisine_only, &categories, &cuisines), 1);
        assert_eq!(relevance(&neither, &categories, &cuisines), 0);
    }
}
