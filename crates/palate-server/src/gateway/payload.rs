use serde::{Deserialize, Serialize};

use palate::{SimilarVendor, VendorSummary};

/// Query parameters shared by the ranked endpoints.
#[derive(Deserialize, Debug)]
pub struct LimitQuery {
    /// Requested result count; endpoint-specific default when omitted.
    pub limit: Option<i64>,
}

#[derive(Serialize, Debug)]
pub struct RecommendationsResponse {
    pub user_id: String,
    pub recommendations: Vec<VendorSummary>,
    pub count: usize,
}

#[derive(Serialize, Debug)]
pub struct TrendingResponse {
    pub trending: Vec<String>,
    pub count: usize,
}

#[derive(Serialize, Debug)]
pub struct SimilarVendorsResponse {
    pub similar_vendors: Vec<SimilarVendor>,
}
