use serde::Serialize;

/// RMSE of the recommended set against the query movie
///
/// NaN marks a metric that could not be computed (query row missing or no
/// recommended row found); it serializes as JSON `null`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecommendationMetrics {
    pub popularity: f64,
    pub vote_avg: f64,
    pub vote_count: f64,
}

impl RecommendationMetrics {
    pub fn nan() -> Self {
        Self {
            popularity: f64::NAN,
            vote_avg: f64::NAN,
            vote_count: f64::NAN,
        }
    }
}

impl PartialEq for RecommendationMetrics {
    fn eq(&self, other: &Self) -> bool {
        fn same(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        same(self.popularity, other.popularity)
            && same(self.vote_avg, other.vote_avg)
            && same(self.vote_count, other.vote_count)
    }
}

/// Result returned to callers for a single query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    /// Normalized (lowercase) query title
    pub movie: String,
    pub recommendations: Vec<String>,
    pub metrics: RecommendationMetrics,
}
