use std::sync::Arc;

use crate::services::{RecommendOptions, RecommendationService};

/// Shared application state
///
/// Holds only immutable handles; every request builds its own vector space.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RecommendationService>,
    /// Options applied when a request leaves a field out
    pub defaults: RecommendOptions,
}

impl AppState {
    pub fn new(recommender: RecommendationService, defaults: RecommendOptions) -> Self {
        Self {
            recommender: Arc::new(recommender),
            defaults,
        }
    }
}
