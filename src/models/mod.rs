mod movie;
mod recommendation;

pub use movie::{Corpus, MovieRecord};
pub use recommendation::{Recommendation, RecommendationMetrics};
