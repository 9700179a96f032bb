pub mod catalog;
pub mod features;
pub mod metrics;
pub mod ranking;
pub mod recommendations;
pub mod similarity;
pub mod stop_words;
pub mod vectorizer;

pub use catalog::{CatalogSource, InMemoryCatalog, JsonFileCatalog};
pub use features::GenreWeight;
pub use recommendations::{recommend_from_corpus, RecommendOptions, RecommendationService};
