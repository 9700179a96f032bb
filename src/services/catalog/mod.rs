//! Movie catalog abstraction
//!
//! The recommender pulls its corpus from a catalog once per request. Sources
//! are pluggable so the engine never depends on where rows are stored.

use crate::{error::AppResult, models::MovieRecord};

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryCatalog;
pub use json_file::JsonFileCatalog;

/// Trait for movie catalog sources
///
/// Implementations return the full set of movie rows with the columns
/// `title, overview, genre_names, popularity, vote_average, vote_count`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every movie in the catalog, in a stable order
    async fn fetch_movies(&self) -> AppResult<Vec<MovieRecord>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
