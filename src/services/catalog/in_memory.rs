use crate::{error::AppResult, models::MovieRecord};

use super::CatalogSource;

/// Catalog backed by a fixed list of rows
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    movies: Vec<MovieRecord>,
}

impl InMemoryCatalog {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_movies(&self) -> AppResult<Vec<MovieRecord>> {
        Ok(self.movies.clone())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_rows_in_order() {
        let catalog = InMemoryCatalog::new(vec![
            MovieRecord::new("Dune", "", "", 1.0, 1.0, 1),
            MovieRecord::new("Alien", "", "", 2.0, 2.0, 2),
        ]);

        let movies = catalog.fetch_movies().await.unwrap();
        assert_eq!(movies[0].title, "Dune");
        assert_eq!(movies[1].title, "Alien");
        assert_eq!(catalog.name(), "in_memory");
    }
}
