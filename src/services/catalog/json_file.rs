use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

use super::CatalogSource;

/// Catalog read from a JSON array of movie rows
///
/// The file is re-read on every fetch, so edits show up on the next request.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn fetch_movies(&self) -> AppResult<Vec<MovieRecord>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::Catalog(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let movies: Vec<MovieRecord> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Catalog(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(path = %self.path.display(), movies = movies.len(), "Catalog loaded");

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}
