use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{Corpus, MovieRecord, Recommendation},
    services::{
        catalog::CatalogSource,
        features::{combine_features, GenreWeight},
        metrics::compute_metrics,
        ranking::{recommend, Neighbors},
        similarity::SimilarityMatrix,
        stop_words::StopWords,
        vectorizer::{TfidfVectorizer, Vectorization},
    },
};

/// Per-call recommendation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Number of recommendations to return, must be positive
    pub num_rec: i64,
    /// Stop-word set name ("english" or "none")
    pub stop_words: String,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            num_rec: 10,
            stop_words: "english".to_string(),
        }
    }
}

impl RecommendOptions {
    pub fn new(num_rec: i64) -> Self {
        Self {
            num_rec,
            ..Self::default()
        }
    }

    pub fn with_stop_words(mut self, stop_words: impl Into<String>) -> Self {
        self.stop_words = stop_words.into();
        self
    }
}

/// Validated form of a request, produced before any work is done
#[derive(Debug)]
struct ValidatedRequest {
    movie: String,
    top_n: usize,
    stop_words: StopWords,
}

fn validate(movie: &str, options: &RecommendOptions) -> AppResult<ValidatedRequest> {
    if movie.trim().is_empty() {
        return Err(AppError::InvalidInput("movie must be a non-empty string".to_string()));
    }
    if options.num_rec <= 0 {
        return Err(AppError::InvalidInput("num_rec must be greater than 0".to_string()));
    }
    let top_n = usize::try_from(options.num_rec)
        .map_err(|_| AppError::InvalidInput("num_rec is too large".to_string()))?;
    let stop_words = options.stop_words.parse::<StopWords>()?;

    Ok(ValidatedRequest {
        movie: movie.to_lowercase(),
        top_n,
        stop_words,
    })
}

/// Generates content-based recommendations for movies
///
/// Each call fetches the corpus from the catalog, then runs feature
/// building, TF-IDF vectorization, cosine similarity, ranking and metric
/// evaluation from scratch. Nothing is cached between calls.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<dyn CatalogSource>,
    genre_weight: GenreWeight,
}

impl RecommendationService {
    pub fn new(catalog: Arc<dyn CatalogSource>, genre_weight: GenreWeight) -> Self {
        Self {
            catalog,
            genre_weight,
        }
    }

    /// Recommends movies similar to `movie`
    ///
    /// Returns `Ok(None)` when the movie is unknown, the catalog is empty or
    /// unreachable, or no usable vocabulary could be built. Invalid input is
    /// rejected before the catalog is touched.
    #[tracing::instrument(skip(self, options), fields(num_rec = options.num_rec, catalog = self.catalog.name()))]
    pub async fn get_recommendation(
        &self,
        movie: &str,
        options: RecommendOptions,
    ) -> AppResult<Option<Recommendation>> {
        let request = validate(movie, &options)?;
        let start = Instant::now();

        let movies = match self.catalog.fetch_movies().await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::error!(error = %e, "Catalog fetch failed; treating as empty corpus");
                Vec::new()
            }
        };

        let corpus = Corpus::normalized(movies);
        let result = run_pipeline(&corpus, &request, self.genre_weight)?;

        tracing::info!(
            movie = %request.movie,
            corpus = corpus.len(),
            found = result.is_some(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendation completed"
        );

        Ok(result)
    }
}

/// Runs the pipeline over a corpus the caller already holds
///
/// Titles are normalized here, so the corpus may carry mixed-case titles.
pub fn recommend_from_corpus(
    movies: Vec<MovieRecord>,
    movie: &str,
    options: &RecommendOptions,
    genre_weight: GenreWeight,
) -> AppResult<Option<Recommendation>> {
    let request = validate(movie, options)?;
    run_pipeline(&Corpus::normalized(movies), &request, genre_weight)
}

fn run_pipeline(
    corpus: &Corpus,
    request: &ValidatedRequest,
    genre_weight: GenreWeight,
) -> AppResult<Option<Recommendation>> {
    if corpus.is_empty() {
        tracing::warn!("Empty corpus; no recommendations");
        return Ok(None);
    }

    let combined = combine_features(corpus, genre_weight)?;

    let tfidf = match TfidfVectorizer::new(request.stop_words.clone()).fit_transform(&combined) {
        Vectorization::Fitted(tfidf) => tfidf,
        Vectorization::NoVocabulary => return Ok(None),
    };

    let similarity = SimilarityMatrix::from_tfidf(&tfidf, corpus.titles())?;

    let recommendations = match recommend(
        &request.movie,
        &similarity,
        similarity.titles(),
        request.top_n,
    ) {
        Neighbors::Found(titles) if !titles.is_empty() => titles,
        Neighbors::Found(_) | Neighbors::NotFound => return Ok(None),
    };

    let metrics = compute_metrics(corpus, &request.movie, &recommendations);

    Ok(Some(Recommendation {
        movie: request.movie.clone(),
        recommendations,
        metrics,
    }))
}
