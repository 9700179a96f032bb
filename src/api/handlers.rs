use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    services::RecommendOptions,
};

use super::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome! You can use this API to get movie recommendations based on viewers' votes. Visit /docs for more information and to try it out!";

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub movie: String,
    #[serde(default)]
    pub num_rec: Option<i64>,
    #[serde(default)]
    pub stop_words: Option<String>,
}

/// Welcome endpoint
pub async fn root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommends movies similar to the requested one
///
/// 404 when the movie is unknown or nothing similar could be found.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Recommendation>> {
    let options = RecommendOptions {
        num_rec: request.num_rec.unwrap_or(state.defaults.num_rec),
        stop_words: request
            .stop_words
            .unwrap_or_else(|| state.defaults.stop_words.clone()),
    };

    tracing::info!(
        request_id = %request_id,
        movie = %request.movie,
        num_rec = options.num_rec,
        "Processing recommendation request"
    );

    let result = state
        .recommender
        .get_recommendation(&request.movie, options)
        .await?;

    match result {
        Some(recommendation) => Ok(Json(recommendation)),
        None => {
            tracing::info!(request_id = %request_id, "No recommendations found");
            Err(AppError::NotFound(
                "Movie not found or no recommendations available".to_string(),
            ))
        }
    }
}
