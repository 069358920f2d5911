//! Recommendation API handler.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use cineniche_core::Movie;

use super::error::{catalog_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// GET /api/v1/recommendations/{show_id}?user_id=&count=
///
/// Titles similar to `show_id`, boosted by the user's ratings when a user
/// id is given. `count` falls back to the configured default and is capped
/// at the configured maximum.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<String>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let limits = &state.config().recommendations;
    let count = params
        .count
        .unwrap_or(limits.default_count)
        .min(limits.max_count);

    state
        .recommender()
        .recommend(&show_id, params.user_id, count)
        .map(Json)
        .map_err(catalog_error)
}
