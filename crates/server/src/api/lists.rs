//! Favorites and watchlist API handlers.
//!
//! Both lists share the same shape: adding an entry that already exists
//! returns it with 200 instead of 201, and removing a missing entry is 404.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use cineniche_core::{UserFavorite, UserWatchlist};

use super::error::{catalog_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListEntryRequest {
    pub user_id: i64,
    pub movie_id: String,
}

fn created_status(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

// ============================================================================
// Favorites
// ============================================================================

/// GET /api/v1/movies/favorites/user/{user_id}
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<UserFavorite>>, ApiError> {
    state
        .catalog()
        .list_favorites(user_id)
        .map(Json)
        .map_err(catalog_error)
}

/// POST /api/v1/movies/favorites
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ListEntryRequest>,
) -> Result<(StatusCode, Json<UserFavorite>), ApiError> {
    let (favorite, created) = state
        .catalog()
        .add_favorite(request.user_id, &request.movie_id)
        .map_err(catalog_error)?;
    Ok((created_status(created), Json(favorite)))
}

/// DELETE /api/v1/movies/favorites/{user_id}/{movie_id}
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path((user_id, movie_id)): Path<(i64, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog()
        .remove_favorite(user_id, &movie_id)
        .map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Watchlist
// ============================================================================

/// GET /api/v1/movies/watchlist/user/{user_id}
pub async fn list_watchlist(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<UserWatchlist>>, ApiError> {
    state
        .catalog()
        .list_watchlist(user_id)
        .map(Json)
        .map_err(catalog_error)
}

/// POST /api/v1/movies/watchlist
pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ListEntryRequest>,
) -> Result<(StatusCode, Json<UserWatchlist>), ApiError> {
    let (entry, created) = state
        .catalog()
        .add_to_watchlist(request.user_id, &request.movie_id)
        .map_err(catalog_error)?;
    Ok((created_status(created), Json(entry)))
}

/// DELETE /api/v1/movies/watchlist/{user_id}/{movie_id}
pub async fn remove_from_watchlist(
    State(state): State<Arc<AppState>>,
    Path((user_id, movie_id)): Path<(i64, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog()
        .remove_from_watchlist(user_id, &movie_id)
        .map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}
