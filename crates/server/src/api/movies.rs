//! Movie catalog API handlers: titles, users and ratings.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use cineniche_core::{
    catalog::{validate_rating, DEFAULT_PAGE_SIZE},
    Movie, MoviePage, MovieRating, MovieUser,
};

use super::error::{catalog_error, ApiError};
use super::posters::{lookup, PosterLookup};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize)]
pub struct RateMovieRequest {
    pub user_id: i64,
    pub show_id: String,
    pub rating: f64,
}

#[derive(Debug, Serialize)]
pub struct AverageRatingResponse {
    pub show_id: String,
    pub average: f64,
}

// ============================================================================
// Titles
// ============================================================================

/// GET /api/v1/movies/titles
pub async fn list_titles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    state.catalog().list_movies().map(Json).map_err(catalog_error)
}

/// GET /api/v1/movies/titles/paged?page=&page_size=
pub async fn list_titles_paged(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<MoviePage>, ApiError> {
    state
        .catalog()
        .list_movies_paged(params.page, params.page_size)
        .map(Json)
        .map_err(catalog_error)
}

/// GET /api/v1/movies/titles/{id}
pub async fn get_title(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    state.catalog().get_movie(&show_id).map(Json).map_err(catalog_error)
}

/// POST /api/v1/movies/titles
///
/// Add a title to the catalog.
pub async fn create_title(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let created = state.catalog().insert_movie(&movie).map_err(catalog_error)?;
    info!("Added title {} ({})", created.title, created.show_id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/movies/titles/{id}/poster
///
/// Resolve the poster for a catalog title.
pub async fn get_title_poster(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<String>,
) -> Result<Json<PosterLookup>, ApiError> {
    let movie = state.catalog().get_movie(&show_id).map_err(catalog_error)?;
    lookup(&state, &movie.title).await.map(Json)
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/v1/movies/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MovieUser>>, ApiError> {
    state.catalog().list_users().map(Json).map_err(catalog_error)
}

/// GET /api/v1/movies/users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<MovieUser>, ApiError> {
    state.catalog().get_user(user_id).map(Json).map_err(catalog_error)
}

// ============================================================================
// Ratings
// ============================================================================

/// GET /api/v1/movies/ratings/{show_id}
pub async fn ratings_for_movie(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<String>,
) -> Result<Json<Vec<MovieRating>>, ApiError> {
    state
        .catalog()
        .ratings_for_movie(&show_id)
        .map(Json)
        .map_err(catalog_error)
}

/// GET /api/v1/movies/ratings/user/{user_id}
pub async fn ratings_for_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<MovieRating>>, ApiError> {
    state
        .catalog()
        .ratings_for_user(user_id)
        .map(Json)
        .map_err(catalog_error)
}

/// GET /api/v1/movies/ratings/average/{show_id}
///
/// 0.0 when the title has no ratings.
pub async fn average_rating(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<String>,
) -> Result<Json<AverageRatingResponse>, ApiError> {
    let average = state
        .catalog()
        .average_rating(&show_id)
        .map_err(catalog_error)?;
    Ok(Json(AverageRatingResponse { show_id, average }))
}

/// PUT /api/v1/movies/ratings
///
/// Create or replace a user's rating for a title.
pub async fn rate_movie(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RateMovieRequest>,
) -> Result<Json<MovieRating>, ApiError> {
    validate_rating(request.rating).map_err(catalog_error)?;

    let catalog = state.catalog();
    catalog.get_movie(&request.show_id).map_err(catalog_error)?;
    catalog.get_user(request.user_id).map_err(catalog_error)?;

    catalog
        .rate_movie(request.user_id, &request.show_id, request.rating)
        .map(Json)
        .map_err(catalog_error)
}
