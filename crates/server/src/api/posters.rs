//! Poster API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use cineniche_core::{poster::normalize, resolve, MatchTier, Resolution, ResolutionTrace};

use super::error::{api_error, poster_error, ApiError};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TitleParams {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct PosterMatchResponse {
    pub matched: bool,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<MatchTier>,
}

/// Body of a poster lookup.
///
/// `AllCandidates` is only produced when the legacy no-match fallback is
/// enabled, and serializes as a bare array of every known poster.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PosterLookup {
    Resolved(PosterMatchResponse),
    AllCandidates(Vec<String>),
}

#[derive(Debug, Serialize)]
pub struct PosterStatusResponse {
    pub source: String,
    pub entries: usize,
    pub refresh_interval_secs: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub entries: usize,
    pub refreshed_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/posters
///
/// Every poster path in the current listing.
pub async fn list_posters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let snapshot = state.poster_cache().current().await.map_err(poster_error)?;
    Ok(Json(snapshot.candidates().paths()))
}

/// GET /api/v1/posters/match?title=
///
/// Resolve a title to a single poster.
pub async fn match_poster(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TitleParams>,
) -> Result<Json<PosterLookup>, ApiError> {
    lookup(&state, &params.title).await.map(Json)
}

/// GET /api/v1/posters/explain?title=
///
/// Resolve a title and report every tier tried.
pub async fn explain_poster(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TitleParams>,
) -> Result<Json<ResolutionTrace>, ApiError> {
    require_title(&params.title)?;
    let trace = state
        .poster_cache()
        .explain(&params.title)
        .await
        .map_err(poster_error)?;
    if trace.resolution == Resolution::EmptyTitle {
        return Err(api_error(StatusCode::BAD_REQUEST, "title is required"));
    }
    Ok(Json(trace))
}

/// POST /api/v1/posters/reload
///
/// Re-list the poster source now.
pub async fn reload_posters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let snapshot = state
        .poster_cache()
        .force_reload()
        .await
        .map_err(poster_error)?;
    info!("Poster listing reloaded on request: {} entries", snapshot.len());
    Ok(Json(ReloadResponse {
        entries: snapshot.len(),
        refreshed_at: snapshot.refreshed_at(),
    }))
}

/// GET /api/v1/posters/status
///
/// Describe the published listing without refreshing it.
pub async fn poster_status(State(state): State<Arc<AppState>>) -> Json<PosterStatusResponse> {
    let cache = state.poster_cache();
    let snapshot = cache.snapshot();
    Json(PosterStatusResponse {
        source: cache.source_name().to_string(),
        entries: snapshot.len(),
        refresh_interval_secs: cache.refresh_interval().as_secs(),
        refreshed_at: snapshot.refreshed_at(),
    })
}

/// Resolve `title` against the current listing and shape the response.
pub(crate) async fn lookup(state: &AppState, title: &str) -> Result<PosterLookup, ApiError> {
    require_title(title)?;
    let snapshot = state.poster_cache().current().await.map_err(poster_error)?;

    match resolve(title, snapshot.candidates()) {
        Resolution::Matched(m) => Ok(PosterLookup::Resolved(PosterMatchResponse {
            matched: true,
            url: Some(m.path),
            tier: Some(m.tier),
        })),
        Resolution::NoMatch if state.config().posters.legacy_no_match_fallback => {
            Ok(PosterLookup::AllCandidates(snapshot.candidates().paths()))
        }
        Resolution::NoMatch => Ok(PosterLookup::Resolved(PosterMatchResponse {
            matched: false,
            url: None,
            tier: None,
        })),
        Resolution::EmptyTitle => Err(api_error(StatusCode::BAD_REQUEST, "title is required")),
    }
}

/// Blank titles are rejected before the listing is touched.
fn require_title(title: &str) -> Result<(), ApiError> {
    if normalize(title).is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "title is required"));
    }
    Ok(())
}
