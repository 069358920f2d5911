//! Error bodies shared by the API handlers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use tracing::error;

use cineniche_core::{CatalogError, PosterError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a catalog failure onto an HTTP status.
pub fn catalog_error(e: CatalogError) -> ApiError {
    let status = match &e {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Conflict(_) => StatusCode::CONFLICT,
        CatalogError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        CatalogError::Database(_) | CatalogError::Internal(_) => {
            error!("Catalog error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    api_error(status, e.to_string())
}

/// A poster error means no listing could be loaded at all.
pub fn poster_error(e: PosterError) -> ApiError {
    error!("Poster listing unavailable: {}", e);
    api_error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
}
