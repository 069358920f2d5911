//! Types for the movie catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest page size a paged listing will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the requested one is out of range.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Highest star rating a user can give.
pub const MAX_RATING: f64 = 5.0;

/// A movie or show in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog identifier (e.g., "s42").
    pub show_id: String,
    /// "Movie" or "TV Show".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Comma-separated cast list as stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    /// Content rating (e.g., "PG-13").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Genre categories this title belongs to.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Movie {
    /// A movie with only an id and title set.
    pub fn new(show_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            show_id: show_id.into(),
            kind: None,
            title: title.into(),
            director: None,
            cast: None,
            country: None,
            release_year: None,
            rating: None,
            duration: None,
            description: None,
            categories: Vec::new(),
        }
    }

    /// Set the genre categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Title with `#` characters removed, for display.
    pub fn display_title(&self) -> String {
        self.title.replace('#', "").trim().to_string()
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieUser {
    pub user_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A user's star rating for a title. Unrated rows read back as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRating {
    pub user_id: i64,
    pub show_id: String,
    pub rating: f64,
}

/// A title on a user's favorites list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFavorite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_id: Option<i64>,
    pub user_id: i64,
    pub movie_id: String,
}

/// A title on a user's watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWatchlist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchlist_id: Option<i64>,
    pub user_id: i64,
    pub movie_id: String,
}

/// Pagination details returned alongside a page of movies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    pub fn new(current_page: u32, page_size: u32, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(page_size as u64) as u32;
        Self {
            current_page,
            page_size,
            total_pages,
            total_count,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }
}

/// One page of the title-ordered movie listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub pagination: Pagination,
}

/// Clamp a requested page and page size into range.
///
/// Pages start at 1; page sizes outside `1..=MAX_PAGE_SIZE` fall back to
/// [`DEFAULT_PAGE_SIZE`].
pub fn normalize_page(page: u32, page_size: u32) -> (u32, u32) {
    let page = page.max(1);
    let page_size = if (1..=MAX_PAGE_SIZE).contains(&page_size) {
        page_size
    } else {
        DEFAULT_PAGE_SIZE
    };
    (page, page_size)
}

/// Check a star rating is within `0.5..=MAX_RATING` in half-star steps.
pub fn validate_rating(rating: f64) -> Result<(), CatalogError> {
    let halves = rating * 2.0;
    if !(0.5..=MAX_RATING).contains(&rating) || halves.fract() != 0.0 {
        return Err(CatalogError::InvalidInput(format!(
            "rating must be between 0.5 and {MAX_RATING} in half-star steps, got {rating}"
        )));
    }
    Ok(())
}

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for CatalogError {
    fn from(e: rusqlite::Error) -> Self {
        CatalogError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_page() {
        assert_eq!(normalize_page(0, 10), (1, 10));
        assert_eq!(normalize_page(3, 0), (3, DEFAULT_PAGE_SIZE));
        assert_eq!(normalize_page(3, 101), (3, DEFAULT_PAGE_SIZE));
        assert_eq!(normalize_page(2, 100), (2, 100));
    }

    #[test]
    fn test_pagination_flags() {
        let p = Pagination::new(1, 20, 45);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_previous);

        let p = Pagination::new(3, 20, 45);
        assert!(!p.has_next);
        assert!(p.has_previous);

        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.5).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(0.0).is_err());
        assert!(validate_rating(5.5).is_err());
        assert!(validate_rating(3.3).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn test_movie_type_field_renamed() {
        let mut movie = Movie::new("s1", "#Selfie");
        movie.kind = Some("Movie".to_string());
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["type"], "Movie");
        assert!(json.get("director").is_none());
        assert_eq!(movie.display_title(), "Selfie");
    }

    #[test]
    fn test_movie_deserialize_minimal() {
        let movie: Movie = serde_json::from_str(r#"{"show_id":"s9","title":"Up"}"#).unwrap();
        assert_eq!(movie.show_id, "s9");
        assert!(movie.categories.is_empty());
    }
}
