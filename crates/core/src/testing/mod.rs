//! Testing utilities and mock implementations.
//!
//! Provides a controllable [`MockPosterSource`] and fixtures for building
//! catalogs and poster listings in unit and end-to-end tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use cineniche_core::testing::{fixtures, MockPosterSource};
//!
//! let source = MockPosterSource::with_paths(fixtures::poster_paths());
//! let catalog = fixtures::seeded_catalog()?;
//! ```

mod mock_poster_source;

pub use mock_poster_source::MockPosterSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{CatalogError, Movie, MovieCatalog, MovieUser, SqliteCatalog};

    /// Prefix used by fixture poster paths.
    pub const POSTER_PREFIX: &str = "https://posters.example.com/Movie Posters/";

    /// A poster listing shaped like a real storage container, including
    /// the sequel, apostrophe and hash cases the resolver has to handle.
    pub fn poster_paths() -> Vec<&'static str> {
        vec![
            "https://posters.example.com/Movie Posters/'79.jpg",
            "https://posters.example.com/Movie Posters/#Selfie 69.jpg",
            "https://posters.example.com/Movie Posters/Friend But Married.jpg",
            "https://posters.example.com/Movie Posters/Friend But Married 2.jpg",
            "https://posters.example.com/Movie Posters/Ocean's Twelve.jpg",
            "https://posters.example.com/Movie Posters/Rocky II.jpg",
            "https://posters.example.com/Movie Posters/The Dark Knight.jpg",
        ]
    }

    /// Create a test movie with a release year and categories.
    pub fn movie(show_id: &str, title: &str, categories: &[&str]) -> Movie {
        let mut movie = Movie::new(show_id, title).with_categories(categories.iter().copied());
        movie.kind = Some("Movie".to_string());
        movie.release_year = Some(2010);
        movie
    }

    /// Create a test user with contact details filled in.
    pub fn user(user_id: i64, name: &str) -> MovieUser {
        MovieUser {
            user_id,
            name: name.to_string(),
            email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
            phone: Some("555-0100".to_string()),
            age: Some(34),
            gender: None,
            city: Some("Provo".to_string()),
            state: Some("UT".to_string()),
        }
    }

    /// A small catalog of movies across overlapping genres.
    pub fn movies() -> Vec<Movie> {
        vec![
            movie("s1", "Friend But Married", &["Comedies", "Romantic Movies"]),
            movie("s2", "Friend But Married 2", &["Comedies", "Romantic Movies"]),
            movie("s3", "'79", &["Dramas"]),
            movie("s4", "#Selfie 69", &["Comedies", "Dramas"]),
            movie("s5", "The Dark Knight", &["Action", "Dramas"]),
        ]
    }

    /// An in-memory catalog loaded with [`movies`] and two users.
    pub fn seeded_catalog() -> Result<SqliteCatalog, CatalogError> {
        let catalog = SqliteCatalog::in_memory()?;
        for movie in movies() {
            catalog.insert_movie(&movie)?;
        }
        catalog.insert_user(&user(1, "Ada Lovelace"))?;
        catalog.insert_user(&user(2, "Grace Hopper"))?;
        Ok(catalog)
    }
}
