//! Movie catalog - titles, users, ratings, favorites and watchlists.
//!
//! The catalog is the system of record for everything except posters.
//! Storage is behind the [`MovieCatalog`] trait; [`SqliteCatalog`] is the
//! production implementation.

mod sqlite;
mod types;

pub use sqlite::SqliteCatalog;
pub use types::*;

/// Trait for movie catalog storage.
pub trait MovieCatalog: Send + Sync {
    /// All movies ordered by title.
    fn list_movies(&self) -> Result<Vec<Movie>, CatalogError>;

    /// One page of movies ordered by title.
    ///
    /// Out-of-range `page`/`page_size` values are clamped with
    /// [`normalize_page`].
    fn list_movies_paged(&self, page: u32, page_size: u32) -> Result<MoviePage, CatalogError>;

    /// Get a movie by show id.
    fn get_movie(&self, show_id: &str) -> Result<Movie, CatalogError>;

    /// Add a movie. Fails with `Conflict` if the show id is taken.
    fn insert_movie(&self, movie: &Movie) -> Result<Movie, CatalogError>;

    /// All users ordered by name.
    fn list_users(&self) -> Result<Vec<MovieUser>, CatalogError>;

    /// Get a user by id.
    fn get_user(&self, user_id: i64) -> Result<MovieUser, CatalogError>;

    /// Add a user. Fails with `Conflict` if the id is taken.
    fn insert_user(&self, user: &MovieUser) -> Result<MovieUser, CatalogError>;

    /// Every rating given to a title.
    fn ratings_for_movie(&self, show_id: &str) -> Result<Vec<MovieRating>, CatalogError>;

    /// Every rating a user has given.
    fn ratings_for_user(&self, user_id: i64) -> Result<Vec<MovieRating>, CatalogError>;

    /// Mean of a title's non-null ratings, or 0.0 when it has none.
    fn average_rating(&self, show_id: &str) -> Result<f64, CatalogError>;

    /// Create or replace a user's rating for a title.
    fn rate_movie(&self, user_id: i64, show_id: &str, rating: f64)
        -> Result<MovieRating, CatalogError>;

    /// A user's favorites in insertion order.
    fn list_favorites(&self, user_id: i64) -> Result<Vec<UserFavorite>, CatalogError>;

    /// Add a favorite. Returns the stored row and whether it was newly created;
    /// adding an existing favorite returns the existing row.
    fn add_favorite(&self, user_id: i64, movie_id: &str)
        -> Result<(UserFavorite, bool), CatalogError>;

    /// Remove a favorite. Fails with `NotFound` if it does not exist.
    fn remove_favorite(&self, user_id: i64, movie_id: &str) -> Result<(), CatalogError>;

    /// A user's watchlist in insertion order.
    fn list_watchlist(&self, user_id: i64) -> Result<Vec<UserWatchlist>, CatalogError>;

    /// Add to the watchlist, with the same semantics as [`Self::add_favorite`].
    fn add_to_watchlist(
        &self,
        user_id: i64,
        movie_id: &str,
    ) -> Result<(UserWatchlist, bool), CatalogError>;

    /// Remove from the watchlist. Fails with `NotFound` if absent.
    fn remove_from_watchlist(&self, user_id: i64, movie_id: &str) -> Result<(), CatalogError>;
}
