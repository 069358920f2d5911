//! SQLite-backed movie catalog implementation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use super::{
    normalize_page, CatalogError, Movie, MovieCatalog, MoviePage, MovieRating, MovieUser,
    Pagination, UserFavorite, UserWatchlist,
};

/// SQLite-backed movie catalog.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

/// The two per-user movie lists share one table layout.
#[derive(Debug, Clone, Copy)]
enum UserList {
    Favorites,
    Watchlist,
}

impl UserList {
    fn table(self) -> &'static str {
        match self {
            UserList::Favorites => "user_favorites",
            UserList::Watchlist => "user_watchlist",
        }
    }

    fn id_column(self) -> &'static str {
        match self {
            UserList::Favorites => "favorite_id",
            UserList::Watchlist => "watchlist_id",
        }
    }
}

/// (row id, user id, movie id)
type ListRow = (i64, i64, String);

const MOVIE_COLUMNS: &str = r#"show_id, type, title, director, "cast", country, release_year, rating, duration, description"#;

impl SqliteCatalog {
    /// Create a new SQLite catalog, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite catalog (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), CatalogError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS movies_titles (
                show_id TEXT PRIMARY KEY,
                type TEXT,
                title TEXT NOT NULL,
                director TEXT,
                "cast" TEXT,
                country TEXT,
                release_year INTEGER,
                rating TEXT,
                duration TEXT,
                description TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_movies_titles_title ON movies_titles(title);

            -- Genre membership (one row per movie/category pair)
            CREATE TABLE IF NOT EXISTS movie_categories (
                show_id TEXT NOT NULL REFERENCES movies_titles(show_id) ON DELETE CASCADE,
                category TEXT NOT NULL,
                PRIMARY KEY (show_id, category)
            );

            CREATE TABLE IF NOT EXISTS movies_users (
                user_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT,
                phone TEXT,
                age INTEGER,
                gender TEXT,
                city TEXT,
                state TEXT
            );

            CREATE TABLE IF NOT EXISTS movies_ratings (
                user_id INTEGER NOT NULL,
                show_id TEXT NOT NULL,
                rating REAL,
                PRIMARY KEY (user_id, show_id)
            );

            CREATE INDEX IF NOT EXISTS idx_movies_ratings_show ON movies_ratings(show_id);

            CREATE TABLE IF NOT EXISTS user_favorites (
                favorite_id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                movie_id TEXT NOT NULL,
                UNIQUE(user_id, movie_id)
            );

            CREATE TABLE IF NOT EXISTS user_watchlist (
                watchlist_id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                movie_id TEXT NOT NULL,
                UNIQUE(user_id, movie_id)
            );
            "#,
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, CatalogError> {
        self.conn
            .lock()
            .map_err(|_| CatalogError::Internal("catalog connection lock poisoned".to_string()))
    }

    /// Convert a row to Movie (without categories).
    fn row_to_movie(row: &rusqlite::Row) -> rusqlite::Result<Movie> {
        Ok(Movie {
            show_id: row.get(0)?,
            kind: row.get(1)?,
            title: row.get(2)?,
            director: row.get(3)?,
            cast: row.get(4)?,
            country: row.get(5)?,
            release_year: row.get(6)?,
            rating: row.get(7)?,
            duration: row.get(8)?,
            description: row.get(9)?,
            categories: Vec::new(), // Will be loaded separately
        })
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<MovieUser> {
        Ok(MovieUser {
            user_id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            age: row.get(4)?,
            gender: row.get(5)?,
            city: row.get(6)?,
            state: row.get(7)?,
        })
    }

    fn row_to_rating(row: &rusqlite::Row) -> rusqlite::Result<MovieRating> {
        let rating: Option<f64> = row.get(2)?;
        Ok(MovieRating {
            user_id: row.get(0)?,
            show_id: row.get(1)?,
            rating: rating.unwrap_or(0.0),
        })
    }

    /// Load categories for a single movie.
    fn load_categories(conn: &Connection, show_id: &str) -> Result<Vec<String>, CatalogError> {
        let mut stmt = conn.prepare(
            "SELECT category FROM movie_categories WHERE show_id = ? ORDER BY category",
        )?;
        let rows = stmt.query_map(params![show_id], |row| row.get(0))?;
        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }

    /// Load categories for every movie, keyed by show id.
    fn load_all_categories(
        conn: &Connection,
    ) -> Result<HashMap<String, Vec<String>>, CatalogError> {
        let mut stmt =
            conn.prepare("SELECT show_id, category FROM movie_categories ORDER BY show_id, category")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut by_movie: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let (show_id, category) = row?;
            by_movie.entry(show_id).or_default().push(category);
        }
        Ok(by_movie)
    }

    fn query_movies(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Movie>, CatalogError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::row_to_movie)?;
        let mut movies = Vec::new();
        for row in rows {
            movies.push(row?);
        }

        let mut categories = Self::load_all_categories(conn)?;
        for movie in &mut movies {
            if let Some(c) = categories.remove(&movie.show_id) {
                movie.categories = c;
            }
        }
        Ok(movies)
    }

    fn query_ratings(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<MovieRating>, CatalogError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::row_to_rating)?;
        let mut ratings = Vec::new();
        for row in rows {
            ratings.push(row?);
        }
        Ok(ratings)
    }

    fn list_entries(&self, list: UserList, user_id: i64) -> Result<Vec<ListRow>, CatalogError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {id}, user_id, movie_id FROM {table} WHERE user_id = ? ORDER BY {id}",
            id = list.id_column(),
            table = list.table()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn add_entry(
        &self,
        list: UserList,
        user_id: i64,
        movie_id: &str,
    ) -> Result<(ListRow, bool), CatalogError> {
        let conn = self.conn()?;

        let existing: Option<i64> = conn
            .query_row(
                &format!(
                    "SELECT {} FROM {} WHERE user_id = ? AND movie_id = ?",
                    list.id_column(),
                    list.table()
                ),
                params![user_id, movie_id],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok(((id, user_id, movie_id.to_string()), false));
        }

        conn.execute(
            &format!(
                "INSERT INTO {} (user_id, movie_id) VALUES (?, ?)",
                list.table()
            ),
            params![user_id, movie_id],
        )?;
        let id = conn.last_insert_rowid();
        Ok(((id, user_id, movie_id.to_string()), true))
    }

    fn remove_entry(&self, list: UserList, user_id: i64, movie_id: &str) -> Result<(), CatalogError> {
        let conn = self.conn()?;
        let removed = conn.execute(
            &format!(
                "DELETE FROM {} WHERE user_id = ? AND movie_id = ?",
                list.table()
            ),
            params![user_id, movie_id],
        )?;
        if removed == 0 {
            return Err(CatalogError::NotFound(format!(
                "{} entry for user {} and movie {}",
                list.table(),
                user_id,
                movie_id
            )));
        }
        Ok(())
    }
}

/// Map a unique/primary-key violation to `Conflict`.
fn conflict_or_database(e: rusqlite::Error, what: String) -> CatalogError {
    match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => CatalogError::Conflict(what),
        _ => CatalogError::Database(e.to_string()),
    }
}

impl MovieCatalog for SqliteCatalog {
    fn list_movies(&self) -> Result<Vec<Movie>, CatalogError> {
        let conn = self.conn()?;
        Self::query_movies(
            &conn,
            &format!("SELECT {MOVIE_COLUMNS} FROM movies_titles ORDER BY title, show_id"),
            [],
        )
    }

    fn list_movies_paged(&self, page: u32, page_size: u32) -> Result<MoviePage, CatalogError> {
        let (page, page_size) = normalize_page(page, page_size);
        let conn = self.conn()?;

        let total_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM movies_titles", [], |row| row.get(0))?;

        let offset = (page as i64 - 1) * page_size as i64;
        let movies = Self::query_movies(
            &conn,
            &format!(
                "SELECT {MOVIE_COLUMNS} FROM movies_titles ORDER BY title, show_id LIMIT ? OFFSET ?"
            ),
            params![page_size as i64, offset],
        )?;

        Ok(MoviePage {
            movies,
            pagination: Pagination::new(page, page_size, total_count as u64),
        })
    }

    fn get_movie(&self, show_id: &str) -> Result<Movie, CatalogError> {
        let conn = self.conn()?;
        let movie = conn
            .query_row(
                &format!("SELECT {MOVIE_COLUMNS} FROM movies_titles WHERE show_id = ?"),
                params![show_id],
                Self::row_to_movie,
            )
            .optional()?;

        let mut movie = movie.ok_or_else(|| CatalogError::NotFound(show_id.to_string()))?;
        movie.categories = Self::load_categories(&conn, show_id)?;
        Ok(movie)
    }

    fn insert_movie(&self, movie: &Movie) -> Result<Movie, CatalogError> {
        if movie.show_id.trim().is_empty() {
            return Err(CatalogError::InvalidInput("show_id is required".to_string()));
        }
        if movie.title.trim().is_empty() {
            return Err(CatalogError::InvalidInput("title is required".to_string()));
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            &format!(
                "INSERT INTO movies_titles ({MOVIE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            params![
                movie.show_id,
                movie.kind,
                movie.title,
                movie.director,
                movie.cast,
                movie.country,
                movie.release_year,
                movie.rating,
                movie.duration,
                movie.description,
            ],
        )
        .map_err(|e| conflict_or_database(e, format!("movie {}", movie.show_id)))?;

        for category in &movie.categories {
            tx.execute(
                "INSERT OR IGNORE INTO movie_categories (show_id, category) VALUES (?, ?)",
                params![movie.show_id, category],
            )?;
        }

        let categories = Self::load_categories(&tx, &movie.show_id)?;
        tx.commit()?;

        Ok(Movie {
            categories,
            ..movie.clone()
        })
    }

    fn list_users(&self) -> Result<Vec<MovieUser>, CatalogError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_id, name, email, phone, age, gender, city, state
             FROM movies_users ORDER BY name, user_id",
        )?;
        let rows = stmt.query_map([], Self::row_to_user)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    fn get_user(&self, user_id: i64) -> Result<MovieUser, CatalogError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT user_id, name, email, phone, age, gender, city, state
             FROM movies_users WHERE user_id = ?",
            params![user_id],
            Self::row_to_user,
        )
        .optional()?
        .ok_or_else(|| CatalogError::NotFound(format!("user {}", user_id)))
    }

    fn insert_user(&self, user: &MovieUser) -> Result<MovieUser, CatalogError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO movies_users (user_id, name, email, phone, age, gender, city, state)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                user.user_id,
                user.name,
                user.email,
                user.phone,
                user.age,
                user.gender,
                user.city,
                user.state,
            ],
        )
        .map_err(|e| conflict_or_database(e, format!("user {}", user.user_id)))?;
        Ok(user.clone())
    }

    fn ratings_for_movie(&self, show_id: &str) -> Result<Vec<MovieRating>, CatalogError> {
        let conn = self.conn()?;
        Self::query_ratings(
            &conn,
            "SELECT user_id, show_id, rating FROM movies_ratings WHERE show_id = ? ORDER BY user_id",
            params![show_id],
        )
    }

    fn ratings_for_user(&self, user_id: i64) -> Result<Vec<MovieRating>, CatalogError> {
        let conn = self.conn()?;
        Self::query_ratings(
            &conn,
            "SELECT user_id, show_id, rating FROM movies_ratings WHERE user_id = ? ORDER BY show_id",
            params![user_id],
        )
    }

    fn average_rating(&self, show_id: &str) -> Result<f64, CatalogError> {
        let conn = self.conn()?;
        let average: Option<f64> = conn.query_row(
            "SELECT AVG(rating) FROM movies_ratings WHERE show_id = ? AND rating IS NOT NULL",
            params![show_id],
            |row| row.get(0),
        )?;
        Ok(average.unwrap_or(0.0))
    }

    fn rate_movie(
        &self,
        user_id: i64,
        show_id: &str,
        rating: f64,
    ) -> Result<MovieRating, CatalogError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO movies_ratings (user_id, show_id, rating) VALUES (?, ?, ?)
             ON CONFLICT(user_id, show_id) DO UPDATE SET rating = excluded.rating",
            params![user_id, show_id, rating],
        )?;
        Ok(MovieRating {
            user_id,
            show_id: show_id.to_string(),
            rating,
        })
    }

    fn list_favorites(&self, user_id: i64) -> Result<Vec<UserFavorite>, CatalogError> {
        Ok(self
            .list_entries(UserList::Favorites, user_id)?
            .into_iter()
            .map(|(id, user_id, movie_id)| UserFavorite {
                favorite_id: Some(id),
                user_id,
                movie_id,
            })
            .collect())
    }

    fn add_favorite(
        &self,
        user_id: i64,
        movie_id: &str,
    ) -> Result<(UserFavorite, bool), CatalogError> {
        let ((id, user_id, movie_id), created) =
            self.add_entry(UserList::Favorites, user_id, movie_id)?;
        Ok((
            UserFavorite {
                favorite_id: Some(id),
                user_id,
                movie_id,
            },
            created,
        ))
    }

    fn remove_favorite(&self, user_id: i64, movie_id: &str) -> Result<(), CatalogError> {
        self.remove_entry(UserList::Favorites, user_id, movie_id)
    }

    fn list_watchlist(&self, user_id: i64) -> Result<Vec<UserWatchlist>, CatalogError> {
        Ok(self
            .list_entries(UserList::Watchlist, user_id)?
            .into_iter()
            .map(|(id, user_id, movie_id)| UserWatchlist {
                watchlist_id: Some(id),
                user_id,
                movie_id,
            })
            .collect())
    }

    fn add_to_watchlist(
        &self,
        user_id: i64,
        movie_id: &str,
    ) -> Result<(UserWatchlist, bool), CatalogError> {
        let ((id, user_id, movie_id), created) =
            self.add_entry(UserList::Watchlist, user_id, movie_id)?;
        Ok((
            UserWatchlist {
                watchlist_id: Some(id),
                user_id,
                movie_id,
            },
            created,
        ))
    }

    fn remove_from_watchlist(&self, user_id: i64, movie_id: &str) -> Result<(), CatalogError> {
        self.remove_entry(UserList::Watchlist, user_id, movie_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_movies() -> SqliteCatalog {
        let catalog = SqliteCatalog::in_memory().unwrap();
        catalog
            .insert_movie(&Movie::new("s2", "Up").with_categories(["Comedies", "Family Movies"]))
            .unwrap();
        catalog
            .insert_movie(&Movie::new("s1", "Cars").with_categories(["Family Movies"]))
            .unwrap();
        catalog
            .insert_movie(&Movie::new("s3", "Alien").with_categories(["Horror Movies"]))
            .unwrap();
        catalog
    }

    fn user(user_id: i64, name: &str) -> MovieUser {
        MovieUser {
            user_id,
            name: name.to_string(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            phone: None,
            age: Some(30),
            gender: None,
            city: None,
            state: None,
        }
    }

    #[test]
    fn test_list_movies_ordered_by_title_with_categories() {
        let catalog = catalog_with_movies();
        let movies = catalog.list_movies().unwrap();

        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Cars", "Up"]);
        assert_eq!(movies[2].categories, vec!["Comedies", "Family Movies"]);
    }

    #[test]
    fn test_get_movie_and_not_found() {
        let catalog = catalog_with_movies();
        let movie = catalog.get_movie("s1").unwrap();
        assert_eq!(movie.title, "Cars");
        assert_eq!(movie.categories, vec!["Family Movies"]);

        let err = catalog.get_movie("missing").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_insert_duplicate_movie_conflicts() {
        let catalog = catalog_with_movies();
        let err = catalog.insert_movie(&Movie::new("s1", "Cars 2")).unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[test]
    fn test_insert_movie_requires_title() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        let err = catalog.insert_movie(&Movie::new("s1", "  ")).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput(_)));
    }

    #[test]
    fn test_paged_listing() {
        let catalog = catalog_with_movies();

        let page = catalog.list_movies_paged(2, 2).unwrap();
        assert_eq!(page.movies.len(), 1);
        assert_eq!(page.movies[0].title, "Up");
        assert_eq!(page.pagination.total_count, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_previous);

        // Out-of-range values are clamped
        let page = catalog.list_movies_paged(0, 500).unwrap();
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.page_size, 20);
        assert_eq!(page.movies.len(), 3);
    }

    #[test]
    fn test_users() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        catalog.insert_user(&user(2, "Zoe")).unwrap();
        catalog.insert_user(&user(1, "Ann")).unwrap();

        let names: Vec<String> = catalog
            .list_users()
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ann", "Zoe"]);

        assert_eq!(catalog.get_user(2).unwrap().name, "Zoe");
        assert!(matches!(
            catalog.get_user(9).unwrap_err(),
            CatalogError::NotFound(_)
        ));
        assert!(matches!(
            catalog.insert_user(&user(1, "Again")).unwrap_err(),
            CatalogError::Conflict(_)
        ));
    }

    #[test]
    fn test_ratings_and_average() {
        let catalog = catalog_with_movies();
        assert_eq!(catalog.average_rating("s1").unwrap(), 0.0);

        catalog.rate_movie(1, "s1", 4.0).unwrap();
        catalog.rate_movie(2, "s1", 3.0).unwrap();
        catalog.rate_movie(1, "s2", 5.0).unwrap();
        // Re-rating replaces the earlier value
        catalog.rate_movie(2, "s1", 2.0).unwrap();

        assert_eq!(catalog.ratings_for_movie("s1").unwrap().len(), 2);
        assert_eq!(catalog.ratings_for_user(1).unwrap().len(), 2);
        assert!((catalog.average_rating("s1").unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_rating_reads_as_zero_and_is_excluded_from_average() {
        let catalog = catalog_with_movies();
        {
            let conn = catalog.conn().unwrap();
            conn.execute(
                "INSERT INTO movies_ratings (user_id, show_id, rating) VALUES (7, 's3', NULL)",
                [],
            )
            .unwrap();
        }
        catalog.rate_movie(8, "s3", 4.0).unwrap();

        let ratings = catalog.ratings_for_movie("s3").unwrap();
        assert_eq!(ratings[0].rating, 0.0);
        assert_eq!(catalog.average_rating("s3").unwrap(), 4.0);
    }

    #[test]
    fn test_favorites_are_idempotent() {
        let catalog = catalog_with_movies();

        let (first, created) = catalog.add_favorite(1, "s1").unwrap();
        assert!(created);
        let (again, created) = catalog.add_favorite(1, "s1").unwrap();
        assert!(!created);
        assert_eq!(first.favorite_id, again.favorite_id);

        catalog.add_favorite(1, "s2").unwrap();
        let favorites = catalog.list_favorites(1).unwrap();
        let ids: Vec<&str> = favorites.iter().map(|f| f.movie_id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
        assert!(catalog.list_favorites(2).unwrap().is_empty());
    }

    #[test]
    fn test_remove_favorite() {
        let catalog = catalog_with_movies();
        catalog.add_favorite(1, "s1").unwrap();

        catalog.remove_favorite(1, "s1").unwrap();
        assert!(catalog.list_favorites(1).unwrap().is_empty());

        let err = catalog.remove_favorite(1, "s1").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_watchlist_is_separate_from_favorites() {
        let catalog = catalog_with_movies();
        catalog.add_favorite(1, "s1").unwrap();
        let (entry, created) = catalog.add_to_watchlist(1, "s3").unwrap();
        assert!(created);
        assert!(entry.watchlist_id.is_some());

        let watchlist = catalog.list_watchlist(1).unwrap();
        assert_eq!(watchlist.len(), 1);
        assert_eq!(watchlist[0].movie_id, "s3");

        catalog.remove_from_watchlist(1, "s3").unwrap();
        assert!(matches!(
            catalog.remove_from_watchlist(1, "s3").unwrap_err(),
            CatalogError::NotFound(_)
        ));
        assert_eq!(catalog.list_favorites(1).unwrap().len(), 1);
    }

    #[test]
    fn test_file_backed_catalog_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.db");
        {
            let catalog = SqliteCatalog::new(&path).unwrap();
            catalog.insert_movie(&Movie::new("s1", "Up")).unwrap();
        }
        let catalog = SqliteCatalog::new(&path).unwrap();
        assert_eq!(catalog.get_movie("s1").unwrap().title, "Up");
    }
}
