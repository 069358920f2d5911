//! Genre-similarity recommendations.
//!
//! Scores every other title by the Jaccard similarity of its category set
//! against the target's. A hybrid mode additionally pulls titles the
//! requesting user has already rated to the front of the list.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{CatalogError, Movie, MovieCatalog};
use crate::metrics::RECOMMENDATIONS_SERVED;

/// Jaccard similarity of two category lists.
///
/// Returns 0.0 when either side has no categories. Duplicates are ignored.
pub fn jaccard<A, B>(a: &[A], b: &[B]) -> f64
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let a: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let b: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}

/// The `count` titles in `pool` most similar to `target`.
///
/// The target itself is excluded. Equal scores keep their order in `pool`.
pub fn content_based<'a>(target: &Movie, pool: &'a [Movie], count: usize) -> Vec<&'a Movie> {
    let mut scored: Vec<(f64, &Movie)> = pool
        .iter()
        .filter(|m| m.show_id != target.show_id)
        .map(|m| (jaccard(&target.categories, &m.categories), m))
        .collect();

    // sort_by is stable, so ties stay in pool order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(count).map(|(_, m)| m).collect()
}

/// Content-based recommendations re-ranked for a user.
///
/// Takes a pool of `2 * count` similar titles, moves the ones in `rated`
/// to the front (keeping relative order on both sides), then cuts to
/// `count`.
pub fn hybrid<'a>(
    target: &Movie,
    pool: &'a [Movie],
    rated: &HashSet<String>,
    count: usize,
) -> Vec<&'a Movie> {
    let mut candidates = content_based(target, pool, count.saturating_mul(2));
    candidates.sort_by_key(|m| !rated.contains(&m.show_id));
    candidates.truncate(count);
    candidates
}

/// Recommendation service over the movie catalog.
pub struct Recommender {
    catalog: Arc<dyn MovieCatalog>,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }

    /// Recommend up to `count` titles similar to `show_id`.
    ///
    /// With a `user_id`, titles that user has rated are boosted. Fails with
    /// `NotFound` if the target title does not exist.
    pub fn recommend(
        &self,
        show_id: &str,
        user_id: Option<i64>,
        count: usize,
    ) -> Result<Vec<Movie>, CatalogError> {
        let target = self.catalog.get_movie(show_id)?;
        let pool = self.catalog.list_movies()?;

        let picked = match user_id {
            Some(user_id) => {
                let rated: HashSet<String> = self
                    .catalog
                    .ratings_for_user(user_id)?
                    .into_iter()
                    .map(|r| r.show_id)
                    .collect();
                RECOMMENDATIONS_SERVED.with_label_values(&["hybrid"]).inc();
                hybrid(&target, &pool, &rated, count)
            }
            None => {
                RECOMMENDATIONS_SERVED.with_label_values(&["content"]).inc();
                content_based(&target, &pool, count)
            }
        };

        debug!(
            "Recommending {} titles for {} (user: {:?})",
            picked.len(),
            show_id,
            user_id
        );
        Ok(picked.into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SqliteCatalog;

    fn movie(id: &str, categories: &[&str]) -> Movie {
        Movie::new(id, id).with_categories(categories.iter().copied())
    }

    fn ids(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|m| m.show_id.clone()).collect()
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard(&["a", "b"], &["a", "b"]), 1.0);
        assert_eq!(jaccard(&["a", "b"], &["b", "c"]), 1.0 / 3.0);
        assert_eq!(jaccard(&["a"], &["b"]), 0.0);
        assert_eq!(jaccard::<&str, &str>(&[], &["a"]), 0.0);
        assert_eq!(jaccard(&["a", "a"], &["a"]), 1.0);
    }

    #[test]
    fn test_content_based_excludes_target_and_ranks() {
        let target = movie("t", &["Drama", "Comedy"]);
        let pool = vec![
            target.clone(),
            movie("horror", &["Horror"]),
            movie("drama", &["Drama"]),
            movie("both", &["Drama", "Comedy"]),
        ];

        let picked = content_based(&target, &pool, 2);
        assert_eq!(ids(&picked), vec!["both", "drama"]);
    }

    #[test]
    fn test_content_based_ties_keep_pool_order() {
        let target = movie("t", &["Drama"]);
        let pool = vec![
            movie("x", &["Horror"]),
            movie("b", &["Drama"]),
            movie("a", &["Drama"]),
            movie("y", &[]),
        ];

        let picked = content_based(&target, &pool, 4);
        assert_eq!(ids(&picked), vec!["b", "a", "x", "y"]);
    }

    #[test]
    fn test_hybrid_boosts_rated_titles() {
        let target = movie("t", &["Drama"]);
        let pool = vec![
            movie("d1", &["Drama"]),
            movie("d2", &["Drama"]),
            movie("h1", &["Horror"]),
            movie("h2", &["Horror"]),
            movie("h3", &["Horror"]),
        ];
        let rated: HashSet<String> = ["h1".to_string()].into_iter().collect();

        // Pool of 4 = d1, d2, h1, h2; h1 moves to the front, then cut to 2.
        let picked = hybrid(&target, &pool, &rated, 2);
        assert_eq!(ids(&picked), vec!["h1", "d1"]);

        // A rated title outside the 2x pool is not pulled in.
        let rated: HashSet<String> = ["h3".to_string()].into_iter().collect();
        let picked = hybrid(&target, &pool, &rated, 2);
        assert_eq!(ids(&picked), vec!["d1", "d2"]);
    }

    #[test]
    fn test_recommender_over_catalog() {
        let catalog = Arc::new(SqliteCatalog::in_memory().unwrap());
        catalog
            .insert_movie(&movie("s1", &["Dramas", "Comedies"]))
            .unwrap();
        catalog.insert_movie(&movie("s2", &["Dramas"])).unwrap();
        catalog.insert_movie(&movie("s3", &["Horror Movies"])).unwrap();
        catalog.rate_movie(7, "s3", 4.0).unwrap();

        let recommender = Recommender::new(catalog);

        let plain = recommender.recommend("s1", None, 1).unwrap();
        assert_eq!(plain[0].show_id, "s2");

        let boosted = recommender.recommend("s1", Some(7), 1).unwrap();
        assert_eq!(boosted[0].show_id, "s3");

        let err = recommender.recommend("missing", None, 5).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
