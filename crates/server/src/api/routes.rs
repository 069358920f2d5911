use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use cineniche_core::{Config, PosterSourceKind};

use super::{handlers, lists, middleware::metrics_middleware, movies, posters, recommendations};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config());
    let poster_files = poster_file_service(state.config());

    let movie_routes = Router::new()
        // Titles
        .route("/titles", get(movies::list_titles))
        .route("/titles", post(movies::create_title))
        .route("/titles/paged", get(movies::list_titles_paged))
        .route("/titles/{id}", get(movies::get_title))
        .route("/titles/{id}/poster", get(movies::get_title_poster))
        // Users
        .route("/users", get(movies::list_users))
        .route("/users/{id}", get(movies::get_user))
        // Ratings
        .route("/ratings", put(movies::rate_movie))
        .route("/ratings/{show_id}", get(movies::ratings_for_movie))
        .route("/ratings/user/{user_id}", get(movies::ratings_for_user))
        .route("/ratings/average/{show_id}", get(movies::average_rating))
        // Favorites
        .route("/favorites", post(lists::add_favorite))
        .route("/favorites/user/{user_id}", get(lists::list_favorites))
        .route("/favorites/{user_id}/{movie_id}", delete(lists::remove_favorite))
        // Watchlist
        .route("/watchlist", post(lists::add_to_watchlist))
        .route("/watchlist/user/{user_id}", get(lists::list_watchlist))
        .route(
            "/watchlist/{user_id}/{movie_id}",
            delete(lists::remove_from_watchlist),
        );

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Posters
        .route("/posters", get(posters::list_posters))
        .route("/posters/match", get(posters::match_poster))
        .route("/posters/explain", get(posters::explain_poster))
        .route("/posters/reload", post(posters::reload_posters))
        .route("/posters/status", get(posters::poster_status))
        // Recommendations
        .route("/recommendations/{show_id}", get(recommendations::recommend))
        .nest("/movies", movie_routes)
        .with_state(state);

    let mut app = Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics));

    if let Some((mount, dir)) = poster_files {
        app = app.nest_service(&mount, dir);
    }

    app.layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Allow the configured origins; `*` allows any.
fn cors_layer(config: &Config) -> CorsLayer {
    let origins = &config.cors.allowed_origins;
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Static file service for the poster directory, when enabled.
///
/// Mounted at `posters.base_url` so the URLs handed out by the resolver are
/// served by this process. Only local paths (starting with `/`) can be
/// mounted.
fn poster_file_service(config: &Config) -> Option<(String, ServeDir)> {
    let posters = &config.posters;
    if !posters.serve_files || posters.source != PosterSourceKind::Directory {
        return None;
    }
    let dir = posters.directory.as_ref()?;

    let mount = posters.base_url.trim_end_matches('/');
    if !mount.starts_with('/') || mount.len() < 2 {
        warn!(
            "posters.serve_files needs a local base_url such as \"/posters/\", got {:?}",
            posters.base_url
        );
        return None;
    }

    info!("Serving poster files from {:?} at {}", dir, mount);
    Some((mount.to_string(), ServeDir::new(dir)))
}
