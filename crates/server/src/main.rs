use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cineniche_core::{
    config::PostersConfig, load_config, validate_config, DirectoryPosterSource, MovieCatalog,
    PosterCache, PosterSource, PosterSourceKind, SqliteCatalog, StaticPosterSource,
};
use cineniche_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging();

    // Determine config path
    let config_path = std::env::var("CINENICHE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        "cineniche {} starting (config {})",
        VERSION,
        &config_hash[..16]
    );
    info!("Database path: {:?}", config.database.path);

    // Create SQLite movie catalog
    let catalog: Arc<dyn MovieCatalog> = Arc::new(
        SqliteCatalog::new(&config.database.path).context("Failed to open movie catalog")?,
    );
    info!("Movie catalog initialized");

    // Create poster cache
    let source = build_poster_source(&config.posters)?;
    let poster_cache = Arc::new(PosterCache::new(
        source,
        Duration::from_secs(config.posters.refresh_interval_secs),
    ));
    info!(
        "Poster source: {} (refresh every {}s)",
        poster_cache.source_name(),
        config.posters.refresh_interval_secs
    );

    // Warm the cache; requests retry the listing if this fails
    if let Err(e) = poster_cache.current().await {
        warn!("Initial poster listing failed: {}", e);
    }

    // Spawn background refresh
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let refresh_handle = Arc::clone(&poster_cache).spawn_refresh_loop(shutdown_rx);

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), catalog, poster_cache));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop the refresh loop
    info!("Server shutting down...");
    let _ = shutdown_tx.send(());
    let _ = refresh_handle.await;
    info!("Poster refresh loop stopped");

    Ok(())
}

/// Initialize logging. `CINENICHE_LOG_FORMAT=json` switches to JSON lines.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into());
    let json = std::env::var("CINENICHE_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_poster_source(config: &PostersConfig) -> Result<Arc<dyn PosterSource>> {
    let source: Arc<dyn PosterSource> = match config.source {
        PosterSourceKind::Directory => {
            let dir = config
                .directory
                .clone()
                .context("posters.directory is not set")?;
            info!("Listing posters from directory {:?}", dir);
            Arc::new(DirectoryPosterSource::new(dir, config.base_url.clone()))
        }
        PosterSourceKind::Static => {
            info!("Using {} configured poster URLs", config.urls.len());
            Arc::new(StaticPosterSource::new(config.urls.clone()))
        }
    };
    Ok(source)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
