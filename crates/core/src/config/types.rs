use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub posters: PostersConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub recommendations: RecommendationsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("movies.db")
}

/// Where the poster listing comes from
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PosterSourceKind {
    /// Walk a local directory of image files.
    #[default]
    Directory,
    /// A fixed list of URLs from the config file.
    Static,
    // Future: blob storage listing
}

/// Poster listing and matching configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostersConfig {
    #[serde(default)]
    pub source: PosterSourceKind,
    /// Root of the poster files (required when source = "directory")
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Prefix joined to each relative path found under `directory`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Poster URLs (required when source = "static")
    #[serde(default)]
    pub urls: Vec<String>,
    /// Seconds between listing refreshes (default: 1800)
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Answer an unmatched title with the full candidate list instead of
    /// an explicit no-match.
    #[serde(default)]
    pub legacy_no_match_fallback: bool,
    /// Serve `directory` as static files under `base_url`
    #[serde(default)]
    pub serve_files: bool,
}

impl Default for PostersConfig {
    fn default() -> Self {
        Self {
            source: PosterSourceKind::default(),
            directory: None,
            base_url: default_base_url(),
            urls: Vec::new(),
            refresh_interval_secs: default_refresh_interval_secs(),
            legacy_no_match_fallback: false,
            serve_files: false,
        }
    }
}

fn default_base_url() -> String {
    "/posters/".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    30 * 60
}

/// Cross-origin configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

/// Recommendation list sizes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationsConfig {
    #[serde(default = "default_recommendation_count")]
    pub default_count: usize,
    #[serde(default = "default_max_recommendation_count")]
    pub max_count: usize,
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self {
            default_count: default_recommendation_count(),
            max_count: default_max_recommendation_count(),
        }
    }
}

fn default_recommendation_count() -> usize {
    5
}

fn default_max_recommendation_count() -> usize {
    50
}

/// Sanitized config for API responses (URL credentials redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub posters: SanitizedPostersConfig,
    pub cors: CorsConfig,
    pub recommendations: RecommendationsConfig,
}

/// Sanitized poster config (query strings stripped, URL list summarized)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPostersConfig {
    pub source: PosterSourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    pub base_url: String,
    pub base_url_has_query: bool,
    pub static_url_count: usize,
    pub refresh_interval_secs: u64,
    pub legacy_no_match_fallback: bool,
    pub serve_files: bool,
}

/// Drop anything after `?`, where signed storage URLs carry their tokens.
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(head, _)| head)
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let posters = &config.posters;
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            posters: SanitizedPostersConfig {
                source: posters.source,
                directory: posters.directory.clone(),
                base_url: strip_query(&posters.base_url).to_string(),
                base_url_has_query: posters.base_url.contains('?'),
                static_url_count: posters.urls.len(),
                refresh_interval_secs: posters.refresh_interval_secs,
                legacy_no_match_fallback: posters.legacy_no_match_fallback,
                serve_files: posters.serve_files,
            },
            cors: config.cors.clone(),
            recommendations: config.recommendations.clone(),
        }
    }
}
