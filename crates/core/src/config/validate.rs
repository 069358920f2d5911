use super::{
    types::{Config, PosterSourceKind},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Poster refresh interval is not 0
/// - The selected poster source has what it needs
/// - Recommendation counts are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Poster validation
    let posters = &config.posters;
    if posters.refresh_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "posters.refresh_interval_secs cannot be 0".to_string(),
        ));
    }
    match posters.source {
        PosterSourceKind::Directory if posters.directory.is_none() => {
            return Err(ConfigError::ValidationError(
                "posters.directory is required when posters.source = \"directory\"".to_string(),
            ));
        }
        PosterSourceKind::Static if posters.urls.is_empty() => {
            return Err(ConfigError::ValidationError(
                "posters.urls cannot be empty when posters.source = \"static\"".to_string(),
            ));
        }
        _ => {}
    }
    if posters.serve_files && posters.source != PosterSourceKind::Directory {
        return Err(ConfigError::ValidationError(
            "posters.serve_files requires posters.source = \"directory\"".to_string(),
        ));
    }

    // Recommendation validation
    let recs = &config.recommendations;
    if recs.default_count == 0 || recs.max_count == 0 {
        return Err(ConfigError::ValidationError(
            "recommendations counts cannot be 0".to_string(),
        ));
    }
    if recs.default_count > recs.max_count {
        return Err(ConfigError::ValidationError(format!(
            "recommendations.default_count ({}) exceeds max_count ({})",
            recs.default_count, recs.max_count
        )));
    }

    Ok(())
}
