//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Poster title resolution (outcome per tier, latency)
//! - Poster cache refreshes
//! - Recommendations served

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Poster Resolution Metrics
// =============================================================================

/// Poster resolutions by outcome (winning tier, "no_match" or "empty_title").
pub static POSTER_RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cineniche_poster_resolutions_total",
            "Poster title resolutions by outcome",
        ),
        &["outcome"],
    )
    .unwrap()
});

/// Time spent resolving a single title.
pub static POSTER_RESOLUTION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cineniche_poster_resolution_duration_seconds",
            "Duration of a single poster title resolution",
        )
        .buckets(vec![0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Poster Cache Metrics
// =============================================================================

/// Poster cache refreshes by result.
pub static POSTER_CACHE_REFRESHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cineniche_poster_cache_refreshes_total",
            "Poster cache refreshes",
        ),
        &["result"], // "success", "failure"
    )
    .unwrap()
});

/// Entries in the currently published poster snapshot.
pub static POSTER_CACHE_ENTRIES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "cineniche_poster_cache_entries",
        "Number of poster paths in the published snapshot",
    )
    .unwrap()
});

// =============================================================================
// Recommendation Metrics
// =============================================================================

/// Recommendation requests by mode.
pub static RECOMMENDATIONS_SERVED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cineniche_recommendations_total",
            "Recommendation lists served",
        ),
        &["mode"], // "content", "hybrid"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(POSTER_RESOLUTIONS.clone()),
        Box::new(POSTER_RESOLUTION_DURATION.clone()),
        Box::new(POSTER_CACHE_REFRESHES.clone()),
        Box::new(POSTER_CACHE_ENTRIES.clone()),
        Box::new(RECOMMENDATIONS_SERVED.clone()),
    ]
}
