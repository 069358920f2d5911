//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Core metrics (poster resolution, poster cache, recommendations)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use regex_lite::Regex;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cineniche_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cineniche_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "cineniche_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Core metrics (poster resolution, poster cache, recommendations)
    for metric in cineniche_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Catalog show ids such as `s1234`.
static SHOW_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/s\d+(/|$)").expect("show id pattern is valid"));

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+(/|$)").expect("numeric pattern is valid"));

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    // Run twice: adjacent ids share the separating slash, so one pass
    // only rewrites every other segment.
    let mut result = path.to_string();
    for _ in 0..2 {
        result = SHOW_ID.replace_all(&result, "/{show_id}$1").into_owned();
        result = NUMERIC.replace_all(&result, "/{id}$1").into_owned();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_show_id() {
        let path = "/api/v1/movies/titles/s42";
        assert_eq!(normalize_path(path), "/api/v1/movies/titles/{show_id}");
    }

    #[test]
    fn test_normalize_path_numeric() {
        let path = "/api/v1/movies/users/12345";
        assert_eq!(normalize_path(path), "/api/v1/movies/users/{id}");
    }

    #[test]
    fn test_normalize_path_adjacent_ids() {
        let path = "/api/v1/movies/favorites/7/s42";
        assert_eq!(
            normalize_path(path),
            "/api/v1/movies/favorites/{id}/{show_id}"
        );
    }

    #[test]
    fn test_normalize_path_numeric_middle() {
        let path = "/api/v1/movies/titles/s9/poster";
        assert_eq!(
            normalize_path(path),
            "/api/v1/movies/titles/{show_id}/poster"
        );
    }

    #[test]
    fn test_normalize_path_no_ids() {
        let path = "/api/v1/health";
        assert_eq!(normalize_path(path), "/api/v1/health");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("cineniche_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_core_metrics() {
        // Prometheus only outputs vector metrics that have been accessed
        HTTP_REQUEST_DURATION
            .with_label_values(&["GET", "/test", "200"])
            .observe(0.1);
        HTTP_REQUESTS_IN_FLIGHT.set(0);
        cineniche_core::metrics::POSTER_RESOLUTIONS
            .with_label_values(&["direct"])
            .inc();
        cineniche_core::metrics::POSTER_CACHE_ENTRIES.set(0);

        let output = encode_metrics();

        assert!(output.contains("cineniche_http_request_duration_seconds"));
        assert!(output.contains("cineniche_http_requests_in_flight"));
        assert!(output.contains("cineniche_poster_resolutions_total"));
        assert!(output.contains("cineniche_poster_cache_entries"));
    }
}
