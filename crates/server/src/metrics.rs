//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the Shelf server:
//! - HTTP request metrics (latency, counts)
//! - Stored catalog counts (collected on scrape)
//! - Core search metrics (registered from `shelf_core::metrics`)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};

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
            "shelf_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("shelf_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "shelf_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Stored catalogs by kind.
pub static CATALOGS_STORED: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("shelf_catalogs_stored", "Number of stored catalogs"),
        &["kind"],
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Catalogs
    registry
        .register(Box::new(CATALOGS_STORED.clone()))
        .unwrap();

    // Core metrics (searches, transport, catalog writes)
    for metric in shelf_core::metrics::all_metrics() {
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

/// Collect dynamic metrics from current application state.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let library = state.library();
    CATALOGS_STORED
        .with_label_values(&["series"])
        .set(library.list_series().len() as i64);
    CATALOGS_STORED
        .with_label_values(&["movie"])
        .set(library.list_movies().len() as i64);
}

/// Normalize a path for metric labels (replace titles with a placeholder).
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let parent = if i > 0 { segments[i - 1] } else { "" };
            let is_title = matches!(parent, "series" | "movies")
                && !segment.is_empty()
                && *segment != "search";
            if is_title {
                "{title}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_title() {
        assert_eq!(
            normalize_path("/api/v1/series/Breaking%20Bad"),
            "/api/v1/series/{title}"
        );
        assert_eq!(normalize_path("/api/v1/movies/dune"), "/api/v1/movies/{title}");
    }

    #[test]
    fn test_normalize_path_keeps_fixed_segments() {
        assert_eq!(normalize_path("/api/v1/series/search"), "/api/v1/series/search");
        assert_eq!(normalize_path("/api/v1/series"), "/api/v1/series");
        assert_eq!(normalize_path("/api/v1/health"), "/api/v1/health");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/api/v1/health", "200"])
            .inc();
        let output = encode_metrics();
        assert!(output.contains("shelf_http_requests_total"));
        assert!(output.contains("# TYPE"));
    }
}
