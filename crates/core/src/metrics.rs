//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Searches (by kind and outcome, duration, candidate counts)
//! - Remote search transport calls
//! - Catalog writes

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Searches total by kind and result.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("shelf_searches_total", "Total searches"),
        &["kind", "result"], // kind: "series", "movie"; result: "found", "empty"
    )
    .unwrap()
});

/// Search duration in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("shelf_search_duration_seconds", "Duration of a full search")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["kind"],
    )
    .unwrap()
});

/// Scored candidates kept per search (after the zero-score floor).
pub static CANDIDATES_PER_SEARCH: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "shelf_candidates_per_search",
            "Number of matching candidates per search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 200.0]),
        &["kind"],
    )
    .unwrap()
});

// =============================================================================
// Transport Metrics
// =============================================================================

/// Remote search calls by result.
pub static TRANSPORT_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "shelf_transport_requests_total",
            "Total remote search requests",
        ),
        &["transport", "result"], // result: "success" or a TransportError kind
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog saves by result.
pub static CATALOG_WRITES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("shelf_catalog_writes_total", "Total catalog saves"),
        &["kind", "result"], // result: "success", "failure"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(CANDIDATES_PER_SEARCH.clone()),
        Box::new(TRANSPORT_REQUESTS.clone()),
        Box::new(CATALOG_WRITES.clone()),
    ]
}
