// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, BACKEND_CALLS, BACKEND_CALL_DURATION, CACHE_ENTRIES, CACHE_OPERATIONS,
    RECONCILE_OUTCOMES, REQUESTS_TOTAL, REQUEST_DURATION,
};

use std::time::Duration;

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .observe(duration_secs);
}

/// Helper to record captioning backend calls
pub fn record_backend_call(backend: &str, outcome: &str, duration: Duration) {
    BACKEND_CALLS.with_label_values(&[backend, outcome]).inc();

    BACKEND_CALL_DURATION
        .with_label_values(&[backend])
        .observe(duration.as_secs_f64());
}

/// Helper to record caption cache lifecycle operations
pub fn record_cache_operation(operation: &str) {
    CACHE_OPERATIONS.with_label_values(&[operation]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.with_label_values(&["active"]).set(count as f64);
}

/// Helper to record reconciliation outcomes
pub fn record_reconciliation(annotated: usize, unmatched: usize) {
    if annotated > 0 {
        RECONCILE_OUTCOMES
            .with_label_values(&["annotated"])
            .inc_by(annotated as f64);
    }
    if unmatched > 0 {
        RECONCILE_OUTCOMES
            .with_label_values(&["unmatched"])
            .inc_by(unmatched as f64);
    }
}
