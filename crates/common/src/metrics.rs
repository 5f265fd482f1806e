use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static PERSON_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "person_api_requests_total",
        "Person API requests by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register person_api_requests_total")
});

/// Count one handled request. `outcome` is a short label such as `ok`, `not_found`.
pub fn record(operation: &str, outcome: &str) {
    PERSON_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
