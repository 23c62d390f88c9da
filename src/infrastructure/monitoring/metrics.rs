//! Client-side metrics
//!
//! Counters and histograms are emitted through the `metrics` facade; an
//! exporter can be installed by the embedding application when needed.
//! Without one the calls are no-ops.

use std::time::Duration;

/// Counter: API requests issued, labeled by endpoint and outcome
pub const API_REQUESTS_TOTAL: &str = "sky366_api_requests_total";

/// Counter: API request retries
pub const API_RETRIES_TOTAL: &str = "sky366_api_retries_total";

/// Counter: sessions evicted after an auth failure
pub const SESSION_EVICTIONS_TOTAL: &str = "sky366_session_evictions_total";

/// Histogram: API request latency in seconds
pub const API_REQUEST_DURATION: &str = "sky366_api_request_duration_seconds";

/// Counter: payment status polls performed
pub const PAYMENT_POLLS_TOTAL: &str = "sky366_payment_polls_total";

/// Record a completed API request
pub fn record_request(endpoint: &str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!(
        API_REQUESTS_TOTAL,
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome,
    )
    .increment(1);
    metrics::histogram!(
        API_REQUEST_DURATION,
        "endpoint" => endpoint.to_string(),
    )
    .record(elapsed.as_secs_f64());
}

/// Record a retry of a failed request
pub fn record_retry(endpoint: &str) {
    metrics::counter!(API_RETRIES_TOTAL, "endpoint" => endpoint.to_string()).increment(1);
}

/// Record a session eviction
pub fn record_session_eviction() {
    metrics::counter!(SESSION_EVICTIONS_TOTAL).increment(1);
}

/// Record one payment status poll
pub fn record_payment_poll(status: &str) {
    metrics::counter!(PAYMENT_POLLS_TOTAL, "status" => status.to_string()).increment(1);
}
