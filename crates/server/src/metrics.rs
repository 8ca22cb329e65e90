//! Prometheus metrics
//!
//! - `order_desk_queries_total{intent, outcome}` counts answered questions
//! - `order_desk_query_latency_seconds` records time spent in the query engine

use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use order_desk_text_processing::Intent;

use crate::state::AppState;

pub const QUERIES_TOTAL: &str = "order_desk_queries_total";
pub const QUERY_LATENCY: &str = "order_desk_query_latency_seconds";

/// Install the global Prometheus recorder.
///
/// Returns `None` if a recorder is already installed (only one may exist per
/// process).
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            ::metrics::describe_counter!(QUERIES_TOTAL, "Questions answered, by intent and outcome");
            ::metrics::describe_histogram!(QUERY_LATENCY, "Query engine latency in seconds");
            Some(handle)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

/// Record one answered question
pub fn record_query(intent: Option<Intent>, outcome: &'static str, latency: Duration) {
    let intent = intent.map(|i| i.as_str()).unwrap_or("none");
    ::metrics::counter!(QUERIES_TOTAL, "intent" => intent, "outcome" => outcome).increment(1);
    ::metrics::histogram!(QUERY_LATENCY).record(latency.as_secs_f64());
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match (&state.metrics, state.config.observability.metrics_enabled) {
        (Some(handle), true) => (StatusCode::OK, handle.render()),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}
