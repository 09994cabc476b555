//! Prometheus metrics handler
//!
//! Exposes `GET /metrics` returning Prometheus text format, rendered from
//! the global `metrics-exporter-prometheus` recorder.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics::Unit;
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared state for the metrics endpoint
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register descriptions for the metrics this service emits.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "delivery_fee_calculations_total",
        "Delivery fee calculations by outcome (ok, forbidden, no_data, error)"
    );
    metrics::describe_counter!(
        "weather_ingest_records_total",
        "Weather observations stored by the ingestion job"
    );
    metrics::describe_counter!("http_requests_total", "HTTP requests by method, path and status");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request latency"
    );
}

/// `GET /metrics`: Prometheus scrape endpoint
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
