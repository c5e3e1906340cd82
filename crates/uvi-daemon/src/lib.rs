use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};
use uvi_sensors::{DeviceInfo, SensorRegistry};

pub mod scheduler;

pub struct AppState {
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    fetch_success_total: Counter<u64>,
    fetch_failure_total: Counter<u64>,
    sensors: Arc<SensorRegistry>,
}

impl AppState {
    /// Counters the poll scheduler bumps after each refresh attempt.
    pub fn fetch_metrics(&self) -> scheduler::FetchMetrics {
        scheduler::FetchMetrics::new(
            self.fetch_success_total.clone(),
            self.fetch_failure_total.clone(),
        )
    }
}

pub fn build_app(sensors: Arc<SensorRegistry>) -> (Router, Arc<AppState>) {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter()
        .with_registry(registry.clone())
        .build()
        .expect("prom exporter");
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("uvid");

    let requests_total = meter
        .u64_counter("uvid_requests_total")
        .with_description("Total HTTP requests served")
        .init();
    let fetch_success_total = meter
        .u64_counter("uvid_fetch_success_total")
        .with_description("Successful upstream refreshes")
        .init();
    let fetch_failure_total = meter
        .u64_counter("uvid_fetch_failure_total")
        .with_description("Failed upstream refreshes")
        .init();

    let state = Arc::new(AppState {
        registry,
        provider,
        requests_total,
        fetch_success_total,
        fetch_failure_total,
        sensors,
    });

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/current", get(current))
        .route("/api/v1/sensors", get(sensors_list))
        .route("/api/v1/device", get(device))
        .with_state(Arc::clone(&state));

    (router, state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.requests_total.add(1, &[]);
    StatusCode::OK
}

/// Ready once the first snapshot has been published.
async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.sensors.is_primed().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

async fn current(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);
    if let Some(snapshot) = state.sensors.latest().await {
        return (StatusCode::OK, Json(snapshot)).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn sensors_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);
    if let Some(snapshot) = state.sensors.latest().await {
        return (StatusCode::OK, Json(snapshot.entries())).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn device() -> Json<DeviceInfo> {
    Json(DeviceInfo::default())
}
