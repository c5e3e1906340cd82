use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt;
use uvi_client::SimulatedProvider;
use uvi_core::{UvProvider, UvReport, ZeroDayPolicy};
use uvi_daemon::scheduler::PollScheduler;
use uvi_sensors::{SensorRegistry, StateSink, TracingSink};

struct FailingProvider;

#[async_trait::async_trait]
impl UvProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch_report(&self) -> anyhow::Result<UvReport> {
        anyhow::bail!("upstream unavailable")
    }
}

#[tokio::test]
async fn refresh_primes_the_read_surface() {
    let sensors = Arc::new(SensorRegistry::new());
    let (app, state) = uvi_daemon::build_app(Arc::clone(&sensors));

    let sinks: Vec<Arc<dyn StateSink>> =
        vec![Arc::clone(&sensors) as Arc<dyn StateSink>, Arc::new(TracingSink)];
    let scheduler = PollScheduler::new(
        Box::new(SimulatedProvider::default()),
        sinks,
        Duration::from_secs(1800),
        ZeroDayPolicy::ReportZero,
        state.fetch_metrics(),
    );

    assert!(!sensors.is_primed().await);
    scheduler.refresh_once().await.unwrap();
    assert!(sensors.is_primed().await);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/current")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // the refresh shows up on the metrics surface
    let res = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("uvid_fetch_success_total"));
}

#[tokio::test]
async fn failed_refresh_keeps_the_last_snapshot() {
    let sensors = Arc::new(SensorRegistry::new());
    let (app, state) = uvi_daemon::build_app(Arc::clone(&sensors));

    let sinks: Vec<Arc<dyn StateSink>> = vec![Arc::clone(&sensors) as Arc<dyn StateSink>];
    let good = PollScheduler::new(
        Box::new(SimulatedProvider::default()),
        sinks,
        Duration::from_secs(1800),
        ZeroDayPolicy::ReportZero,
        state.fetch_metrics(),
    );
    good.refresh_once().await.unwrap();
    let before = sensors.latest().await.unwrap();

    let sinks: Vec<Arc<dyn StateSink>> = vec![Arc::clone(&sensors) as Arc<dyn StateSink>];
    let bad = PollScheduler::new(
        Box::new(FailingProvider),
        sinks,
        Duration::from_secs(1800),
        ZeroDayPolicy::ReportZero,
        state.fetch_metrics(),
    );
    assert!(bad.refresh_once().await.is_err());
    assert_eq!(sensors.latest().await.unwrap(), before);

    // the failure shows up on the metrics surface
    let res = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("uvid_fetch_failure_total"));
}
