//! uvid - UV index polling daemon
//!
//! This binary coordinates:
//! - Periodic fetches from the currentuvindex.com API (or a simulator)
//! - Derivation of the five sensor states from each report
//! - The HTTP read surface with health and metrics endpoints

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use uvi_client::{SimulatedProvider, UvApiClient};
use uvi_config::{AppConfig, ProviderKind};
use uvi_core::{UvProvider, ZeroDayPolicy};
use uvi_daemon::scheduler::PollScheduler;
use uvi_sensors::{SensorRegistry, StateSink, TracingSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Observability
    uvi_obs::init("uvid");

    // Config
    let cfg = AppConfig::load().context("Failed to load configuration")?;
    let location = cfg.location().context("Station location is required")?;
    let policy: ZeroDayPolicy = cfg.zero_day().parse()?;

    let provider: Box<dyn UvProvider> = match cfg.provider()? {
        ProviderKind::Http => Box::new(UvApiClient::new(
            cfg.base_url(),
            location.latitude,
            location.longitude,
            cfg.fetch_timeout(),
        )?),
        ProviderKind::Simulated => Box::new(SimulatedProvider::default()),
    };
    info!(
        provider = provider.name(),
        latitude = location.latitude,
        longitude = location.longitude,
        "Configured UV provider"
    );

    // Build app and state
    let sensors = Arc::new(SensorRegistry::new());
    let (app, state) = uvi_daemon::build_app(Arc::clone(&sensors));

    let sinks: Vec<Arc<dyn StateSink>> = vec![sensors, Arc::new(TracingSink)];
    let scheduler = PollScheduler::new(
        provider,
        sinks,
        cfg.update_interval(),
        policy,
        state.fetch_metrics(),
    );

    // Prime the sensors before serving; a failure here is retried on the
    // normal cadence and readiness stays false until data arrives.
    if let Err(e) = scheduler.refresh_once().await {
        tracing::warn!(error = ?e, "Initial refresh failed; will retry on the poll interval");
    }

    // Start HTTP server
    let bind = cfg.http_bind();
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid HTTP bind address '{}'", bind))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "HTTP server listening");

    // Run until shutdown signal
    tokio::select! {
        _ = scheduler.run() => {}
        result = axum::serve(listener, app).into_future() => {
            result.context("HTTP server error")?;
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("uvid stopped");
    Ok(())
}

/// Graceful shutdown on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "Failed to install signal handler");
    }
}
