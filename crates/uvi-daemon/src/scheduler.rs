//! Upstream polling and snapshot publication

use anyhow::{Context, Result};
use chrono::Utc;
use opentelemetry::metrics::Counter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uvi_core::{UvProvider, ZeroDayPolicy};
use uvi_sensors::{build_snapshot, StateSink};

/// Refresh counters shared with the HTTP metrics surface.
#[derive(Clone)]
pub struct FetchMetrics {
    success: Counter<u64>,
    failure: Counter<u64>,
}

impl FetchMetrics {
    pub fn new(success: Counter<u64>, failure: Counter<u64>) -> Self {
        Self { success, failure }
    }
}

/// Polls the provider on an interval and fans snapshots out to sinks.
pub struct PollScheduler {
    provider: Box<dyn UvProvider>,
    sinks: Vec<Arc<dyn StateSink>>,
    interval: Duration,
    policy: ZeroDayPolicy,
    metrics: FetchMetrics,
}

impl PollScheduler {
    pub fn new(
        provider: Box<dyn UvProvider>,
        sinks: Vec<Arc<dyn StateSink>>,
        interval: Duration,
        policy: ZeroDayPolicy,
        metrics: FetchMetrics,
    ) -> Self {
        Self {
            provider,
            sinks,
            interval,
            policy,
            metrics,
        }
    }

    /// Fetch once, rebuild the snapshot, and publish it to every sink.
    pub async fn refresh_once(&self) -> Result<()> {
        match self.try_refresh().await {
            Ok(()) => {
                self.metrics.success.add(1, &[]);
                Ok(())
            }
            Err(e) => {
                self.metrics.failure.add(1, &[]);
                Err(e)
            }
        }
    }

    async fn try_refresh(&self) -> Result<()> {
        let report = self.provider.fetch_report().await.with_context(|| {
            format!("Failed to fetch from provider '{}'", self.provider.name())
        })?;

        let snapshot = build_snapshot(&report, Utc::now(), self.policy);
        info!(
            samples = report.forecast.len(),
            current = ?snapshot.current.state,
            "Refreshed UV data"
        );

        for sink in &self.sinks {
            if let Err(e) = sink.publish(&snapshot).await {
                warn!(error = ?e, "Sink publish failed");
            }
        }

        Ok(())
    }

    /// Poll forever at the configured interval, starting one interval
    /// after the caller's initial [`refresh_once`](Self::refresh_once).
    /// A failed refresh keeps the last published snapshot and the loop
    /// running.
    pub async fn run(&self) {
        info!(
            provider = self.provider.name(),
            interval_secs = self.interval.as_secs(),
            "Poll scheduler started"
        );

        loop {
            tokio::time::sleep(self.interval).await;
            if let Err(e) = self.refresh_once().await {
                warn!(error = ?e, "Refresh failed; keeping last snapshot");
            }
        }
    }
}
