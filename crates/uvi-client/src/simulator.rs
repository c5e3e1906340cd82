//! Simulated UV provider for testing and offline development

use chrono::{DateTime, DurationRound, TimeDelta, Timelike, Utc};
use std::f64::consts::PI;
use uvi_core::{Sample, UvProvider, UvReport};

/// Synthetic provider producing a plausible diurnal UV curve.
///
/// Lets the daemon run end to end without upstream connectivity.
pub struct SimulatedProvider {
    peak_uvi: f64,
}

impl SimulatedProvider {
    /// Create a simulator whose midday maximum is `peak_uvi`.
    pub fn new(peak_uvi: f64) -> Self {
        Self { peak_uvi }
    }

    /// Build a report as of `now`: hourly samples for today and tomorrow,
    /// following a sine curve between 06:00 and 18:00 UTC, zero at night.
    pub fn generate_report(&self, now: DateTime<Utc>) -> UvReport {
        let midnight = now.duration_trunc(TimeDelta::days(1)).unwrap();

        let mut forecast = Vec::with_capacity(48);
        for hour in 0..48 {
            let time = midnight + TimeDelta::hours(hour);
            forecast.push(Sample::new(time, self.uvi_at(time)));
        }

        let current = forecast
            .iter()
            .copied()
            .take_while(|s| s.time <= now)
            .last();

        UvReport {
            fetched_at: now,
            current,
            forecast,
        }
    }

    fn uvi_at(&self, time: DateTime<Utc>) -> f64 {
        let hour = time.hour();
        if !(6..=18).contains(&hour) {
            return 0.0;
        }
        let value = self.peak_uvi * (PI * (hour as f64 - 6.0) / 12.0).sin();
        (value * 10.0).round() / 10.0
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new(6.2)
    }
}

#[async_trait::async_trait]
impl UvProvider for SimulatedProvider {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn fetch_report(&self) -> anyhow::Result<UvReport> {
        Ok(self.generate_report(Utc::now()))
    }
}
