//! Snapshot assembly from a fetched UV report

use crate::SensorKind;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uvi_core::{compute_extrema, DaySeries, Extremum, UvReport, ZeroDayPolicy};

/// State of a single sensor at one refresh.
///
/// `state: None` marks the sensor unavailable. Extremum sensors carry
/// the timestamp the value occurs at; the current sensor does not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub state: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl SensorReading {
    pub fn unavailable() -> Self {
        Self {
            state: None,
            time: None,
        }
    }

    pub fn measurement(value: f64) -> Self {
        Self {
            state: Some(value),
            time: None,
        }
    }

    pub fn extremum(extremum: Extremum) -> Self {
        Self {
            state: Some(extremum.uvi),
            time: Some(extremum.at),
        }
    }

    pub fn is_available(&self) -> bool {
        self.state.is_some()
    }
}

/// All five sensor states produced by one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub updated_at: DateTime<Utc>,
    pub current: SensorReading,
    pub today_max: SensorReading,
    pub today_min: SensorReading,
    pub tomorrow_max: SensorReading,
    pub tomorrow_min: SensorReading,
}

impl SensorSnapshot {
    pub fn reading(&self, kind: SensorKind) -> &SensorReading {
        match kind {
            SensorKind::Current => &self.current,
            SensorKind::TodayMax => &self.today_max,
            SensorKind::TodayMin => &self.today_min,
            SensorKind::TomorrowMax => &self.tomorrow_max,
            SensorKind::TomorrowMin => &self.tomorrow_min,
        }
    }

    /// All sensors with their presentation metadata, in stable order.
    pub fn entries(&self) -> Vec<SensorEntry> {
        SensorKind::ALL
            .iter()
            .map(|kind| {
                let reading = self.reading(*kind);
                SensorEntry {
                    id: kind.unique_id(),
                    name: kind.name(),
                    icon: kind.icon(),
                    state: reading.state,
                    time: reading.time,
                }
            })
            .collect()
    }
}

/// One sensor joined with its metadata, as served over the API.
#[derive(Debug, Clone, Serialize)]
pub struct SensorEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub state: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// Build the sensor snapshot for a report, with "today" and "tomorrow"
/// resolved against `now` in UTC.
pub fn build_snapshot(
    report: &UvReport,
    now: DateTime<Utc>,
    policy: ZeroDayPolicy,
) -> SensorSnapshot {
    let today = now.date_naive();
    let tomorrow = (now + TimeDelta::days(1)).date_naive();

    let today_series = DaySeries::select(&report.forecast, today);
    let tomorrow_series = DaySeries::select(&report.forecast, tomorrow);

    let (today_max, today_min) = day_readings(&today_series, policy);
    let (tomorrow_max, tomorrow_min) = day_readings(&tomorrow_series, policy);

    let current = report
        .current
        .map(|sample| SensorReading::measurement(sample.uvi))
        .unwrap_or_else(SensorReading::unavailable);

    SensorSnapshot {
        updated_at: report.fetched_at,
        current,
        today_max,
        today_min,
        tomorrow_max,
        tomorrow_min,
    }
}

/// A day with no forecast samples yields unavailable readings; an
/// all-zero day leaves the minimum unset only under the `Unavailable`
/// policy.
fn day_readings(series: &DaySeries, policy: ZeroDayPolicy) -> (SensorReading, SensorReading) {
    match compute_extrema(series, policy) {
        Ok(extrema) => {
            let max = SensorReading::extremum(extrema.max);
            let min = extrema
                .min
                .map(SensorReading::extremum)
                .unwrap_or_else(SensorReading::unavailable);
            (max, min)
        }
        Err(_) => (SensorReading::unavailable(), SensorReading::unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uvi_core::Sample;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, day, hour, minute, 0).unwrap()
    }

    fn report_for_clear_day() -> UvReport {
        UvReport {
            fetched_at: at(26, 12, 5),
            current: Some(Sample::new(at(26, 12, 0), 4.6)),
            forecast: vec![
                Sample::new(at(26, 0, 0), 0.0),
                Sample::new(at(26, 6, 0), 0.5),
                Sample::new(at(26, 12, 0), 6.2),
                Sample::new(at(26, 18, 0), 0.3),
                Sample::new(at(26, 23, 0), 0.0),
                Sample::new(at(27, 9, 0), 1.5),
                Sample::new(at(27, 13, 0), 5.8),
            ],
        }
    }

    #[test]
    fn snapshot_resolves_both_days() {
        let report = report_for_clear_day();
        let snapshot = build_snapshot(&report, at(26, 12, 5), ZeroDayPolicy::ReportZero);

        assert_eq!(snapshot.updated_at, report.fetched_at);
        assert_eq!(snapshot.current.state, Some(4.6));
        assert_eq!(snapshot.current.time, None);

        assert_eq!(snapshot.today_max.state, Some(6.2));
        assert_eq!(snapshot.today_max.time, Some(at(26, 12, 0)));
        assert_eq!(snapshot.today_min.state, Some(0.3));
        assert_eq!(snapshot.today_min.time, Some(at(26, 18, 0)));

        assert_eq!(snapshot.tomorrow_max.state, Some(5.8));
        assert_eq!(snapshot.tomorrow_max.time, Some(at(27, 13, 0)));
        assert_eq!(snapshot.tomorrow_min.state, Some(1.5));
        assert_eq!(snapshot.tomorrow_min.time, Some(at(27, 9, 0)));
    }

    #[test]
    fn missing_forecast_day_is_unavailable() {
        let mut report = report_for_clear_day();
        report.forecast.retain(|s| s.time.date_naive() == at(26, 0, 0).date_naive());

        let snapshot = build_snapshot(&report, at(26, 12, 5), ZeroDayPolicy::ReportZero);

        assert!(!snapshot.tomorrow_max.is_available());
        assert!(!snapshot.tomorrow_min.is_available());
        assert!(snapshot.today_max.is_available());
    }

    #[test]
    fn missing_current_sample_is_unavailable() {
        let mut report = report_for_clear_day();
        report.current = None;

        let snapshot = build_snapshot(&report, at(26, 12, 5), ZeroDayPolicy::ReportZero);

        assert!(!snapshot.current.is_available());
        assert!(snapshot.today_max.is_available());
    }

    #[test]
    fn polar_night_day_reports_zero_by_default() {
        let report = UvReport {
            fetched_at: at(26, 12, 0),
            current: Some(Sample::new(at(26, 12, 0), 0.0)),
            forecast: vec![
                Sample::new(at(26, 8, 0), 0.0),
                Sample::new(at(26, 14, 0), 0.0),
            ],
        };

        let snapshot = build_snapshot(&report, at(26, 12, 0), ZeroDayPolicy::ReportZero);

        assert_eq!(snapshot.today_max.state, Some(0.0));
        assert_eq!(snapshot.today_max.time, Some(at(26, 8, 0)));
        assert_eq!(snapshot.today_min.state, Some(0.0));
        assert_eq!(snapshot.today_min.time, Some(at(26, 8, 0)));
    }

    #[test]
    fn polar_night_minimum_can_be_left_unavailable() {
        let report = UvReport {
            fetched_at: at(26, 12, 0),
            current: None,
            forecast: vec![
                Sample::new(at(26, 8, 0), 0.0),
                Sample::new(at(26, 14, 0), 0.0),
            ],
        };

        let snapshot = build_snapshot(&report, at(26, 12, 0), ZeroDayPolicy::Unavailable);

        assert_eq!(snapshot.today_max.state, Some(0.0));
        assert!(!snapshot.today_min.is_available());
    }

    #[test]
    fn entries_carry_metadata_in_stable_order() {
        let report = report_for_clear_day();
        let snapshot = build_snapshot(&report, at(26, 12, 5), ZeroDayPolicy::ReportZero);

        let entries = snapshot.entries();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].id, "current");
        assert_eq!(entries[0].name, "Current UV Index");
        assert_eq!(entries[0].icon, "mdi:white-balance-sunny");
        assert_eq!(entries[0].state, Some(4.6));
        assert_eq!(entries[1].id, "today_max");
        assert_eq!(entries[1].time, Some(at(26, 12, 0)));
        assert_eq!(entries[4].id, "tomorrow_min");
    }

    #[test]
    fn unavailable_reading_serializes_without_time() {
        let reading = SensorReading::unavailable();
        let json = serde_json::to_string(&reading).unwrap();
        assert_eq!(json, r#"{"state":null}"#);
    }
}
