//! Core data types for UV index observations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single UV index observation.
///
/// `uvi` is non-negative: the fetch layer drops upstream entries without a
/// usable value before samples are built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Observation timestamp (UTC, as reported upstream)
    pub time: DateTime<Utc>,

    /// UV index value
    pub uvi: f64,
}

impl Sample {
    pub fn new(time: DateTime<Utc>, uvi: f64) -> Self {
        Self { time, uvi }
    }
}

/// Normalized fetch result: the instantaneous reading plus the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvReport {
    /// When the report was fetched
    pub fetched_at: DateTime<Utc>,

    /// Current UV index, absent when the upstream payload carried none
    pub current: Option<Sample>,

    /// Forecast samples, typically spanning several days
    pub forecast: Vec<Sample>,
}

/// Samples for one UTC calendar day, ascending by timestamp.
///
/// Values are built through [`DaySeries::select`], which filters and sorts,
/// so a `DaySeries` always holds samples of a single date in ascending
/// order. Day boundaries are UTC because the upstream API reports UTC
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySeries {
    date: NaiveDate,
    samples: Vec<Sample>,
}

impl DaySeries {
    /// Select the samples falling on the given UTC calendar day.
    pub fn select(samples: &[Sample], date: NaiveDate) -> Self {
        let mut picked: Vec<Sample> = samples
            .iter()
            .filter(|s| s.time.date_naive() == date)
            .copied()
            .collect();
        picked.sort_by_key(|s| s.time);

        Self {
            date,
            samples: picked,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// A value paired with the timestamp it occurs at.
///
/// Timestamps are always drawn from the input series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub uvi: f64,
    pub at: DateTime<Utc>,
}

/// Daily extrema for one day series.
///
/// The maximum is always present for a non-empty series; the minimum is
/// absent only when the day has no positive sample and the zero-day policy
/// is `Unavailable`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayExtrema {
    pub max: Extremum,
    pub min: Option<Extremum>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(day: u32, hour: u32, uvi: f64) -> Sample {
        Sample::new(Utc.with_ymd_and_hms(2025, 8, day, hour, 0, 0).unwrap(), uvi)
    }

    #[test]
    fn select_filters_other_days() {
        let samples = vec![
            sample(26, 6, 1.0),
            sample(27, 6, 2.0),
            sample(26, 12, 5.0),
            sample(28, 12, 7.0),
        ];
        let date = NaiveDate::from_ymd_opt(2025, 8, 26).unwrap();

        let series = DaySeries::select(&samples, date);

        assert_eq!(series.date(), date);
        assert_eq!(series.len(), 2);
        assert!(series.samples().iter().all(|s| s.time.date_naive() == date));
    }

    #[test]
    fn select_sorts_out_of_order_input() {
        let samples = vec![sample(26, 18, 0.3), sample(26, 6, 0.5), sample(26, 12, 6.2)];
        let date = NaiveDate::from_ymd_opt(2025, 8, 26).unwrap();

        let series = DaySeries::select(&samples, date);

        let hours: Vec<u32> = series
            .samples()
            .iter()
            .map(|s| chrono::Timelike::hour(&s.time))
            .collect();
        assert_eq!(hours, vec![6, 12, 18]);
    }

    #[test]
    fn select_on_empty_input_is_empty() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 26).unwrap();
        let series = DaySeries::select(&[], date);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }

    #[test]
    fn sample_deserializes_from_api_shape() {
        let json = r#"{"time":"2025-08-26T07:00:00Z","uvi":3.4}"#;
        let s: Sample = serde_json::from_str(json).unwrap();

        assert_eq!(s.uvi, 3.4);
        assert_eq!(s.time, Utc.with_ymd_and_hms(2025, 8, 26, 7, 0, 0).unwrap());
    }
}
