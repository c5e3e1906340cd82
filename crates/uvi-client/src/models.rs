//! Wire types for the currentuvindex.com API
//!
//! Only the fields the daemon consumes are modeled; anything else in the
//! payload is ignored on decode.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uvi_core::{Sample, UvReport};

/// Top-level API payload.
#[derive(Debug, Deserialize)]
pub struct UvResponse {
    #[serde(default)]
    pub now: Option<UvPoint>,
    #[serde(default)]
    pub forecast: Vec<UvPoint>,
}

/// A single timestamped UV index value.
#[derive(Debug, Deserialize)]
pub struct UvPoint {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub uvi: Option<f64>,
}

impl UvPoint {
    fn into_sample(self) -> Option<Sample> {
        match self.uvi {
            Some(uvi) if uvi >= 0.0 => Some(Sample::new(self.time, uvi)),
            _ => None,
        }
    }
}

impl UvResponse {
    /// Convert the wire payload into a [`UvReport`], dropping entries
    /// without a usable UV value.
    pub fn into_report(self, fetched_at: DateTime<Utc>) -> UvReport {
        let current = self.now.and_then(UvPoint::into_sample);
        let forecast = self
            .forecast
            .into_iter()
            .filter_map(UvPoint::into_sample)
            .collect();

        UvReport {
            fetched_at,
            current,
            forecast,
        }
    }
}
