//! Daily extrema extraction with the night-zero exclusion rule

use thiserror::Error;

use crate::types::{DayExtrema, DaySeries, Extremum};

/// How to report the daily minimum when the day has no positive sample
/// (polar night, or an outage where every reading is zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroDayPolicy {
    /// Report 0 at the first timestamp where the value is 0
    #[default]
    ReportZero,

    /// Report no minimum; the min sensor reads unavailable
    Unavailable,
}

impl std::str::FromStr for ZeroDayPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report-zero" => Ok(ZeroDayPolicy::ReportZero),
            "unavailable" => Ok(ZeroDayPolicy::Unavailable),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Unrecognized policy name in configuration.
#[derive(Debug, Error)]
#[error("unknown zero-day policy '{0}', expected 'report-zero' or 'unavailable'")]
pub struct ParsePolicyError(String);

#[derive(Debug, Error)]
pub enum ExtremaError {
    #[error("cannot compute extrema over an empty day series")]
    EmptySeries,
}

/// Compute the UV extrema for one day of samples.
///
/// The maximum is the sample with the greatest value. The minimum is the
/// smallest strictly positive value, so nighttime zeros do not dominate
/// it; a day without any positive sample falls back according to `policy`.
/// Ties are broken by the earliest timestamp in both directions.
///
/// Pure function: no side effects, identical results on repeated calls.
pub fn compute_extrema(
    series: &DaySeries,
    policy: ZeroDayPolicy,
) -> Result<DayExtrema, ExtremaError> {
    let samples = series.samples();
    let first = samples.first().ok_or(ExtremaError::EmptySeries)?;

    let mut max = Extremum {
        uvi: first.uvi,
        at: first.time,
    };
    for s in &samples[1..] {
        // Strict comparison over the ascending series keeps the earliest
        // timestamp on ties.
        if s.uvi > max.uvi {
            max = Extremum {
                uvi: s.uvi,
                at: s.time,
            };
        }
    }

    let mut min: Option<Extremum> = None;
    for s in samples.iter().filter(|s| s.uvi > 0.0) {
        if min.map_or(true, |m| s.uvi < m.uvi) {
            min = Some(Extremum {
                uvi: s.uvi,
                at: s.time,
            });
        }
    }

    if min.is_none() {
        min = match policy {
            ZeroDayPolicy::ReportZero => {
                let at = samples
                    .iter()
                    .find(|s| s.uvi == 0.0)
                    .map(|s| s.time)
                    .unwrap_or(first.time);
                Some(Extremum { uvi: 0.0, at })
            }
            ZeroDayPolicy::Unavailable => None,
        };
    }

    Ok(DayExtrema { max, min })
}
