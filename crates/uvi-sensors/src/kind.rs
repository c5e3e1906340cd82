//! Sensor identity and presentation metadata

use serde::Serialize;

/// The five sensors the daemon exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Current,
    TodayMax,
    TodayMin,
    TomorrowMax,
    TomorrowMin,
}

impl SensorKind {
    /// All sensors, in presentation order.
    pub const ALL: [SensorKind; 5] = [
        SensorKind::Current,
        SensorKind::TodayMax,
        SensorKind::TodayMin,
        SensorKind::TomorrowMax,
        SensorKind::TomorrowMin,
    ];

    /// Stable id used in API payloads and entity unique ids.
    pub fn unique_id(&self) -> &'static str {
        match self {
            SensorKind::Current => "current",
            SensorKind::TodayMax => "today_max",
            SensorKind::TodayMin => "today_min",
            SensorKind::TomorrowMax => "tomorrow_max",
            SensorKind::TomorrowMin => "tomorrow_min",
        }
    }

    /// Human readable sensor name.
    pub fn name(&self) -> &'static str {
        match self {
            SensorKind::Current => "Current UV Index",
            SensorKind::TodayMax => "Today Max UV Index",
            SensorKind::TodayMin => "Today Min UV Index",
            SensorKind::TomorrowMax => "Tomorrow Max UV Index",
            SensorKind::TomorrowMin => "Tomorrow Min UV Index",
        }
    }

    /// Material Design icon for dashboards.
    pub fn icon(&self) -> &'static str {
        match self {
            SensorKind::Current => "mdi:white-balance-sunny",
            SensorKind::TodayMax | SensorKind::TomorrowMax => "mdi:weather-sunset-up",
            SensorKind::TodayMin | SensorKind::TomorrowMin => "mdi:weather-sunset-down",
        }
    }
}

/// Metadata for the logical device all five sensors belong to.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub name: &'static str,
    pub manufacturer: &'static str,
    pub model: &'static str,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            name: "Current UV Index",
            manufacturer: "CurrentUVIndex.com",
            model: "UV Index API",
        }
    }
}
