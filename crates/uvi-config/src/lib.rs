use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default upstream API for UV index data.
pub const DEFAULT_BASE_URL: &str = "https://currentuvindex.com";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PollConfig {
    pub interval_minutes: Option<u64>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolicyConfig {
    pub zero_day: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub location: Option<LocationConfig>,
    pub poll: Option<PollConfig>,
    pub api: Option<ApiConfig>,
    pub http: Option<HttpConfig>,
    pub policy: Option<PolicyConfig>,
}

/// Validated station coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Which UV provider the daemon runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Http,
    Simulated,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("station location is not configured")]
    MissingLocation,
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load configuration from the UVI_CONFIG path (TOML) if present, then
    /// apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("UVI_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = Self::load_from(Path::new(&path))?;
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(lat) = parse_env_f64("UVI_LATITUDE")? {
            self.location.get_or_insert_with(Default::default).latitude = Some(lat);
        }
        if let Some(lon) = parse_env_f64("UVI_LONGITUDE")? {
            self.location.get_or_insert_with(Default::default).longitude = Some(lon);
        }
        if let Some(minutes) = parse_env_u64("UVI_UPDATE_INTERVAL")? {
            self.poll.get_or_insert_with(Default::default).interval_minutes = Some(minutes);
        }
        if let Ok(bind) = env::var("UVI_HTTP_BIND") {
            self.http.get_or_insert_with(Default::default).bind = Some(bind);
        }
        Ok(())
    }

    /// Station coordinates; required, validated to sane ranges.
    pub fn location(&self) -> Result<Location, ConfigError> {
        let loc = self.location.as_ref().ok_or(ConfigError::MissingLocation)?;
        let (latitude, longitude) = match (loc.latitude, loc.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Err(ConfigError::MissingLocation),
        };
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::Invalid(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ConfigError::Invalid(format!(
                "longitude {} out of range [-180, 180]",
                longitude
            )));
        }
        Ok(Location {
            latitude,
            longitude,
        })
    }

    /// Poll interval (default 30 minutes)
    pub fn update_interval(&self) -> Duration {
        let minutes = self
            .poll
            .as_ref()
            .and_then(|p| p.interval_minutes)
            .unwrap_or(30);
        Duration::from_secs(minutes.saturating_mul(60))
    }

    /// Upstream request timeout (default 10 seconds)
    pub fn fetch_timeout(&self) -> Duration {
        let secs = self.poll.as_ref().and_then(|p| p.timeout_secs).unwrap_or(10);
        Duration::from_secs(secs)
    }

    /// Upstream API base URL
    pub fn base_url(&self) -> String {
        self.api
            .as_ref()
            .and_then(|a| a.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Provider selection: "http" (default) or "simulated"
    pub fn provider(&self) -> Result<ProviderKind, ConfigError> {
        let name = self
            .api
            .as_ref()
            .and_then(|a| a.provider.clone())
            .unwrap_or_else(|| "http".to_string());
        match name.as_str() {
            "http" => Ok(ProviderKind::Http),
            "simulated" => Ok(ProviderKind::Simulated),
            other => Err(ConfigError::Invalid(format!(
                "unknown provider '{}', expected 'http' or 'simulated'",
                other
            ))),
        }
    }

    /// HTTP bind address (default 0.0.0.0:8080)
    pub fn http_bind(&self) -> String {
        self.http
            .as_ref()
            .and_then(|h| h.bind.clone())
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
    }

    /// Zero-day policy name (default "report-zero"); parsed by the caller
    pub fn zero_day(&self) -> String {
        self.policy
            .as_ref()
            .and_then(|p| p.zero_day.clone())
            .unwrap_or_else(|| "report-zero".to_string())
    }
}

fn parse_env_f64(name: &str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse::<f64>().map(Some).map_err(|_| {
            ConfigError::Invalid(format!("{} must be a number, got '{}'", name, raw))
        }),
        Err(_) => Ok(None),
    }
}

fn parse_env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse::<u64>().map(Some).map_err(|_| {
            ConfigError::Invalid(format!("{} must be an integer, got '{}'", name, raw))
        }),
        Err(_) => Ok(None),
    }
}
