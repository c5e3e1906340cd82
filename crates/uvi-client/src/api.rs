//! HTTP client for the currentuvindex.com forecast API

use crate::models::UvResponse;
use crate::{ClientError, ClientResult};
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use uvi_core::{UvProvider, UvReport};

/// Client for the currentuvindex.com UV index API.
///
/// Holds a pooled `reqwest` client with a request timeout; one instance
/// serves the whole daemon lifetime.
pub struct UvApiClient {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

impl UvApiClient {
    /// Build a client for the given station coordinates.
    pub fn new(
        base_url: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            latitude,
            longitude,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/v1/uvi?latitude={}&longitude={}",
            self.base_url.trim_end_matches('/'),
            self.latitude,
            self.longitude
        )
    }

    /// Fetch the current value plus forecast from the upstream API.
    pub async fn fetch(&self) -> ClientResult<UvReport> {
        let url = self.endpoint();
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.text().await?;
        let decoded: UvResponse = serde_json::from_str(&body)?;
        let report = decoded.into_report(Utc::now());

        tracing::debug!(
            samples = report.forecast.len(),
            has_current = report.current.is_some(),
            "Fetched UV report"
        );
        Ok(report)
    }
}

#[async_trait::async_trait]
impl UvProvider for UvApiClient {
    fn name(&self) -> &str {
        "currentuvindex"
    }

    async fn fetch_report(&self) -> anyhow::Result<UvReport> {
        Ok(self.fetch().await?)
    }
}
