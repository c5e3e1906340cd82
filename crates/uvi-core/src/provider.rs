//! Provider seam between the fetch layer and the rest of the daemon

use crate::types::UvReport;

/// Source of UV reports.
///
/// Implemented by the HTTP client against the public API and by the
/// simulated provider used in tests and demos.
#[async_trait::async_trait]
pub trait UvProvider: Send + Sync {
    /// Provider name/identifier
    fn name(&self) -> &str;

    /// Fetch a fresh report from the upstream source
    async fn fetch_report(&self) -> anyhow::Result<UvReport>;
}
