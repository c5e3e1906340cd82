//! Sensor model for the UV index daemon
//!
//! Five sensors are exposed: the current UV index plus today's and
//! tomorrow's forecast extremes. Every refresh rebuilds a snapshot of
//! all five and pushes it to the configured sinks.

pub mod kind;
pub mod registry;
pub mod snapshot;

pub use kind::*;
pub use registry::*;
pub use snapshot::*;

/// Destination for freshly built sensor snapshots.
#[async_trait::async_trait]
pub trait StateSink: Send + Sync {
    async fn publish(&self, snapshot: &SensorSnapshot) -> anyhow::Result<()>;
}
