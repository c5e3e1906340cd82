//! In-memory registry holding the latest published snapshot

use crate::{SensorSnapshot, StateSink};
use tokio::sync::RwLock;

/// Holds the most recent snapshot for the HTTP read surface.
///
/// Doubles as a [`StateSink`], so the scheduler publishes to it the same
/// way it publishes to any other destination.
#[derive(Default)]
pub struct SensorRegistry {
    latest: RwLock<Option<SensorSnapshot>>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest published snapshot, if any refresh has succeeded yet.
    pub async fn latest(&self) -> Option<SensorSnapshot> {
        self.latest.read().await.clone()
    }

    /// True once at least one snapshot has been published.
    pub async fn is_primed(&self) -> bool {
        self.latest.read().await.is_some()
    }
}

#[async_trait::async_trait]
impl StateSink for SensorRegistry {
    async fn publish(&self, snapshot: &SensorSnapshot) -> anyhow::Result<()> {
        *self.latest.write().await = Some(snapshot.clone());
        Ok(())
    }
}

/// Sink that reports each refresh through `tracing`.
pub struct TracingSink;

#[async_trait::async_trait]
impl StateSink for TracingSink {
    async fn publish(&self, snapshot: &SensorSnapshot) -> anyhow::Result<()> {
        tracing::info!(
            updated_at = %snapshot.updated_at,
            current = ?snapshot.current.state,
            today_max = ?snapshot.today_max.state,
            today_min = ?snapshot.today_min.state,
            tomorrow_max = ?snapshot.tomorrow_max.state,
            tomorrow_min = ?snapshot.tomorrow_min.state,
            "Sensor states updated"
        );
        Ok(())
    }
}
