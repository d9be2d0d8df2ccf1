//! Snapshot store shared between the refresh loop and the API handlers

use chrono::{DateTime, Utc};
use energy_lib::models::{Alert, EnergyReading, Machine, Recommendation};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One fetched view of the data source's collections. Immutable once
/// stored; the refresh loop replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub readings: Vec<EnergyReading>,
    pub machines: Vec<Machine>,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Age of the snapshot, in seconds. Zero before the first fetch.
    pub fn age_secs(&self, now: DateTime<Utc>) -> f64 {
        self.fetched_at
            .map(|t| (now - t).num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

/// Shared holder of the latest snapshot.
///
/// Readers get a cheap clone of the current snapshot; before the first
/// successful refresh they see an empty one, which the pure aggregation
/// functions turn into all-zero views.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot.
    pub async fn replace(&self, snapshot: Snapshot) {
        *self.inner.write().await = Arc::new(snapshot);
    }

    /// Get the current snapshot.
    pub async fn current(&self) -> Arc<Snapshot> {
        self.inner.read().await.clone()
    }
}
