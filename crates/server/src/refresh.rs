//! Snapshot refresh loop
//!
//! Periodically re-fetches the source collections on a fixed interval.
//! Each cycle is independent and idempotent; on failure the previous
//! snapshot stays in service and the source component is marked degraded.

use crate::source::DataSource;
use crate::state::SnapshotStore;
use energy_lib::health::{components, HealthRegistry};
use energy_lib::observability::{DashboardMetrics, StructuredLogger};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant};
use tracing::info;

/// Configuration for the refresh loop.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
        }
    }
}

/// Periodic snapshot refresher.
pub struct RefreshLoop {
    source: Arc<dyn DataSource>,
    store: SnapshotStore,
    health: HealthRegistry,
    metrics: DashboardMetrics,
    logger: StructuredLogger,
    config: RefreshConfig,
}

impl RefreshLoop {
    pub fn new(
        source: Arc<dyn DataSource>,
        store: SnapshotStore,
        health: HealthRegistry,
        metrics: DashboardMetrics,
        logger: StructuredLogger,
        config: RefreshConfig,
    ) -> Self {
        Self {
            source,
            store,
            health,
            metrics,
            logger,
            config,
        }
    }

    /// Run until the shutdown channel fires. The first refresh happens on
    /// the first tick, which `tokio::time::interval` fires immediately.
    pub async fn run(self, mut shutdown: tokio::sync::broadcast::Receiver<()>) {
        info!(
            interval_secs = self.config.interval.as_secs(),
            "Starting snapshot refresh loop"
        );
        let mut ticker = interval(self.config.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once().await;
                }
                _ = shutdown.recv() => {
                    info!("Shutting down snapshot refresh loop");
                    break;
                }
            }
        }
    }

    /// One refresh cycle: fetch, store, report.
    pub async fn refresh_once(&self) {
        let start = Instant::now();

        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                let elapsed = start.elapsed();
                self.metrics.observe_refresh_latency(elapsed.as_secs_f64());
                self.metrics.set_snapshot_sizes(
                    snapshot.readings.len() as i64,
                    snapshot.machines.len() as i64,
                    snapshot.alerts.len() as i64,
                    snapshot.recommendations.len() as i64,
                );
                self.metrics.set_snapshot_age(0.0);
                self.logger.log_refresh(
                    snapshot.readings.len(),
                    snapshot.machines.len(),
                    snapshot.alerts.len(),
                    snapshot.recommendations.len(),
                    elapsed.as_millis(),
                );
                self.store.replace(snapshot).await;
                self.health.set_healthy(components::SOURCE).await;
                self.health.set_ready(true).await;
            }
            Err(e) => {
                self.metrics.inc_refresh_errors();
                let previous = self.store.current().await;
                let has_previous = previous.fetched_at.is_some();
                self.logger.log_refresh_failed(&e.to_string(), has_previous);

                if has_previous {
                    self.metrics
                        .set_snapshot_age(previous.age_secs(chrono::Utc::now()));
                    self.health
                        .set_degraded(components::SOURCE, format!("Serving stale snapshot: {e}"))
                        .await;
                } else {
                    self.health
                        .set_unhealthy(components::SOURCE, e.to_string())
                        .await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use crate::state::Snapshot;
    use async_trait::async_trait;
    use chrono::Utc;
    use energy_lib::health::ComponentStatus;
    use energy_lib::models::EnergyReading;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct ScriptedSource {
        fail: AtomicBool,
    }

    impl ScriptedSource {
        fn new(fail: bool) -> Self {
            Self {
                fail: AtomicBool::new(fail),
            }
        }
    }

    #[async_trait]
    impl DataSource for ScriptedSource {
        async fn fetch_snapshot(&self) -> Result<Snapshot, SourceError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(SourceError::Status {
                    collection: "readings",
                    status: reqwest::StatusCode::BAD_GATEWAY,
                });
            }
            let reading: EnergyReading = serde_json::from_str(
                r#"{"machineId":"M1","timestamp":"2024-03-01T08:00:00Z","powerUsageKw":100.0}"#,
            )
            .unwrap();
            Ok(Snapshot {
                readings: vec![reading],
                fetched_at: Some(Utc::now()),
                ..Default::default()
            })
        }
    }

    fn refresh_loop(source: Arc<dyn DataSource>) -> (RefreshLoop, SnapshotStore, HealthRegistry) {
        let store = SnapshotStore::new();
        let health = HealthRegistry::new();
        let refresh = RefreshLoop::new(
            source,
            store.clone(),
            health.clone(),
            DashboardMetrics::new(),
            StructuredLogger::new("test-site"),
            RefreshConfig::default(),
        );
        (refresh, store, health)
    }

    #[tokio::test]
    async fn successful_refresh_stores_snapshot_and_marks_ready() {
        let (refresh, store, health) = refresh_loop(Arc::new(ScriptedSource::new(false)));

        refresh.refresh_once().await;

        let snapshot = store.current().await;
        assert_eq!(snapshot.readings.len(), 1);
        assert!(health.readiness().await.ready);
        assert_eq!(health.health().await.status, ComponentStatus::Healthy);
    }

    #[tokio::test]
    async fn failure_before_first_snapshot_is_unhealthy() {
        let (refresh, store, health) = refresh_loop(Arc::new(ScriptedSource::new(true)));

        refresh.refresh_once().await;

        assert!(store.current().await.fetched_at.is_none());
        assert_eq!(health.health().await.status, ComponentStatus::Unhealthy);
        assert!(!health.readiness().await.ready);
    }

    #[tokio::test]
    async fn failure_after_a_snapshot_keeps_serving_it_degraded() {
        let source = Arc::new(ScriptedSource::new(false));
        let (refresh, store, health) = refresh_loop(source.clone());

        refresh.refresh_once().await;
        source.fail.store(true, Ordering::SeqCst);
        refresh.refresh_once().await;

        let snapshot = store.current().await;
        assert_eq!(snapshot.readings.len(), 1);
        assert_eq!(health.health().await.status, ComponentStatus::Degraded);
        assert!(health.readiness().await.ready);
    }
}
