//! Observability infrastructure for the dashboard service
//!
//! Prometheus metrics for the refresh and enrichment paths, plus a
//! structured logger emitting event-tagged JSON records.

use prometheus::{
    register_gauge, register_histogram, register_int_counter, register_int_gauge, Gauge,
    Histogram, IntCounter, IntGauge,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for refresh/enrichment latencies (seconds).
const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// Global metrics instance, registered once per process.
static GLOBAL_METRICS: OnceLock<DashboardMetricsInner> = OnceLock::new();

struct DashboardMetricsInner {
    refresh_latency_seconds: Histogram,
    enrichment_latency_seconds: Histogram,
    snapshot_readings: IntGauge,
    snapshot_machines: IntGauge,
    snapshot_alerts: IntGauge,
    snapshot_recommendations: IntGauge,
    snapshot_age_seconds: Gauge,
    refresh_errors: IntCounter,
    enrichment_fallbacks: IntCounter,
}

impl DashboardMetricsInner {
    fn new() -> Self {
        Self {
            refresh_latency_seconds: register_histogram!(
                "energy_dashboard_refresh_latency_seconds",
                "Time spent fetching a snapshot from the data source",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register refresh_latency_seconds"),

            enrichment_latency_seconds: register_histogram!(
                "energy_dashboard_enrichment_latency_seconds",
                "Time spent in the predictive enrichment call",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register enrichment_latency_seconds"),

            snapshot_readings: register_int_gauge!(
                "energy_dashboard_snapshot_readings",
                "Energy readings in the current snapshot"
            )
            .expect("Failed to register snapshot_readings"),

            snapshot_machines: register_int_gauge!(
                "energy_dashboard_snapshot_machines",
                "Machines in the current snapshot"
            )
            .expect("Failed to register snapshot_machines"),

            snapshot_alerts: register_int_gauge!(
                "energy_dashboard_snapshot_alerts",
                "Alerts in the current snapshot"
            )
            .expect("Failed to register snapshot_alerts"),

            snapshot_recommendations: register_int_gauge!(
                "energy_dashboard_snapshot_recommendations",
                "Recommendations in the current snapshot"
            )
            .expect("Failed to register snapshot_recommendations"),

            snapshot_age_seconds: register_gauge!(
                "energy_dashboard_snapshot_age_seconds",
                "Age of the current snapshot"
            )
            .expect("Failed to register snapshot_age_seconds"),

            refresh_errors: register_int_counter!(
                "energy_dashboard_refresh_errors_total",
                "Failed snapshot refresh attempts"
            )
            .expect("Failed to register refresh_errors_total"),

            enrichment_fallbacks: register_int_counter!(
                "energy_dashboard_enrichment_fallbacks_total",
                "Enrichment calls degraded to fallback values"
            )
            .expect("Failed to register enrichment_fallbacks_total"),
        }
    }
}

/// Lightweight handle to the global dashboard metrics. Clones share the
/// same underlying registry entries.
#[derive(Clone)]
pub struct DashboardMetrics {
    _private: (),
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(DashboardMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &DashboardMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_refresh_latency(&self, duration_secs: f64) {
        self.inner().refresh_latency_seconds.observe(duration_secs);
    }

    pub fn observe_enrichment_latency(&self, duration_secs: f64) {
        self.inner()
            .enrichment_latency_seconds
            .observe(duration_secs);
    }

    /// Record collection sizes of a freshly stored snapshot.
    pub fn set_snapshot_sizes(
        &self,
        readings: i64,
        machines: i64,
        alerts: i64,
        recommendations: i64,
    ) {
        self.inner().snapshot_readings.set(readings);
        self.inner().snapshot_machines.set(machines);
        self.inner().snapshot_alerts.set(alerts);
        self.inner().snapshot_recommendations.set(recommendations);
    }

    pub fn set_snapshot_age(&self, age_secs: f64) {
        self.inner().snapshot_age_seconds.set(age_secs);
    }

    pub fn inc_refresh_errors(&self) {
        self.inner().refresh_errors.inc();
    }

    pub fn inc_enrichment_fallbacks(&self) {
        self.inner().enrichment_fallbacks.inc();
    }
}

/// Structured logger for dashboard events.
#[derive(Clone)]
pub struct StructuredLogger {
    site_name: String,
}

impl StructuredLogger {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }

    /// Log a completed snapshot refresh.
    pub fn log_refresh(
        &self,
        readings: usize,
        machines: usize,
        alerts: usize,
        recommendations: usize,
        elapsed_ms: u128,
    ) {
        info!(
            event = "snapshot_refreshed",
            site = %self.site_name,
            readings = readings,
            machines = machines,
            alerts = alerts,
            recommendations = recommendations,
            elapsed_ms = elapsed_ms as u64,
            "Snapshot refreshed from data source"
        );
    }

    /// Log a failed refresh; the previous snapshot stays in service.
    pub fn log_refresh_failed(&self, error: &str, has_previous_snapshot: bool) {
        warn!(
            event = "snapshot_refresh_failed",
            site = %self.site_name,
            error = %error,
            serving_stale = has_previous_snapshot,
            "Snapshot refresh failed"
        );
    }

    /// Log an enrichment call that degraded to fallback values.
    pub fn log_enrichment_fallback(&self, efficiency: f64) {
        warn!(
            event = "enrichment_fallback",
            site = %self.site_name,
            predicted_efficiency = efficiency,
            anomaly_risk = 0.0,
            "Forecast unavailable, served fallback enrichment"
        );
    }

    pub fn log_startup(&self, version: &str, source_url: &str) {
        info!(
            event = "server_started",
            site = %self.site_name,
            server_version = %version,
            source_url = %source_url,
            "Energy dashboard server started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "server_shutdown",
            site = %self.site_name,
            reason = %reason,
            "Energy dashboard server shutting down"
        );
    }
}
