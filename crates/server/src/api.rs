//! Dashboard HTTP API
//!
//! Serves the derived views over the latest snapshot plus health checks
//! and Prometheus metrics. Views are computed per request from the pure
//! aggregation functions; nothing is cached besides the snapshot itself.

use crate::state::SnapshotStore;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use energy_lib::aggregate::{compute_cost_distribution, compute_metrics, project_machine_metrics};
use energy_lib::enrich::{enrich_metrics, Forecaster};
use energy_lib::filter::{
    filter_alerts, filter_recommendations, AlertFilter, QuickFilter, RecommendationFilter,
    RecommendationSort,
};
use energy_lib::health::{ComponentStatus, HealthRegistry};
use energy_lib::models::{Alert, AlertStatus, Difficulty, Machine, Priority, Recommendation, Severity};
use energy_lib::observability::{DashboardMetrics, StructuredLogger};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Shared application state
pub struct AppState {
    pub store: SnapshotStore,
    pub health_registry: HealthRegistry,
    pub metrics: DashboardMetrics,
    pub logger: StructuredLogger,
    pub forecaster: Arc<dyn Forecaster>,
    pub forecast_timeout: Duration,
}

/// JSON error body for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Strip the dashboard's "all"/empty sentinel from a selection.
fn active(raw: &Option<String>) -> Option<&str> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
}

fn parse_selection<T: FromStr>(raw: &Option<String>) -> Result<Option<T>, T::Err> {
    active(raw).map(T::from_str).transpose()
}

fn parse_instant(raw: &Option<String>, field: &str) -> Result<Option<DateTime<Utc>>, String> {
    active(raw)
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| format!("invalid {field} timestamp: {e}"))
        })
        .transpose()
}

async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;
    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(health))
}

async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;
    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(readiness))
}

async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .unwrap_or_default();
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Factory-wide summary metrics, enriched best-effort.
async fn summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.current().await;
    let base = compute_metrics(&snapshot.readings, &snapshot.machines);

    let start = tokio::time::Instant::now();
    let enriched = enrich_metrics(
        base,
        &snapshot.readings,
        state.forecaster.as_ref(),
        state.forecast_timeout,
    )
    .await;
    state
        .metrics
        .observe_enrichment_latency(start.elapsed().as_secs_f64());

    if enriched.fell_back {
        state.metrics.inc_enrichment_fallbacks();
        state.logger.log_enrichment_fallback(base.efficiency);
        state
            .health_registry
            .set_degraded(
                energy_lib::health::components::ENRICHMENT,
                "Forecast fallback in use",
            )
            .await;
    } else {
        state
            .health_registry
            .set_healthy(energy_lib::health::components::ENRICHMENT)
            .await;
    }

    Json(enriched.metrics)
}

/// Cost buckets in fixed category order.
async fn cost_distribution(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.current().await;
    Json(compute_cost_distribution(
        &snapshot.readings,
        &snapshot.machines,
    ))
}

#[derive(Debug, Serialize)]
struct MachineList {
    machines: Vec<Machine>,
    total: usize,
}

async fn machines(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.current().await;
    Json(MachineList {
        total: snapshot.machines.len(),
        machines: snapshot.machines.clone(),
    })
}

async fn machine_metrics(
    State(state): State<Arc<AppState>>,
    Path(machine_id): Path<String>,
) -> impl IntoResponse {
    let snapshot = state.store.current().await;
    if !snapshot.machines.iter().any(|m| m.id == machine_id) {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("unknown machine: {machine_id}"),
            }),
        )
            .into_response();
    }
    Json(project_machine_metrics(&snapshot.readings, &machine_id)).into_response()
}

#[derive(Debug, Default, Deserialize)]
struct AlertQuery {
    severity: Option<String>,
    status: Option<String>,
    category: Option<String>,
    location: Option<String>,
    search: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

impl AlertQuery {
    fn into_filter(self) -> Result<AlertFilter, String> {
        Ok(AlertFilter {
            severity: parse_selection::<Severity>(&self.severity).map_err(|e| e.to_string())?,
            status: parse_selection::<AlertStatus>(&self.status).map_err(|e| e.to_string())?,
            category: active(&self.category).map(str::to_string),
            location: active(&self.location).map(str::to_string),
            search: self.search,
            start: parse_instant(&self.start, "start")?,
            end: parse_instant(&self.end, "end")?,
        })
    }
}

#[derive(Debug, Serialize)]
struct AlertList {
    alerts: Vec<Alert>,
    total: usize,
}

async fn alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertQuery>,
) -> impl IntoResponse {
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(message) => return bad_request(message).into_response(),
    };

    let snapshot = state.store.current().await;
    let alerts = filter_alerts(&snapshot.alerts, &filter);
    info!(
        event = "alerts_filtered",
        kept = alerts.len(),
        total = snapshot.alerts.len(),
        "Filtered alert records"
    );
    Json(AlertList {
        total: alerts.len(),
        alerts,
    })
    .into_response()
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationQuery {
    priority: Option<String>,
    difficulty: Option<String>,
    machine: Option<String>,
    category: Option<String>,
    search: Option<String>,
    min_savings: Option<f64>,
    max_payback: Option<f64>,
    quick: Option<String>,
    sort: Option<String>,
}

impl RecommendationQuery {
    fn into_parts(self) -> Result<(RecommendationFilter, RecommendationSort), String> {
        let filter = RecommendationFilter {
            priority: parse_selection::<Priority>(&self.priority).map_err(|e| e.to_string())?,
            difficulty: parse_selection::<Difficulty>(&self.difficulty).map_err(|e| e.to_string())?,
            machine_id: active(&self.machine).map(str::to_string),
            category: active(&self.category).map(str::to_string),
            search: self.search,
            min_savings: self.min_savings,
            max_payback: self.max_payback,
            quick: parse_selection::<QuickFilter>(&self.quick).map_err(|e| e.to_string())?,
        };
        let sort = parse_selection::<RecommendationSort>(&self.sort)
            .map_err(|e| e.to_string())?
            .unwrap_or_default();
        Ok((filter, sort))
    }
}

#[derive(Debug, Serialize)]
struct RecommendationList {
    recommendations: Vec<Recommendation>,
    total: usize,
}

async fn recommendations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecommendationQuery>,
) -> impl IntoResponse {
    let (filter, sort) = match query.into_parts() {
        Ok(parts) => parts,
        Err(message) => return bad_request(message).into_response(),
    };

    let snapshot = state.store.current().await;
    let recommendations = filter_recommendations(&snapshot.recommendations, &filter, sort);
    Json(RecommendationList {
        total: recommendations.len(),
        recommendations,
    })
    .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/summary", get(summary))
        .route("/api/v1/cost-distribution", get(cost_distribution))
        .route("/api/v1/machines", get(machines))
        .route("/api/v1/machines/:id", get(machine_metrics))
        .route("/api/v1/alerts", get(alerts))
        .route("/api/v1/recommendations", get(recommendations))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting dashboard API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
