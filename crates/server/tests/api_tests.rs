//! Integration tests for the dashboard API endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use energy_lib::{
    enrich::HeuristicForecaster,
    health::{components, HealthRegistry},
    observability::{DashboardMetrics, StructuredLogger},
};
use energy_server::api::{create_router, AppState};
use energy_server::state::{Snapshot, SnapshotStore};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn sample_snapshot() -> Snapshot {
    let readings = serde_json::from_str(
        r#"[
            {"machineId":"M1","timestamp":"2024-03-01T07:10:00Z",
             "powerUsageKw":100.0,"costMad":50.0,"efficiencyScore":92.0,"co2":2.0},
            {"machineId":"M1","timestamp":"2024-03-01T14:30:00Z",
             "powerUsageKw":120.0,"costMad":60.0,"efficiencyScore":78.0,"co2":2.5},
            {"machineId":"M2","timestamp":"2024-03-01T14:45:00Z",
             "powerUsageKw":30.0,"costMad":15.0,"efficiencyScore":88.0,"co2":0.5}
        ]"#,
    )
    .unwrap();
    let machines = serde_json::from_str(
        r#"[
            {"id":"M1","name":"Compressor 1","type":"compressor","status":"running"},
            {"id":"M2","name":"Hall lighting","type":"lighting","status":"running"}
        ]"#,
    )
    .unwrap();
    let alerts = serde_json::from_str(
        r#"[
            {"id":"A1","title":"Overheat","description":"Compressor overheating",
             "severity":"critical","status":"new","category":"thermal",
             "location":"Hall A","machineId":"M1","timestamp":"2024-03-01T14:35:00Z"},
            {"id":"A2","title":"Flicker","description":"Lighting flicker",
             "severity":"low","status":"resolved","category":"electrical",
             "location":"Hall B","machineId":"M2","timestamp":"2024-03-01T09:00:00Z"}
        ]"#,
    )
    .unwrap();
    let recommendations = serde_json::from_str(
        r#"[
            {"id":"R1","title":"Replace seals","description":"Worn compressor seals",
             "priority":"Critique","difficulty":"Easy","category":"maintenance",
             "machineId":"M1","potentialSavings":5000.0,"implementationCost":800.0,
             "paybackPeriod":2.0,"timestamp":"2024-02-20T10:00:00Z"},
            {"id":"R2","title":"LED retrofit","description":"Swap halls to LED",
             "priority":"Moyenne","difficulty":"Hard","category":"lighting",
             "machineId":"M2","potentialSavings":1500.0,"implementationCost":20000.0,
             "paybackPeriod":18.0,"timestamp":"2024-02-25T10:00:00Z"}
        ]"#,
    )
    .unwrap();

    Snapshot {
        readings,
        machines,
        alerts,
        recommendations,
        fetched_at: Some(Utc::now()),
    }
}

async fn setup_test_app(snapshot: Option<Snapshot>) -> (Router, Arc<AppState>) {
    let health_registry = HealthRegistry::new();
    health_registry.register(components::SOURCE).await;
    health_registry.register(components::ENRICHMENT).await;

    let store = SnapshotStore::new();
    if let Some(snapshot) = snapshot {
        store.replace(snapshot).await;
        health_registry.set_ready(true).await;
    }

    let state = Arc::new(AppState {
        store,
        health_registry,
        metrics: DashboardMetrics::new(),
        logger: StructuredLogger::new("test-site"),
        forecaster: Arc::new(HeuristicForecaster),
        forecast_timeout: Duration::from_secs(2),
    });
    let router = create_router(state.clone());

    (router, state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_healthz_returns_ok_when_healthy() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, health) = get(app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert!(health["components"]["source"].is_object());
    assert!(health["components"]["enrichment"].is_object());
}

#[tokio::test]
async fn test_healthz_returns_ok_when_degraded() {
    let (app, state) = setup_test_app(Some(sample_snapshot())).await;

    state
        .health_registry
        .set_degraded(components::SOURCE, "Serving stale snapshot")
        .await;

    // Degraded still returns 200 (operational)
    let (status, health) = get(app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "degraded");
}

#[tokio::test]
async fn test_healthz_returns_503_when_unhealthy() {
    let (app, state) = setup_test_app(Some(sample_snapshot())).await;

    state
        .health_registry
        .set_unhealthy(components::SOURCE, "Data source unreachable")
        .await;

    let (status, health) = get(app, "/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health["status"], "unhealthy");
}

#[tokio::test]
async fn test_readyz_returns_503_before_first_snapshot() {
    let (app, _state) = setup_test_app(None).await;

    let (status, readiness) = get(app, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(readiness["ready"], false);
}

#[tokio::test]
async fn test_readyz_returns_ok_when_ready() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, readiness) = get(app, "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(readiness["ready"], true);
}

#[tokio::test]
async fn test_metrics_endpoint_returns_prometheus_format() {
    let (app, state) = setup_test_app(Some(sample_snapshot())).await;

    state.metrics.observe_refresh_latency(0.01);
    state.metrics.set_snapshot_sizes(3, 2, 2, 2);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let metrics_text = String::from_utf8(body.to_vec()).unwrap();

    assert!(metrics_text.contains("energy_dashboard_refresh_latency_seconds"));
    assert!(metrics_text.contains("energy_dashboard_snapshot_readings"));
    assert!(metrics_text.contains("energy_dashboard_refresh_errors_total"));
}

#[tokio::test]
async fn test_summary_aggregates_the_snapshot() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, summary) = get(app, "/api/v1/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalConsumption"], 250.0);
    assert_eq!(summary["currentConsumption"], 250.0);
    assert_eq!(summary["dailyCost"], 125.0);
    assert_eq!(summary["averageCost"], 125.0);
    // (92 + 78 + 88) / 3 = 86
    assert_eq!(summary["efficiency"], 86.0);
    assert_eq!(summary["co2Footprint"], 5.0);
    assert!(summary["predictedEfficiency"].is_number());
    assert!(summary["anomalyRisk"].is_number());
}

#[tokio::test]
async fn test_summary_is_all_zero_on_empty_snapshot() {
    let (app, _state) = setup_test_app(None).await;

    let (status, summary) = get(app, "/api/v1/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalConsumption"], 0.0);
    assert_eq!(summary["efficiency"], 0.0);
    assert_eq!(summary["predictedEfficiency"], 0.0);
    assert_eq!(summary["anomalyRisk"], 0.0);
}

#[tokio::test]
async fn test_cost_distribution_keeps_fixed_category_order() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, buckets) = get(app, "/api/v1/cost-distribution").await;

    assert_eq!(status, StatusCode::OK);
    let buckets = buckets.as_array().unwrap();
    assert_eq!(buckets.len(), 4);
    assert_eq!(buckets[0]["name"], "Production Machines");
    assert_eq!(buckets[0]["value"], 110.0);
    assert_eq!(buckets[1]["name"], "Lighting");
    assert_eq!(buckets[1]["value"], 15.0);
    assert_eq!(buckets[2]["name"], "Cooling");
    assert_eq!(buckets[2]["value"], 0.0);
    assert_eq!(buckets[3]["name"], "Auxiliary Equipment");
}

#[tokio::test]
async fn test_machines_lists_the_roster() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, list) = get(app, "/api/v1/machines").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 2);
    assert_eq!(list["machines"][0]["id"], "M1");
    assert_eq!(list["machines"][0]["type"], "compressor");
}

#[tokio::test]
async fn test_machine_metrics_projects_one_machine() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, metrics) = get(app, "/api/v1/machines/M1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["machineId"], "M1");
    assert_eq!(metrics["totalConsumption"], 220.0);
    assert_eq!(metrics["totalCost"], 110.0);
    // (92 + 78) / 2 = 85
    assert_eq!(metrics["averageEfficiency"], 85.0);
    assert_eq!(metrics["operatingHours"], 2);
    assert_eq!(metrics["hourlyData"][0]["hour"], "07h");
    assert_eq!(metrics["hourlyData"][1]["hour"], "14h");
}

#[tokio::test]
async fn test_unknown_machine_is_404() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, body) = get(app, "/api/v1/machines/M99").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("M99"));
}

#[tokio::test]
async fn test_alerts_filter_by_severity() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, list) = get(app, "/api/v1/alerts?severity=critical").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["alerts"][0]["id"], "A1");
}

#[tokio::test]
async fn test_alerts_all_sentinel_matches_everything() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, list) = get(app, "/api/v1/alerts?severity=all&status=ALL").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 2);
    // Newest first
    assert_eq!(list["alerts"][0]["id"], "A1");
    assert_eq!(list["alerts"][1]["id"], "A2");
}

#[tokio::test]
async fn test_alerts_reject_unknown_severity() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, body) = get(app, "/api/v1/alerts?severity=catastrophic").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("severity"));
}

#[tokio::test]
async fn test_alerts_reject_malformed_timestamp() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, body) = get(app, "/api/v1/alerts?start=yesterday").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("start"));
}

#[tokio::test]
async fn test_alerts_time_range_is_inclusive() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, list) = get(
        app,
        "/api/v1/alerts?start=2024-03-01T14:35:00Z&end=2024-03-01T14:35:00Z",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["alerts"][0]["id"], "A1");
}

#[tokio::test]
async fn test_recommendations_default_sort_is_savings_desc() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, list) = get(app, "/api/v1/recommendations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 2);
    assert_eq!(list["recommendations"][0]["id"], "R1");
    assert_eq!(list["recommendations"][1]["id"], "R2");
}

#[tokio::test]
async fn test_recommendations_quick_wins_filter() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, list) = get(app, "/api/v1/recommendations?quick=quick-wins").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["recommendations"][0]["id"], "R1");
}

#[tokio::test]
async fn test_recommendations_priority_sort_uses_rank_order() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, list) = get(app, "/api/v1/recommendations?sort=priority").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["recommendations"][0]["priority"], "Critique");
    assert_eq!(list["recommendations"][1]["priority"], "Moyenne");
}

#[tokio::test]
async fn test_recommendations_reject_unknown_quick_filter() {
    let (app, _state) = setup_test_app(Some(sample_snapshot())).await;

    let (status, body) = get(app, "/api/v1/recommendations?quick=free-money").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("quick"));
}
