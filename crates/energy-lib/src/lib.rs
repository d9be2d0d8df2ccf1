//! Core library for the factory energy dashboard
//!
//! This crate provides:
//! - Pure aggregation over energy readings (summary metrics, cost
//!   distribution, per-machine projections)
//! - Multi-criteria filtering and sorting of alerts and recommendations
//! - Best-effort predictive enrichment with deterministic fallbacks
//! - Health checks and observability

pub mod aggregate;
pub mod enrich;
pub mod filter;
pub mod health;
pub mod models;
pub mod observability;

pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{DashboardMetrics, StructuredLogger};
