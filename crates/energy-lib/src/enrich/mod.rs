//! Best-effort predictive enrichment of summary metrics
//!
//! The dashboard optionally asks an external forecasting service for a
//! predicted efficiency and an anomaly-risk score. The call is strictly
//! best-effort: on error or timeout the enrichment degrades to
//! deterministic fallback values and the failure never reaches the caller.

mod forecast;

pub use forecast::{linear_trend_slope, HeuristicForecaster};

use crate::models::{EnergyReading, EnrichedMetrics, Metrics};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Default deadline for a forecast call.
pub const FORECAST_TIMEOUT: Duration = Duration::from_secs(2);

/// Predictive output of a forecaster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecast {
    /// Expected efficiency score over the next window, 0-100.
    pub predicted_efficiency: f64,
    /// Likelihood of anomalous consumption, 0-1.
    pub anomaly_risk: f64,
}

/// Seam for forecast implementations (external service or local
/// heuristic).
#[async_trait]
pub trait Forecaster: Send + Sync {
    async fn forecast(&self, metrics: &Metrics, readings: &[EnergyReading]) -> Result<Forecast>;
}

/// Result of an enrichment attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enrichment {
    pub metrics: EnrichedMetrics,
    /// True when the forecaster failed or timed out and the fallback
    /// values were used instead.
    pub fell_back: bool,
}

/// Enrich summary metrics with the forecaster's prediction, falling back
/// to `predicted_efficiency = efficiency`, `anomaly_risk = 0` on any
/// failure. The output is always a complete record.
pub async fn enrich_metrics(
    base: Metrics,
    readings: &[EnergyReading],
    forecaster: &dyn Forecaster,
    deadline: Duration,
) -> Enrichment {
    match tokio::time::timeout(deadline, forecaster.forecast(&base, readings)).await {
        Ok(Ok(forecast)) => Enrichment {
            metrics: EnrichedMetrics {
                metrics: base,
                predicted_efficiency: forecast.predicted_efficiency,
                anomaly_risk: forecast.anomaly_risk,
            },
            fell_back: false,
        },
        Ok(Err(e)) => {
            warn!(error = %e, "Forecast failed, using fallback enrichment");
            fallback(base)
        }
        Err(_) => {
            warn!(deadline_ms = deadline.as_millis() as u64, "Forecast timed out, using fallback enrichment");
            fallback(base)
        }
    }
}

fn fallback(base: Metrics) -> Enrichment {
    Enrichment {
        metrics: EnrichedMetrics {
            metrics: base,
            predicted_efficiency: base.efficiency,
            anomaly_risk: 0.0,
        },
        fell_back: true,
    }
}
