//! Local heuristic forecaster
//!
//! A deterministic stand-in for the external forecasting service: it
//! extrapolates the efficiency trend with a least-squares slope and rates
//! anomaly risk from the z-score of the latest power draw against the
//! window mean.

use super::{Forecast, Forecaster};
use crate::models::{EnergyReading, Metrics};
use anyhow::Result;
use async_trait::async_trait;

/// Samples below this count give no trend signal; the forecast then just
/// echoes the current efficiency.
const MIN_TREND_SAMPLES: usize = 3;

/// Z-score at which anomaly risk saturates at 1.0.
const RISK_SATURATION_Z: f64 = 4.0;

/// Heuristic forecaster requiring no external service.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicForecaster;

#[async_trait]
impl Forecaster for HeuristicForecaster {
    async fn forecast(&self, metrics: &Metrics, readings: &[EnergyReading]) -> Result<Forecast> {
        Ok(Forecast {
            predicted_efficiency: predict_efficiency(metrics.efficiency, readings),
            anomaly_risk: anomaly_risk(readings),
        })
    }
}

fn predict_efficiency(current: f64, readings: &[EnergyReading]) -> f64 {
    if readings.len() < MIN_TREND_SAMPLES {
        return current;
    }
    let scores: Vec<f64> = readings.iter().map(|r| r.efficiency_score).collect();
    let slope = linear_trend_slope(&scores);
    // Extrapolate one sample ahead, kept inside the score scale.
    (current + slope).clamp(0.0, 100.0)
}

fn anomaly_risk(readings: &[EnergyReading]) -> f64 {
    if readings.len() < MIN_TREND_SAMPLES {
        return 0.0;
    }
    let values: Vec<f64> = readings.iter().map(|r| r.power_usage_kw).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev < f64::EPSILON {
        return 0.0;
    }
    let latest = values[values.len() - 1];
    let z = (latest - mean) / std_dev;
    (z.max(0.0) / RISK_SATURATION_Z).clamp(0.0, 1.0)
}

/// Least-squares slope over evenly spaced samples.
pub fn linear_trend_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();
    let denom = n * sum_x2 - sum_x.powi(2);
    if denom.abs() < f64::EPSILON {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(power: f64, efficiency: f64) -> EnergyReading {
        EnergyReading {
            machine_id: "M1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            power_usage_kw: power,
            cost_mad: 0.0,
            efficiency_score: efficiency,
            co2: 0.0,
        }
    }

    #[test]
    fn slope_of_linear_series_is_exact() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((linear_trend_slope(&values) - 1.0).abs() < 1e-9);
        assert_eq!(linear_trend_slope(&[]), 0.0);
        assert_eq!(linear_trend_slope(&[7.0]), 0.0);
    }

    #[tokio::test]
    async fn too_few_samples_echo_current_efficiency() {
        let metrics = Metrics {
            efficiency: 75.0,
            ..Default::default()
        };
        let readings = vec![reading(100.0, 75.0)];
        let forecast = HeuristicForecaster.forecast(&metrics, &readings).await.unwrap();

        assert_eq!(forecast.predicted_efficiency, 75.0);
        assert_eq!(forecast.anomaly_risk, 0.0);
    }

    #[tokio::test]
    async fn rising_efficiency_trend_raises_the_prediction() {
        let metrics = Metrics {
            efficiency: 80.0,
            ..Default::default()
        };
        let readings: Vec<_> = (0..6).map(|i| reading(100.0, 70.0 + 2.0 * i as f64)).collect();
        let forecast = HeuristicForecaster.forecast(&metrics, &readings).await.unwrap();

        assert!(forecast.predicted_efficiency > 80.0);
        assert!(forecast.predicted_efficiency <= 100.0);
    }

    #[tokio::test]
    async fn stable_power_draw_carries_no_risk() {
        let metrics = Metrics::default();
        let readings: Vec<_> = (0..10).map(|_| reading(100.0, 80.0)).collect();
        let forecast = HeuristicForecaster.forecast(&metrics, &readings).await.unwrap();

        assert_eq!(forecast.anomaly_risk, 0.0);
    }

    #[tokio::test]
    async fn power_spike_in_latest_sample_raises_risk() {
        let metrics = Metrics::default();
        let mut readings: Vec<_> = (0..10)
            .map(|i| reading(100.0 + (i % 3) as f64, 80.0))
            .collect();
        readings.push(reading(400.0, 80.0));
        let forecast = HeuristicForecaster.forecast(&metrics, &readings).await.unwrap();

        assert!(forecast.anomaly_risk > 0.5);
        assert!(forecast.anomaly_risk <= 1.0);
    }
}
