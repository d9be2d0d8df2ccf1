//! Factory-wide summary metrics

use crate::models::{EnergyReading, Machine, Metrics};

/// Reduce a reading window and the machine roster into scalar summary
/// metrics.
///
/// The machine roster is part of the call contract shared with the other
/// aggregates but does not influence any of the sums. The consumption and
/// cost pairs are intentionally computed as identical sums (see
/// `Metrics`); `efficiency` is the mean score rounded to the nearest
/// integer, 0 when there are no readings.
pub fn compute_metrics(readings: &[EnergyReading], _machines: &[Machine]) -> Metrics {
    if readings.is_empty() {
        return Metrics::default();
    }

    let consumption: f64 = readings.iter().map(|r| r.power_usage_kw).sum();
    let cost: f64 = readings.iter().map(|r| r.cost_mad).sum();
    let co2: f64 = readings.iter().map(|r| r.co2).sum();
    let efficiency_sum: f64 = readings.iter().map(|r| r.efficiency_score).sum();
    let efficiency = (efficiency_sum / readings.len() as f64).round();

    Metrics {
        total_consumption: consumption,
        current_consumption: consumption,
        daily_cost: cost,
        average_cost: cost,
        efficiency,
        co2_footprint: co2,
    }
}
