//! Per-machine metric projection

use crate::models::{EfficiencyBand, EnergyReading, HourlyPoint, MachineMetrics};
use chrono::Timelike;

/// Band labels for the fixed efficiency histogram, best band first.
/// The top band is inclusive on both ends; the rest are half-open.
pub const EFFICIENCY_BANDS: [&str; 5] = ["90-100", "80-89", "70-79", "60-69", "<60"];

fn band_index(score: f64) -> usize {
    if score >= 90.0 {
        0
    } else if score >= 80.0 {
        1
    } else if score >= 70.0 {
        2
    } else if score >= 60.0 {
        3
    } else {
        4
    }
}

/// Project the readings of a single machine into a consumption/efficiency
/// summary, an hourly consumption series, and the efficiency histogram.
///
/// Shares the zero/empty defaults of the factory-wide aggregation: an
/// unknown machine id simply produces an all-zero summary.
pub fn project_machine_metrics(readings: &[EnergyReading], machine_id: &str) -> MachineMetrics {
    let own: Vec<&EnergyReading> = readings
        .iter()
        .filter(|r| r.machine_id == machine_id)
        .collect();

    let total_consumption: f64 = own.iter().map(|r| r.power_usage_kw).sum();
    let total_cost: f64 = own.iter().map(|r| r.cost_mad).sum();
    let average_efficiency = if own.is_empty() {
        0.0
    } else {
        (own.iter().map(|r| r.efficiency_score).sum::<f64>() / own.len() as f64).round()
    };

    let hourly_data: Vec<HourlyPoint> = own
        .iter()
        .map(|r| HourlyPoint {
            hour: format!("{:02}h", r.timestamp.hour()),
            consumption: r.power_usage_kw,
        })
        .collect();

    let mut counts = [0usize; EFFICIENCY_BANDS.len()];
    for reading in &own {
        counts[band_index(reading.efficiency_score)] += 1;
    }
    let efficiency_distribution = EFFICIENCY_BANDS
        .iter()
        .zip(counts)
        .map(|(range, count)| EfficiencyBand { range, count })
        .collect();

    MachineMetrics {
        machine_id: machine_id.to_string(),
        total_consumption,
        total_cost,
        average_efficiency,
        operating_hours: own.len(),
        hourly_data,
        efficiency_distribution,
    }
}
