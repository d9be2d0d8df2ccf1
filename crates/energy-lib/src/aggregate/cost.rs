//! Cost distribution across machine categories

use crate::models::{CostBucket, EnergyReading, Machine, MachineType};
use std::collections::HashMap;

/// One entry of the fixed category table.
#[derive(Debug, Clone, Copy)]
pub struct CostCategory {
    pub name: &'static str,
    pub types: &'static [MachineType],
}

/// Fixed category table. Output buckets follow this declaration order,
/// never a value-sorted order.
pub const COST_CATEGORIES: [CostCategory; 4] = [
    CostCategory {
        name: "Production Machines",
        types: &[
            MachineType::Compressor,
            MachineType::Cutter,
            MachineType::Mixer,
            MachineType::Pump,
        ],
    },
    CostCategory {
        name: "Lighting",
        types: &[MachineType::Lighting],
    },
    CostCategory {
        name: "Cooling",
        types: &[MachineType::Cooling],
    },
    CostCategory {
        name: "Auxiliary Equipment",
        types: &[MachineType::Conveyor, MachineType::Packaging],
    },
];

/// Bucket reading costs by machine category and compute percentage shares.
///
/// A reading whose machine id is absent from the roster, or whose machine
/// type matches no category, contributes to no bucket. Percentages are
/// computed against the cost of all readings, so dropped readings lower
/// the bucket shares below 100 rather than being redistributed.
pub fn compute_cost_distribution(readings: &[EnergyReading], machines: &[Machine]) -> Vec<CostBucket> {
    let type_by_id: HashMap<&str, MachineType> = machines
        .iter()
        .map(|m| (m.id.as_str(), m.machine_type))
        .collect();

    let mut values = [0.0f64; COST_CATEGORIES.len()];
    let mut total = 0.0f64;

    for reading in readings {
        total += reading.cost_mad;
        let Some(machine_type) = type_by_id.get(reading.machine_id.as_str()) else {
            continue;
        };
        if let Some(idx) = COST_CATEGORIES
            .iter()
            .position(|c| c.types.contains(machine_type))
        {
            values[idx] += reading.cost_mad;
        }
    }

    COST_CATEGORIES
        .iter()
        .zip(values)
        .map(|(category, value)| CostBucket {
            name: category.name,
            value,
            percentage: if total > 0.0 {
                (value / total * 100.0).round()
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(machine_id: &str, cost: f64) -> EnergyReading {
        EnergyReading {
            machine_id: machine_id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            power_usage_kw: 0.0,
            cost_mad: cost,
            efficiency_score: 0.0,
            co2: 0.0,
        }
    }

    fn machine(id: &str, machine_type: MachineType) -> Machine {
        Machine {
            id: id.to_string(),
            name: id.to_string(),
            machine_type,
            status: crate::models::MachineStatus::Running,
        }
    }

    #[test]
    fn empty_inputs_yield_zero_buckets_in_fixed_order() {
        let buckets = compute_cost_distribution(&[], &[]);
        let names: Vec<_> = buckets.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            ["Production Machines", "Lighting", "Cooling", "Auxiliary Equipment"]
        );
        assert!(buckets.iter().all(|b| b.value == 0.0 && b.percentage == 0.0));
    }

    #[test]
    fn single_category_takes_full_share() {
        let readings = vec![reading("M1", 50.0), reading("M1", 75.0)];
        let machines = vec![machine("M1", MachineType::Compressor)];
        let buckets = compute_cost_distribution(&readings, &machines);

        assert_eq!(buckets[0].value, 125.0);
        assert_eq!(buckets[0].percentage, 100.0);
        for bucket in &buckets[1..] {
            assert_eq!(bucket.value, 0.0);
            assert_eq!(bucket.percentage, 0.0);
        }
    }

    #[test]
    fn costs_split_across_categories() {
        let readings = vec![
            reading("M1", 60.0),
            reading("L1", 30.0),
            reading("C1", 10.0),
        ];
        let machines = vec![
            machine("M1", MachineType::Pump),
            machine("L1", MachineType::Lighting),
            machine("C1", MachineType::Conveyor),
        ];
        let buckets = compute_cost_distribution(&readings, &machines);

        assert_eq!(buckets[0].value, 60.0);
        assert_eq!(buckets[0].percentage, 60.0);
        assert_eq!(buckets[1].value, 30.0);
        assert_eq!(buckets[1].percentage, 30.0);
        assert_eq!(buckets[3].value, 10.0);
        assert_eq!(buckets[3].percentage, 10.0);
    }

    #[test]
    fn unresolvable_and_uncategorized_readings_are_dropped() {
        let readings = vec![
            reading("M1", 50.0),
            reading("GHOST", 40.0),
            reading("X1", 10.0),
        ];
        let machines = vec![
            machine("M1", MachineType::Mixer),
            machine("X1", MachineType::Other),
        ];
        let buckets = compute_cost_distribution(&readings, &machines);

        // Bucketed cost covers only the resolvable, categorized readings.
        let bucketed: f64 = buckets.iter().map(|b| b.value).sum();
        assert_eq!(bucketed, 50.0);

        // Shares are computed against all readings, so they sum below 100.
        let share_sum: f64 = buckets.iter().map(|b| b.percentage).sum();
        assert_eq!(buckets[0].percentage, 50.0);
        assert!(share_sum < 100.0);
    }

    #[test]
    fn bucketed_cost_is_conserved() {
        let readings = vec![
            reading("M1", 12.5),
            reading("M2", 7.5),
            reading("L1", 5.0),
        ];
        let machines = vec![
            machine("M1", MachineType::Cutter),
            machine("M2", MachineType::Compressor),
            machine("L1", MachineType::Lighting),
        ];
        let buckets = compute_cost_distribution(&readings, &machines);

        let bucketed: f64 = buckets.iter().map(|b| b.value).sum();
        let total: f64 = readings.iter().map(|r| r.cost_mad).sum();
        assert!((bucketed - total).abs() < f64::EPSILON);
    }

    #[test]
    fn percentages_stay_within_bounds() {
        let readings = vec![
            reading("M1", 1.0),
            reading("M2", 2.0),
            reading("GHOST", 3.0),
        ];
        let machines = vec![
            machine("M1", MachineType::Packaging),
            machine("M2", MachineType::Cooling),
        ];
        let buckets = compute_cost_distribution(&readings, &machines);

        for bucket in &buckets {
            assert!(bucket.percentage >= 0.0 && bucket.percentage <= 100.0);
        }
        let share_sum: f64 = buckets.iter().map(|b| b.percentage).sum();
        assert!(share_sum <= 100.0);
    }
}
