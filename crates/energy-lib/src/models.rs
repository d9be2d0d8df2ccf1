//! Core data models for the energy dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One timestamped energy/cost/efficiency sample for a machine.
///
/// Numeric fields default to 0 when absent from the source payload, so a
/// sparse record still participates in every aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyReading {
    pub machine_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub power_usage_kw: f64,
    #[serde(default)]
    pub cost_mad: f64,
    /// Normalized 0-100 performance score at sample time.
    #[serde(default)]
    pub efficiency_score: f64,
    /// Emissions attributed to this sample, in kg.
    #[serde(default)]
    pub co2: f64,
}

/// Category tag of a monitored machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineType {
    Compressor,
    Cutter,
    Mixer,
    Pump,
    Lighting,
    Cooling,
    Conveyor,
    Packaging,
    /// Unrecognized type; contributes to no cost bucket.
    #[serde(other)]
    Other,
}

/// Operational state of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    Running,
    Idle,
    Maintenance,
    Offline,
    #[serde(other)]
    Unknown,
}

/// A monitored physical unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    #[serde(default = "default_machine_status")]
    pub status: MachineStatus,
}

fn default_machine_status() -> MachineStatus {
    MachineStatus::Unknown
}

/// Alert severity as reported by the monitoring source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl FromStr for Severity {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(ParseLabelError::new("severity", s)),
        }
    }
}

/// Lifecycle state of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    New,
    Acknowledged,
    Resolved,
    #[serde(other)]
    Unknown,
}

impl FromStr for AlertStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Ok(AlertStatus::New),
            "acknowledged" => Ok(AlertStatus::Acknowledged),
            "resolved" => Ok(AlertStatus::Resolved),
            _ => Err(ParseLabelError::new("status", s)),
        }
    }
}

/// Recommendation priority. Labels come from the source data and are
/// French; the rank table drives priority ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Critique,
    #[serde(rename = "Élevée")]
    Elevee,
    Moyenne,
    Faible,
    #[serde(other)]
    Unknown,
}

impl Priority {
    /// Fixed rank table: Critique=4 > Élevée=3 > Moyenne=2 > Faible=1.
    /// Unknown ranks below everything.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critique => 4,
            Priority::Elevee => 3,
            Priority::Moyenne => 2,
            Priority::Faible => 1,
            Priority::Unknown => 0,
        }
    }

    /// Display label matching the wire representation.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critique => "Critique",
            Priority::Elevee => "Élevée",
            Priority::Moyenne => "Moyenne",
            Priority::Faible => "Faible",
            Priority::Unknown => "Unknown",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Critique" | "critique" => Ok(Priority::Critique),
            "Élevée" | "élevée" | "Elevee" | "elevee" => Ok(Priority::Elevee),
            "Moyenne" | "moyenne" => Ok(Priority::Moyenne),
            "Faible" | "faible" => Ok(Priority::Faible),
            _ => Err(ParseLabelError::new("priority", s)),
        }
    }
}

/// Implementation difficulty of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[serde(other)]
    Unknown,
}

impl FromStr for Difficulty {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseLabelError::new("difficulty", s)),
        }
    }
}

/// Error for unrecognized filter selections.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized {field} value: {value:?}")]
pub struct ParseLabelError {
    pub field: &'static str,
    pub value: String,
}

impl ParseLabelError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// A monitoring alert raised against a machine or zone.
///
/// Classification fields are optional; a record missing a field that an
/// active filter references simply fails that predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub status: Option<AlertStatus>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub machine_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// An energy-saving recommendation produced by the external advisory
/// source, treated here as an opaque structured record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub machine_id: Option<String>,
    /// Projected savings in MAD per year.
    #[serde(default)]
    pub potential_savings: Option<f64>,
    /// One-off cost of implementing the recommendation, in MAD.
    #[serde(default)]
    pub implementation_cost: Option<f64>,
    /// Months until cumulative savings equal the implementation cost.
    #[serde(default)]
    pub payback_period: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Scalar summary over a reading window.
///
/// `total_consumption`/`current_consumption` and `daily_cost`/`average_cost`
/// are computed as identical sums; the dashboard consumed both names and the
/// duplication is preserved as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_consumption: f64,
    pub current_consumption: f64,
    pub daily_cost: f64,
    pub average_cost: f64,
    /// Mean efficiency score, rounded to the nearest integer.
    pub efficiency: f64,
    pub co2_footprint: f64,
}

/// Summary metrics extended with the best-effort predictive fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMetrics {
    #[serde(flatten)]
    pub metrics: Metrics,
    pub predicted_efficiency: f64,
    /// 0-1 likelihood of anomalous consumption in the window.
    pub anomaly_risk: f64,
}

/// One named cost aggregation group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBucket {
    pub name: &'static str,
    pub value: f64,
    /// Rounded share of the total cost, 0 when the total is 0.
    pub percentage: f64,
}

/// Consumption for one sampled hour, formatted for chart axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    /// Zero-padded 24h clock label with an "h" suffix, e.g. "07h".
    pub hour: String,
    pub consumption: f64,
}

/// One band of the fixed 5-bucket efficiency histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyBand {
    pub range: &'static str,
    pub count: usize,
}

/// Per-machine consumption and efficiency summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineMetrics {
    pub machine_id: String,
    pub total_consumption: f64,
    pub total_cost: f64,
    pub average_efficiency: f64,
    /// One reading is assumed per sampled operating hour.
    pub operating_hours: usize,
    pub hourly_data: Vec<HourlyPoint>,
    pub efficiency_distribution: Vec<EfficiencyBand>,
}
