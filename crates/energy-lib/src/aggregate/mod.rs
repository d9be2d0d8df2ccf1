//! Pure aggregation over in-memory reading collections
//!
//! Every function in this module is side-effect free and total: empty
//! inputs yield all-zero results, missing numeric fields count as 0, and
//! unresolvable machine references are silently excluded from bucketed
//! output. Inputs are treated as snapshots and never mutated.

mod cost;
mod machine;
mod metrics;

pub use cost::{compute_cost_distribution, CostCategory, COST_CATEGORIES};
pub use machine::{project_machine_metrics, EFFICIENCY_BANDS};
pub use metrics::compute_metrics;
