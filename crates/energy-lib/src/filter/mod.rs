//! Multi-criteria record filtering and sorting
//!
//! Shared predicate primitives plus two domain instantiations: one for
//! alert records and one for recommendation records. All active criteria
//! AND together; records missing a referenced field fail that predicate
//! and sort below everything, never panicking.

mod alerts;
mod criteria;
mod recommendations;

pub use alerts::{filter_alerts, AlertFilter};
pub use criteria::{matches_max, matches_min, matches_search, matches_text, within_range};
pub use recommendations::{
    filter_recommendations, QuickFilter, RecommendationFilter, RecommendationSort,
    HIGH_IMPACT_MIN_SAVINGS, LOW_COST_MAX_COST, QUICK_WIN_MAX_PAYBACK_MONTHS,
};
