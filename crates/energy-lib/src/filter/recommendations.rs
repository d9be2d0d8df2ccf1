//! Recommendation filtering and sorting

use super::criteria::{matches_max, matches_min, matches_search, matches_text};
use crate::models::{Difficulty, Priority, Recommendation};
use std::cmp::Ordering;
use std::str::FromStr;

/// Savings floor for the "high-impact" quick filter, MAD per year.
pub const HIGH_IMPACT_MIN_SAVINGS: f64 = 2000.0;

/// Payback ceiling for the "quick-wins" quick filter, in months.
pub const QUICK_WIN_MAX_PAYBACK_MONTHS: f64 = 6.0;

/// Implementation-cost ceiling for the "low-cost" quick filter, in MAD.
pub const LOW_COST_MAX_COST: f64 = 10_000.0;

/// Named composite predicate bundling several field constraints under one
/// label. At most one quick filter is active per query, which the
/// `Option<QuickFilter>` in the filter makes a type-level fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFilter {
    /// potential_savings >= 2000
    HighImpact,
    /// payback_period <= 6 AND difficulty == Easy
    QuickWins,
    /// implementation_cost <= 10000
    LowCost,
}

impl QuickFilter {
    fn matches(&self, rec: &Recommendation) -> bool {
        match self {
            QuickFilter::HighImpact => {
                matches_min(Some(HIGH_IMPACT_MIN_SAVINGS), rec.potential_savings)
            }
            QuickFilter::QuickWins => {
                matches_max(Some(QUICK_WIN_MAX_PAYBACK_MONTHS), rec.payback_period)
                    && rec.difficulty == Some(Difficulty::Easy)
            }
            QuickFilter::LowCost => {
                matches_max(Some(LOW_COST_MAX_COST), rec.implementation_cost)
            }
        }
    }
}

impl FromStr for QuickFilter {
    type Err = crate::models::ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high-impact" => Ok(QuickFilter::HighImpact),
            "quick-wins" => Ok(QuickFilter::QuickWins),
            "low-cost" => Ok(QuickFilter::LowCost),
            _ => Err(crate::models::ParseLabelError {
                field: "quick filter",
                value: s.to_string(),
            }),
        }
    }
}

/// Active constraints for a recommendation query. All active criteria AND
/// together; the quick filter composes with the rest.
#[derive(Debug, Clone, Default)]
pub struct RecommendationFilter {
    pub priority: Option<Priority>,
    pub difficulty: Option<Difficulty>,
    pub machine_id: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_savings: Option<f64>,
    pub max_payback: Option<f64>,
    pub quick: Option<QuickFilter>,
}

impl RecommendationFilter {
    /// True when every active constraint holds for the recommendation.
    pub fn matches(&self, rec: &Recommendation) -> bool {
        self.priority.map_or(true, |p| rec.priority == Some(p))
            && self.difficulty.map_or(true, |d| rec.difficulty == Some(d))
            && matches_text(self.machine_id.as_deref(), rec.machine_id.as_deref())
            && matches_text(self.category.as_deref(), rec.category.as_deref())
            && matches_search(
                self.search.as_deref(),
                &[rec.title.as_str(), rec.description.as_str()],
            )
            && matches_min(self.min_savings, rec.potential_savings)
            && matches_max(self.max_payback, rec.payback_period)
            && self.quick.map_or(true, |q| q.matches(rec))
    }
}

/// Sort strategy applied after filtering. Records missing the sort key
/// rank below everything regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationSort {
    /// Potential savings, highest first.
    #[default]
    Savings,
    /// Payback period, shortest first.
    Payback,
    /// Fixed priority rank table, highest rank first.
    Priority,
    /// Timestamp, most recent first.
    Newest,
}

impl FromStr for RecommendationSort {
    type Err = crate::models::ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings" => Ok(RecommendationSort::Savings),
            "payback" => Ok(RecommendationSort::Payback),
            "priority" => Ok(RecommendationSort::Priority),
            "newest" => Ok(RecommendationSort::Newest),
            _ => Err(crate::models::ParseLabelError {
                field: "sort",
                value: s.to_string(),
            }),
        }
    }
}

fn desc_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(f64::NEG_INFINITY);
    let b = b.unwrap_or(f64::NEG_INFINITY);
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn asc_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(f64::INFINITY);
    let b = b.unwrap_or(f64::INFINITY);
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Apply the filter, then a stable sort per the chosen strategy.
pub fn filter_recommendations(
    recommendations: &[Recommendation],
    filter: &RecommendationFilter,
    sort: RecommendationSort,
) -> Vec<Recommendation> {
    let mut kept: Vec<Recommendation> = recommendations
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();

    match sort {
        RecommendationSort::Savings => {
            kept.sort_by(|a, b| desc_f64(a.potential_savings, b.potential_savings));
        }
        RecommendationSort::Payback => {
            kept.sort_by(|a, b| asc_f64(a.payback_period, b.payback_period));
        }
        RecommendationSort::Priority => {
            kept.sort_by_key(|r| {
                std::cmp::Reverse(r.priority.map(|p| p.rank()).unwrap_or(0))
            });
        }
        RecommendationSort::Newest => {
            kept.sort_by_key(|r| {
                std::cmp::Reverse(
                    r.timestamp.map(|t| t.timestamp_millis()).unwrap_or(i64::MIN),
                )
            });
        }
    }

    kept
}
