//! Predicate primitives shared by the domain filters

use chrono::{DateTime, Utc};

/// Exact match on an optional text field, case-insensitive.
///
/// An inactive constraint (`None`) accepts everything; an active one
/// rejects records where the field is absent.
pub fn matches_text(selected: Option<&str>, value: Option<&str>) -> bool {
    match selected {
        None => true,
        Some(sel) => value.is_some_and(|v| v.eq_ignore_ascii_case(sel)),
    }
}

/// Case-insensitive substring search across a fixed set of text fields.
/// An empty or absent term accepts everything.
pub fn matches_search(term: Option<&str>, fields: &[&str]) -> bool {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return true;
    };
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Lower-bound threshold. Records missing the field fail an active bound.
pub fn matches_min(min: Option<f64>, value: Option<f64>) -> bool {
    match min {
        None => true,
        Some(min) => value.is_some_and(|v| v >= min),
    }
}

/// Upper-bound threshold. Records missing the field fail an active bound.
pub fn matches_max(max: Option<f64>, value: Option<f64>) -> bool {
    match max {
        None => true,
        Some(max) => value.is_some_and(|v| v <= max),
    }
}

/// Inclusive date-range check, unbounded on whichever side is omitted.
/// A record without a timestamp fails once either bound is supplied.
pub fn within_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    timestamp: Option<DateTime<Utc>>,
) -> bool {
    if start.is_none() && end.is_none() {
        return true;
    }
    let Some(ts) = timestamp else {
        return false;
    };
    start.map_or(true, |s| ts >= s) && end.map_or(true, |e| ts <= e)
}
