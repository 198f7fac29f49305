//! The filter engine: derives the visible subset of events from the store.
//!
//! Filtering is a stable, non-mutating pass. The visible set is always
//! recomputed from the full store, never patched incrementally.
//!
//! Bound semantics:
//!
//! | Bound | Test |
//! |-------|------|
//! | `min_magnitude` | `magnitude >= bound` |
//! | `max_magnitude` | `magnitude <= bound` |
//! | `min_depth` | `depth >= bound` |
//! | `max_depth` | `depth <= bound` |
//! | `start_date` | `time >= bound` (inclusive) |
//! | `end_date` | `time <= bound` (literal midnight, so later that day is out) |
//!
//! Inverted bounds (`min > max`) are not rejected; they simply match
//! nothing.

use chrono::{DateTime, NaiveDate, Utc};
use quake_types::{EarthquakeEvent, FilterCriteria, FilterForm};
use tracing::debug;

/// Return the events satisfying every present bound, in their original
/// relative order.
pub fn apply(events: &[EarthquakeEvent], criteria: &FilterCriteria) -> Vec<EarthquakeEvent> {
    let visible: Vec<EarthquakeEvent> = events
        .iter()
        .filter(|event| matches(event, criteria))
        .cloned()
        .collect();
    debug!(
        total = events.len(),
        visible = visible.len(),
        unbounded = criteria.is_unbounded(),
        "filter applied"
    );
    visible
}

/// Whether a single event satisfies every present bound.
pub fn matches(event: &EarthquakeEvent, criteria: &FilterCriteria) -> bool {
    criteria.min_magnitude.is_none_or(|min| event.magnitude >= min)
        && criteria.max_magnitude.is_none_or(|max| event.magnitude <= max)
        && criteria.min_depth.is_none_or(|min| event.depth >= min)
        && criteria.max_depth.is_none_or(|max| event.depth <= max)
        && criteria
            .start_date
            .is_none_or(|start| event.time >= start.timestamp_millis())
        && criteria
            .end_date
            .is_none_or(|end| event.time <= end.timestamp_millis())
}

/// Parse the six raw form fields into criteria.
///
/// Empty, whitespace-only, or malformed fields become `None`; a bad field
/// never turns into an error and never affects the other bounds.
pub fn parse_form(form: &FilterForm) -> FilterCriteria {
    FilterCriteria {
        min_magnitude: parse_number(&form.min_magnitude),
        max_magnitude: parse_number(&form.max_magnitude),
        min_depth: parse_number(&form.min_depth),
        max_depth: parse_number(&form.max_depth),
        start_date: parse_date(&form.start_date),
        end_date: parse_date(&form.end_date),
    }
}

/// Parse a numeric bound. Only finite values count as set.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!(raw = trimmed, "ignoring malformed numeric bound");
            None
        }
    }
}

/// Parse a date bound.
///
/// A bare `YYYY-MM-DD` resolves to midnight UTC of that day. A full
/// RFC 3339 timestamp is taken literally.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(instant) => Some(instant.with_timezone(&Utc)),
        Err(_) => {
            debug!(raw = trimmed, "ignoring malformed date bound");
            None
        }
    }
}
