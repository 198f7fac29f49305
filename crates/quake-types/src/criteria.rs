//! Filter criteria in both their raw form-field shape and their parsed
//! shape.
//!
//! Both structs default every field, so a payload that predates the date
//! range fields (magnitude and depth only) still deserializes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The six filter-form fields exactly as typed by the user.
///
/// An empty string means "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FilterForm {
    /// Lower magnitude bound.
    pub min_magnitude: String,
    /// Upper magnitude bound.
    pub max_magnitude: String,
    /// Lower depth bound in km.
    pub min_depth: String,
    /// Upper depth bound in km.
    pub max_depth: String,
    /// First day to include, `YYYY-MM-DD`.
    pub start_date: String,
    /// Day whose midnight ends the range, `YYYY-MM-DD`.
    pub end_date: String,
}

/// Parsed filter bounds. `None` imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FilterCriteria {
    /// Keep events with `magnitude >= min_magnitude`.
    pub min_magnitude: Option<f64>,
    /// Keep events with `magnitude <= max_magnitude`.
    pub max_magnitude: Option<f64>,
    /// Keep events with `depth >= min_depth`.
    pub min_depth: Option<f64>,
    /// Keep events with `depth <= max_depth`.
    pub max_depth: Option<f64>,
    /// Keep events at or after this instant.
    pub start_date: Option<DateTime<Utc>>,
    /// Keep events at or before this instant. A date-only entry is its
    /// literal UTC midnight, so the rest of that day is excluded.
    pub end_date: Option<DateTime<Utc>>,
}

impl FilterCriteria {
    /// Criteria with no bounds at all (the identity filter).
    pub const fn unbounded() -> Self {
        Self {
            min_magnitude: None,
            max_magnitude: None,
            min_depth: None,
            max_depth: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Whether every bound is unset.
    pub const fn is_unbounded(&self) -> bool {
        self.min_magnitude.is_none()
            && self.max_magnitude.is_none()
            && self.min_depth.is_none()
            && self.max_depth.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}
