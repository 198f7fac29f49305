//! Core data structs: events, derived marker/heat data, area summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::enums::ColorBucket;
use crate::ids::EventId;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LatLng {
    /// Latitude, -90 to 90.
    pub lat: f64,
    /// Longitude, -180 to 180.
    pub lng: f64,
}

impl LatLng {
    /// Create a position from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// ---------------------------------------------------------------------------
// EarthquakeEvent
// ---------------------------------------------------------------------------

/// A single earthquake record, immutable once ingested.
///
/// Coordinates are stored in `(lat, long, depth)` order regardless of the
/// order the feed delivered them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EarthquakeEvent {
    /// Feed-assigned identifier.
    pub id: EventId,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub long: f64,
    /// Hypocenter depth in kilometers. Negative values from the feed are
    /// kept as-is. NaN when the feed omitted it.
    #[serde(deserialize_with = "nan_if_null")]
    pub depth: f64,
    /// Magnitude, any sign. NaN when the feed reported none.
    #[serde(deserialize_with = "nan_if_null")]
    pub magnitude: f64,
    /// Free-text place description.
    pub title: String,
    /// Origin time in epoch milliseconds.
    #[ts(type = "number")]
    pub time: i64,
}

impl EarthquakeEvent {
    /// Origin time as a UTC timestamp, `None` if out of chrono's range.
    pub fn time_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }

    /// Position of the epicenter.
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.long)
    }
}

/// serde_json writes non-finite floats as `null`; read them back as NaN.
fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// ---------------------------------------------------------------------------
// Derived visual data
// ---------------------------------------------------------------------------

/// Visual style of an event marker, derived from `(magnitude, depth)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarkerStyle {
    /// Depth bucket the fill color comes from.
    pub color_bucket: ColorBucket,
    /// CSS fill color.
    pub fill_color: String,
    /// Marker radius in display pixels.
    pub radius: u32,
}

impl MarkerStyle {
    /// Build a style from its bucket and radius.
    pub fn new(color_bucket: ColorBucket, radius: u32) -> Self {
        Self {
            color_bucket,
            fill_color: color_bucket.hex().to_owned(),
            radius,
        }
    }

    /// Rendered icon diameter in pixels.
    pub const fn diameter(&self) -> u32 {
        self.radius.saturating_mul(2)
    }
}

/// One weighted sample in the heat layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HeatPoint {
    /// Latitude of the sample.
    pub lat: f64,
    /// Longitude of the sample.
    pub long: f64,
    /// Heat weight (the event magnitude).
    pub weight: f64,
}

/// One row of the depth legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LegendEntry {
    /// The bucket this row describes.
    pub bucket: ColorBucket,
    /// Depth range label, e.g. `60-90 km`.
    pub label: String,
    /// CSS color swatch.
    pub color: String,
}

/// A circle drawn around an event at a user-chosen buffer radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BufferCircle {
    /// The event the circle surrounds.
    pub event_id: EventId,
    /// Circle center.
    pub center: LatLng,
    /// Radius in meters.
    pub radius_m: f64,
}

// ---------------------------------------------------------------------------
// AreaSummary
// ---------------------------------------------------------------------------

/// Infrastructure counts and surface area of one drawn polygon.
///
/// Counts come from third-party map data and are an estimate, not ground
/// truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AreaSummary {
    /// Element count per category name. Every queried category is present,
    /// including those with zero matches.
    pub counts: BTreeMap<String, u64>,
    /// Geodesic area of the polygon in square kilometers.
    pub area_km2: f64,
}

impl AreaSummary {
    /// Count for a category name, zero when absent.
    pub fn count(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// AreaAnnotation
// ---------------------------------------------------------------------------

/// Popup state attached to a drawn polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AreaAnnotation {
    /// The area query has not resolved yet.
    Pending,
    /// The query resolved and was summarized.
    Resolved {
        /// Counts and area.
        summary: AreaSummary,
        /// Rendered popup text.
        popup: String,
    },
    /// The query failed; the popup carries the error message.
    Failed {
        /// Rendered popup text.
        popup: String,
    },
}

impl AreaAnnotation {
    /// Popup text shown on the shape.
    pub fn popup(&self) -> &str {
        match self {
            Self::Pending => "Fetching data...",
            Self::Resolved { popup, .. } | Self::Failed { popup } => popup,
        }
    }

    /// The summary, when the query resolved.
    pub const fn summary(&self) -> Option<&AreaSummary> {
        match self {
            Self::Resolved { summary, .. } => Some(summary),
            Self::Pending | Self::Failed { .. } => None,
        }
    }
}
