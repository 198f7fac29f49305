//! Event feed documents and normalization.
//!
//! The feed is a GeoJSON `FeatureCollection` whose point coordinates are
//! ordered `[longitude, latitude, depth]`. Normalization flips them into
//! the `(lat, long, depth)` order the rest of the system uses.

use serde::Deserialize;
use tracing::warn;

use quake_types::{EarthquakeEvent, EventId};

/// A feature collection as published by the event feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    /// One feature per earthquake.
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A single earthquake feature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    /// Feed-assigned identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Descriptive properties.
    #[serde(default)]
    pub properties: FeatureProperties,
    /// Point geometry.
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
}

/// The subset of feature properties the map uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    /// Magnitude. The feed publishes `null` for some events.
    #[serde(default)]
    pub mag: Option<f64>,
    /// Human-readable location.
    #[serde(default)]
    pub place: Option<String>,
    /// Origin time, epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
}

/// `[longitude, latitude, depth]`, any of which may be `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointGeometry {
    /// Raw coordinate array.
    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}

/// Convert a feature collection into earthquake events.
///
/// Features without an origin time or without both horizontal coordinates
/// are skipped. A missing magnitude or depth becomes NaN, a missing place
/// an empty title, and a missing id `feed-{index}`.
pub fn normalize_feed(collection: FeatureCollection) -> Vec<EarthquakeEvent> {
    let total = collection.features.len();
    let events: Vec<EarthquakeEvent> = collection
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| normalize_feature(index, feature))
        .collect();

    if events.len() < total {
        warn!(
            total,
            kept = events.len(),
            skipped = total.saturating_sub(events.len()),
            "skipped malformed feed features"
        );
    }
    events
}

fn normalize_feature(index: usize, feature: Feature) -> Option<EarthquakeEvent> {
    let id = feature
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("feed-{index}"));

    let Some(time) = feature.properties.time else {
        warn!(index, id = %id, "feature has no origin time");
        return None;
    };

    let coordinates = feature.geometry.map(|g| g.coordinates).unwrap_or_default();
    let (Some(Some(long)), Some(Some(lat))) = (coordinates.first(), coordinates.get(1)) else {
        warn!(index, id = %id, "feature has no usable coordinates");
        return None;
    };
    let depth = coordinates.get(2).copied().flatten().unwrap_or(f64::NAN);

    Some(EarthquakeEvent {
        id: EventId::from(id),
        lat: *lat,
        long: *long,
        depth,
        magnitude: feature.properties.mag.unwrap_or(f64::NAN),
        title: feature.properties.place.unwrap_or_default(),
        time,
    })
}
