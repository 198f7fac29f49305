//! Buffer circles drawn around every stored event.

use quake_types::{BufferCircle, EarthquakeEvent};

use crate::filter;

/// One circle per event at `radius_km`, given as raw form text.
///
/// Empty, malformed, or non-positive radii produce no circles.
pub fn buffer_circles(events: &[EarthquakeEvent], radius_km: &str) -> Vec<BufferCircle> {
    let Some(radius_km) = filter::parse_number(radius_km).filter(|r| *r > 0.0) else {
        return Vec::new();
    };
    let radius_m = radius_km * 1000.0;
    events
        .iter()
        .map(|event| BufferCircle {
            event_id: event.id.clone(),
            center: event.position(),
            radius_m,
        })
        .collect()
}
