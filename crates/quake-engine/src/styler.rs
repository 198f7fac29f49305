//! Marker styling: magnitude drives the radius, depth drives the color.
//!
//! Both ladders are total. NaN falls through every comparison and lands in
//! the final branch, which the legend relies on.

use quake_types::{ColorBucket, MarkerStyle};

/// Magnitude thresholds (inclusive lower bounds) and their radii, checked
/// top to bottom.
const RADIUS_LADDER: [(f64, u32); 5] = [(8.0, 18), (7.0, 16), (6.1, 14), (5.5, 12), (2.5, 10)];

/// Radius for anything below the last threshold, or NaN.
const BASE_RADIUS: u32 = 8;

/// Depth thresholds in km (strict lower bounds) and their buckets.
const DEPTH_LADDER: [(f64, ColorBucket); 4] = [
    (90.0, ColorBucket::E),
    (60.0, ColorBucket::D),
    (30.0, ColorBucket::C),
    (10.0, ColorBucket::B),
];

/// Every radius [`style`] can produce, largest first.
pub const RADII: [u32; 6] = [18, 16, 14, 12, 10, 8];

/// Style for an event of the given magnitude and depth.
pub fn style(magnitude: f64, depth: f64) -> MarkerStyle {
    MarkerStyle::new(color_bucket(depth), radius(magnitude))
}

/// Marker radius for a magnitude.
pub fn radius(magnitude: f64) -> u32 {
    RADIUS_LADDER
        .iter()
        .find(|(threshold, _)| magnitude >= *threshold)
        .map_or(BASE_RADIUS, |(_, radius)| *radius)
}

/// Color bucket for a depth in km.
pub fn color_bucket(depth: f64) -> ColorBucket {
    DEPTH_LADDER
        .iter()
        .find(|(threshold, _)| depth > *threshold)
        .map_or(ColorBucket::A, |(_, bucket)| *bucket)
}
