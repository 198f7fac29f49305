//! Depth legend, listing the same buckets the styler assigns.

use quake_types::{ColorBucket, LegendEntry};

/// Legend rows, deepest bucket first.
pub fn depth_legend() -> Vec<LegendEntry> {
    ColorBucket::LEGEND_ORDER
        .iter()
        .map(|bucket| LegendEntry {
            bucket: *bucket,
            label: bucket.depth_label().to_owned(),
            color: bucket.hex().to_owned(),
        })
        .collect()
}
