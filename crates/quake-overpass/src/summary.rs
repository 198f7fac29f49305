//! Area summaries: category counts plus geodesic surface area.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use geo::{GeodesicArea, LineString};
use quake_types::{AreaSummary, CategorySet, InfrastructureCategory, Polygon};

use crate::response::{Element, QueryResult};

/// Square meters per square kilometer.
const M2_PER_KM2: f64 = 1_000_000.0;

/// Summarize a query result for `polygon`.
///
/// Every category in `categories` appears in the counts, zero included.
/// Untagged skeleton elements and elements matching no category are not
/// counted.
pub fn summarize(result: &QueryResult, polygon: &Polygon, categories: CategorySet) -> AreaSummary {
    let mut counts: BTreeMap<String, u64> = categories
        .categories()
        .iter()
        .map(|c| (c.name().to_owned(), 0))
        .collect();

    for category in result
        .elements
        .iter()
        .filter_map(|element| classify(element, categories))
    {
        if let Some(count) = counts.get_mut(category.name()) {
            *count = count.saturating_add(1);
        }
    }

    AreaSummary {
        counts,
        area_km2: geodesic_area_km2(polygon),
    }
}

/// The first category in `categories` whose tag the element carries.
fn classify(element: &Element, categories: CategorySet) -> Option<InfrastructureCategory> {
    categories.categories().iter().copied().find(|category| {
        element
            .tag(category.tag_key())
            .is_some_and(|value| category.tag_value().is_none_or(|want| want == value))
    })
}

/// Geodesic area of the polygon on the WGS84 ellipsoid, in km².
pub fn geodesic_area_km2(polygon: &Polygon) -> f64 {
    let ring: LineString<f64> = polygon
        .vertices()
        .iter()
        .map(|v| (v.lng, v.lat))
        .collect::<Vec<_>>()
        .into();
    let shape = geo::Polygon::new(ring, Vec::new());
    shape.geodesic_area_unsigned() / M2_PER_KM2
}

/// Render an integer with `,` thousands separators.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut groups: Vec<&str> = digits
        .as_bytes()
        .rchunks(3)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect();
    groups.reverse();
    groups.join(",")
}

/// Area rounded to whole km² for display.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_km2(area_km2: f64) -> u64 {
    if area_km2.is_finite() && area_km2 > 0.0 {
        area_km2.round() as u64
    } else {
        0
    }
}

/// Popup text for a resolved summary: one line per category in display
/// order, then the rounded area.
pub fn render_popup(summary: &AreaSummary, categories: CategorySet) -> String {
    let mut popup = String::new();
    for category in categories.categories() {
        let _ = write!(
            popup,
            "{}: {}<br>",
            category.label(),
            format_thousands(summary.count(category.name()))
        );
    }
    let _ = write!(
        popup,
        "Area: {} km²",
        format_thousands(rounded_km2(summary.area_km2))
    );
    popup
}
