//! Enumeration types shared by the engine, the query integration and the
//! map front-end.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Marker color buckets
// ---------------------------------------------------------------------------

/// Depth-derived color bucket for an event marker.
///
/// The legend enumerates the same five buckets, deepest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ColorBucket {
    /// Shallow, 10 km or less (yellow).
    A,
    /// Deeper than 10 km (orange).
    B,
    /// Deeper than 30 km (coral).
    C,
    /// Deeper than 60 km (pink).
    D,
    /// Deeper than 90 km (violet).
    E,
}

impl ColorBucket {
    /// All buckets in legend order (deepest first).
    pub const LEGEND_ORDER: [Self; 5] = [Self::E, Self::D, Self::C, Self::B, Self::A];

    /// CSS fill color of the bucket.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::A => "#eeaf61",
            Self::B => "#fb9062",
            Self::C => "#ee5d6c",
            Self::D => "#ce4993",
            Self::E => "#6a0d83",
        }
    }

    /// Depth range label shown in the legend.
    pub const fn depth_label(self) -> &'static str {
        match self {
            Self::A => "< 10 km",
            Self::B => "10-30 km",
            Self::C => "30-60 km",
            Self::D => "60-90 km",
            Self::E => "> 90 km",
        }
    }
}

// ---------------------------------------------------------------------------
// Table sorting
// ---------------------------------------------------------------------------

/// Columns the event table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SortKey {
    /// Sort by event magnitude.
    Magnitude,
    /// Sort by hypocenter depth.
    Depth,
}

/// Direction of the active table sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Relative navigation request for the table pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PageAction {
    /// Jump to page 1.
    First,
    /// One page back.
    Prev,
    /// One page forward.
    Next,
    /// Jump to the last page.
    Last,
}

// ---------------------------------------------------------------------------
// Area queries
// ---------------------------------------------------------------------------

/// Infrastructure category counted inside an area of interest.
///
/// Each category is matched by a single OpenStreetMap tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum InfrastructureCategory {
    /// `amenity=fire_station`
    FireStation,
    /// `amenity=police`
    Police,
    /// `amenity=hospital`
    Hospital,
    /// `amenity=school`
    School,
    /// `amenity=pharmacy`
    Pharmacy,
    /// `amenity=fuel`
    Fuel,
    /// Any feature carrying a `building` tag.
    Building,
}

impl InfrastructureCategory {
    /// Tag key the category is matched on.
    pub const fn tag_key(self) -> &'static str {
        match self {
            Self::Building => "building",
            _ => "amenity",
        }
    }

    /// Required tag value, or `None` when any value matches.
    pub const fn tag_value(self) -> Option<&'static str> {
        match self {
            Self::FireStation => Some("fire_station"),
            Self::Police => Some("police"),
            Self::Hospital => Some("hospital"),
            Self::School => Some("school"),
            Self::Pharmacy => Some("pharmacy"),
            Self::Fuel => Some("fuel"),
            Self::Building => None,
        }
    }

    /// Stable name used as the key in summary counts.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FireStation => "fire_station",
            Self::Police => "police",
            Self::Hospital => "hospital",
            Self::School => "school",
            Self::Pharmacy => "pharmacy",
            Self::Fuel => "fuel",
            Self::Building => "building",
        }
    }

    /// Plural label used in the polygon popup.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FireStation => "Fire Stations",
            Self::Police => "Police Stations",
            Self::Hospital => "Hospitals",
            Self::School => "Schools",
            Self::Pharmacy => "Pharmacies",
            Self::Fuel => "Gas Stations",
            Self::Building => "Buildings",
        }
    }
}

/// The fixed set of categories an area query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CategorySet {
    /// Emergency-relevant amenities: fire stations, police, hospitals,
    /// schools, pharmacies and fuel stations.
    #[default]
    Infrastructure,
    /// Every building regardless of use.
    Buildings,
}

impl CategorySet {
    /// Categories in popup display order.
    pub const fn categories(self) -> &'static [InfrastructureCategory] {
        match self {
            Self::Infrastructure => &[
                InfrastructureCategory::FireStation,
                InfrastructureCategory::Police,
                InfrastructureCategory::Hospital,
                InfrastructureCategory::School,
                InfrastructureCategory::Pharmacy,
                InfrastructureCategory::Fuel,
            ],
            Self::Buildings => &[InfrastructureCategory::Building],
        }
    }
}

// ---------------------------------------------------------------------------
// Drawn shapes
// ---------------------------------------------------------------------------

/// Kind of shape emitted by the draw toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ShapeKind {
    /// Free-form polygon. Triggers an area query.
    #[default]
    Polygon,
    /// Axis-aligned rectangle. Stored without a query.
    Rectangle,
}
