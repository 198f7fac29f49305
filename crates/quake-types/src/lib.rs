//! Shared type definitions for the Quakewatch earthquake map.
//!
//! This crate is the single source of truth for the data model used by the
//! filter engine, the spatial-query integration and the HTTP API. Types
//! flow downstream to `TypeScript` via `ts-rs` for the map front-end.
//!
//! # Modules
//!
//! - [`ids`] -- Event identifiers (feed-assigned) and drawn-shape identifiers
//! - [`enums`] -- Color buckets, sort keys, infrastructure categories
//! - [`structs`] -- Earthquake events, marker styles, heat points, summaries
//! - [`criteria`] -- Filter form fields and parsed filter bounds
//! - [`geometry`] -- Validated area-of-interest polygon
//! - [`error`] -- Validation errors

pub mod criteria;
pub mod enums;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use criteria::{FilterCriteria, FilterForm};
pub use enums::{
    CategorySet, ColorBucket, InfrastructureCategory, PageAction, ShapeKind, SortDirection,
    SortKey,
};
pub use error::PolygonError;
pub use geometry::Polygon;
pub use ids::{EventId, ShapeId};
pub use structs::{
    AreaAnnotation, AreaSummary, BufferCircle, EarthquakeEvent, HeatPoint, LatLng, LegendEntry,
    MarkerStyle,
};
