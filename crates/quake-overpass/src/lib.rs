//! Area-of-interest infrastructure queries for the Quakewatch map.
//!
//! A drawn polygon is turned into a spatial query, sent to an Overpass
//! interpreter, and the result is reduced to per-category counts plus the
//! polygon's geodesic area.
//!
//! # Modules
//!
//! - [`query`] -- Query construction and payload encoding
//! - [`client`] -- HTTP transport and annotation resolution
//! - [`response`] -- Result document model
//! - [`summary`] -- Counting, geodesic area and popup rendering
//! - [`error`] -- Query errors

pub mod client;
pub mod error;
pub mod query;
pub mod response;
pub mod summary;

pub use client::{DEFAULT_ENDPOINT, ERROR_POPUP, OverpassClient};
pub use error::OverpassError;
pub use query::{AreaQuery, encode_payload};
pub use response::{Element, ElementKind, QueryResult};
pub use summary::{format_thousands, geodesic_area_km2, render_popup, summarize};
