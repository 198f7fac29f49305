//! Earthquake feed ingestion for the Quakewatch map.
//!
//! # Modules
//!
//! - [`client`] -- HTTP fetching of the event feed and tectonic overlay
//! - [`geojson`] -- Feed document model and normalization into events
//! - [`error`] -- Feed errors

pub mod client;
pub mod error;
pub mod geojson;

pub use client::{DEFAULT_EVENTS_URL, DEFAULT_TECTONIC_URL, FeedClient, empty_feature_collection};
pub use error::FeedError;
pub use geojson::{FeatureCollection, normalize_feed};
