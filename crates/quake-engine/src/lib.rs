//! Filter-and-sync engine for the Quakewatch earthquake map.
//!
//! Takes the session's earthquake events, derives the visible subset from
//! the user's filter bounds, and keeps every consumer of that subset (the
//! cluster layer, the heat layer, the table) consistent with it.
//!
//! # Modules
//!
//! - [`styler`] -- Magnitude/depth to marker radius and color bucket.
//! - [`filter`] -- Form parsing and the stable compound-predicate filter.
//! - [`store`] -- The once-per-session event store.
//! - [`layers`] -- Marker building, layer traits, and the
//!   [`LayerSynchronizer`] that rebuilds both layers atomically.
//! - [`table`] -- Stable sorting and fixed-size pagination.
//! - [`drawn`] -- The drawn-shapes group and its per-shape annotations.
//! - [`session`] -- [`MapSession`], the single owner of all of the above.
//! - [`legend`] -- Depth legend rows.
//! - [`buffer`] -- Buffer circles around events.
//! - [`format`] -- Popup, tooltip, time and cursor display strings.
//! - [`error`] -- Error types.

pub mod buffer;
pub mod drawn;
pub mod error;
pub mod filter;
pub mod format;
pub mod layers;
pub mod legend;
pub mod session;
pub mod store;
pub mod styler;
pub mod table;

// Re-export primary types at crate root.
pub use drawn::{DrawnItems, DrawnShape};
pub use error::EngineError;
pub use layers::{
    ClusterLayer, HeatLayer, HeatmapLayer, InfoTooltip, LayerSynchronizer, Marker,
    MarkerClusterGroup, TooltipController,
};
pub use session::{Focus, MapSession, SessionStatus};
pub use store::EventStore;
pub use table::{PAGE_SIZE, TablePage, TableRow, TableSort, TableView};
