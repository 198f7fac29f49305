//! The map session: single owner of all engine state.
//!
//! Holds the event store, the current criteria and visible set, the table
//! state, the drawn shapes, and the layer and tooltip handles. Layer
//! handles are passed in at construction instead of being wired up after
//! the fact, so there is no "set before first filter" ordering to get
//! wrong.
//!
//! Every mutation here is synchronous. A filter application recomputes
//! the visible set, resyncs both layers and updates the table row count
//! in one call.

use quake_types::{
    BufferCircle, EarthquakeEvent, EventId, FilterCriteria, FilterForm, LatLng, PageAction,
    SortKey,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::buffer;
use crate::drawn::DrawnItems;
use crate::error::EngineError;
use crate::filter;
use crate::format;
use crate::layers::{ClusterLayer, HeatLayer, LayerSynchronizer, TooltipController};
use crate::store::EventStore;
use crate::table::{TablePage, TableView};

/// Zoom level used when recentering on a table row.
pub const DEFAULT_FOCUS_ZOOM: u8 = 18;

/// Where to move the map after a table row is activated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Focus {
    /// The full selected event.
    pub event: EarthquakeEvent,
    /// New map center.
    pub center: LatLng,
    /// New zoom level.
    pub zoom: u8,
    /// Popup to open on the event's marker.
    pub popup_html: String,
}

/// Load and filter counters for the page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    /// Whether the initial feed load is still outstanding.
    pub loading: bool,
    /// Events in the store.
    pub total: usize,
    /// Events passing the current filter.
    pub visible: usize,
}

/// All state for one map view.
#[derive(Debug)]
pub struct MapSession<C, H, T> {
    store: EventStore,
    criteria: FilterCriteria,
    visible: Vec<EarthquakeEvent>,
    layers: LayerSynchronizer<C, H>,
    tooltip: T,
    table: TableView,
    drawn: DrawnItems,
    loading: bool,
    focus_zoom: u8,
}

impl<C, H, T> MapSession<C, H, T>
where
    C: ClusterLayer,
    H: HeatLayer,
    T: TooltipController,
{
    /// Session owning the given layers and tooltip control, awaiting its
    /// initial feed load.
    pub const fn new(cluster: C, heat: H, tooltip: T) -> Self {
        Self::with_layers(LayerSynchronizer::new(cluster, heat), tooltip)
    }

    /// Session around an existing synchronizer (possibly detached).
    pub const fn with_layers(layers: LayerSynchronizer<C, H>, tooltip: T) -> Self {
        Self {
            store: EventStore::new(),
            criteria: FilterCriteria::unbounded(),
            visible: Vec::new(),
            layers,
            tooltip,
            table: TableView::new(),
            drawn: DrawnItems::new(),
            loading: true,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
        }
    }

    /// Override the zoom used by [`activate_row`](Self::activate_row).
    #[must_use]
    pub const fn with_focus_zoom(mut self, zoom: u8) -> Self {
        self.focus_zoom = zoom;
        self
    }

    // -------------------------------------------------------------------
    // Ingestion
    // -------------------------------------------------------------------

    /// Store the session's events and show all of them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StoreAlreadyPopulated`] if events were
    /// already ingested.
    pub fn ingest(&mut self, events: Vec<EarthquakeEvent>) -> Result<usize, EngineError> {
        let count = self.store.populate(events)?;
        self.loading = false;
        self.criteria = FilterCriteria::unbounded();
        self.refresh();
        info!(count, "session ingested events");
        Ok(count)
    }

    /// Record that the initial load failed. The map stays usable with an
    /// empty dataset.
    pub fn mark_load_failed(&mut self) {
        warn!("initial event load failed; continuing with empty dataset");
        self.loading = false;
        if !self.store.is_populated() {
            let _ = self.store.populate(Vec::new());
        }
        self.refresh();
    }

    // -------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------

    /// Parse raw form fields and apply them.
    pub fn apply_form(&mut self, form: &FilterForm) -> &[EarthquakeEvent] {
        self.apply_criteria(filter::parse_form(form))
    }

    /// Apply criteria: recompute the visible set from the full store,
    /// resync both layers and clamp the table page.
    pub fn apply_criteria(&mut self, criteria: FilterCriteria) -> &[EarthquakeEvent] {
        self.criteria = criteria;
        self.refresh();
        &self.visible
    }

    fn refresh(&mut self) {
        self.visible = filter::apply(self.store.events(), &self.criteria);
        self.layers.sync(&self.visible);
        self.table.set_row_count(self.visible.len());
    }

    // -------------------------------------------------------------------
    // Table
    // -------------------------------------------------------------------

    /// Select or flip the table sort.
    pub fn sort_table(&mut self, key: SortKey) {
        self.table.toggle_sort(key);
    }

    /// Apply a pager button.
    pub fn navigate_table(&mut self, action: PageAction) -> bool {
        self.table.navigate(action)
    }

    /// Jump to a 1-based table page.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.table.go_to(page)
    }

    /// Render the current table page.
    pub fn table_page(&self) -> TablePage {
        self.table.render(&self.visible)
    }

    /// Resolve a clicked row (0-based within the current page) into a
    /// map focus carrying the full event.
    pub fn activate_row(&self, row: usize) -> Option<Focus> {
        self.table.activate(&self.visible, row).map(|event| Focus {
            event: event.clone(),
            center: event.position(),
            zoom: self.focus_zoom,
            popup_html: format::event_popup(event),
        })
    }

    // -------------------------------------------------------------------
    // Hover
    // -------------------------------------------------------------------

    /// Show the tooltip for a visible event's marker.
    pub fn hover(&mut self, id: &EventId) -> bool {
        self.layers.hover(id, &mut self.tooltip)
    }

    /// Hide the tooltip.
    pub fn unhover(&mut self) {
        self.tooltip.hide();
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Buffer circles around every stored event.
    pub fn buffers(&self, radius_km: &str) -> Vec<BufferCircle> {
        buffer::buffer_circles(self.store.events(), radius_km)
    }

    /// Header counters.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            loading: self.loading,
            total: self.store.len(),
            visible: self.visible.len(),
        }
    }

    /// The current visible set in feed order.
    pub fn visible(&self) -> &[EarthquakeEvent] {
        &self.visible
    }

    /// The criteria the visible set was computed with.
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The event store.
    pub const fn store(&self) -> &EventStore {
        &self.store
    }

    /// The layer synchronizer and its handles.
    pub const fn layers(&self) -> &LayerSynchronizer<C, H> {
        &self.layers
    }

    /// The tooltip control.
    pub const fn tooltip(&self) -> &T {
        &self.tooltip
    }

    /// Drawn shapes.
    pub const fn drawn(&self) -> &DrawnItems {
        &self.drawn
    }

    /// Drawn shapes, mutably.
    pub const fn drawn_mut(&mut self) -> &mut DrawnItems {
        &mut self.drawn
    }
}
