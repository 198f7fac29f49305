//! Cluster and heat layer synchronization.
//!
//! The [`LayerSynchronizer`] is the only writer of the two managed map
//! layers. Each [`sync`](LayerSynchronizer::sync) builds the complete
//! replacement content first and only then swaps it in, so a caller never
//! observes a layer holding a mix of old and new events.
//!
//! Layer handles are owned by the synchronizer. Until they are attached
//! (map setup not finished), syncing is a silent no-op.

use quake_types::{EarthquakeEvent, EventId, HeatPoint, LatLng, MarkerStyle};
use serde::Serialize;
use tracing::{debug, trace};

use crate::format;
use crate::styler;

// ---------------------------------------------------------------------------
// Marker
// ---------------------------------------------------------------------------

/// A fully built event marker, ready to hand to the map surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// The event this marker represents.
    pub event_id: EventId,
    /// Marker position.
    pub position: LatLng,
    /// Fill color and radius.
    pub style: MarkerStyle,
    /// Stacking weight; larger magnitudes render on top.
    pub z_index_offset: i64,
    /// Popup HTML (magnitude, title, depth, time).
    pub popup_html: String,
    /// Hover tooltip HTML.
    pub tooltip_html: String,
}

impl Marker {
    /// Build the marker for an event.
    pub fn for_event(event: &EarthquakeEvent) -> Self {
        Self {
            event_id: event.id.clone(),
            position: event.position(),
            style: styler::style(event.magnitude, event.depth),
            z_index_offset: z_index_offset(event.magnitude),
            popup_html: format::event_popup(event),
            tooltip_html: format::event_heading(event),
        }
    }
}

/// `magnitude * 1000`, with NaN stacking at zero.
#[allow(clippy::cast_possible_truncation)]
fn z_index_offset(magnitude: f64) -> i64 {
    if magnitude.is_finite() {
        (magnitude * 1000.0).round() as i64
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Layer traits
// ---------------------------------------------------------------------------

/// A marker layer that groups nearby markers into clusters.
pub trait ClusterLayer {
    /// Replace the layer's entire contents with `markers`.
    fn replace_markers(&mut self, markers: Vec<Marker>);

    /// All markers currently on the layer.
    fn markers(&self) -> &[Marker];

    /// Find the marker for an event.
    fn marker(&self, id: &EventId) -> Option<&Marker> {
        self.markers().iter().find(|m| &m.event_id == id)
    }
}

/// A weighted heat-density layer.
pub trait HeatLayer {
    /// Replace the layer's entire point list.
    fn replace_points(&mut self, points: Vec<HeatPoint>);

    /// All points currently on the layer.
    fn points(&self) -> &[HeatPoint];
}

/// The hover-info control a marker writes its tooltip into.
pub trait TooltipController {
    /// Show the control with the given HTML.
    fn show(&mut self, html: &str);

    /// Hide the control.
    fn hide(&mut self);
}

// ---------------------------------------------------------------------------
// In-memory layer implementations
// ---------------------------------------------------------------------------

/// Marker-cluster layer content as served to the map front-end.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkerClusterGroup {
    markers: Vec<Marker>,
}

impl ClusterLayer for MarkerClusterGroup {
    fn replace_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

/// Heat layer content as served to the map front-end.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeatmapLayer {
    points: Vec<HeatPoint>,
}

impl HeatLayer for HeatmapLayer {
    fn replace_points(&mut self, points: Vec<HeatPoint>) {
        self.points = points;
    }

    fn points(&self) -> &[HeatPoint] {
        &self.points
    }
}

/// Hover-info control state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InfoTooltip {
    /// Whether the control is displayed.
    pub visible: bool,
    /// Current content.
    pub html: String,
}

impl TooltipController for InfoTooltip {
    fn show(&mut self, html: &str) {
        html.clone_into(&mut self.html);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

// ---------------------------------------------------------------------------
// LayerSynchronizer
// ---------------------------------------------------------------------------

/// The pair of layers kept in lockstep with the visible set.
#[derive(Debug, Clone, Default)]
pub struct LayerHandles<C, H> {
    /// Clustered point markers.
    pub cluster: C,
    /// Weighted heat layer.
    pub heat: H,
}

/// Keeps the cluster and heat layers consistent with the visible set.
#[derive(Debug, Clone)]
pub struct LayerSynchronizer<C, H> {
    handles: Option<LayerHandles<C, H>>,
}

impl<C: ClusterLayer, H: HeatLayer> LayerSynchronizer<C, H> {
    /// Synchronizer that owns the given layers.
    pub const fn new(cluster: C, heat: H) -> Self {
        Self {
            handles: Some(LayerHandles { cluster, heat }),
        }
    }

    /// Synchronizer with no layers yet; every sync is a no-op until
    /// [`attach`](Self::attach) is called.
    pub const fn detached() -> Self {
        Self { handles: None }
    }

    /// Attach layers once map setup completes.
    pub fn attach(&mut self, cluster: C, heat: H) {
        self.handles = Some(LayerHandles { cluster, heat });
    }

    /// Whether layers are attached.
    pub const fn is_attached(&self) -> bool {
        self.handles.is_some()
    }

    /// Rebuild both layers from `visible`.
    ///
    /// Returns `false` (and changes nothing) when no layers are attached.
    pub fn sync(&mut self, visible: &[EarthquakeEvent]) -> bool {
        let Some(handles) = self.handles.as_mut() else {
            trace!("layer sync skipped: layers not attached");
            return false;
        };

        let markers: Vec<Marker> = visible.iter().map(Marker::for_event).collect();
        let points: Vec<HeatPoint> = visible
            .iter()
            .map(|event| HeatPoint {
                lat: event.lat,
                long: event.long,
                weight: event.magnitude,
            })
            .collect();

        handles.cluster.replace_markers(markers);
        handles.heat.replace_points(points);
        debug!(count = visible.len(), "layers synchronized");
        true
    }

    /// Show the hover tooltip of an event's marker.
    ///
    /// Returns `false` when the event has no marker on the layer.
    pub fn hover<T: TooltipController>(&self, id: &EventId, tooltip: &mut T) -> bool {
        match self.cluster().and_then(|cluster| cluster.marker(id)) {
            Some(marker) => {
                tooltip.show(&marker.tooltip_html);
                true
            }
            None => false,
        }
    }

    /// The cluster layer, if attached.
    pub fn cluster(&self) -> Option<&C> {
        self.handles.as_ref().map(|h| &h.cluster)
    }

    /// The heat layer, if attached.
    pub fn heat(&self) -> Option<&H> {
        self.handles.as_ref().map(|h| &h.heat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, magnitude: f64, depth: f64) -> EarthquakeEvent {
        EarthquakeEvent {
            id: EventId::from(id),
            lat: 10.0,
            long: 20.0,
            depth,
            magnitude,
            title: format!("quake {id}"),
            time: 1_714_521_600_000,
        }
    }

    fn synced() -> LayerSynchronizer<MarkerClusterGroup, HeatmapLayer> {
        LayerSynchronizer::new(MarkerClusterGroup::default(), HeatmapLayer::default())
    }

    fn layer_counts(sync: &LayerSynchronizer<MarkerClusterGroup, HeatmapLayer>) -> (usize, usize) {
        (
            sync.cluster().map_or(0, |c| c.markers().len()),
            sync.heat().map_or(0, |h| h.points().len()),
        )
    }

    #[test]
    fn sync_replaces_previous_contents() {
        let mut layers = synced();
        let first = vec![event("a", 5.0, 5.0), event("b", 6.0, 50.0), event("c", 2.0, 1.0)];
        assert!(layers.sync(&first));
        assert_eq!(layer_counts(&layers), (3, 3));

        let second = vec![event("b", 6.0, 50.0)];
        assert!(layers.sync(&second));
        assert_eq!(layer_counts(&layers), (1, 1));
        assert!(layers.cluster().and_then(|c| c.marker(&EventId::from("a"))).is_none());
    }

    #[test]
    fn detached_sync_is_a_noop() {
        let mut layers: LayerSynchronizer<MarkerClusterGroup, HeatmapLayer> =
            LayerSynchronizer::detached();
        assert!(!layers.sync(&[event("a", 5.0, 5.0)]));
        assert!(layers.cluster().is_none());

        layers.attach(MarkerClusterGroup::default(), HeatmapLayer::default());
        assert!(layers.sync(&[event("a", 5.0, 5.0)]));
        assert_eq!(layer_counts(&layers), (1, 1));
    }

    #[test]
    fn heat_weight_is_magnitude() {
        let mut layers = synced();
        layers.sync(&[event("a", 6.5, 5.0)]);
        let point = layers.heat().and_then(|h| h.points().first().copied());
        assert_eq!(
            point,
            Some(HeatPoint {
                lat: 10.0,
                long: 20.0,
                weight: 6.5
            })
        );
    }

    #[test]
    fn marker_stacks_by_magnitude() {
        let big = Marker::for_event(&event("big", 7.2, 100.0));
        let small = Marker::for_event(&event("small", 3.1, 5.0));
        assert!(big.z_index_offset > small.z_index_offset);
        assert_eq!(big.z_index_offset, 7200);
        assert_eq!(big.style.radius, 16);
        assert_eq!(big.style.fill_color, "#6a0d83");
        assert_eq!(Marker::for_event(&event("nan", f64::NAN, 0.0)).z_index_offset, 0);
    }

    #[test]
    fn hover_routes_through_tooltip_handle() {
        let mut layers = synced();
        layers.sync(&[event("a", 4.5, 5.0)]);
        let mut tooltip = InfoTooltip::default();

        assert!(layers.hover(&EventId::from("a"), &mut tooltip));
        assert!(tooltip.visible);
        assert_eq!(tooltip.html, "<b>4.5 quake a</b>");

        tooltip.hide();
        assert!(!tooltip.visible);
        assert!(!layers.hover(&EventId::from("missing"), &mut tooltip));
        assert!(!tooltip.visible);
    }
}
