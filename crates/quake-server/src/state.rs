//! Shared application state for the Quakewatch API server.
//!
//! The map session sits behind a single async mutex: each filter, table or
//! hover request runs start to finish under one acquisition, so concurrent
//! requests observe whole updates and the last one applied wins. Area
//! queries hold the lock only to register and to annotate their shape,
//! never across the network call.

use quake_engine::{HeatmapLayer, InfoTooltip, MapSession, MarkerClusterGroup};
use quake_overpass::{OverpassClient, OverpassError};
use tokio::sync::{Mutex, RwLock};

use crate::config::{MapSettings, QuakeConfig};

/// The concrete session type served over HTTP.
pub type Session = MapSession<MarkerClusterGroup, HeatmapLayer, InfoTooltip>;

/// Shared state for all handlers.
#[derive(Debug)]
pub struct AppState {
    /// The map session (store, filter state, layers, table, drawn shapes).
    pub session: Mutex<Session>,
    /// Client for area-of-interest queries.
    pub overpass: OverpassClient,
    /// Plate-boundary overlay, an empty collection until fetched.
    pub tectonic: RwLock<serde_json::Value>,
    /// Map options handed to the front-end.
    pub map: MapSettings,
}

impl AppState {
    /// Fresh state awaiting its initial feed load.
    pub fn new(overpass: OverpassClient, map: MapSettings) -> Self {
        let session = MapSession::new(
            MarkerClusterGroup::default(),
            HeatmapLayer::default(),
            InfoTooltip::default(),
        )
        .with_focus_zoom(map.focus_zoom);
        Self {
            session: Mutex::new(session),
            overpass,
            tectonic: RwLock::new(quake_feed::empty_feature_collection()),
            map,
        }
    }

    /// Build state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Client`] if the query client cannot be
    /// built.
    pub fn from_config(config: &QuakeConfig) -> Result<Self, OverpassError> {
        let overpass = OverpassClient::new(
            config.overpass.endpoint.clone(),
            config.overpass.timeout(),
            config.overpass.categories,
        )?;
        Ok(Self::new(overpass, config.map.clone()))
    }
}
