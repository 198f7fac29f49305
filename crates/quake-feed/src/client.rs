//! HTTP client for the event feed and the tectonic overlay.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use quake_types::EarthquakeEvent;

use crate::error::FeedError;
use crate::geojson::{FeatureCollection, normalize_feed};

/// Past-month, all-magnitude summary feed.
pub const DEFAULT_EVENTS_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson";

/// Plate-boundary overlay.
pub const DEFAULT_TECTONIC_URL: &str =
    "https://pixelpawnshop.github.io/earthquake_map/plates_boundaries.geojson";

/// Fetches the event feed and the tectonic overlay.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    events_url: String,
    tectonic_url: String,
}

impl FeedClient {
    /// Create a client for the two feed URLs.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Client`] if the HTTP client cannot be built.
    pub fn new(
        events_url: impl Into<String>,
        tectonic_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Client(e.to_string()))?;
        Ok(Self {
            client,
            events_url: events_url.into(),
            tectonic_url: tectonic_url.into(),
        })
    }

    /// The event feed URL.
    pub fn events_url(&self) -> &str {
        &self.events_url
    }

    /// The tectonic overlay URL.
    pub fn tectonic_url(&self) -> &str {
        &self.tectonic_url
    }

    /// Fetch and normalize the event feed.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] on transport failure, non-success status,
    /// or a body that is not a feature collection.
    pub async fn fetch_events(&self) -> Result<Vec<EarthquakeEvent>, FeedError> {
        let collection: FeatureCollection = self.get_json(&self.events_url).await?;
        let events = normalize_feed(collection);
        info!(count = events.len(), url = %self.events_url, "fetched event feed");
        Ok(events)
    }

    /// Fetch the plate-boundary overlay as an opaque GeoJSON value.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] on transport failure, non-success status,
    /// or a non-JSON body.
    pub async fn fetch_tectonic(&self) -> Result<serde_json::Value, FeedError> {
        let overlay: serde_json::Value = self.get_json(&self.tectonic_url).await?;
        info!(url = %self.tectonic_url, "fetched tectonic overlay");
        Ok(overlay)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        debug!(url, "requesting feed");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Request {
                url: url.to_owned(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| FeedError::Parse {
            url: url.to_owned(),
            message: e.to_string(),
        })
    }
}

/// An empty feature collection, used when the overlay is unavailable.
pub fn empty_feature_collection() -> serde_json::Value {
    serde_json::json!({"type": "FeatureCollection", "features": []})
}
