//! HTTP client for the spatial-query service.
//!
//! Queries are sent as `GET {endpoint}?data={encoded query}`. A non-success
//! status or an unparseable body is an error; [`OverpassClient::resolve`]
//! folds every error into a failed annotation so a polygon never stays
//! pending.

use std::time::Duration;

use quake_types::{AreaAnnotation, CategorySet, Polygon};
use tracing::{debug, info, warn};

use crate::error::OverpassError;
use crate::query::AreaQuery;
use crate::response::QueryResult;
use crate::summary::{render_popup, summarize};

/// Public interpreter endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Popup text shown when an area query fails for any reason.
pub const ERROR_POPUP: &str = "Error fetching building data";

/// Client for area-of-interest infrastructure queries.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    endpoint: String,
    categories: CategorySet,
}

impl OverpassClient {
    /// Create a client for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Client`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        categories: CategorySet,
    ) -> Result<Self, OverpassError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OverpassError::Client(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            categories,
        })
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The categories every query asks for.
    pub const fn categories(&self) -> CategorySet {
        self.categories
    }

    /// Full request URL for a query.
    pub fn request_url(&self, query: &AreaQuery) -> String {
        format!("{}?data={}", self.endpoint, query.encoded())
    }

    /// Send a query and parse the response document.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Request`] when no response arrives,
    /// [`OverpassError::Status`] on a non-success status, and
    /// [`OverpassError::Parse`] when the body is not a result document.
    pub async fn execute(&self, query: &AreaQuery) -> Result<QueryResult, OverpassError> {
        let url = self.request_url(query);
        debug!(vertices = query.polygon().len(), "sending area query");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OverpassError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OverpassError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<QueryResult>()
            .await
            .map_err(|e| OverpassError::Parse(e.to_string()))
    }

    /// Query and summarize a polygon, producing its final annotation.
    ///
    /// The summarizer only runs on a successful response. Any failure
    /// yields [`AreaAnnotation::Failed`] with [`ERROR_POPUP`].
    pub async fn resolve(&self, polygon: &Polygon) -> AreaAnnotation {
        let query = AreaQuery::new(polygon.clone(), self.categories);
        match self.execute(&query).await {
            Ok(result) => {
                let summary = summarize(&result, polygon, self.categories);
                info!(
                    elements = result.elements.len(),
                    area_km2 = summary.area_km2,
                    "area query resolved"
                );
                let popup = render_popup(&summary, self.categories);
                AreaAnnotation::Resolved { summary, popup }
            }
            Err(e) => {
                warn!(error = %e, "area query failed");
                AreaAnnotation::Failed {
                    popup: ERROR_POPUP.to_owned(),
                }
            }
        }
    }
}
