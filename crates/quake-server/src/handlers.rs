//! REST API endpoint handlers for the Quakewatch server.
//!
//! Every handler that touches the map session does all of its work under a
//! single lock acquisition, except polygon creation which releases the lock
//! while its area query is in flight.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/status` | Loading flag plus stored and visible counts |
//! | `GET` | `/api/map` | Map, cluster and heat options |
//! | `GET` | `/api/legend` | Depth color legend |
//! | `POST` | `/api/filter` | Apply filter form fields |
//! | `GET` | `/api/events` | Visible events |
//! | `GET` | `/api/layers` | Cluster markers and heat points |
//! | `GET` | `/api/table` | Current table page |
//! | `POST` | `/api/table/sort` | Select or flip the sort column |
//! | `POST` | `/api/table/page` | Page navigation |
//! | `POST` | `/api/table/rows/:row/activate` | Map focus for a row |
//! | `POST` | `/api/hover/:id` | Show an event's tooltip |
//! | `DELETE` | `/api/hover` | Hide the tooltip |
//! | `GET` | `/api/tectonic` | Plate-boundary overlay |
//! | `GET` | `/api/buffers` | Buffer circles around every event |
//! | `GET` | `/api/areas` | Drawn shapes and their annotations |
//! | `POST` | `/api/areas` | Draw a shape |
//! | `DELETE` | `/api/areas/:id` | Remove a shape |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use quake_engine::{
    ClusterLayer, DrawnShape, Focus, HeatLayer, InfoTooltip, Marker, SessionStatus, TablePage,
    legend,
};
use quake_types::{
    BufferCircle, EarthquakeEvent, EventId, FilterCriteria, FilterForm, HeatPoint, LatLng,
    LegendEntry, PageAction, Polygon, ShapeId, ShapeKind, SortKey,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::MapSettings;
use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Response for `POST /api/filter`.
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    /// Size of the new visible set.
    pub visible: usize,
    /// The criteria that were applied.
    pub criteria: FilterCriteria,
}

/// Response for `GET /api/layers`.
#[derive(Debug, Serialize)]
pub struct LayersResponse {
    /// One marker per visible event.
    pub markers: Vec<Marker>,
    /// One heat point per visible event.
    pub heat: Vec<HeatPoint>,
}

/// Body for `POST /api/table/sort`.
#[derive(Debug, Deserialize)]
pub struct SortRequest {
    /// Column to sort by.
    pub key: SortKey,
}

/// Body for `POST /api/table/page`. Exactly one field is expected.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// First, previous, next or last page.
    pub action: Option<PageAction>,
    /// A specific 1-based page number.
    pub page: Option<usize>,
}

/// Response for `POST /api/table/page`.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    /// Whether the current page changed.
    pub moved: bool,
    /// The (possibly unchanged) current page.
    pub table: TablePage,
}

/// Query parameters for `GET /api/buffers`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BufferQuery {
    /// Radius in kilometers, as typed by the user.
    pub radius_km: String,
}

/// Body for `POST /api/areas`.
#[derive(Debug, Deserialize)]
pub struct CreateAreaRequest {
    /// Drawing tool that produced the shape.
    #[serde(default)]
    pub kind: ShapeKind,
    /// Ring vertices as `[lat, lng]` pairs.
    pub vertices: Vec<[f64; 2]>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing load status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = state.session.lock().await.status();
    let load_state = if status.loading { "LOADING" } else { "READY" };
    let total = status.total;
    let visible = status.visible;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Quakewatch</title>
    <style>
        body {{
            background: #10141a;
            color: #d0d7de;
            font-family: system-ui, sans-serif;
            padding: 2rem;
            max-width: 760px;
            margin: 0 auto;
        }}
        h1 {{ color: #ee5d6c; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #fb9062; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #eeaf61; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>Quakewatch</h1>
    <p>Status: <strong>{load_state}</strong></p>
    <p>{visible} Events Found</p>
    <div>
        <div class="metric"><div class="label">Stored</div><div class="value">{total}</div></div>
        <div class="metric"><div class="label">Visible</div><div class="value">{visible}</div></div>
    </div>
    <h2>API</h2>
    <ul>
        <li><a href="/api/status">/api/status</a></li>
        <li><a href="/api/map">/api/map</a></li>
        <li><a href="/api/legend">/api/legend</a></li>
        <li><a href="/api/events">/api/events</a></li>
        <li><a href="/api/layers">/api/layers</a></li>
        <li><a href="/api/table">/api/table</a></li>
        <li><a href="/api/tectonic">/api/tectonic</a></li>
        <li><a href="/api/areas">/api/areas</a></li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Status, map options, legend
// ---------------------------------------------------------------------------

/// `GET /api/status`
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    Json(state.session.lock().await.status())
}

/// `GET /api/map`
pub async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapSettings> {
    Json(state.map.clone())
}

/// `GET /api/legend`
pub async fn get_legend() -> Json<Vec<LegendEntry>> {
    Json(legend::depth_legend())
}

// ---------------------------------------------------------------------------
// Filtering and layers
// ---------------------------------------------------------------------------

/// `POST /api/filter` -- parse the form, filter, and resync the layers.
pub async fn apply_filter(
    State(state): State<Arc<AppState>>,
    Json(form): Json<FilterForm>,
) -> Json<FilterResponse> {
    let mut session = state.session.lock().await;
    let visible = session.apply_form(&form).len();
    Json(FilterResponse {
        visible,
        criteria: *session.criteria(),
    })
}

/// `GET /api/events`
pub async fn list_events(State(state): State<Arc<AppState>>) -> Json<Vec<EarthquakeEvent>> {
    Json(state.session.lock().await.visible().to_vec())
}

/// `GET /api/layers`
pub async fn get_layers(State(state): State<Arc<AppState>>) -> Json<LayersResponse> {
    let session = state.session.lock().await;
    let layers = session.layers();
    Json(LayersResponse {
        markers: layers
            .cluster()
            .map(|c| c.markers().to_vec())
            .unwrap_or_default(),
        heat: layers.heat().map(|h| h.points().to_vec()).unwrap_or_default(),
    })
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// `GET /api/table`
pub async fn get_table(State(state): State<Arc<AppState>>) -> Json<TablePage> {
    Json(state.session.lock().await.table_page())
}

/// `POST /api/table/sort`
pub async fn sort_table(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SortRequest>,
) -> Json<TablePage> {
    let mut session = state.session.lock().await;
    session.sort_table(request.key);
    Json(session.table_page())
}

/// `POST /api/table/page`
pub async fn page_table(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PageResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let moved = match (request.action, request.page) {
        (Some(action), None) => session.navigate_table(action),
        (None, Some(page)) => session.go_to_page(page),
        _ => {
            return Err(ApiError::InvalidRequest(
                "expected exactly one of `action` or `page`".to_owned(),
            ));
        }
    };
    Ok(Json(PageResponse {
        moved,
        table: session.table_page(),
    }))
}

/// `POST /api/table/rows/{row}/activate`
pub async fn activate_row(
    State(state): State<Arc<AppState>>,
    Path(row): Path<usize>,
) -> Result<Json<Focus>, ApiError> {
    state
        .session
        .lock()
        .await
        .activate_row(row)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("row {row} on the current page")))
}

// ---------------------------------------------------------------------------
// Hover
// ---------------------------------------------------------------------------

/// `POST /api/hover/{id}`
pub async fn hover(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InfoTooltip>, ApiError> {
    let mut session = state.session.lock().await;
    let id = EventId::from(id);
    if session.hover(&id) {
        Ok(Json(session.tooltip().clone()))
    } else {
        Err(ApiError::NotFound(format!("visible event {id}")))
    }
}

/// `DELETE /api/hover`
pub async fn unhover(State(state): State<Arc<AppState>>) -> Json<InfoTooltip> {
    let mut session = state.session.lock().await;
    session.unhover();
    Json(session.tooltip().clone())
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

/// `GET /api/tectonic`
pub async fn get_tectonic(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.tectonic.read().await.clone())
}

/// `GET /api/buffers?radius_km=`
pub async fn get_buffers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BufferQuery>,
) -> Json<Vec<BufferCircle>> {
    Json(state.session.lock().await.buffers(&query.radius_km))
}

// ---------------------------------------------------------------------------
// Drawn areas
// ---------------------------------------------------------------------------

/// `GET /api/areas`
pub async fn list_areas(State(state): State<Arc<AppState>>) -> Json<Vec<DrawnShape>> {
    Json(state.session.lock().await.drawn().iter().cloned().collect())
}

/// `POST /api/areas` -- store a shape and, for polygons, resolve its area
/// query before answering.
pub async fn create_area(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAreaRequest>,
) -> Result<(StatusCode, Json<DrawnShape>), ApiError> {
    let vertices = request
        .vertices
        .iter()
        .map(|&[lat, lng]| LatLng::new(lat, lng))
        .collect();
    let polygon = Polygon::new(vertices)?;

    let mut shape = {
        let mut session = state.session.lock().await;
        let id = session.drawn_mut().add(request.kind, polygon);
        session
            .drawn()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("shape {id}")))?
    };

    if shape.kind == ShapeKind::Polygon {
        // The query runs in its own task so the shape is annotated even if
        // the client goes away before it resolves.
        let task_state = Arc::clone(&state);
        let (id, polygon) = (shape.id, shape.polygon.clone());
        let query = tokio::spawn(async move {
            let annotation = task_state.overpass.resolve(&polygon).await;
            let attached = task_state
                .session
                .lock()
                .await
                .drawn_mut()
                .annotate(id, annotation.clone());
            if !attached {
                debug!(shape = %id, "shape removed before its query resolved");
            }
            annotation
        });
        let annotation = query
            .await
            .map_err(|e| ApiError::Internal(format!("area query task failed: {e}")))?;
        shape.annotation = Some(annotation);
    }

    Ok((StatusCode::CREATED, Json(shape)))
}

/// `DELETE /api/areas/{id}`
pub async fn delete_area(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let uuid = Uuid::parse_str(&id).map_err(|e| ApiError::InvalidUuid(format!("{id}: {e}")))?;
    let id = ShapeId::from(uuid);
    state
        .session
        .lock()
        .await
        .drawn_mut()
        .remove(id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError::NotFound(format!("shape {id}")))
}
