//! Axum router construction for the Quakewatch API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// See [`handlers`] for the endpoint table. CORS allows any origin so the
/// map front-end can be served from a different host.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Session overview
        .route("/api/status", get(handlers::get_status))
        .route("/api/map", get(handlers::get_map))
        .route("/api/legend", get(handlers::get_legend))
        // Filtering and layers
        .route("/api/filter", post(handlers::apply_filter))
        .route("/api/events", get(handlers::list_events))
        .route("/api/layers", get(handlers::get_layers))
        // Table
        .route("/api/table", get(handlers::get_table))
        .route("/api/table/sort", post(handlers::sort_table))
        .route("/api/table/page", post(handlers::page_table))
        .route(
            "/api/table/rows/{row}/activate",
            post(handlers::activate_row),
        )
        // Hover
        .route("/api/hover", delete(handlers::unhover))
        .route("/api/hover/{id}", post(handlers::hover))
        // Overlays
        .route("/api/tectonic", get(handlers::get_tectonic))
        .route("/api/buffers", get(handlers::get_buffers))
        // Drawn areas
        .route(
            "/api/areas",
            get(handlers::list_areas).post(handlers::create_area),
        )
        .route("/api/areas/{id}", delete(handlers::delete_area))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
