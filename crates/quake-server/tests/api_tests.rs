//! Integration tests for the Quakewatch API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The spatial-query and feed services are replaced
//! by throwaway local servers where a test needs them to answer.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use quake_feed::FeedClient;
use quake_overpass::OverpassClient;
use quake_server::config::MapSettings;
use quake_server::router::build_router;
use quake_server::startup::load_feeds;
use quake_server::state::AppState;
use quake_types::{CategorySet, EarthquakeEvent, EventId};
use serde_json::{Value, json};
use tower::ServiceExt;

const MAY_1: i64 = 1_714_521_600_000;
const HOUR_MS: i64 = 3_600_000;
const UNREACHABLE: &str = "http://127.0.0.1:9/api/interpreter";

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Twelve events: magnitude 1.0 to 6.5 in half steps, depth 0 to 110 km.
fn sample_events() -> Vec<EarthquakeEvent> {
    (0..12_i32)
        .map(|i| EarthquakeEvent {
            id: EventId::from(format!("ev{i}")),
            lat: f64::from(i),
            long: -f64::from(i),
            depth: f64::from(i) * 10.0,
            magnitude: 1.0 + f64::from(i) * 0.5,
            title: format!("Place {i}"),
            time: MAY_1 + i64::from(i) * HOUR_MS,
        })
        .collect()
}

fn overpass_at(endpoint: &str) -> OverpassClient {
    OverpassClient::new(
        endpoint,
        Duration::from_secs(2),
        CategorySet::Infrastructure,
    )
    .unwrap()
}

fn empty_state(endpoint: &str) -> Arc<AppState> {
    Arc::new(AppState::new(overpass_at(endpoint), MapSettings::default()))
}

async fn loaded_state(endpoint: &str) -> Arc<AppState> {
    let state = empty_state(endpoint);
    state.session.lock().await.ingest(sample_events()).unwrap();
    state
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(state: &Arc<AppState>, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = build_router(Arc::clone(state))
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get_json(state: &Arc<AppState>, uri: &str) -> Value {
    let (status, json) = send(state, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK, "GET {uri}");
    json
}

// ---------------------------------------------------------------------------
// Status page and overview
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_reports_event_count() {
    let state = loaded_state(UNREACHABLE).await;
    let response = build_router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Quakewatch"));
    assert!(html.contains("12 Events Found"));
    assert!(html.contains("READY"));
}

#[tokio::test]
async fn status_tracks_loading() {
    let state = empty_state(UNREACHABLE);
    let before = get_json(&state, "/api/status").await;
    assert_eq!(before, json!({"loading": true, "total": 0, "visible": 0}));

    state.session.lock().await.ingest(sample_events()).unwrap();
    let after = get_json(&state, "/api/status").await;
    assert_eq!(after, json!({"loading": false, "total": 12, "visible": 12}));
}

#[tokio::test]
async fn map_options_are_served() {
    let state = empty_state(UNREACHABLE);
    let map = get_json(&state, "/api/map").await;
    assert_eq!(map["center"], json!([20.0, 0.0]));
    assert_eq!(map["zoom"], 2);
    assert_eq!(map["max_zoom"], 18);
    assert_eq!(map["cluster"]["max_cluster_radius"], 15);
    assert_eq!(map["cluster"]["disable_clustering_at_zoom"], 8);
    assert_eq!(map["heat"]["radius"], 25);
}

#[tokio::test]
async fn legend_lists_depth_buckets_deepest_first() {
    let state = empty_state(UNREACHABLE);
    let legend = get_json(&state, "/api/legend").await;
    let colors: Vec<&str> = legend
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["color"].as_str().unwrap())
        .collect();
    assert_eq!(
        colors,
        vec!["#6a0d83", "#ce4993", "#ee5d6c", "#fb9062", "#eeaf61"]
    );
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filter_narrows_events_and_layers() {
    let state = loaded_state(UNREACHABLE).await;
    let (status, body) = send(
        &state,
        "POST",
        "/api/filter",
        Some(json!({"minMagnitude": "5"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visible"], 4);
    assert_eq!(body["criteria"]["minMagnitude"], 5.0);

    let events = get_json(&state, "/api/events").await;
    let ids: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ev8", "ev9", "ev10", "ev11"]);

    let layers = get_json(&state, "/api/layers").await;
    assert_eq!(layers["markers"].as_array().unwrap().len(), 4);
    assert_eq!(layers["heat"].as_array().unwrap().len(), 4);

    let table = get_json(&state, "/api/table").await;
    assert_eq!(table["total_rows"], 4);
    assert_eq!(table["total_pages"], 1);
}

#[tokio::test]
async fn malformed_fields_are_ignored() {
    let state = loaded_state(UNREACHABLE).await;
    let (status, body) = send(
        &state,
        "POST",
        "/api/filter",
        Some(json!({"minMagnitude": "abc", "maxDepth": "", "startDate": "yesterday"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visible"], 12);
    assert_eq!(body["criteria"]["minMagnitude"], Value::Null);
}

#[tokio::test]
async fn later_filter_replaces_earlier() {
    let state = loaded_state(UNREACHABLE).await;
    send(&state, "POST", "/api/filter", Some(json!({"minMagnitude": "5"}))).await;
    let (_, body) = send(
        &state,
        "POST",
        "/api/filter",
        Some(json!({"maxDepth": "20"})),
    )
    .await;
    assert_eq!(body["visible"], 3);
    assert_eq!(body["criteria"]["minMagnitude"], Value::Null);
}

#[tokio::test]
async fn markers_carry_style_and_popup() {
    let state = loaded_state(UNREACHABLE).await;
    let layers = get_json(&state, "/api/layers").await;
    let last = &layers["markers"].as_array().unwrap()[11];
    assert_eq!(last["event_id"], "ev11");
    assert_eq!(last["z_index_offset"], 6500);
    assert_eq!(last["style"]["radius"], 14);
    assert_eq!(last["style"]["fill_color"], "#6a0d83");
    assert!(last["tooltip_html"].as_str().unwrap().starts_with("<b>6.5 Place 11</b>"));
    assert!(last["popup_html"].as_str().unwrap().contains("Depth: 110 km"));
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[tokio::test]
async fn table_paginates_by_ten() {
    let state = loaded_state(UNREACHABLE).await;
    let table = get_json(&state, "/api/table").await;
    assert_eq!(table["rows"].as_array().unwrap().len(), 10);
    assert_eq!(table["page"], 1);
    assert_eq!(table["total_pages"], 2);

    let (status, body) = send(
        &state,
        "POST",
        "/api/table/page",
        Some(json!({"action": "next"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moved"], true);
    assert_eq!(body["table"]["page"], 2);
    assert_eq!(body["table"]["rows"].as_array().unwrap().len(), 2);

    let (_, body) = send(
        &state,
        "POST",
        "/api/table/page",
        Some(json!({"action": "next"})),
    )
    .await;
    assert_eq!(body["moved"], false);
    assert_eq!(body["table"]["page"], 2);

    let (_, body) = send(&state, "POST", "/api/table/page", Some(json!({"page": 5}))).await;
    assert_eq!(body["moved"], false);

    let (_, body) = send(&state, "POST", "/api/table/page", Some(json!({"page": 1}))).await;
    assert_eq!(body["moved"], true);
    assert_eq!(body["table"]["page"], 1);
}

#[tokio::test]
async fn page_request_needs_exactly_one_field() {
    let state = loaded_state(UNREACHABLE).await;
    let (status, body) = send(&state, "POST", "/api/table/page", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = send(
        &state,
        "POST",
        "/api/table/page",
        Some(json!({"action": "first", "page": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sort_toggles_direction() {
    let state = loaded_state(UNREACHABLE).await;
    let (_, table) = send(
        &state,
        "POST",
        "/api/table/sort",
        Some(json!({"key": "magnitude"})),
    )
    .await;
    assert_eq!(table["sort"], json!({"key": "magnitude", "direction": "ascending"}));
    assert_eq!(table["rows"][0]["event"]["id"], "ev0");

    let (_, table) = send(
        &state,
        "POST",
        "/api/table/sort",
        Some(json!({"key": "magnitude"})),
    )
    .await;
    assert_eq!(table["sort"]["direction"], "descending");
    assert_eq!(table["rows"][0]["event"]["id"], "ev11");

    let (_, table) = send(
        &state,
        "POST",
        "/api/table/sort",
        Some(json!({"key": "depth"})),
    )
    .await;
    assert_eq!(table["sort"], json!({"key": "depth", "direction": "ascending"}));
}

#[tokio::test]
async fn row_activation_focuses_the_map() {
    let state = loaded_state(UNREACHABLE).await;
    let (status, focus) = send(&state, "POST", "/api/table/rows/1/activate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(focus["event"]["id"], "ev1");
    assert_eq!(focus["center"], json!({"lat": 1.0, "lng": -1.0}));
    assert_eq!(focus["zoom"], 18);
    assert!(focus["popup_html"].as_str().unwrap().starts_with("<b>1.5 Place 1</b>"));

    let (status, body) = send(&state, "POST", "/api/table/rows/10/activate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

// ---------------------------------------------------------------------------
// Hover
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hover_shows_and_hides_tooltip() {
    let state = loaded_state(UNREACHABLE).await;
    let (status, tooltip) = send(&state, "POST", "/api/hover/ev3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tooltip["visible"], true);
    assert_eq!(tooltip["html"], "<b>2.5 Place 3</b>");

    let (status, tooltip) = send(&state, "DELETE", "/api/hover", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tooltip["visible"], false);
}

#[tokio::test]
async fn hover_on_filtered_out_event_is_not_found() {
    let state = loaded_state(UNREACHABLE).await;
    send(&state, "POST", "/api/filter", Some(json!({"minMagnitude": "5"}))).await;
    let (status, _) = send(&state, "POST", "/api/hover/ev3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tectonic_defaults_to_empty_collection() {
    let state = empty_state(UNREACHABLE);
    let overlay = get_json(&state, "/api/tectonic").await;
    assert_eq!(overlay, json!({"type": "FeatureCollection", "features": []}));
}

#[tokio::test]
async fn buffers_surround_every_stored_event() {
    let state = loaded_state(UNREACHABLE).await;
    send(&state, "POST", "/api/filter", Some(json!({"minMagnitude": "5"}))).await;

    let circles = get_json(&state, "/api/buffers?radius_km=50").await;
    let circles = circles.as_array().unwrap();
    assert_eq!(circles.len(), 12);
    assert_eq!(circles[2]["radius_m"], 50_000.0);
    assert_eq!(circles[2]["center"], json!({"lat": 2.0, "lng": -2.0}));

    let none = get_json(&state, "/api/buffers?radius_km=abc").await;
    assert!(none.as_array().unwrap().is_empty());
    let none = get_json(&state, "/api/buffers").await;
    assert!(none.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Drawn areas
// ---------------------------------------------------------------------------

fn unit_square() -> Value {
    json!([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]])
}

#[tokio::test]
async fn failed_query_annotates_polygon_with_error() {
    let state = loaded_state(UNREACHABLE).await;
    let (status, shape) = send(
        &state,
        "POST",
        "/api/areas",
        Some(json!({"kind": "polygon", "vertices": unit_square()})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(shape["kind"], "polygon");
    assert_eq!(
        shape["annotation"],
        json!({"status": "failed", "popup": "Error fetching building data"})
    );

    let areas = get_json(&state, "/api/areas").await;
    assert_eq!(areas.as_array().unwrap().len(), 1);
    assert_eq!(areas[0]["annotation"]["status"], "failed");
}

#[tokio::test]
async fn rectangles_are_stored_without_query() {
    let state = loaded_state(UNREACHABLE).await;
    let (status, shape) = send(
        &state,
        "POST",
        "/api/areas",
        Some(json!({"kind": "rectangle", "vertices": unit_square()})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(shape["annotation"], Value::Null);
}

#[tokio::test]
async fn degenerate_polygons_are_rejected() {
    let state = loaded_state(UNREACHABLE).await;
    let (status, body) = send(
        &state,
        "POST",
        "/api/areas",
        Some(json!({"vertices": [[0.0, 0.0], [1.0, 1.0]]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert!(get_json(&state, "/api/areas").await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn shapes_can_be_deleted() {
    let state = loaded_state(UNREACHABLE).await;
    let (_, shape) = send(
        &state,
        "POST",
        "/api/areas",
        Some(json!({"kind": "rectangle", "vertices": unit_square()})),
    )
    .await;
    let id = shape["id"].as_str().unwrap().to_owned();

    let (status, _) = send(&state, "DELETE", &format!("/api/areas/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&state, "DELETE", &format!("/api/areas/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&state, "DELETE", "/api/areas/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn successful_query_annotates_polygon_with_summary() {
    let app = Router::new().route(
        "/api/interpreter",
        get(|| async {
            (
                [("content-type", "application/json")],
                r#"{"elements": [
                    {"type": "node", "id": 1, "tags": {"amenity": "hospital"}},
                    {"type": "node", "id": 2, "tags": {"amenity": "hospital"}},
                    {"type": "node", "id": 3, "tags": {"amenity": "school"}}
                ]}"#,
            )
        }),
    );
    let addr = spawn(app).await;
    let state = loaded_state(&format!("http://{addr}/api/interpreter")).await;

    let (status, shape) = send(
        &state,
        "POST",
        "/api/areas",
        Some(json!({"vertices": unit_square()})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let annotation = &shape["annotation"];
    assert_eq!(annotation["status"], "resolved");
    assert_eq!(annotation["summary"]["counts"]["hospital"], 2);
    assert_eq!(annotation["summary"]["counts"]["school"], 1);
    assert_eq!(annotation["summary"]["counts"]["police"], 0);
    let area = annotation["summary"]["area_km2"].as_f64().unwrap();
    assert!((12_300.0..12_320.0).contains(&area));
    assert!(annotation["popup"].as_str().unwrap().ends_with("Area: 12,308 km²"));
}

#[tokio::test]
async fn abandoned_request_still_annotates_polygon() {
    let app = Router::new().route(
        "/api/interpreter",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            (
                [("content-type", "application/json")],
                r#"{"elements": [{"type": "node", "id": 1, "tags": {"amenity": "school"}}]}"#,
            )
        }),
    );
    let addr = spawn(app).await;
    let state = loaded_state(&format!("http://{addr}/api/interpreter")).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/areas")
        .header("content-type", "application/json")
        .body(Body::from(json!({"vertices": unit_square()}).to_string()))
        .unwrap();
    let client = tokio::spawn(build_router(Arc::clone(&state)).oneshot(request));
    tokio::time::sleep(Duration::from_millis(200)).await;
    client.abort();

    let areas = get_json(&state, "/api/areas").await;
    assert_eq!(areas[0]["annotation"]["status"], "pending");

    tokio::time::sleep(Duration::from_secs(2)).await;
    let areas = get_json(&state, "/api/areas").await;
    assert_eq!(areas.as_array().unwrap().len(), 1);
    assert_eq!(areas[0]["annotation"]["status"], "resolved");
    assert_eq!(areas[0]["annotation"]["summary"]["counts"]["school"], 1);
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

const FEED: &str = r#"{"type": "FeatureCollection", "features": [
    {"id": "a", "properties": {"mag": 3.0, "place": "A", "time": 1714521600000}, "geometry": {"coordinates": [10.0, 20.0, 5.0]}},
    {"id": "b", "properties": {"mag": 4.0, "place": "B", "time": 1714521600000}, "geometry": {"coordinates": [11.0, 21.0, 50.0]}}
]}"#;

const PLATES: &str = r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {}, "geometry": null}]}"#;

#[tokio::test]
async fn startup_load_ingests_feed_and_overlay() {
    let app = Router::new()
        .route("/feed", get(|| async { ([("content-type", "application/json")], FEED) }))
        .route("/plates", get(|| async { ([("content-type", "application/json")], PLATES) }));
    let addr = spawn(app).await;
    let feed = FeedClient::new(
        format!("http://{addr}/feed"),
        format!("http://{addr}/plates"),
        Duration::from_secs(2),
    )
    .unwrap();
    let state = empty_state(UNREACHABLE);

    load_feeds(Arc::clone(&state), feed).await;

    let status = get_json(&state, "/api/status").await;
    assert_eq!(status, json!({"loading": false, "total": 2, "visible": 2}));
    let overlay = get_json(&state, "/api/tectonic").await;
    assert_eq!(overlay["features"].as_array().unwrap().len(), 1);
    let events = get_json(&state, "/api/events").await;
    assert_eq!(events[0]["lat"], 20.0);
    assert_eq!(events[0]["long"], 10.0);
}

#[tokio::test]
async fn failed_startup_load_leaves_empty_usable_map() {
    let feed = FeedClient::new(
        "http://127.0.0.1:9/feed",
        "http://127.0.0.1:9/plates",
        Duration::from_millis(500),
    )
    .unwrap();
    let state = empty_state(UNREACHABLE);

    load_feeds(Arc::clone(&state), feed).await;

    let status = get_json(&state, "/api/status").await;
    assert_eq!(status, json!({"loading": false, "total": 0, "visible": 0}));
    let (status, body) = send(&state, "POST", "/api/filter", Some(json!({"minMagnitude": "1"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visible"], 0);
    let overlay = get_json(&state, "/api/tectonic").await;
    assert_eq!(overlay["features"], json!([]));
}
