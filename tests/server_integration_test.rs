#![cfg(feature = "server")]

use launch_dash::core::{LaunchRecord, OutcomeClass};
use launch_dash::server::{build_router, AppState};
use launch_dash::{RecordStore, SliderSpec};
use std::sync::Arc;

fn scenario_state() -> AppState {
    let store = Arc::new(
        RecordStore::from_records(vec![
            LaunchRecord::new("A", 500.0, "v1.0", OutcomeClass::Success),
            LaunchRecord::new("A", 1500.0, "v1.1", OutcomeClass::Failure),
            LaunchRecord::new("B", 800.0, "FT", OutcomeClass::Success),
        ])
        .unwrap(),
    );
    let slider = SliderSpec::from_observed(store.payload_bounds(), SliderSpec::DEFAULT_STEP).unwrap();
    AppState::new(store, slider)
}

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(scenario_state())).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_healthz() {
    let base = spawn_server().await;
    let body = reqwest::get(format!("{}/healthz", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_sites_endpoint() {
    let base = spawn_server().await;
    let sites: serde_json::Value = reqwest::get(format!("{}/api/sites", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(sites[0]["label"], "All Sites");
    assert_eq!(sites[0]["value"], "ALL");
    assert_eq!(sites[1]["value"], "A");
    assert_eq!(sites[2]["value"], "B");
}

#[tokio::test]
async fn test_pie_endpoint_for_site() {
    let base = spawn_server().await;
    let pie: serde_json::Value = reqwest::get(format!("{}/api/pie?site=A", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(pie["title"], "A Success Rate");
    assert_eq!(pie["slices"][0]["label"], "Failure");
    assert_eq!(pie["slices"][0]["value"], 1);
    assert_eq!(pie["slices"][1]["label"], "Success");
    assert_eq!(pie["slices"][1]["value"], 1);
}

#[tokio::test]
async fn test_scatter_endpoint_filters_range() {
    let base = spawn_server().await;
    let scatter: serde_json::Value = reqwest::get(format!("{}/api/scatter?site=A&min=1000&max=2000", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(scatter["title"], "Correlation between Payload and Success for A");
    let points = scatter["points"].as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["payload_mass_kg"], 1500.0);
    assert_eq!(points[0]["class"], 0);
}

#[tokio::test]
async fn test_inverted_range_is_bad_request() {
    let base = spawn_server().await;
    let response = reqwest::get(format!("{}/api/scatter?min=2000&max=1000", base))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_numeric_bound_is_json_bad_request() {
    let base = spawn_server().await;
    let response = reqwest::get(format!("{}/api/scatter?min=abc&max=2000", base))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
    assert!(body["suggestion"].is_string());
}

#[tokio::test]
async fn test_chart_svg_content_type() {
    let base = spawn_server().await;
    let response = reqwest::get(format!("{}/charts/pie.svg", base)).await.unwrap();

    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert_eq!(content_type, "image/svg+xml");
    assert!(response.text().await.unwrap().contains("<svg"));
}

#[tokio::test]
async fn test_index_page_renders_controls() {
    let base = spawn_server().await;
    let html = reqwest::get(format!("{}/?site=B", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("SpaceX Launch Records Dashboard"));
    assert!(html.contains("site-dropdown"));
    assert!(html.contains("B Success Rate"));
}
