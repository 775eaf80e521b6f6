use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use launch_dashboard::data::model::{LaunchDataset, LaunchRecord, Outcome};
use launch_dashboard::web::router::build_router;
use launch_dashboard::web::WebState;

fn app() -> Router {
    let dataset = LaunchDataset::from_records(vec![
        LaunchRecord::new("A", 2000.0, Outcome::Success),
        LaunchRecord::new("A", 8000.0, Outcome::Failure),
        LaunchRecord::new("B", 5000.0, Outcome::Success),
    ]);
    build_router(WebState::new(Arc::new(dataset)))
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn sites(records: &Value) -> Vec<&str> {
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["site"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn index_serves_the_dashboard_page() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("site-dropdown"));
    assert!(html.contains("payload-low"));
    assert!(html.contains("success-pie-chart"));
    assert!(html.contains("success-payload-scatter-chart"));
}

#[tokio::test]
async fn health_check() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn options_list_all_sites_first() {
    let (status, json) = get_json("/api/options").await;
    assert_eq!(status, StatusCode::OK);

    let values: Vec<&str> = json["sites"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["ALL", "A", "B"]);
    assert_eq!(json["sites"][0]["label"], "All Sites");
    assert_eq!(json["min_payload"], 2000.0);
    assert_eq!(json["max_payload"], 8000.0);
    assert_eq!(json["slider"]["step"], 1000.0);
    assert_eq!(json["slider"]["marks"], serde_json::json!([0.0, 5000.0, 10000.0]));
    assert_eq!(json["record_count"], 3);
    assert!(json["colors"]["0"].as_str().unwrap().starts_with('#'));
}

#[tokio::test]
async fn view_defaults_to_all_sites_and_full_range() {
    let (status, json) = get_json("/api/view").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["site"], "ALL");
    assert_eq!(json["pie"]["title"], "Launch Success vs Failure (All Sites)");
    assert_eq!(json["pie"]["counts"], serde_json::json!({"0": 1, "1": 2}));
    assert_eq!(sites(&json["scatter"]["records"]), vec!["A", "A", "B"]);
}

#[tokio::test]
async fn view_applies_site_and_range() {
    let (_, json) = get_json("/api/view?site=A&low=0&high=10000").await;
    assert_eq!(json["scatter"]["title"], "Payload vs. Launch Success (A)");
    assert_eq!(sites(&json["scatter"]["records"]), vec!["A", "A"]);

    let (_, json) = get_json("/api/scatter?site=ALL&low=3000&high=10000").await;
    let payloads: Vec<f64> = json["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["payload_mass"].as_f64().unwrap())
        .collect();
    assert_eq!(payloads, vec![8000.0, 5000.0]);
}

#[tokio::test]
async fn inclusive_bounds_over_http() {
    let (_, json) = get_json("/api/scatter?low=5000&high=5000").await;
    assert_eq!(sites(&json["records"]), vec!["B"]);
}

#[tokio::test]
async fn pie_for_a_single_site_omits_missing_outcomes() {
    let (status, json) = get_json("/api/pie?site=B").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Launch Success vs Failure (B)");
    assert_eq!(json["counts"], serde_json::json!({"1": 1}));
}

#[tokio::test]
async fn unknown_site_falls_back_to_all_sites() {
    let (status, json) = get_json("/api/view?site=Nowhere").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["site"], "ALL");
    assert_eq!(json["scatter"]["records"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn empty_selection_is_an_empty_chart() {
    let (status, json) = get_json("/api/view?site=B&low=0&high=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pie"]["counts"], serde_json::json!({}));
    assert!(json["scatter"]["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn inverted_range_is_a_bad_request() {
    let (status, json) = get_json("/api/view?low=9000&high=1000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("inverted"));
}
