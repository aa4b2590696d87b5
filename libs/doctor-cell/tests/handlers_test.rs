use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use doctor_cell::router::doctor_routes;
use shared_store::{seed, ClinicStore};

fn create_test_app() -> Router {
    let store = Arc::new(ClinicStore::new());
    seed::load_demo_practice(&store);
    doctor_routes(store)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn lists_every_doctor_with_pagination_meta() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 7);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn specialization_filter_is_case_insensitive_substring() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/?specialization=cardio").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Dr. John Smith");
}

#[tokio::test]
async fn availability_filter_selects_unavailable_doctors() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/?available=false").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Dr. David Kim");
}

#[tokio::test]
async fn pagination_slices_and_reports_total_pages() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/?limit=3&page=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total_pages"], 3);
    assert_eq!(body["meta"]["limit"], 3);
}

#[tokio::test]
async fn doctor_detail_includes_weekly_time_slots() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Dr. John Smith");
    let slots = body["time_slots"].as_array().unwrap();
    assert_eq!(slots.len(), 5);
    assert_eq!(slots[0]["day_of_week"], 1);
    assert_eq!(slots[0]["start_time"], "09:00:00");
}

#[tokio::test]
async fn unknown_doctor_detail_is_404() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "DOCTOR_NOT_FOUND");
}

#[tokio::test]
async fn available_slots_walk_the_monday_window() {
    let app = create_test_app();

    // 2030-06-03 is a Monday; Dr. John Smith works 09:00-17:00 that day.
    let (status, body) = get_json(&app, "/1/available-slots?date=2030-06-03").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctor_id"], 1);
    let slots = body["available_slots"].as_array().unwrap();
    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0]["start_time"], "09:00:00");
    assert_eq!(slots[0]["available"], true);
}

#[tokio::test]
async fn slot_duration_outside_range_is_rejected() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/1/available-slots?date=2030-06-03&duration=10").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn available_slots_for_unknown_doctor_is_404() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/999/available-slots?date=2030-06-03").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "DOCTOR_NOT_FOUND");
}
