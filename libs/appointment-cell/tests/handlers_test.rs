use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime, Weekday};
use serde_json::{json, Value};
use tower::ServiceExt;

use appointment_cell::router::appointment_routes;
use shared_store::{ClinicStore, NewDoctor, NewWeeklyAvailabilityWindow};

fn next(weekday: Weekday) -> NaiveDate {
    let mut date = Local::now().date_naive() + Duration::days(1);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}

/// Router over a store seeded with one doctor working Mon-Fri 09:00-17:00.
fn create_test_app() -> Router {
    let store = Arc::new(ClinicStore::new());
    store
        .transaction(|tx| {
            let doctor = tx.insert_doctor(NewDoctor {
                name: "Dr. John Smith".to_string(),
                specialization: "Cardiology".to_string(),
                email: "john.smith@hospital.com".to_string(),
                phone: "+1-555-0101".to_string(),
                years_of_experience: 15,
                consultation_fee: 150.0,
                is_available: true,
            });
            for day in 1..=5 {
                tx.insert_window(NewWeeklyAvailabilityWindow {
                    doctor_id: doctor.id,
                    day_of_week: day,
                    start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                    slot_duration_minutes: 30,
                    is_active: true,
                });
            }
            Ok::<_, ()>(())
        })
        .unwrap();
    appointment_routes(store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn booking_payload(date: NaiveDate, start: &str) -> Value {
    json!({
        "doctor_id": 1,
        "patient_name": "Jane Doe",
        "patient_email": "jane.doe@example.com",
        "patient_phone": "+1-555-1234",
        "appointment_date": date,
        "appointment_time": start,
        "duration_minutes": 30
    })
}

#[tokio::test]
async fn booking_returns_201_with_the_scheduled_appointment() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(booking_payload(next(Weekday::Mon), "09:00:00")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["appointment_time"], "09:00:00");
    assert_eq!(body["end_time"], "09:30:00");
}

#[tokio::test]
async fn double_booking_returns_409_with_the_conflicting_id() {
    let app = create_test_app();
    let monday = next(Weekday::Mon);

    let (status, first) = send(&app, "POST", "/", Some(booking_payload(monday, "09:00:00"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/", Some(booking_payload(monday, "09:15:00"))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "APPOINTMENT_CONFLICT");
    assert_eq!(
        body["error"]["details"]["conflicting_appointment_id"],
        first["id"]
    );
}

#[tokio::test]
async fn back_to_back_bookings_both_land() {
    let app = create_test_app();
    let monday = next(Weekday::Mon);

    let (status, _) = send(&app, "POST", "/", Some(booking_payload(monday, "09:00:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/", Some(booking_payload(monday, "09:30:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn booking_outside_working_hours_returns_400() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(booking_payload(next(Weekday::Mon), "08:00:00")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_TIME_SLOT");
}

#[tokio::test]
async fn out_of_range_duration_returns_400() {
    let app = create_test_app();
    let mut payload = booking_payload(next(Weekday::Mon), "09:00:00");
    payload["duration_minutes"] = json!(10);

    let (status, body) = send(&app, "POST", "/", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn appointment_detail_joins_the_doctor_summary() {
    let app = create_test_app();

    send(
        &app,
        "POST",
        "/",
        Some(booking_payload(next(Weekday::Mon), "09:00:00")),
    )
    .await;

    let (status, body) = send(&app, "GET", "/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patient_name"], "Jane Doe");
    assert_eq!(body["doctor"]["name"], "Dr. John Smith");
    assert_eq!(body["doctor"]["specialization"], "Cardiology");
}

#[tokio::test]
async fn unknown_appointment_returns_404() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "APPOINTMENT_NOT_FOUND");
}

#[tokio::test]
async fn cancel_then_rebook_the_same_slot() {
    let app = create_test_app();
    let monday = next(Weekday::Mon);

    send(&app, "POST", "/", Some(booking_payload(monday, "09:00:00"))).await;

    let (status, body) = send(&app, "DELETE", "/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Appointment cancelled successfully");
    assert_eq!(body["data"]["status"], "cancelled");

    let (status, _) = send(&app, "POST", "/", Some(booking_payload(monday, "09:00:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn reschedule_via_put_updates_the_interval() {
    let app = create_test_app();

    send(
        &app,
        "POST",
        "/",
        Some(booking_payload(next(Weekday::Mon), "09:00:00")),
    )
    .await;

    let (status, body) = send(
        &app,
        "PUT",
        "/1",
        Some(json!({ "appointment_time": "10:00:00" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment_time"], "10:00:00");
    assert_eq!(body["end_time"], "10:30:00");
}

#[tokio::test]
async fn history_endpoint_replays_the_ledger() {
    let app = create_test_app();

    send(
        &app,
        "POST",
        "/",
        Some(booking_payload(next(Weekday::Mon), "09:00:00")),
    )
    .await;
    send(
        &app,
        "PUT",
        "/1",
        Some(json!({ "status": "confirmed", "changed_by": "reception" })),
    )
    .await;
    send(&app, "DELETE", "/1", None).await;

    let (status, body) = send(&app, "GET", "/1/history", None).await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["previous_status"], Value::Null);
    assert_eq!(entries[0]["new_status"], "scheduled");
    assert_eq!(entries[1]["new_status"], "confirmed");
    assert_eq!(entries[1]["changed_by"], "reception");
    assert_eq!(entries[2]["new_status"], "cancelled");
}

#[tokio::test]
async fn listing_filters_and_paginates() {
    let app = create_test_app();
    let monday = next(Weekday::Mon);

    for start in ["09:00:00", "10:00:00", "11:00:00"] {
        send(&app, "POST", "/", Some(booking_payload(monday, start))).await;
    }
    send(&app, "DELETE", "/2", None).await;

    let (status, body) = send(&app, "GET", "/?doctor_id=1&status=scheduled", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["appointment_time"], "09:00:00");
    assert_eq!(data[1]["appointment_time"], "11:00:00");
}
