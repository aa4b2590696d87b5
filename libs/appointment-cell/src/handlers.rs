// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_models::Paginated;
use shared_store::ClinicStore;

use crate::models::{
    AppointmentDetailResponse, AppointmentError, AppointmentHistoryEntry, AppointmentResponse,
    AppointmentSearchQuery, AppointmentStatus, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::services::booking::AppointmentBookingService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AppointmentQueryParams {
    pub doctor_id: Option<i64>,
    pub patient_email: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ==============================================================================
// HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_appointment(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    validate_duration(request.duration_minutes)?;

    let service = AppointmentBookingService::new(store);

    let appointment = service
        .create_appointment(request)
        .await
        .map_err(map_appointment_error)?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn search_appointments(
    State(store): State<Arc<ClinicStore>>,
    Query(params): Query<AppointmentQueryParams>,
) -> Result<Json<Paginated<AppointmentResponse>>, AppError> {
    let service = AppointmentBookingService::new(store);

    let page = service
        .search_appointments(AppointmentSearchQuery {
            doctor_id: params.doctor_id,
            patient_email: params.patient_email,
            status: params.status,
            date: params.date,
            page: params.page,
            limit: params.limit,
        })
        .await;

    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(store): State<Arc<ClinicStore>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<AppointmentDetailResponse>, AppError> {
    let service = AppointmentBookingService::new(store);

    let detail = service
        .get_appointment(appointment_id)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(detail))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(store): State<Arc<ClinicStore>>,
    Path(appointment_id): Path<i64>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    validate_duration(request.duration_minutes)?;

    let service = AppointmentBookingService::new(store);

    let appointment = service
        .update_appointment(appointment_id, request)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(store): State<Arc<ClinicStore>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(store);

    let cancelled = service
        .cancel_appointment(appointment_id)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "message": "Appointment cancelled successfully",
        "data": {
            "id": cancelled.id,
            "status": cancelled.status,
            "cancelled_at": cancelled.updated_at,
        }
    })))
}

#[axum::debug_handler]
pub async fn get_appointment_history(
    State(store): State<Arc<ClinicStore>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Vec<AppointmentHistoryEntry>>, AppError> {
    let service = AppointmentBookingService::new(store);

    let entries = service
        .get_history(appointment_id)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(entries))
}

// ==============================================================================
// HELPERS
// ==============================================================================

fn validate_duration(duration_minutes: Option<u32>) -> Result<(), AppError> {
    if let Some(duration) = duration_minutes {
        if !(15..=180).contains(&duration) {
            return Err(AppError::BadRequest(
                "VALIDATION_ERROR",
                "duration_minutes must be between 15 and 180".to_string(),
            ));
        }
    }
    Ok(())
}

fn map_appointment_error(err: AppointmentError) -> AppError {
    match &err {
        AppointmentError::DoctorUnavailable { .. } => {
            AppError::BadRequest("DOCTOR_NOT_AVAILABLE", err.to_string())
        }
        AppointmentError::NotFound { .. } => {
            AppError::NotFound("APPOINTMENT_NOT_FOUND", err.to_string())
        }
        AppointmentError::InvalidTimeSlot { .. } => {
            AppError::BadRequest("INVALID_TIME_SLOT", err.to_string())
        }
        AppointmentError::Conflict {
            doctor_id,
            requested,
            conflicting_appointment_id,
        } => AppError::Conflict(
            "APPOINTMENT_CONFLICT",
            err.to_string(),
            json!({
                "doctor_id": doctor_id,
                "requested": requested,
                "conflicting_appointment_id": conflicting_appointment_id,
            }),
        ),
        AppointmentError::Storage(_) => AppError::Internal(err.to_string()),
    }
}
