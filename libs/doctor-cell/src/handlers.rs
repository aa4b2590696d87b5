// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use shared_models::error::AppError;
use shared_models::Paginated;
use shared_store::ClinicStore;

use crate::models::{
    AvailableSlotsResponse, DoctorDetailResponse, DoctorError, DoctorResponse, DoctorSearchQuery,
};
use crate::services::availability::AvailabilityService;
use crate::services::doctor::DoctorDirectoryService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct DoctorQueryParams {
    pub specialization: Option<String>,
    pub available: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQueryParams {
    pub date: NaiveDate,
    pub duration: Option<u32>,
}

// ==============================================================================
// HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_doctors(
    State(store): State<Arc<ClinicStore>>,
    Query(params): Query<DoctorQueryParams>,
) -> Result<Json<Paginated<DoctorResponse>>, AppError> {
    let service = DoctorDirectoryService::new(store);

    let page = service
        .list_doctors(DoctorSearchQuery {
            specialization: params.specialization,
            available: params.available,
            page: params.page,
            limit: params.limit,
        })
        .await;

    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<DoctorDetailResponse>, AppError> {
    let service = DoctorDirectoryService::new(store);

    let doctor = service.get_doctor(doctor_id).await.map_err(map_doctor_error)?;

    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<i64>,
    Query(params): Query<AvailableSlotsQueryParams>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let duration = params.duration.unwrap_or(30);
    if !(15..=180).contains(&duration) {
        return Err(AppError::BadRequest(
            "VALIDATION_ERROR",
            "duration must be between 15 and 180 minutes".to_string(),
        ));
    }

    let service = AvailabilityService::new(store);

    let slots = service
        .get_available_slots(doctor_id, params.date, duration)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(slots))
}

fn map_doctor_error(err: DoctorError) -> AppError {
    match err {
        DoctorError::NotFound { .. } => AppError::NotFound("DOCTOR_NOT_FOUND", err.to_string()),
    }
}
