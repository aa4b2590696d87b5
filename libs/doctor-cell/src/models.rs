// libs/doctor-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

pub use shared_store::records::{Doctor, WeeklyAvailabilityWindow};

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DoctorResponse {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub years_of_experience: i32,
    pub consultation_fee: f64,
    pub is_available: bool,
}

impl From<&Doctor> for DoctorResponse {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            email: doctor.email.clone(),
            phone: doctor.phone.clone(),
            years_of_experience: doctor.years_of_experience,
            consultation_fee: doctor.consultation_fee,
            is_available: doctor.is_available,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSlotView {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: u32,
}

impl From<&WeeklyAvailabilityWindow> for TimeSlotView {
    fn from(window: &WeeklyAvailabilityWindow) -> Self {
        Self {
            day_of_week: window.day_of_week,
            start_time: window.start_time,
            end_time: window.end_time,
            slot_duration_minutes: window.slot_duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorDetailResponse {
    #[serde(flatten)]
    pub doctor: DoctorResponse,
    pub time_slots: Vec<TimeSlotView>,
}

// ==============================================================================
// AVAILABLE SLOT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AvailableSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableSlotsResponse {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub available_slots: Vec<AvailableSlot>,
}

// ==============================================================================
// QUERY MODELS
// ==============================================================================

#[derive(Debug, Clone, Default)]
pub struct DoctorSearchQuery {
    pub specialization: Option<String>,
    pub available: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor with ID {doctor_id} not found")]
    NotFound { doctor_id: i64 },
}
