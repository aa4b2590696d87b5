// libs/appointment-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

pub use shared_store::records::{Appointment, AppointmentHistoryEntry, AppointmentStatus};

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentRequest {
    pub doctor_id: i64,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

/// Partial update: every field is optional. Supplying any of the
/// date/time/duration trio triggers a full reschedule re-validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
    pub duration_minutes: Option<u32>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub changed_by: Option<String>,
    pub change_reason: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentSearchQuery {
    pub doctor_id: Option<i64>,
    pub patient_email: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            doctor_id: appointment.doctor_id,
            patient_name: appointment.patient_name.clone(),
            patient_email: appointment.patient_email.clone(),
            patient_phone: appointment.patient_phone.clone(),
            appointment_date: appointment.appointment_date,
            appointment_time: appointment.appointment_time,
            end_time: appointment.end_time,
            status: appointment.status,
            notes: appointment.notes.clone(),
            created_at: appointment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorSummary {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub consultation_fee: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDetailResponse {
    #[serde(flatten)]
    pub appointment: AppointmentResponse,
    pub doctor: DoctorSummary,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Doctor {doctor_id} is not available at {requested}")]
    DoctorUnavailable { doctor_id: i64, requested: String },

    #[error("Appointment with ID {appointment_id} not found")]
    NotFound { appointment_id: i64 },

    #[error("{reason}")]
    InvalidTimeSlot { reason: String },

    #[error("The selected time slot is already booked for doctor {doctor_id} at {requested}")]
    Conflict {
        doctor_id: i64,
        requested: String,
        conflicting_appointment_id: i64,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}
