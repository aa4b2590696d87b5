// libs/shared/store/src/records.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// PRACTICE RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub years_of_experience: i32,
    pub consultation_fee: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recurring weekly working-hours window for one doctor.
/// `day_of_week` runs 0 (Sunday) through 6 (Saturday).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyAvailabilityWindow {
    pub id: i64,
    pub doctor_id: i64,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
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
    pub updated_at: DateTime<Utc>,
}

/// One row of the append-only status ledger. `previous_status` is `None`
/// only on the entry written when the appointment is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentHistoryEntry {
    pub id: i64,
    pub appointment_id: i64,
    pub previous_status: Option<AppointmentStatus>,
    pub new_status: AppointmentStatus,
    pub changed_by: String,
    pub change_reason: Option<String>,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

// ==============================================================================
// INSERT PAYLOADS (ids and timestamps are assigned by the store)
// ==============================================================================

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub years_of_experience: i32,
    pub consultation_fee: f64,
    pub is_available: bool,
}

#[derive(Debug, Clone)]
pub struct NewWeeklyAvailabilityWindow {
    pub doctor_id: i64,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub doctor_id: i64,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub appointment_id: i64,
    pub previous_status: Option<AppointmentStatus>,
    pub new_status: AppointmentStatus,
    pub changed_by: String,
    pub change_reason: Option<String>,
}
