// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use doctor_cell::scheduling::{add_duration, day_of_week, to_minutes};
use shared_models::{PageParams, Paginated};
use shared_store::records::NewAppointment;
use shared_store::{ClinicStore, Tables};

use crate::models::{
    Appointment, AppointmentDetailResponse, AppointmentError, AppointmentHistoryEntry,
    AppointmentResponse, AppointmentSearchQuery, AppointmentStatus, CreateAppointmentRequest,
    DoctorSummary, UpdateAppointmentRequest,
};
use crate::services::{conflict, history};

pub const DEFAULT_DURATION_MINUTES: u32 = 30;

pub struct AppointmentBookingService {
    store: Arc<ClinicStore>,
}

impl AppointmentBookingService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Book a new appointment. Doctor lookup, working-hours validation, the
    /// conflict scan, the insert and the ledger entry all commit as one
    /// transaction, so two racing requests for the same slot can never both
    /// observe a clear schedule and both land.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<AppointmentResponse, AppointmentError> {
        info!(
            "Booking appointment with doctor {} on {} at {}",
            request.doctor_id, request.appointment_date, request.appointment_time
        );

        let duration = request.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        let start_min = to_minutes(request.appointment_time);
        let end_min = start_min + duration;

        let appointment = self.store.transaction(|tx| {
            let accepting = tx
                .doctor(request.doctor_id)
                .is_some_and(|doctor| doctor.is_available);
            if !accepting {
                return Err(AppointmentError::DoctorUnavailable {
                    doctor_id: request.doctor_id,
                    requested: format!(
                        "{} {}",
                        request.appointment_date, request.appointment_time
                    ),
                });
            }

            let start = request
                .appointment_date
                .and_time(request.appointment_time);
            if start <= Local::now().naive_local() {
                return Err(AppointmentError::InvalidTimeSlot {
                    reason: "Cannot book appointments in the past".to_string(),
                });
            }

            validate_working_hours(
                tx,
                request.doctor_id,
                request.appointment_date,
                start_min,
                end_min,
            )?;

            if let Some(conflicting_id) = conflict::find_conflict(
                tx,
                request.doctor_id,
                request.appointment_date,
                start_min,
                end_min,
                None,
            ) {
                return Err(conflict_error(
                    request.doctor_id,
                    request.appointment_date,
                    start_min,
                    end_min,
                    conflicting_id,
                ));
            }

            let appointment = tx.insert_appointment(NewAppointment {
                doctor_id: request.doctor_id,
                patient_name: request.patient_name.clone(),
                patient_email: request.patient_email.clone(),
                patient_phone: request.patient_phone.clone(),
                appointment_date: request.appointment_date,
                appointment_time: request.appointment_time,
                end_time: add_duration(request.appointment_time, duration),
                status: AppointmentStatus::Scheduled,
                notes: request.notes.clone(),
            });

            history::record_transition(
                tx,
                appointment.id,
                None,
                AppointmentStatus::Scheduled,
                "system",
                Some("Initial booking"),
            );

            Ok(appointment)
        })?;

        info!("Appointment {} booked successfully", appointment.id);
        Ok(AppointmentResponse::from(&appointment))
    }

    /// Update an appointment: reschedule, change status, or edit notes.
    /// Rescheduling re-runs the working-hours and conflict checks with this
    /// appointment's own id excluded from the scan; a status change is
    /// applied as supplied and recorded in the ledger.
    pub async fn update_appointment(
        &self,
        appointment_id: i64,
        request: UpdateAppointmentRequest,
    ) -> Result<AppointmentResponse, AppointmentError> {
        debug!("Updating appointment: {}", appointment_id);

        let updated = self.store.transaction(|tx| {
            let current = tx
                .appointment(appointment_id)
                .cloned()
                .ok_or(AppointmentError::NotFound { appointment_id })?;

            let previous_status = current.status;

            let mut new_date = current.appointment_date;
            let mut new_start = current.appointment_time;
            let mut new_end = current.end_time;

            let rescheduling = request.appointment_date.is_some()
                || request.appointment_time.is_some()
                || request.duration_minutes.is_some();

            if rescheduling {
                new_date = request.appointment_date.unwrap_or(current.appointment_date);
                new_start = request.appointment_time.unwrap_or(current.appointment_time);
                // When the duration is omitted the appointment keeps its
                // current length, derived from the stored interval.
                let duration = request.duration_minutes.unwrap_or_else(|| {
                    to_minutes(current.end_time) - to_minutes(current.appointment_time)
                });

                let start_min = to_minutes(new_start);
                let end_min = start_min + duration;

                validate_working_hours(tx, current.doctor_id, new_date, start_min, end_min)?;

                if let Some(conflicting_id) = conflict::find_conflict(
                    tx,
                    current.doctor_id,
                    new_date,
                    start_min,
                    end_min,
                    Some(appointment_id),
                ) {
                    return Err(conflict_error(
                        current.doctor_id,
                        new_date,
                        start_min,
                        end_min,
                        conflicting_id,
                    ));
                }

                new_end = add_duration(new_start, duration);
            }

            let updated = tx
                .update_appointment(appointment_id, |appointment| {
                    appointment.appointment_date = new_date;
                    appointment.appointment_time = new_start;
                    appointment.end_time = new_end;
                    if let Some(status) = request.status {
                        appointment.status = status;
                    }
                    if let Some(notes) = request.notes.clone() {
                        appointment.notes = Some(notes);
                    }
                })
                .ok_or(AppointmentError::NotFound { appointment_id })?;

            if let Some(new_status) = request.status {
                if new_status != previous_status {
                    history::record_transition(
                        tx,
                        appointment_id,
                        Some(previous_status),
                        new_status,
                        request.changed_by.as_deref().unwrap_or("user"),
                        request.change_reason.as_deref(),
                    );
                }
            }

            Ok(updated)
        })?;

        info!("Appointment {} updated successfully", appointment_id);
        Ok(AppointmentResponse::from(&updated))
    }

    /// Cancel an appointment. Cancellation is a status transition, never a
    /// delete, and it always lands in the ledger. No schedule re-validation
    /// runs: cancelling only ever frees capacity.
    pub async fn cancel_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Cancelling appointment: {}", appointment_id);

        let cancelled = self.store.transaction(|tx| {
            let current = tx
                .appointment(appointment_id)
                .cloned()
                .ok_or(AppointmentError::NotFound { appointment_id })?;

            let cancelled = tx
                .update_appointment(appointment_id, |appointment| {
                    appointment.status = AppointmentStatus::Cancelled;
                })
                .ok_or(AppointmentError::NotFound { appointment_id })?;

            history::record_transition(
                tx,
                appointment_id,
                Some(current.status),
                AppointmentStatus::Cancelled,
                "user",
                Some("Appointment cancelled"),
            );

            Ok(cancelled)
        })?;

        info!("Appointment {} cancelled", appointment_id);
        Ok(cancelled)
    }

    /// Appointment detail with the doctor summary joined in.
    pub async fn get_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<AppointmentDetailResponse, AppointmentError> {
        self.store.read(|tables| {
            let appointment = tables
                .appointment(appointment_id)
                .ok_or(AppointmentError::NotFound { appointment_id })?;

            let doctor = tables.doctor(appointment.doctor_id).ok_or_else(|| {
                AppointmentError::Storage(format!(
                    "appointment {} references missing doctor {}",
                    appointment_id, appointment.doctor_id
                ))
            })?;

            Ok(AppointmentDetailResponse {
                appointment: AppointmentResponse::from(appointment),
                doctor: DoctorSummary {
                    id: doctor.id,
                    name: doctor.name.clone(),
                    specialization: doctor.specialization.clone(),
                    consultation_fee: doctor.consultation_fee,
                },
            })
        })
    }

    /// Filtered, paginated listing. Filters combine with AND; the result is
    /// ordered by (date, start time) ascending.
    pub async fn search_appointments(
        &self,
        query: AppointmentSearchQuery,
    ) -> Paginated<AppointmentResponse> {
        debug!("Searching appointments with filters: {:?}", query);

        let params = PageParams::new(query.page, query.limit);

        self.store.read(|tables| {
            let mut matching: Vec<&Appointment> = tables
                .appointments()
                .filter(|a| query.doctor_id.is_none_or(|id| a.doctor_id == id))
                .filter(|a| {
                    query
                        .patient_email
                        .as_deref()
                        .is_none_or(|email| a.patient_email == email)
                })
                .filter(|a| query.status.is_none_or(|status| a.status == status))
                .filter(|a| query.date.is_none_or(|date| a.appointment_date == date))
                .collect();

            matching.sort_by_key(|a| (a.appointment_date, a.appointment_time));

            let total = matching.len();
            let page: Vec<AppointmentResponse> = matching
                .into_iter()
                .skip(params.offset())
                .take(params.limit)
                .map(AppointmentResponse::from)
                .collect();

            Paginated::new(page, total, params.page, params.limit)
        })
    }

    /// The status-transition ledger for one appointment, oldest first.
    pub async fn get_history(
        &self,
        appointment_id: i64,
    ) -> Result<Vec<AppointmentHistoryEntry>, AppointmentError> {
        self.store.read(|tables| {
            if tables.appointment(appointment_id).is_none() {
                return Err(AppointmentError::NotFound { appointment_id });
            }
            Ok(history::ledger_for(tables, appointment_id))
        })
    }
}

/// The requested interval must fall entirely inside one of the doctor's
/// active windows for that day. A doctor with split morning/afternoon
/// windows accepts a booking in either; an interval spanning the gap is
/// rejected.
fn validate_working_hours(
    tables: &Tables,
    doctor_id: i64,
    date: NaiveDate,
    start_min: u32,
    end_min: u32,
) -> Result<(), AppointmentError> {
    let windows = tables.active_windows_for_day(doctor_id, day_of_week(date));

    if windows.is_empty() {
        return Err(AppointmentError::InvalidTimeSlot {
            reason: "Doctor is not available on this day of the week".to_string(),
        });
    }

    let contained = windows.iter().any(|window| {
        start_min >= to_minutes(window.start_time) && end_min <= to_minutes(window.end_time)
    });

    if !contained {
        let working_hours: Vec<String> = windows
            .iter()
            .map(|w| {
                format!(
                    "{} - {}",
                    w.start_time.format("%H:%M:%S"),
                    w.end_time.format("%H:%M:%S")
                )
            })
            .collect();
        return Err(AppointmentError::InvalidTimeSlot {
            reason: format!(
                "Appointment time is outside doctor's working hours ({})",
                working_hours.join(", ")
            ),
        });
    }

    Ok(())
}

fn conflict_error(
    doctor_id: i64,
    date: NaiveDate,
    start_min: u32,
    end_min: u32,
    conflicting_appointment_id: i64,
) -> AppointmentError {
    AppointmentError::Conflict {
        doctor_id,
        requested: format!(
            "{} {}-{}",
            date,
            format_minutes(start_min),
            format_minutes(end_min)
        ),
        conflicting_appointment_id,
    }
}

fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}:00", minutes / 60, minutes % 60)
}
