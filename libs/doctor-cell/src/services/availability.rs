// libs/doctor-cell/src/services/availability.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use shared_store::records::AppointmentStatus;
use shared_store::ClinicStore;

use crate::models::{AvailableSlot, AvailableSlotsResponse, DoctorError};
use crate::services::scheduling::{day_of_week, slot_sequence, to_minutes};

pub struct AvailabilityService {
    store: Arc<ClinicStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Candidate slots for a doctor on one date, each flagged with whether a
    /// scheduled booking already occupies it.
    ///
    /// Every active window for that day of the week contributes its own slot
    /// run (split morning/afternoon schedules are two windows). Slot lookups
    /// work for any doctor on record, including ones not currently taking
    /// bookings.
    pub async fn get_available_slots(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        duration_minutes: u32,
    ) -> Result<AvailableSlotsResponse, DoctorError> {
        debug!(
            "Calculating available slots for doctor {} on {} ({} min)",
            doctor_id, date, duration_minutes
        );

        self.store.read(|tables| {
            if tables.doctor(doctor_id).is_none() {
                return Err(DoctorError::NotFound { doctor_id });
            }

            let windows = tables.active_windows_for_day(doctor_id, day_of_week(date));

            // Occupancy counts scheduled bookings only; cancelled ones have
            // released their slot.
            let booked: Vec<(u32, u32)> = tables
                .appointments_for_doctor_on(doctor_id, date)
                .into_iter()
                .filter(|a| a.status == AppointmentStatus::Scheduled)
                .map(|a| (to_minutes(a.appointment_time), to_minutes(a.end_time)))
                .collect();

            let mut available_slots = Vec::new();
            for window in windows {
                for (start, end) in
                    slot_sequence(window.start_time, window.end_time, duration_minutes)
                {
                    let (slot_start, slot_end) = (to_minutes(start), to_minutes(end));
                    let taken = booked
                        .iter()
                        .any(|&(b_start, b_end)| slot_start < b_end && slot_end > b_start);

                    available_slots.push(AvailableSlot {
                        start_time: start,
                        end_time: end,
                        available: !taken,
                    });
                }
            }

            debug!("Found {} candidate slots", available_slots.len());
            Ok(AvailableSlotsResponse {
                doctor_id,
                date,
                available_slots,
            })
        })
    }
}
