// libs/appointment-cell/src/services/conflict.rs
//
// Double-booking detection. The scan takes the transaction's table view as
// an explicit argument so the conflict check and the subsequent insert are
// guaranteed to run inside the same transaction.

use chrono::NaiveDate;
use tracing::warn;

use doctor_cell::scheduling::to_minutes;
use shared_store::records::AppointmentStatus;
use shared_store::Tables;

/// Half-open interval overlap: two bookings conflict iff one starts before
/// the other ends and ends after it starts. Touching endpoints do not
/// conflict, so back-to-back appointments are legal.
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && a_end > b_start
}

/// First non-cancelled appointment for (doctor, date) whose interval overlaps
/// the requested `[start_min, end_min)` window, skipping `exclude_id` (the
/// appointment being rescheduled). Returns the conflicting appointment's id.
pub fn find_conflict(
    tables: &Tables,
    doctor_id: i64,
    date: NaiveDate,
    start_min: u32,
    end_min: u32,
    exclude_id: Option<i64>,
) -> Option<i64> {
    let conflicting = tables
        .appointments_for_doctor_on(doctor_id, date)
        .into_iter()
        .filter(|a| a.status != AppointmentStatus::Cancelled)
        .filter(|a| Some(a.id) != exclude_id)
        .find(|a| {
            overlaps(
                start_min,
                end_min,
                to_minutes(a.appointment_time),
                to_minutes(a.end_time),
            )
        })?;

    warn!(
        "Conflict detected for doctor {} on {}: appointment {} occupies the slot",
        doctor_id, date, conflicting.id
    );
    Some(conflicting.id)
}
