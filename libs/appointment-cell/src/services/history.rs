// libs/appointment-cell/src/services/history.rs
//
// Append-only status ledger. Every state-affecting operation records a row;
// rows are never rewritten, so the ledger is the audit trail for how an
// appointment reached its current status.

use tracing::debug;

use shared_store::records::{AppointmentHistoryEntry, AppointmentStatus, NewHistoryEntry};
use shared_store::Tables;

/// Append one transition to the ledger, inside the caller's transaction.
/// `previous` is `None` only for the creation entry.
pub fn record_transition(
    tables: &mut Tables,
    appointment_id: i64,
    previous: Option<AppointmentStatus>,
    new: AppointmentStatus,
    changed_by: &str,
    reason: Option<&str>,
) -> AppointmentHistoryEntry {
    debug!(
        "Recording status transition for appointment {}: {:?} -> {}",
        appointment_id, previous, new
    );

    tables.append_history(NewHistoryEntry {
        appointment_id,
        previous_status: previous,
        new_status: new,
        changed_by: changed_by.to_string(),
        change_reason: reason.map(str::to_string),
    })
}

/// The full ledger for one appointment, oldest entry first.
pub fn ledger_for(tables: &Tables, appointment_id: i64) -> Vec<AppointmentHistoryEntry> {
    tables
        .history_for_appointment(appointment_id)
        .into_iter()
        .cloned()
        .collect()
}
