// libs/shared/store/src/memory.rs
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::records::{
    Appointment, AppointmentHistoryEntry, Doctor, NewAppointment, NewDoctor, NewHistoryEntry,
    NewWeeklyAvailabilityWindow, WeeklyAvailabilityWindow,
};

/// Transactional record store backing the practice. Tables are arenas keyed
/// by surrogate ids; relations between records are plain foreign-key fields.
#[derive(Debug, Default)]
pub struct ClinicStore {
    inner: Mutex<Tables>,
}

impl ClinicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only closure against a consistent snapshot of the tables.
    pub fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` as one atomic transaction. The closure mutates a scratch copy
    /// of the tables; the copy replaces the live tables only when the closure
    /// returns `Ok`, so a failed validation never leaves partial writes.
    ///
    /// The store mutex serializes transactions: a check-then-insert sequence
    /// inside one closure can never interleave with another writer, which is
    /// what makes the booking conflict check safe under concurrent requests.
    pub fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut scratch = guard.clone();
        match f(&mut scratch) {
            Ok(value) => {
                *guard = scratch;
                Ok(value)
            }
            Err(err) => {
                debug!("transaction rolled back");
                Err(err)
            }
        }
    }
}

/// The table set visible inside `read`/`transaction` closures. All lookups
/// and mutations go through these typed accessors; id assignment and
/// created/updated timestamps are handled here.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    doctors: BTreeMap<i64, Doctor>,
    windows: BTreeMap<i64, WeeklyAvailabilityWindow>,
    appointments: BTreeMap<i64, Appointment>,
    history: BTreeMap<i64, AppointmentHistoryEntry>,
    next_doctor_id: i64,
    next_window_id: i64,
    next_appointment_id: i64,
    next_history_id: i64,
}

impl Tables {
    // ==========================================================================
    // DOCTORS
    // ==========================================================================

    pub fn doctor(&self, id: i64) -> Option<&Doctor> {
        self.doctors.get(&id)
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.values()
    }

    pub fn insert_doctor(&mut self, new: NewDoctor) -> Doctor {
        self.next_doctor_id += 1;
        let now = Utc::now();
        let doctor = Doctor {
            id: self.next_doctor_id,
            name: new.name,
            specialization: new.specialization,
            email: new.email,
            phone: new.phone,
            years_of_experience: new.years_of_experience,
            consultation_fee: new.consultation_fee,
            is_available: new.is_available,
            created_at: now,
            updated_at: now,
        };
        self.doctors.insert(doctor.id, doctor.clone());
        doctor
    }

    // ==========================================================================
    // WEEKLY AVAILABILITY WINDOWS
    // ==========================================================================

    /// All windows declared for a doctor, ordered by (day-of-week, start).
    pub fn windows_for_doctor(&self, doctor_id: i64) -> Vec<&WeeklyAvailabilityWindow> {
        let mut windows: Vec<_> = self
            .windows
            .values()
            .filter(|w| w.doctor_id == doctor_id)
            .collect();
        windows.sort_by_key(|w| (w.day_of_week, w.start_time));
        windows
    }

    /// Active windows for a doctor on one day of the week, ordered by start.
    /// There may legitimately be more than one (split morning/afternoon
    /// schedules).
    pub fn active_windows_for_day(
        &self,
        doctor_id: i64,
        day_of_week: u8,
    ) -> Vec<&WeeklyAvailabilityWindow> {
        let mut windows: Vec<_> = self
            .windows
            .values()
            .filter(|w| w.doctor_id == doctor_id && w.day_of_week == day_of_week && w.is_active)
            .collect();
        windows.sort_by_key(|w| w.start_time);
        windows
    }

    pub fn insert_window(
        &mut self,
        new: NewWeeklyAvailabilityWindow,
    ) -> WeeklyAvailabilityWindow {
        self.next_window_id += 1;
        let window = WeeklyAvailabilityWindow {
            id: self.next_window_id,
            doctor_id: new.doctor_id,
            day_of_week: new.day_of_week,
            start_time: new.start_time,
            end_time: new.end_time,
            slot_duration_minutes: new.slot_duration_minutes,
            is_active: new.is_active,
            created_at: Utc::now(),
        };
        self.windows.insert(window.id, window.clone());
        window
    }

    // ==========================================================================
    // APPOINTMENTS
    // ==========================================================================

    pub fn appointment(&self, id: i64) -> Option<&Appointment> {
        self.appointments.get(&id)
    }

    pub fn appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.values()
    }

    /// Every appointment for a doctor on one calendar date, regardless of
    /// status. Callers filter by status themselves (the conflict scan and the
    /// availability query disagree on which statuses matter).
    pub fn appointments_for_doctor_on(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Vec<&Appointment> {
        self.appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id && a.appointment_date == date)
            .collect()
    }

    pub fn insert_appointment(&mut self, new: NewAppointment) -> Appointment {
        self.next_appointment_id += 1;
        let now = Utc::now();
        let appointment = Appointment {
            id: self.next_appointment_id,
            doctor_id: new.doctor_id,
            patient_name: new.patient_name,
            patient_email: new.patient_email,
            patient_phone: new.patient_phone,
            appointment_date: new.appointment_date,
            appointment_time: new.appointment_time,
            end_time: new.end_time,
            status: new.status,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        self.appointments.insert(appointment.id, appointment.clone());
        appointment
    }

    /// Apply an in-place mutation to an appointment, bumping `updated_at`.
    /// Returns the updated record, or `None` when the id is unknown.
    pub fn update_appointment(
        &mut self,
        id: i64,
        apply: impl FnOnce(&mut Appointment),
    ) -> Option<Appointment> {
        let appointment = self.appointments.get_mut(&id)?;
        apply(appointment);
        appointment.updated_at = Utc::now();
        Some(appointment.clone())
    }

    // ==========================================================================
    // STATUS HISTORY (append-only)
    // ==========================================================================

    pub fn append_history(&mut self, new: NewHistoryEntry) -> AppointmentHistoryEntry {
        self.next_history_id += 1;
        let entry = AppointmentHistoryEntry {
            id: self.next_history_id,
            appointment_id: new.appointment_id,
            previous_status: new.previous_status,
            new_status: new.new_status,
            changed_by: new.changed_by,
            change_reason: new.change_reason,
            changed_at: Utc::now(),
        };
        self.history.insert(entry.id, entry.clone());
        entry
    }

    /// Ledger entries for one appointment in insertion order.
    pub fn history_for_appointment(&self, appointment_id: i64) -> Vec<&AppointmentHistoryEntry> {
        self.history
            .values()
            .filter(|h| h.appointment_id == appointment_id)
            .collect()
    }
}
