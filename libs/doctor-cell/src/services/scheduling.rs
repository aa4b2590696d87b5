// libs/doctor-cell/src/services/scheduling.rs
//
// Wall-clock scheduling primitives: conversions between times of day and
// minute offsets, and the candidate-slot sequence for a working-hours
// window. Everything here is pure; no time zones are involved.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minute offset from midnight for a time of day. Seconds are not part of
/// the scheduling grid and are ignored.
pub fn to_minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Canonical time of day for a minute offset. Caller contract: `minutes`
/// is below `MINUTES_PER_DAY`.
pub fn to_time_of_day(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

/// End time for a booking starting at `start` and running `minutes` minutes.
/// Caller contract: the result does not cross midnight (booking validation
/// works in minute offsets and rejects that case before converting back).
pub fn add_duration(start: NaiveTime, minutes: u32) -> NaiveTime {
    to_time_of_day(to_minutes(start) + minutes)
}

/// Day-of-week index used by the availability windows: 0 = Sunday through
/// 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Candidate slots inside `[window_start, window_end)`: back-to-back
/// fixed-length intervals starting at the window start. A trailing remainder
/// shorter than the duration is discarded. The sequence is lazy and `Clone`,
/// so it can be restarted or walked twice with identical results.
pub fn slot_sequence(
    window_start: NaiveTime,
    window_end: NaiveTime,
    duration_minutes: u32,
) -> SlotSequence {
    SlotSequence {
        next_start: to_minutes(window_start),
        window_end: to_minutes(window_end),
        // A zero-length slot would never advance the cursor.
        duration: duration_minutes.max(1),
    }
}

#[derive(Debug, Clone)]
pub struct SlotSequence {
    next_start: u32,
    window_end: u32,
    duration: u32,
}

impl Iterator for SlotSequence {
    type Item = (NaiveTime, NaiveTime);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.next_start + self.duration;
        if end > self.window_end {
            return None;
        }
        let slot = (to_time_of_day(self.next_start), to_time_of_day(end));
        self.next_start = end;
        Some(slot)
    }
}
