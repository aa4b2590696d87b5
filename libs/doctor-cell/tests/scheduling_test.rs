use chrono::{NaiveDate, NaiveTime};

use doctor_cell::scheduling::{
    add_duration, day_of_week, slot_sequence, to_minutes, to_time_of_day, MINUTES_PER_DAY,
};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn minute_offsets_round_trip_for_every_minute_of_the_day() {
    for minutes in 0..MINUTES_PER_DAY {
        assert_eq!(to_minutes(to_time_of_day(minutes)), minutes);
    }
}

#[test]
fn to_minutes_ignores_seconds() {
    let with_seconds = NaiveTime::from_hms_opt(9, 30, 45).unwrap();
    assert_eq!(to_minutes(with_seconds), 9 * 60 + 30);
}

#[test]
fn add_duration_computes_end_times() {
    assert_eq!(add_duration(time(9, 0), 30), time(9, 30));
    assert_eq!(add_duration(time(9, 45), 30), time(10, 15));
    assert_eq!(add_duration(time(23, 0), 59), time(23, 59));
}

#[test]
fn day_of_week_is_zero_based_on_sunday() {
    // 2024-01-14 was a Sunday, 2024-01-15 a Monday.
    assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()), 0);
    assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()), 1);
    assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()), 6);
}

#[test]
fn slots_fill_the_window_back_to_back() {
    let slots: Vec<_> = slot_sequence(time(9, 0), time(17, 0), 30).collect();

    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0], (time(9, 0), time(9, 30)));
    assert_eq!(slots[1], (time(9, 30), time(10, 0)));
    assert_eq!(slots[15], (time(16, 30), time(17, 0)));

    // No slot runs past the window end, and consecutive slots touch exactly.
    for pair in slots.windows(2) {
        assert_eq!(pair[0].1, pair[1].0);
    }
    assert!(slots.iter().all(|(_, end)| *end <= time(17, 0)));
}

#[test]
fn trailing_partial_slot_is_discarded() {
    let slots: Vec<_> = slot_sequence(time(9, 0), time(10, 15), 30).collect();
    assert_eq!(
        slots,
        vec![
            (time(9, 0), time(9, 30)),
            (time(9, 30), time(10, 0)),
        ]
    );
}

#[test]
fn window_shorter_than_duration_yields_no_slots() {
    assert_eq!(slot_sequence(time(9, 0), time(9, 20), 30).count(), 0);
}

#[test]
fn slot_sequence_is_restartable_and_deterministic() {
    let sequence = slot_sequence(time(10, 0), time(18, 0), 45);
    let first_pass: Vec<_> = sequence.clone().collect();
    let second_pass: Vec<_> = sequence.collect();
    assert_eq!(first_pass, second_pass);
    assert!(!first_pass.is_empty());
}
