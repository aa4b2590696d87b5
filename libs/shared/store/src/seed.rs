// libs/shared/store/src/seed.rs
use chrono::NaiveTime;
use tracing::info;

use crate::memory::ClinicStore;
use crate::records::{NewDoctor, NewWeeklyAvailabilityWindow};

/// Load the demo practice: a handful of doctors plus their weekly
/// working-hours windows. Doctors and windows are administered outside this
/// system, so the seed stands in for the practice-administration tooling.
pub fn load_demo_practice(store: &ClinicStore) {
    let seeded: Result<(usize, usize), ()> = store.transaction(|tx| {
        let doctors = [
            ("Dr. John Smith", "Cardiology", "john.smith@hospital.com", "+1-555-0101", 15, 150.00, true),
            ("Dr. Sarah Johnson", "Dermatology", "sarah.johnson@hospital.com", "+1-555-0102", 8, 120.00, true),
            ("Dr. Michael Brown", "Pediatrics", "michael.brown@hospital.com", "+1-555-0103", 12, 100.00, true),
            ("Dr. Emily Davis", "Neurology", "emily.davis@hospital.com", "+1-555-0104", 10, 180.00, true),
            ("Dr. Robert Wilson", "Orthopedics", "robert.wilson@hospital.com", "+1-555-0105", 20, 160.00, true),
            ("Dr. Lisa Rodriguez", "Psychiatry", "lisa.rodriguez@hospital.com", "+1-555-0106", 7, 140.00, true),
            ("Dr. David Kim", "Ophthalmology", "david.kim@hospital.com", "+1-555-0107", 14, 130.00, false),
        ];

        let mut ids = Vec::with_capacity(doctors.len());
        for (name, specialization, email, phone, years, fee, available) in doctors {
            let doctor = tx.insert_doctor(NewDoctor {
                name: name.to_string(),
                specialization: specialization.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                years_of_experience: years,
                consultation_fee: fee,
                is_available: available,
            });
            ids.push(doctor.id);
        }

        // (doctor index, days of week, start, end, slot duration)
        let schedules: [(usize, &[u8], NaiveTime, NaiveTime, u32); 8] = [
            (0, &[1, 2, 3, 4, 5], hm(9, 0), hm(17, 0), 30),
            (1, &[1, 2, 3, 4, 5], hm(10, 0), hm(18, 0), 30),
            (2, &[1, 2, 3, 4, 5], hm(8, 0), hm(16, 0), 20),
            (2, &[6], hm(9, 0), hm(13, 0), 20),
            (3, &[1, 2, 3, 4, 5], hm(11, 0), hm(19, 0), 45),
            (4, &[1, 2, 3, 4, 5], hm(7, 0), hm(15, 0), 60),
            (5, &[1, 2, 3, 4, 5], hm(12, 0), hm(20, 0), 50),
            (6, &[2, 4], hm(14, 0), hm(17, 0), 25),
        ];

        let mut window_count = 0;
        for (doctor_idx, days, start, end, duration) in schedules {
            for &day in days {
                tx.insert_window(NewWeeklyAvailabilityWindow {
                    doctor_id: ids[doctor_idx],
                    day_of_week: day,
                    start_time: start,
                    end_time: end,
                    slot_duration_minutes: duration,
                    is_active: true,
                });
                window_count += 1;
            }
        }

        Ok((ids.len(), window_count))
    });

    if let Ok((doctors, windows)) = seeded {
        info!("Seeded demo practice: {} doctors, {} weekly windows", doctors, windows);
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}
