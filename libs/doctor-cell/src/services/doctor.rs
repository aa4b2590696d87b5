// libs/doctor-cell/src/services/doctor.rs
use std::sync::Arc;

use tracing::debug;

use shared_models::{PageParams, Paginated};
use shared_store::ClinicStore;

use crate::models::{DoctorDetailResponse, DoctorError, DoctorResponse, DoctorSearchQuery, TimeSlotView};

pub struct DoctorDirectoryService {
    store: Arc<ClinicStore>,
}

impl DoctorDirectoryService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// List doctors with optional specialization / availability filters.
    /// The specialization filter is a case-insensitive substring match.
    pub async fn list_doctors(&self, query: DoctorSearchQuery) -> Paginated<DoctorResponse> {
        debug!("Listing doctors with filters: {:?}", query);

        let params = PageParams::new(query.page, query.limit);
        let needle = query
            .specialization
            .as_deref()
            .map(|s| s.to_lowercase());

        self.store.read(|tables| {
            let matching: Vec<DoctorResponse> = tables
                .doctors()
                .filter(|doctor| {
                    needle
                        .as_deref()
                        .is_none_or(|n| doctor.specialization.to_lowercase().contains(n))
                })
                .filter(|doctor| query.available.is_none_or(|a| doctor.is_available == a))
                .map(DoctorResponse::from)
                .collect();

            let total = matching.len();
            let page: Vec<DoctorResponse> = matching
                .into_iter()
                .skip(params.offset())
                .take(params.limit)
                .collect();

            Paginated::new(page, total, params.page, params.limit)
        })
    }

    /// Doctor detail including the weekly working-hours windows.
    pub async fn get_doctor(&self, doctor_id: i64) -> Result<DoctorDetailResponse, DoctorError> {
        debug!("Fetching doctor: {}", doctor_id);

        self.store.read(|tables| {
            let doctor = tables
                .doctor(doctor_id)
                .ok_or(DoctorError::NotFound { doctor_id })?;

            let time_slots = tables
                .windows_for_doctor(doctor_id)
                .into_iter()
                .map(TimeSlotView::from)
                .collect();

            Ok(DoctorDetailResponse {
                doctor: DoctorResponse::from(doctor),
                time_slots,
            })
        })
    }
}
