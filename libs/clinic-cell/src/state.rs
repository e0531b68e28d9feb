// libs/clinic-cell/src/state.rs
use std::sync::Arc;

use tokio::sync::RwLock;

use shared_config::AppConfig;
use shared_utils::{Clock, CpfChecksumValidator, DocumentValidator, SystemClock};

use crate::clinic::Clinic;
use crate::services::{AppointmentService, PatientService};

/// Everything a request handler needs. One lock guards the whole aggregate,
/// so mutations run one at a time.
pub struct ClinicState {
    pub clinic: RwLock<Clinic>,
    pub patients: PatientService,
    pub appointments: AppointmentService,
}

impl ClinicState {
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>, validator: Arc<dyn DocumentValidator>) -> Self {
        Self {
            clinic: RwLock::new(Clinic::new()),
            patients: PatientService::new(config, clock.clone(), validator),
            appointments: AppointmentService::new(config, clock),
        }
    }

    /// Wall clock and the CPF checksum.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config, Arc::new(SystemClock), Arc::new(CpfChecksumValidator))
    }
}
