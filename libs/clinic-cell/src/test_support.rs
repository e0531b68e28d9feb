// libs/clinic-cell/src/test_support.rs
use std::sync::Arc;

use axum::Router;
use chrono::NaiveDateTime;

use appointment_cell::{CancelAppointmentRequest, ScheduleAppointmentRequest};
use patient_cell::RegisterPatientRequest;
use shared_config::AppConfig;
use shared_models::{Cpf, OperationResult};
use shared_utils::test_utils::{date, fixed_clock, TestConfig};
use shared_utils::{CpfChecksumValidator, FixedClock};

use crate::clinic::Clinic;
use crate::router::clinic_routes;
use crate::services::{AppointmentService, PatientService};
use crate::state::ClinicState;

/// A clinic wired to a frozen clock, with shortcuts for the common flows.
pub struct TestClinic {
    pub clinic: Clinic,
    pub clock: Arc<FixedClock>,
    pub patients: PatientService,
    pub appointments: AppointmentService,
}

impl TestClinic {
    pub fn new() -> Self {
        Self::with_config(&TestConfig::default().to_app_config())
    }

    pub fn with_config(config: &AppConfig) -> Self {
        let clock = fixed_clock();
        Self {
            clinic: Clinic::new(),
            patients: PatientService::new(config, clock.clone(), Arc::new(CpfChecksumValidator)),
            appointments: AppointmentService::new(config, clock.clone()),
            clock,
        }
    }

    pub fn register(&mut self, cpf: Cpf, name: &str) -> OperationResult {
        self.patients.register(
            &mut self.clinic,
            RegisterPatientRequest {
                cpf,
                name: name.to_string(),
                birth_date: date(2000, 1, 1),
            },
        )
    }

    pub fn schedule(&mut self, cpf: Cpf, start: NaiveDateTime, end: NaiveDateTime) -> OperationResult {
        self.appointments
            .schedule(&mut self.clinic, ScheduleAppointmentRequest { cpf, start, end })
    }

    pub fn cancel(&mut self, cpf: Cpf, start: NaiveDateTime) -> OperationResult {
        self.appointments
            .cancel(&mut self.clinic, CancelAppointmentRequest { cpf, start })
    }

    pub fn remove(&mut self, cpf: Cpf) -> OperationResult {
        self.patients.remove(&mut self.clinic, cpf)
    }
}

impl Default for TestClinic {
    fn default() -> Self {
        Self::new()
    }
}

/// Router over a fresh clinic whose clock is frozen at the reference instant.
pub fn test_router() -> (Router, Arc<FixedClock>) {
    let config = TestConfig::default().to_app_config();
    let clock = fixed_clock();
    let state = ClinicState::new(&config, clock.clone(), Arc::new(CpfChecksumValidator));
    (clinic_routes(Arc::new(state)), clock)
}
