// libs/clinic-cell/src/services/appointment.rs
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use appointment_cell::{
    Appointment, AppointmentFactory, CancelAppointmentRequest, ScheduleAppointmentRequest, SchedulingRules,
};
use shared_config::AppConfig;
use shared_models::{AppointmentId, Cpf, OperationError, OperationResult};
use shared_utils::Clock;

use crate::clinic::Clinic;
use crate::models::AgendaEntry;

/// Scheduling, cancellation and agenda listing against a clinic.
pub struct AppointmentService {
    factory: AppointmentFactory,
    clock: Arc<dyn Clock>,
}

impl AppointmentService {
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            factory: AppointmentFactory::new(SchedulingRules::from_config(config)),
            clock,
        }
    }

    pub fn rules(&self) -> &SchedulingRules {
        self.factory.rules()
    }

    /// The patient must exist and hold no future appointment.
    pub fn can_schedule(&self, clinic: &Clinic, cpf: Cpf) -> OperationResult {
        self.check_can_schedule(clinic, cpf).into()
    }

    fn check_can_schedule(&self, clinic: &Clinic, cpf: Cpf) -> Result<(), OperationError> {
        if !clinic.has_patient(cpf) {
            return Err(OperationError::PatientNotRegistered);
        }
        if clinic.has_future_appointment(cpf, self.clock.now()) {
            return Err(OperationError::AlreadyScheduled);
        }
        Ok(())
    }

    pub fn schedule(&self, clinic: &mut Clinic, request: ScheduleAppointmentRequest) -> OperationResult {
        self.book(clinic, request).map(|_| ()).into()
    }

    /// Runs the gate, validates the slot and commits it, returning the new id.
    pub fn book(
        &self,
        clinic: &mut Clinic,
        request: ScheduleAppointmentRequest,
    ) -> Result<AppointmentId, OperationError> {
        let cpf = request.cpf;
        self.check_can_schedule(clinic, cpf).map_err(|error| {
            warn!("Scheduling refused for CPF {}: {:?}", cpf.value(), error);
            error
        })?;

        let patient = clinic.patient(cpf).ok_or(OperationError::PatientNotRegistered)?;
        let appointment = self.factory.create(
            patient,
            request.start,
            request.end,
            self.clock.now(),
            clinic.agenda(),
        )?;

        let id = clinic.add_appointment(appointment)?;
        info!(
            "Appointment {} scheduled for CPF {} from {} to {}",
            id,
            cpf.value(),
            request.start,
            request.end
        );
        Ok(id)
    }

    /// The patient must exist and hold a future appointment.
    pub fn can_cancel(&self, clinic: &Clinic, cpf: Cpf) -> OperationResult {
        self.future_appointment(clinic, cpf).map(|_| ()).into()
    }

    fn future_appointment<'a>(&self, clinic: &'a Clinic, cpf: Cpf) -> Result<&'a Appointment, OperationError> {
        if !clinic.has_patient(cpf) {
            return Err(OperationError::PatientNotRegistered);
        }
        clinic
            .future_appointment(cpf, self.clock.now())
            .ok_or(OperationError::ScheduleNotRegistered)
    }

    /// Cancels the patient's future appointment when it starts exactly at
    /// `request.start`. Any other start is reported as not registered.
    pub fn cancel(&self, clinic: &mut Clinic, request: CancelAppointmentRequest) -> OperationResult {
        let cpf = request.cpf;

        let id = match self.future_appointment(clinic, cpf) {
            Ok(appointment) if appointment.starts_at(request.start) => appointment.id(),
            Ok(_) => {
                warn!("CPF {} has no appointment starting at {}", cpf.value(), request.start);
                return OperationResult::failure(OperationError::ScheduleNotRegistered);
            }
            Err(error) => {
                warn!("Cancellation refused for CPF {}: {:?}", cpf.value(), error);
                return OperationResult::failure(error);
            }
        };

        match clinic.remove_appointment(id) {
            Some(_) => {
                info!("Appointment {} cancelled for CPF {}", id, cpf.value());
                OperationResult::success()
            }
            None => OperationResult::failure(OperationError::ScheduleNotRegistered),
        }
    }

    /// Every appointment, ascending by start.
    pub fn list(&self, clinic: &Clinic) -> Vec<AgendaEntry> {
        project(clinic, clinic.agenda().sorted())
    }

    /// Appointments starting within `[from, to]`, ascending by start.
    pub fn list_in_range(&self, clinic: &Clinic, from: NaiveDateTime, to: NaiveDateTime) -> Vec<AgendaEntry> {
        debug!("Listing agenda from {} to {}", from, to);
        project(clinic, clinic.agenda().starting_within(from, to))
    }
}

fn project(clinic: &Clinic, appointments: Vec<&Appointment>) -> Vec<AgendaEntry> {
    appointments
        .into_iter()
        .filter_map(|appointment| match clinic.patient(appointment.patient()) {
            Some(patient) => Some(AgendaEntry::new(appointment, patient)),
            None => {
                warn!("Appointment {} has no registered patient", appointment.id());
                None
            }
        })
        .collect()
}
