// libs/clinic-cell/src/services/patient.rs
use std::sync::Arc;

use tracing::{debug, info, warn};

use patient_cell::{PatientFactory, PatientSortKey, PatientValidationRules, RegisterPatientRequest};
use shared_config::AppConfig;
use shared_models::{Cpf, OperationError, OperationResult};
use shared_utils::{Clock, DocumentValidator};

use crate::clinic::Clinic;
use crate::models::PatientSummary;

/// Patient registration, removal and listing against a clinic.
pub struct PatientService {
    factory: PatientFactory,
    clock: Arc<dyn Clock>,
}

impl PatientService {
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>, validator: Arc<dyn DocumentValidator>) -> Self {
        Self {
            factory: PatientFactory::new(PatientValidationRules::from_config(config), validator),
            clock,
        }
    }

    /// Gate run before asking for the rest of the registration data.
    pub fn can_register(&self, clinic: &Clinic, cpf: Cpf) -> OperationResult {
        self.check_can_register(clinic, cpf).into()
    }

    fn check_can_register(&self, clinic: &Clinic, cpf: Cpf) -> Result<(), OperationError> {
        if !self.factory.is_valid_document(cpf) {
            return Err(OperationError::InvalidPatientDocument);
        }
        if clinic.has_patient(cpf) {
            return Err(OperationError::PatientAlreadyRegistered);
        }
        Ok(())
    }

    /// A duplicate CPF is refused before the remaining fields are validated;
    /// otherwise every failing field rule is reported.
    pub fn register(&self, clinic: &mut Clinic, request: RegisterPatientRequest) -> OperationResult {
        let cpf = request.cpf;

        if clinic.has_patient(cpf) {
            warn!("Registration refused, CPF {} already registered", cpf.value());
            return OperationResult::failure(OperationError::PatientAlreadyRegistered);
        }

        let patient = match self.factory.create(request, self.clock.today()) {
            Ok(patient) => patient,
            Err(errors) => return OperationResult::failures(errors),
        };

        if !clinic.add_patient(patient) {
            return OperationResult::failure(OperationError::PatientAlreadyRegistered);
        }

        OperationResult::success()
    }

    pub fn can_remove(&self, clinic: &Clinic, cpf: Cpf) -> OperationResult {
        self.check_can_remove(clinic, cpf).into()
    }

    fn check_can_remove(&self, clinic: &Clinic, cpf: Cpf) -> Result<(), OperationError> {
        if !clinic.has_patient(cpf) {
            return Err(OperationError::PatientNotRegistered);
        }
        if !clinic.can_remove_patient(cpf, self.clock.now()) {
            return Err(OperationError::AlreadyScheduled);
        }
        Ok(())
    }

    pub fn remove(&self, clinic: &mut Clinic, cpf: Cpf) -> OperationResult {
        if let Err(error) = self.check_can_remove(clinic, cpf) {
            warn!("Removal of CPF {} refused: {:?}", cpf.value(), error);
            return OperationResult::failure(error);
        }

        match clinic.remove_patient(cpf) {
            Some(_) => {
                info!("Patient {} removed from the clinic", cpf.value());
                OperationResult::success()
            }
            None => OperationResult::failure(OperationError::PatientNotRegistered),
        }
    }

    pub fn list(&self, clinic: &Clinic, key: PatientSortKey) -> Vec<PatientSummary> {
        let now = self.clock.now();
        debug!("Listing {} patients by {:?}", clinic.patients().len(), key);

        clinic
            .patients()
            .sorted_by(key)
            .into_iter()
            .map(|patient| {
                let future = clinic.future_appointment(patient.cpf(), now);
                PatientSummary::new(patient, future, now.date())
            })
            .collect()
    }
}
