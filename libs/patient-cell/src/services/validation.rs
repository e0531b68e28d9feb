// libs/patient-cell/src/services/validation.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use shared_models::{Cpf, OperationError};
use shared_utils::DocumentValidator;

use crate::models::{Patient, PatientValidationRules, RegisterPatientRequest};

/// Validates registration data and builds `Patient` values.
pub struct PatientFactory {
    rules: PatientValidationRules,
    validator: Arc<dyn DocumentValidator>,
}

impl PatientFactory {
    pub fn new(rules: PatientValidationRules, validator: Arc<dyn DocumentValidator>) -> Self {
        Self { rules, validator }
    }

    pub fn rules(&self) -> &PatientValidationRules {
        &self.rules
    }

    pub fn is_valid_document(&self, cpf: Cpf) -> bool {
        self.validator.is_valid(cpf)
    }

    /// Checks every rule and reports all failures together, in rule order.
    pub fn create(
        &self,
        request: RegisterPatientRequest,
        today: NaiveDate,
    ) -> Result<Patient, Vec<OperationError>> {
        debug!("Validating patient registration for CPF {}", request.cpf.value());

        let name = request.name.trim().to_string();
        let mut errors = Vec::new();

        if !self.validator.is_valid(request.cpf) {
            errors.push(OperationError::InvalidPatientDocument);
        }

        if name.chars().count() < self.rules.min_name_length {
            errors.push(OperationError::InvalidPatientName);
        }

        if !self.is_old_enough(request.birth_date, today) {
            errors.push(OperationError::InvalidPatientBirthdate);
        }

        if !errors.is_empty() {
            warn!("Patient registration rejected: {:?}", errors);
            return Err(errors);
        }

        Ok(Patient::new(request.cpf, name, request.birth_date))
    }

    fn is_old_enough(&self, birth_date: NaiveDate, today: NaiveDate) -> bool {
        today
            .years_since(birth_date)
            .is_some_and(|age| age >= self.rules.min_age_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_utils::test_utils::{date, TestCpf};
    use shared_utils::CpfChecksumValidator;

    fn factory() -> PatientFactory {
        PatientFactory::new(PatientValidationRules::default(), Arc::new(CpfChecksumValidator))
    }

    fn request(cpf: Cpf, name: &str, birth_date: NaiveDate) -> RegisterPatientRequest {
        RegisterPatientRequest {
            cpf,
            name: name.to_string(),
            birth_date,
        }
    }

    #[test]
    fn creates_valid_patient() {
        let patient = factory()
            .create(request(TestCpf::maria(), "Maria Silva", date(2000, 1, 1)), date(2030, 3, 4))
            .unwrap();

        assert_eq!(patient.cpf(), TestCpf::maria());
        assert_eq!(patient.name(), "Maria Silva");
        assert!(patient.appointments().is_empty());
    }

    #[test]
    fn accumulates_every_failure_in_order() {
        let errors = factory()
            .create(request(TestCpf::invalid(), "Ana", date(2025, 1, 1)), date(2030, 3, 4))
            .unwrap_err();

        assert_eq!(
            errors,
            vec![
                OperationError::InvalidPatientDocument,
                OperationError::InvalidPatientName,
                OperationError::InvalidPatientBirthdate,
            ]
        );
    }

    #[test]
    fn name_length_ignores_surrounding_whitespace() {
        let errors = factory()
            .create(request(TestCpf::maria(), "  Ana  ", date(2000, 1, 1)), date(2030, 3, 4))
            .unwrap_err();
        assert_eq!(errors, vec![OperationError::InvalidPatientName]);

        let patient = factory()
            .create(request(TestCpf::maria(), "  Maria ", date(2000, 1, 1)), date(2030, 3, 4))
            .unwrap();
        assert_eq!(patient.name(), "Maria");
    }

    #[test]
    fn thirteenth_birthday_is_old_enough() {
        let today = date(2030, 3, 4);

        assert!(factory()
            .create(request(TestCpf::maria(), "Maria Silva", date(2017, 3, 4)), today)
            .is_ok());

        let errors = factory()
            .create(request(TestCpf::maria(), "Maria Silva", date(2017, 3, 5)), today)
            .unwrap_err();
        assert_eq!(errors, vec![OperationError::InvalidPatientBirthdate]);
    }

    #[test]
    fn birth_date_in_the_future_is_rejected() {
        let errors = factory()
            .create(request(TestCpf::maria(), "Maria Silva", date(2031, 1, 1)), date(2030, 3, 4))
            .unwrap_err();
        assert_eq!(errors, vec![OperationError::InvalidPatientBirthdate]);
    }
}
