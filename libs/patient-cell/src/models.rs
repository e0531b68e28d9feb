// libs/patient-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_config::AppConfig;
use shared_models::{AppointmentId, Cpf};

// ==============================================================================
// CORE PATIENT MODEL
// ==============================================================================

/// A registered patient and the appointments linked to them.
///
/// Identity is the CPF: two `Patient` values are equal when their documents
/// match, whatever the rest of their state.
#[derive(Debug, Clone)]
pub struct Patient {
    cpf: Cpf,
    name: String,
    birth_date: NaiveDate,
    appointments: Vec<AppointmentId>,
}

impl Patient {
    pub(crate) fn new(cpf: Cpf, name: String, birth_date: NaiveDate) -> Self {
        Self {
            cpf,
            name,
            birth_date,
            appointments: Vec::new(),
        }
    }

    pub fn cpf(&self) -> Cpf {
        self.cpf
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Whole years completed on `date`; zero for dates before birth.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        date.years_since(self.birth_date).unwrap_or(0)
    }

    /// The patient's personal calendar, past appointments included.
    pub fn appointments(&self) -> &[AppointmentId] {
        &self.appointments
    }

    pub fn has_appointment(&self, id: AppointmentId) -> bool {
        self.appointments.contains(&id)
    }

    pub fn link_appointment(&mut self, id: AppointmentId) {
        if !self.has_appointment(id) {
            self.appointments.push(id);
        }
    }

    /// Returns false when the appointment was not linked to this patient.
    pub fn unlink_appointment(&mut self, id: AppointmentId) -> bool {
        match self.appointments.iter().position(|linked| *linked == id) {
            Some(index) => {
                self.appointments.remove(index);
                true
            }
            None => false,
        }
    }
}

impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.cpf == other.cpf
    }
}

impl Eq for Patient {}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub cpf: Cpf,
    pub name: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientSortKey {
    #[default]
    #[serde(alias = "cpf")]
    Document,
    Name,
}

// ==============================================================================
// VALIDATION MODELS
// ==============================================================================

#[derive(Debug, Clone)]
pub struct PatientValidationRules {
    pub min_name_length: usize,
    pub min_age_years: u32,
}

impl Default for PatientValidationRules {
    fn default() -> Self {
        Self {
            min_name_length: 5,
            min_age_years: 13,
        }
    }
}

impl PatientValidationRules {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            min_name_length: config.min_patient_name_length,
            min_age_years: config.min_patient_age_years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> Patient {
        Patient::new(
            Cpf::new(12345678909),
            "MARIA SILVA".to_string(),
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        )
    }

    #[test]
    fn age_counts_completed_years() {
        let p = patient();
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2012, 12, 31).unwrap()), 12);
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2013, 1, 1).unwrap()), 13);
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()), 0);
    }

    #[test]
    fn links_are_unique_and_removable() {
        let mut p = patient();
        let id = AppointmentId::new();

        p.link_appointment(id);
        p.link_appointment(id);
        assert_eq!(p.appointments(), &[id]);

        assert!(p.unlink_appointment(id));
        assert!(!p.unlink_appointment(id));
        assert!(p.appointments().is_empty());
    }

    #[test]
    fn equality_is_by_document() {
        let mut other = patient();
        other.link_appointment(AppointmentId::new());
        assert_eq!(patient(), other);
    }

    #[test]
    fn sort_key_accepts_cpf_alias() {
        let key: PatientSortKey = serde_json::from_str("\"cpf\"").unwrap();
        assert_eq!(key, PatientSortKey::Document);
        let key: PatientSortKey = serde_json::from_str("\"name\"").unwrap();
        assert_eq!(key, PatientSortKey::Name);
    }
}
