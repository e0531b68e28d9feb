// libs/patient-cell/src/services/registry.rs
use tracing::debug;

use shared_models::Cpf;

use crate::models::{Patient, PatientSortKey};

/// The set of registered patients, unique by CPF.
///
/// Lookups are linear; a clinic registry is small and insertion order is
/// kept so listings tie-break predictably.
#[derive(Debug, Default)]
pub struct PatientRegistry {
    patients: Vec<Patient>,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, leaving the registry untouched, on a duplicate CPF.
    pub fn add(&mut self, patient: Patient) -> bool {
        if self.contains(patient.cpf()) {
            debug!("CPF {} already registered", patient.cpf().value());
            return false;
        }

        self.patients.push(patient);
        true
    }

    pub fn remove(&mut self, cpf: Cpf) -> Option<Patient> {
        let index = self.patients.iter().position(|p| p.cpf() == cpf)?;
        Some(self.patients.remove(index))
    }

    pub fn get(&self, cpf: Cpf) -> Option<&Patient> {
        self.patients.iter().find(|p| p.cpf() == cpf)
    }

    pub fn get_mut(&mut self, cpf: Cpf) -> Option<&mut Patient> {
        self.patients.iter_mut().find(|p| p.cpf() == cpf)
    }

    pub fn contains(&self, cpf: Cpf) -> bool {
        self.get(cpf).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Snapshot of the registry ordered by `key`.
    ///
    /// Names compare byte-wise, so ordering is case-sensitive; equal names
    /// fall back to CPF order.
    pub fn sorted_by(&self, key: PatientSortKey) -> Vec<&Patient> {
        let mut patients: Vec<&Patient> = self.patients.iter().collect();

        match key {
            PatientSortKey::Document => patients.sort_by_key(|p| p.cpf()),
            PatientSortKey::Name => {
                patients.sort_by(|a, b| a.name().cmp(b.name()).then(a.cpf().cmp(&b.cpf())))
            }
        }

        patients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patient(cpf: u64, name: &str) -> Patient {
        Patient::new(
            Cpf::new(cpf),
            name.to_string(),
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        )
    }

    #[test]
    fn rejects_duplicate_documents() {
        let mut registry = PatientRegistry::new();
        assert!(registry.add(patient(52998224725, "JOAO SOUZA")));
        assert!(!registry.add(patient(52998224725, "OUTRO NOME")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(Cpf::new(52998224725)).unwrap().name(), "JOAO SOUZA");
    }

    #[test]
    fn remove_returns_the_patient() {
        let mut registry = PatientRegistry::new();
        registry.add(patient(52998224725, "JOAO SOUZA"));

        let removed = registry.remove(Cpf::new(52998224725)).unwrap();
        assert_eq!(removed.name(), "JOAO SOUZA");
        assert!(registry.is_empty());
        assert!(registry.remove(Cpf::new(52998224725)).is_none());
    }

    #[test]
    fn sorts_by_document_numerically() {
        let mut registry = PatientRegistry::new();
        registry.add(patient(52998224725, "B"));
        registry.add(patient(1234567890, "C"));
        registry.add(patient(12345678909, "A"));

        let order: Vec<u64> = registry
            .sorted_by(PatientSortKey::Document)
            .iter()
            .map(|p| p.cpf().value())
            .collect();
        assert_eq!(order, vec![1234567890, 12345678909, 52998224725]);
    }

    #[test]
    fn sorts_by_name_case_sensitively() {
        let mut registry = PatientRegistry::new();
        registry.add(patient(3, "beatriz"));
        registry.add(patient(2, "Carlos"));
        registry.add(patient(1, "Ana"));

        let order: Vec<&str> = registry
            .sorted_by(PatientSortKey::Name)
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(order, vec!["Ana", "Carlos", "beatriz"]);
    }

    #[test]
    fn empty_registry_sorts_to_empty() {
        let registry = PatientRegistry::new();
        assert!(registry.sorted_by(PatientSortKey::Name).is_empty());
    }
}
