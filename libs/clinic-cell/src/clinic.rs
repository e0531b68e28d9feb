// libs/clinic-cell/src/clinic.rs
use chrono::NaiveDateTime;
use tracing::{debug, info};

use appointment_cell::{Appointment, Calendar};
use patient_cell::{Patient, PatientRegistry};
use shared_models::{AppointmentId, Cpf, OperationError};

use crate::models::ConsistencyIssue;

/// Aggregate root: the patient registry plus the clinic-wide calendar.
///
/// Every mutation that touches both sides goes through here, so an
/// appointment is always in the calendar and linked from exactly its
/// owner, or in neither.
#[derive(Debug, Default)]
pub struct Clinic {
    patients: PatientRegistry,
    agenda: Calendar,
}

impl Clinic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patients(&self) -> &PatientRegistry {
        &self.patients
    }

    pub fn agenda(&self) -> &Calendar {
        &self.agenda
    }

    pub fn patient(&self, cpf: Cpf) -> Option<&Patient> {
        self.patients.get(cpf)
    }

    pub fn has_patient(&self, cpf: Cpf) -> bool {
        self.patients.contains(cpf)
    }

    pub fn add_patient(&mut self, patient: Patient) -> bool {
        let cpf = patient.cpf();
        let added = self.patients.add(patient);
        if added {
            info!("Patient {} registered", cpf.value());
        }
        added
    }

    /// Removes the patient together with any appointments still linked to
    /// them. Callers check `can_remove_patient` first so only past
    /// appointments go with it.
    pub fn remove_patient(&mut self, cpf: Cpf) -> Option<Patient> {
        let patient = self.patients.remove(cpf)?;

        for id in patient.appointments() {
            if self.agenda.remove(*id).is_some() {
                debug!("Dropped past appointment {} of patient {}", id, cpf.value());
            }
        }

        info!("Patient {} removed", cpf.value());
        Some(patient)
    }

    /// The patient's earliest appointment starting strictly after `now`.
    pub fn future_appointment(&self, cpf: Cpf, now: NaiveDateTime) -> Option<&Appointment> {
        let patient = self.patients.get(cpf)?;

        patient
            .appointments()
            .iter()
            .filter_map(|id| self.agenda.get(*id))
            .filter(|appointment| appointment.is_future(now))
            .min_by_key(|appointment| appointment.start())
    }

    pub fn has_future_appointment(&self, cpf: Cpf, now: NaiveDateTime) -> bool {
        self.future_appointment(cpf, now).is_some()
    }

    pub fn can_remove_patient(&self, cpf: Cpf, now: NaiveDateTime) -> bool {
        !self.has_future_appointment(cpf, now)
    }

    /// Commits a validated appointment: links it to its patient and inserts
    /// it in the calendar in one step.
    pub fn add_appointment(&mut self, appointment: Appointment) -> Result<AppointmentId, OperationError> {
        let patient = self
            .patients
            .get_mut(appointment.patient())
            .ok_or(OperationError::PatientNotRegistered)?;

        patient.link_appointment(appointment.id());
        let id = self.agenda.insert(appointment);

        info!("Appointment {} committed", id);
        Ok(id)
    }

    /// Deletes the appointment from the calendar and clears the patient link.
    pub fn remove_appointment(&mut self, id: AppointmentId) -> Option<Appointment> {
        let appointment = self.agenda.remove(id)?;

        if let Some(patient) = self.patients.get_mut(appointment.patient()) {
            patient.unlink_appointment(id);
        }

        info!("Appointment {} removed", id);
        Some(appointment)
    }

    /// Every violation of the aggregate invariants; empty when consistent.
    pub fn verify_consistency(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();

        for appointment in self.agenda.iter() {
            let linked = self
                .patients
                .get(appointment.patient())
                .is_some_and(|p| p.has_appointment(appointment.id()));

            if !linked {
                issues.push(ConsistencyIssue::OrphanAppointment {
                    appointment: appointment.id(),
                    patient: appointment.patient(),
                });
            }
        }

        for patient in self.patients.iter() {
            for id in patient.appointments() {
                let owned = self
                    .agenda
                    .get(*id)
                    .is_some_and(|a| a.patient() == patient.cpf());

                if !owned {
                    issues.push(ConsistencyIssue::DanglingLink {
                        patient: patient.cpf(),
                        appointment: *id,
                    });
                }
            }
        }

        let sorted = self.agenda.sorted();
        for (index, first) in sorted.iter().enumerate() {
            for second in &sorted[index + 1..] {
                if first.overlaps(second.start(), second.end()) {
                    issues.push(ConsistencyIssue::Overlap {
                        first: first.id(),
                        second: second.id(),
                    });
                }
            }
        }

        issues
    }
}
