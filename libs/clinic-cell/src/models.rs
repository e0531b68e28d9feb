// libs/clinic-cell/src/models.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use appointment_cell::Appointment;
use patient_cell::{Patient, PatientSortKey};
use shared_models::{AppointmentId, Cpf};

// ==============================================================================
// READ MODELS
// ==============================================================================

/// An appointment as shown next to its patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub id: AppointmentId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl From<&Appointment> for ScheduledSlot {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id(),
            start: appointment.start(),
            end: appointment.end(),
        }
    }
}

/// One row of the patient listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub cpf: Cpf,
    pub cpf_formatted: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub age: u32,
    pub future_appointment: Option<ScheduledSlot>,
}

impl PatientSummary {
    pub fn new(patient: &Patient, future_appointment: Option<&Appointment>, today: NaiveDate) -> Self {
        Self {
            cpf: patient.cpf(),
            cpf_formatted: patient.cpf().formatted(),
            name: patient.name().to_string(),
            birth_date: patient.birth_date(),
            age: patient.age_on(today),
            future_appointment: future_appointment.map(ScheduledSlot::from),
        }
    }
}

/// One row of the clinic agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub id: AppointmentId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    pub patient_cpf: Cpf,
    pub patient_name: String,
    pub patient_birth_date: NaiveDate,
}

impl AgendaEntry {
    pub fn new(appointment: &Appointment, patient: &Patient) -> Self {
        Self {
            id: appointment.id(),
            start: appointment.start(),
            end: appointment.end(),
            duration_minutes: appointment.duration().num_minutes(),
            patient_cpf: patient.cpf(),
            patient_name: patient.name().to_string(),
            patient_birth_date: patient.birth_date(),
        }
    }
}

// ==============================================================================
// QUERY MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientListQuery {
    pub sort: Option<PatientSortKey>,
}

// ==============================================================================
// CONSISTENCY MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyIssue {
    /// In the calendar but not linked from its patient.
    OrphanAppointment { appointment: AppointmentId, patient: Cpf },
    /// Linked from a patient but missing from the calendar, or owned by someone else.
    DanglingLink { patient: Cpf, appointment: AppointmentId },
    Overlap { first: AppointmentId, second: AppointmentId },
}
