use std::io::{self, Write};

use appointment_cell::SchedulingRules;
use clinic_cell::{AgendaEntry, PatientSummary};
use patient_cell::PatientValidationRules;
use shared_models::{OperationError, OperationResult};

const DATE: &str = "%d/%m/%Y";
const TIME: &str = "%H:%M";

/// Rule limits quoted in the error messages.
pub struct MessageContext {
    pub patient: PatientValidationRules,
    pub scheduling: SchedulingRules,
}

impl MessageContext {
    pub fn message(&self, error: OperationError) -> String {
        match error {
            OperationError::InvalidPatientName => format!(
                "Name must have at least {} characters",
                self.patient.min_name_length
            ),
            OperationError::InvalidPatientBirthdate => format!(
                "Invalid birth date, the patient must be at least {} years old",
                self.patient.min_age_years
            ),
            OperationError::ScheduleInitialTimeIncorrect => format!(
                "Start time must be a multiple of {} minutes",
                self.scheduling.slot_minutes()
            ),
            OperationError::ScheduleEndTimeIncorrect => format!(
                "End time must be a multiple of {} minutes",
                self.scheduling.slot_minutes()
            ),
            OperationError::ScheduleOutsideOpeningHours => format!(
                "The clinic is open from {:02}:00 to {:02}:00",
                self.scheduling.opening_hour(),
                self.scheduling.closing_hour()
            ),
            other => other.to_string(),
        }
    }

    /// Success line, or the heading followed by one line per error.
    pub fn report(
        &self,
        out: &mut impl Write,
        result: &OperationResult,
        success: &str,
        failure: &str,
    ) -> io::Result<()> {
        if result.is_success() {
            return writeln!(out, "\n{}", success);
        }

        writeln!(out, "\n{}", failure)?;
        for error in &result.errors {
            writeln!(out, "- {}", self.message(*error))?;
        }
        Ok(())
    }
}

pub fn patient_table(out: &mut impl Write, patients: &[PatientSummary]) -> io::Result<()> {
    if patients.is_empty() {
        return writeln!(out, "\nNo registered patients");
    }

    let rule = "-".repeat(66);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "CPF            Name                           Birth date   Age")?;
    writeln!(out, "{}", rule)?;

    for patient in patients {
        writeln!(
            out,
            "{} {:<30} {}  {:>4}",
            patient.cpf_formatted,
            patient.name,
            patient.birth_date.format(DATE),
            patient.age
        )?;

        if let Some(slot) = &patient.future_appointment {
            writeln!(
                out,
                "               Scheduled for {} {} to {}",
                slot.start.format(DATE),
                slot.start.format(TIME),
                slot.end.format(TIME)
            )?;
        }
    }

    writeln!(out, "{}", rule)
}

pub fn agenda_table(out: &mut impl Write, entries: &[AgendaEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "\nNo appointments scheduled");
    }

    let rule = "-".repeat(70);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "   Date    Start End   Dur.  Name                           Birth date")?;
    writeln!(out, "{}", rule)?;

    for entry in entries {
        writeln!(
            out,
            "{} {} {} {:02}:{:02} {:<30} {}",
            entry.start.format(DATE),
            entry.start.format(TIME),
            entry.end.format(TIME),
            entry.duration_minutes / 60,
            entry.duration_minutes % 60,
            entry.patient_name,
            entry.patient_birth_date.format(DATE)
        )?;
    }

    writeln!(out, "{}", rule)
}
