// libs/appointment-cell/src/services/booking.rs
use chrono::NaiveDateTime;
use tracing::{debug, warn};

use patient_cell::Patient;
use shared_models::OperationError;

use crate::models::{Appointment, SchedulingRules};
use crate::services::calendar::Calendar;
use crate::services::conflict::ConflictDetectionService;

/// Validates a requested slot and builds the appointment.
///
/// The factory never touches the calendar or the patient; linking both sides
/// is the clinic aggregate's job once the appointment exists.
pub struct AppointmentFactory {
    rules: SchedulingRules,
    conflict_service: ConflictDetectionService,
}

impl AppointmentFactory {
    pub fn new(rules: SchedulingRules) -> Self {
        Self {
            rules,
            conflict_service: ConflictDetectionService::new(),
        }
    }

    pub fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    pub fn create(
        &self,
        patient: &Patient,
        start: NaiveDateTime,
        end: NaiveDateTime,
        now: NaiveDateTime,
        calendar: &Calendar,
    ) -> Result<Appointment, OperationError> {
        debug!(
            "Validating appointment for CPF {} from {} to {}",
            patient.cpf().value(),
            start,
            end
        );

        self.validate(start, end, now, calendar).map_err(|error| {
            warn!("Appointment rejected for CPF {}: {:?}", patient.cpf().value(), error);
            error
        })?;

        Ok(Appointment::new(patient.cpf(), start, end))
    }

    /// Applies the rules in order and stops at the first one broken.
    pub fn validate(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        now: NaiveDateTime,
        calendar: &Calendar,
    ) -> Result<(), OperationError> {
        if start < now {
            return Err(OperationError::ScheduleDateInThePast);
        }
        if start >= end {
            return Err(OperationError::ScheduleInitialDateAfterEndDate);
        }
        if !self.rules.is_aligned(start) {
            return Err(OperationError::ScheduleInitialTimeIncorrect);
        }
        if !self.rules.is_aligned(end) {
            return Err(OperationError::ScheduleEndTimeIncorrect);
        }
        if !self.rules.within_opening_hours(start, end) {
            return Err(OperationError::ScheduleOutsideOpeningHours);
        }
        if self.conflict_service.has_conflict(calendar, start, end) {
            return Err(OperationError::ScheduleConflict);
        }

        Ok(())
    }
}
