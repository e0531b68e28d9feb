// libs/appointment-cell/src/models.rs
use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

use shared_config::AppConfig;
use shared_models::{AppointmentId, Cpf};

use crate::services::conflict::intervals_overlap;

// ==============================================================================
// CORE APPOINTMENT MODEL
// ==============================================================================

/// A booked interval `[start, end)` for one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    id: AppointmentId,
    patient: Cpf,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Appointment {
    pub(crate) fn new(patient: Cpf, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: AppointmentId::new(),
            patient,
            start,
            end,
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn patient(&self) -> Cpf {
        self.patient
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn starts_at(&self, instant: NaiveDateTime) -> bool {
        self.start == instant
    }

    /// Strictly after `now`; an appointment starting right now is not future.
    pub fn is_future(&self, now: NaiveDateTime) -> bool {
        self.start > now
    }

    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        intervals_overlap(self.start, self.end, start, end)
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub cpf: Cpf,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub cpf: Cpf,
    pub start: NaiveDateTime,
}

/// Optional `[from, to]` window over appointment start instants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgendaQuery {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

// ==============================================================================
// VALIDATION MODELS
// ==============================================================================

/// Opening hours and slot size. Always consistent: opening before closing
/// and a non-zero slot that tiles the hour.
#[derive(Debug, Clone)]
pub struct SchedulingRules {
    opening_hour: u32,
    closing_hour: u32,
    slot_minutes: u32,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            opening_hour: 8,
            closing_hour: 19,
            slot_minutes: 15,
        }
    }
}

impl SchedulingRules {
    /// `None` unless opening < closing <= 24 and the slot divides 60.
    pub fn new(opening_hour: u32, closing_hour: u32, slot_minutes: u32) -> Option<Self> {
        let consistent = opening_hour < closing_hour
            && closing_hour <= 24
            && slot_minutes > 0
            && 60 % slot_minutes == 0;

        consistent.then_some(Self {
            opening_hour,
            closing_hour,
            slot_minutes,
        })
    }

    /// Falls back to the defaults when the configured schedule is inconsistent.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.opening_hour, config.closing_hour, config.slot_minutes).unwrap_or_else(|| {
            warn!(
                "Inconsistent clinic schedule ({}h-{}h, {} min slots), using defaults",
                config.opening_hour, config.closing_hour, config.slot_minutes
            );
            Self::default()
        })
    }

    pub fn opening_hour(&self) -> u32 {
        self.opening_hour
    }

    pub fn closing_hour(&self) -> u32 {
        self.closing_hour
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// Minute is a multiple of the slot size.
    pub fn is_aligned(&self, instant: NaiveDateTime) -> bool {
        instant.minute() % self.slot_minutes == 0
    }

    /// Start hour no earlier than opening, end no later than `closing:00`.
    pub fn within_opening_hours(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        !(start.hour() < self.opening_hour
            || end.hour() > self.closing_hour
            || (end.hour() == self.closing_hour && end.minute() > 0))
    }
}
