// libs/appointment-cell/src/services/conflict.rs
use chrono::NaiveDateTime;
use crate::services::calendar::Calendar;

/// True when a candidate `[start, end)` collides with an existing interval.
///
/// The candidate collides when it ends inside the existing one, starts inside
/// it, or contains it. Touching endpoints do not collide.
pub fn intervals_overlap(
    existing_start: NaiveDateTime,
    existing_end: NaiveDateTime,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> bool {
    (end > existing_start && end <= existing_end)
        || (start >= existing_start && start < existing_end)
        || (start <= existing_start && end >= existing_end)
}

#[derive(Debug, Default)]
pub struct ConflictDetectionService;

impl ConflictDetectionService {
    pub fn new() -> Self {
        Self
    }

    pub fn has_conflict(&self, calendar: &Calendar, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        calendar
            .iter()
            .any(|appointment| appointment.overlaps(start, end))
    }
}
