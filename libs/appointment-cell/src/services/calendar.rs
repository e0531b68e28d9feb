// libs/appointment-cell/src/services/calendar.rs
use std::collections::HashMap;

use chrono::NaiveDateTime;

use shared_models::AppointmentId;

use crate::models::Appointment;

/// Arena of appointments keyed by id.
///
/// Insertion order is not kept; every listing sorts at read time by start
/// instant (then id, so equal starts still list deterministically).
#[derive(Debug, Default)]
pub struct Calendar {
    appointments: HashMap<AppointmentId, Appointment>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, appointment: Appointment) -> AppointmentId {
        let id = appointment.id();
        self.appointments.insert(id, appointment);
        id
    }

    pub fn remove(&mut self, id: AppointmentId) -> Option<Appointment> {
        self.appointments.remove(&id)
    }

    pub fn get(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.get(&id)
    }

    pub fn contains(&self, id: AppointmentId) -> bool {
        self.appointments.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.values()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn sorted(&self) -> Vec<&Appointment> {
        sort_by_start(self.appointments.values().collect())
    }

    /// Appointments whose start lies in `[from, to]`, both ends inclusive.
    pub fn starting_within(&self, from: NaiveDateTime, to: NaiveDateTime) -> Vec<&Appointment> {
        sort_by_start(
            self.appointments
                .values()
                .filter(|a| a.start() >= from && a.start() <= to)
                .collect(),
        )
    }
}

fn sort_by_start(mut appointments: Vec<&Appointment>) -> Vec<&Appointment> {
    appointments.sort_by_key(|a| (a.start(), a.id()));
    appointments
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::Cpf;
    use shared_utils::test_utils::at;

    fn appointment(day: u32, hour: u32) -> Appointment {
        Appointment::new(
            Cpf::new(12345678909),
            at(2030, 3, day, hour, 0),
            at(2030, 3, day, hour + 1, 0),
        )
    }

    #[test]
    fn insert_and_remove_by_id() {
        let mut calendar = Calendar::new();
        let id = calendar.insert(appointment(5, 9));

        assert!(calendar.contains(id));
        assert_eq!(calendar.len(), 1);

        let removed = calendar.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(calendar.is_empty());
        assert!(calendar.remove(id).is_none());
    }

    #[test]
    fn lists_in_start_order() {
        let mut calendar = Calendar::new();
        calendar.insert(appointment(6, 9));
        calendar.insert(appointment(5, 14));
        calendar.insert(appointment(5, 9));

        let starts: Vec<_> = calendar.sorted().iter().map(|a| a.start()).collect();
        assert_eq!(
            starts,
            vec![at(2030, 3, 5, 9, 0), at(2030, 3, 5, 14, 0), at(2030, 3, 6, 9, 0)]
        );
    }

    #[test]
    fn range_is_inclusive_on_start() {
        let mut calendar = Calendar::new();
        calendar.insert(appointment(5, 9));
        calendar.insert(appointment(5, 14));
        calendar.insert(appointment(6, 9));

        let within = calendar.starting_within(at(2030, 3, 5, 9, 0), at(2030, 3, 5, 14, 0));
        assert_eq!(within.len(), 2);

        let within = calendar.starting_within(at(2030, 3, 5, 9, 1), at(2030, 3, 6, 9, 0));
        let starts: Vec<_> = within.iter().map(|a| a.start()).collect();
        assert_eq!(starts, vec![at(2030, 3, 5, 14, 0), at(2030, 3, 6, 9, 0)]);
    }

    #[test]
    fn empty_calendar_lists_nothing() {
        let calendar = Calendar::new();
        assert!(calendar.sorted().is_empty());
        assert!(calendar
            .starting_within(at(2030, 1, 1, 0, 0), at(2030, 12, 31, 23, 59))
            .is_empty());
    }
}
