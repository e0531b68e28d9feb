use assert_matches::assert_matches;
use chrono::Duration;

use clinic_cell::test_support::TestClinic;
use patient_cell::PatientSortKey;
use shared_models::{OperationError, OperationResult, OperationStatus};
use shared_utils::test_utils::{at, TestCpf};
use shared_utils::Clock;

fn assert_consistent(t: &TestClinic) {
    let issues = t.clinic.verify_consistency();
    assert!(issues.is_empty(), "inconsistent clinic: {:?}", issues);
}

#[test]
fn maria_silva_end_to_end() {
    let mut t = TestClinic::new();
    let maria = TestCpf::maria();

    assert!(t.register(maria, "Maria Silva").is_success());

    assert_eq!(
        t.schedule(maria, at(2030, 3, 1, 9, 0), at(2030, 3, 1, 10, 0)),
        OperationResult::failure(OperationError::ScheduleDateInThePast)
    );

    assert!(t.schedule(maria, at(2030, 3, 5, 9, 0), at(2030, 3, 5, 9, 30)).is_success());
    assert_consistent(&t);

    assert_eq!(
        t.schedule(maria, at(2030, 3, 6, 9, 0), at(2030, 3, 6, 9, 30)),
        OperationResult::failure(OperationError::AlreadyScheduled)
    );

    assert_eq!(t.remove(maria), OperationResult::failure(OperationError::AlreadyScheduled));

    assert!(t.cancel(maria, at(2030, 3, 5, 9, 0)).is_success());
    assert!(t.remove(maria).is_success());

    assert!(t.clinic.patients().is_empty());
    assert!(t.clinic.agenda().is_empty());
    assert_consistent(&t);
}

#[test]
fn schedule_then_cancel_restores_prior_state() {
    let mut t = TestClinic::new();
    let maria = TestCpf::maria();
    let other = TestCpf::nth(1);
    t.register(maria, "MARIA SILVA");
    t.register(other, "JOAO SOUZA");
    t.schedule(other, at(2030, 3, 5, 14, 0), at(2030, 3, 5, 15, 0));

    let before = t.clinic.agenda().len();

    assert!(t.schedule(maria, at(2030, 3, 5, 9, 0), at(2030, 3, 5, 10, 0)).is_success());
    assert!(t.cancel(maria, at(2030, 3, 5, 9, 0)).is_success());

    assert_eq!(t.clinic.agenda().len(), before);
    assert!(!t.clinic.has_future_appointment(maria, t.clock.now()));
    assert!(t.appointments.can_schedule(&t.clinic, maria).is_success());
    assert_consistent(&t);
}

#[test]
fn cancelling_missing_appointment_changes_nothing() {
    let mut t = TestClinic::new();
    let maria = TestCpf::maria();
    t.register(maria, "MARIA SILVA");
    t.schedule(maria, at(2030, 3, 5, 9, 0), at(2030, 3, 5, 10, 0));

    for _ in 0..2 {
        assert_eq!(
            t.cancel(maria, at(2030, 3, 5, 11, 0)),
            OperationResult::failure(OperationError::ScheduleNotRegistered)
        );
    }

    assert_eq!(t.clinic.agenda().len(), 1);
    assert_eq!(t.clinic.patient(maria).unwrap().appointments().len(), 1);
    assert_consistent(&t);
}

#[test]
fn back_to_back_appointments_for_different_patients() {
    let mut t = TestClinic::new();
    let first = TestCpf::nth(1);
    let second = TestCpf::nth(2);
    t.register(first, "PATIENT ONE");
    t.register(second, "PATIENT TWO");

    assert!(t.schedule(first, at(2030, 3, 5, 9, 0), at(2030, 3, 5, 10, 0)).is_success());
    assert!(t.schedule(second, at(2030, 3, 5, 10, 0), at(2030, 3, 5, 11, 0)).is_success());
    assert_consistent(&t);
}

#[test]
fn overlapping_request_conflicts() {
    let mut t = TestClinic::new();
    let first = TestCpf::nth(1);
    let second = TestCpf::nth(2);
    t.register(first, "PATIENT ONE");
    t.register(second, "PATIENT TWO");
    t.schedule(first, at(2030, 3, 5, 9, 0), at(2030, 3, 5, 10, 0));

    assert_eq!(
        t.schedule(second, at(2030, 3, 5, 8, 0), at(2030, 3, 5, 11, 0)),
        OperationResult::failure(OperationError::ScheduleConflict)
    );
    assert_eq!(t.clinic.agenda().len(), 1);
}

#[test]
fn closing_time_boundary() {
    let mut t = TestClinic::new();
    let first = TestCpf::nth(1);
    let second = TestCpf::nth(2);
    t.register(first, "PATIENT ONE");
    t.register(second, "PATIENT TWO");

    assert!(t.schedule(first, at(2030, 3, 5, 18, 0), at(2030, 3, 5, 19, 0)).is_success());

    let late = t.schedule(second, at(2030, 3, 6, 18, 0), at(2030, 3, 6, 19, 15));
    assert_eq!(late.status, OperationStatus::Failure);
    assert_eq!(late.errors, vec![OperationError::ScheduleOutsideOpeningHours]);

    let early = t.schedule(second, at(2030, 3, 6, 7, 45), at(2030, 3, 6, 8, 30));
    assert_eq!(early, OperationResult::failure(OperationError::ScheduleOutsideOpeningHours));
}

#[test]
fn no_overlap_after_many_schedules() {
    let mut t = TestClinic::new();
    let mut booked = 0;

    for index in 0..30u64 {
        let cpf = TestCpf::nth(index);
        t.register(cpf, &format!("PATIENT {index:02}"));

        // Candidate slots deliberately collide with each other.
        let start = at(2030, 3, 5, 8, 0) + Duration::minutes(30 * (index as i64 % 12));
        let end = start + Duration::minutes(45);

        let result = t.schedule(cpf, start, end);
        if result.is_success() {
            booked += 1;
        } else {
            assert_matches!(
                result.errors.as_slice(),
                [OperationError::ScheduleConflict] | [OperationError::ScheduleOutsideOpeningHours]
            );
        }
        assert_consistent(&t);
    }

    assert_eq!(t.clinic.agenda().len(), booked);
    assert!(booked > 0);
}

#[test]
fn patient_listing_shows_future_appointment_until_it_passes() {
    let mut t = TestClinic::new();
    let maria = TestCpf::maria();
    t.register(maria, "MARIA SILVA");
    t.schedule(maria, at(2030, 3, 5, 9, 0), at(2030, 3, 5, 10, 0));

    let listed = t.patients.list(&t.clinic, PatientSortKey::Name);
    assert_matches!(
        &listed[0].future_appointment,
        Some(slot) if slot.start == at(2030, 3, 5, 9, 0)
    );

    t.clock.set(at(2030, 3, 5, 9, 0));
    let listed = t.patients.list(&t.clinic, PatientSortKey::Name);
    assert!(listed[0].future_appointment.is_none());

    // Past appointment only: removal allowed and it takes the history with it.
    assert!(t.remove(maria).is_success());
    assert!(t.clinic.agenda().is_empty());
    assert_consistent(&t);
}
