use std::io::{BufRead, Write};
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::debug;

use appointment_cell::{CancelAppointmentRequest, ScheduleAppointmentRequest};
use clinic_cell::{AppointmentService, Clinic, PatientService};
use patient_cell::{PatientSortKey, PatientValidationRules, RegisterPatientRequest};
use shared_config::AppConfig;
use shared_models::OperationResult;
use shared_utils::{Clock, DocumentValidator};

use crate::input::{ConsoleError, Prompter};
use crate::views::{self, MessageContext};

enum Screen {
    Main,
    Patients,
    Agenda,
}

/// The interactive front end: menus over one clinic owned for the session.
pub struct ConsoleApp<R, W> {
    prompter: Prompter<R, W>,
    clinic: Clinic,
    patients: PatientService,
    appointments: AppointmentService,
    clock: Arc<dyn Clock>,
    validator: Arc<dyn DocumentValidator>,
    messages: MessageContext,
}

impl<R: BufRead, W: Write> ConsoleApp<R, W> {
    pub fn new(
        input: R,
        output: W,
        config: &AppConfig,
        clock: Arc<dyn Clock>,
        validator: Arc<dyn DocumentValidator>,
    ) -> Self {
        let patients = PatientService::new(config, clock.clone(), validator.clone());
        let appointments = AppointmentService::new(config, clock.clone());
        let messages = MessageContext {
            patient: PatientValidationRules::from_config(config),
            scheduling: appointments.rules().clone(),
        };

        Self {
            prompter: Prompter::new(input, output),
            clinic: Clinic::new(),
            patients,
            appointments,
            clock,
            validator,
            messages,
        }
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        match self.menu_loop() {
            Err(ConsoleError::InputClosed) => {
                debug!("Input closed, leaving");
                Ok(())
            }
            other => other,
        }
    }

    fn menu_loop(&mut self) -> Result<(), ConsoleError> {
        let mut screen = Screen::Main;

        loop {
            screen = match screen {
                Screen::Main => {
                    self.prompter
                        .write_line("\nMain menu\n1-Patients\n2-Agenda\n3-Exit")?;
                    match self.prompter.read_option(3)? {
                        1 => Screen::Patients,
                        2 => Screen::Agenda,
                        _ => return Ok(()),
                    }
                }
                Screen::Patients => {
                    self.prompter.write_line(
                        "\nPatients\n1-Register patient\n2-Remove patient\n3-List patients (by CPF)\n4-List patients (by name)\n5-Back",
                    )?;
                    match self.prompter.read_option(5)? {
                        1 => {
                            self.register_patient()?;
                            Screen::Patients
                        }
                        2 => {
                            self.remove_patient()?;
                            Screen::Patients
                        }
                        3 => {
                            self.list_patients(PatientSortKey::Document)?;
                            Screen::Patients
                        }
                        4 => {
                            self.list_patients(PatientSortKey::Name)?;
                            Screen::Patients
                        }
                        _ => Screen::Main,
                    }
                }
                Screen::Agenda => {
                    self.prompter
                        .write_line("\nAgenda\n1-Schedule appointment\n2-Cancel appointment\n3-List agenda\n4-Back")?;
                    match self.prompter.read_option(4)? {
                        1 => {
                            self.schedule_appointment()?;
                            Screen::Agenda
                        }
                        2 => {
                            self.cancel_appointment()?;
                            Screen::Agenda
                        }
                        3 => {
                            self.list_agenda()?;
                            Screen::Agenda
                        }
                        _ => Screen::Main,
                    }
                }
            };
        }
    }

    fn register_patient(&mut self) -> Result<(), ConsoleError> {
        let cpf = self.prompter.read_cpf(self.validator.as_ref())?;

        let gate = self.patients.can_register(&self.clinic, cpf);
        if !gate.is_success() {
            return self.report(&gate, "", "Registration refused:");
        }

        let name = self.prompter.read_name()?;
        let birth_date = self
            .prompter
            .read_date("Birth date (DDMMYYYY): ", "Invalid date", None)?;

        let result = self.patients.register(
            &mut self.clinic,
            RegisterPatientRequest { cpf, name, birth_date },
        );
        self.report(&result, "Patient registered!", "Registration failed:")
    }

    fn remove_patient(&mut self) -> Result<(), ConsoleError> {
        let cpf = self.prompter.read_cpf(self.validator.as_ref())?;
        let result = self.patients.remove(&mut self.clinic, cpf);
        self.report(&result, "Patient removed!", "Removal failed:")
    }

    fn list_patients(&mut self, key: PatientSortKey) -> Result<(), ConsoleError> {
        let patients = self.patients.list(&self.clinic, key);
        views::patient_table(self.prompter.output(), &patients)?;
        Ok(())
    }

    fn schedule_appointment(&mut self) -> Result<(), ConsoleError> {
        let cpf = self.prompter.read_cpf(self.validator.as_ref())?;

        let gate = self.appointments.can_schedule(&self.clinic, cpf);
        if !gate.is_success() {
            return self.report(&gate, "", "Scheduling refused:");
        }

        let date = self.prompter.read_date(
            "Appointment date (DDMMYYYY): ",
            "Invalid date, it must be today or later",
            Some(self.clock.today()),
        )?;
        let start = self.prompter.read_time("Start time (HHMM): ")?;
        let end = self.prompter.read_time("End time (HHMM): ")?;

        let result = self.appointments.schedule(
            &mut self.clinic,
            ScheduleAppointmentRequest {
                cpf,
                start: date.and_time(start),
                end: date.and_time(end),
            },
        );
        self.report(&result, "Appointment scheduled!", "Scheduling failed:")
    }

    fn cancel_appointment(&mut self) -> Result<(), ConsoleError> {
        let cpf = self.prompter.read_cpf(self.validator.as_ref())?;

        let gate = self.appointments.can_cancel(&self.clinic, cpf);
        if !gate.is_success() {
            return self.report(&gate, "", "Cancellation refused:");
        }

        let date = self
            .prompter
            .read_date("Appointment date (DDMMYYYY): ", "Invalid date", None)?;
        let start = self.prompter.read_time("Start time (HHMM): ")?;

        let result = self.appointments.cancel(
            &mut self.clinic,
            CancelAppointmentRequest {
                cpf,
                start: date.and_time(start),
            },
        );
        self.report(&result, "Appointment cancelled!", "Cancellation failed:")
    }

    fn list_agenda(&mut self) -> Result<(), ConsoleError> {
        let option = self
            .prompter
            .read_choice("Show the agenda T-All or P-Period: ", "Type T or P", "TP")?;

        let entries = if option == 'P' {
            let (from, to) = self.read_period()?;
            self.appointments.list_in_range(&self.clinic, from, to)
        } else {
            self.appointments.list(&self.clinic)
        };

        views::agenda_table(self.prompter.output(), &entries)?;
        Ok(())
    }

    /// Whole days: from midnight of the first to 23:59:59 of the last.
    fn read_period(&mut self) -> Result<(NaiveDateTime, NaiveDateTime), ConsoleError> {
        let from = self
            .prompter
            .read_date("Start date (DDMMYYYY): ", "Invalid date", None)?;
        let to = self.prompter.read_date(
            "End date (DDMMYYYY): ",
            "Invalid date, it must not be before the start date",
            Some(from),
        )?;

        let last_second = to.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::seconds(1);
        Ok((from.and_time(NaiveTime::MIN), last_second))
    }

    fn report(
        &mut self,
        result: &OperationResult,
        success: &str,
        failure: &str,
    ) -> Result<(), ConsoleError> {
        self.messages
            .report(self.prompter.output(), result, success, failure)?;
        Ok(())
    }
}
