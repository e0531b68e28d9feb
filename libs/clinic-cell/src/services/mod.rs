pub mod appointment;
pub mod patient;

pub use appointment::AppointmentService;
pub use patient::PatientService;
