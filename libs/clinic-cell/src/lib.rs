pub mod clinic;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod test_support;

pub use clinic::Clinic;
pub use models::*;
pub use services::{AppointmentService, PatientService};
pub use state::ClinicState;
