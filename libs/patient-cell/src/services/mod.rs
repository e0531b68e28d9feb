pub mod registry;
pub mod validation;

pub use registry::PatientRegistry;
pub use validation::PatientFactory;
