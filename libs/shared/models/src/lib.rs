pub mod error;
pub mod identifiers;

pub use error::{AppError, OperationError, OperationResult, OperationStatus};
pub use identifiers::{AppointmentId, Cpf, ParseCpfError};
