use shared_models::Cpf;
use tracing::debug;

/// Decides whether a document number is acceptable for registration.
pub trait DocumentValidator: Send + Sync {
    fn is_valid(&self, cpf: Cpf) -> bool;
}

/// Standard modulo-11 CPF check digit verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpfChecksumValidator;

impl DocumentValidator for CpfChecksumValidator {
    fn is_valid(&self, cpf: Cpf) -> bool {
        let valid = cpf.has_valid_checksum();
        if !valid {
            debug!("CPF {} failed check digit verification", cpf.value());
        }
        valid
    }
}
