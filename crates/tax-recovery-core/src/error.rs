use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxRecoveryError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },
}
