pub mod company;
pub mod error;
pub mod types;

#[cfg(feature = "theses")]
pub mod theses;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "report")]
pub mod diagnosis;

pub use error::TaxRecoveryError;
pub use types::*;

/// Standard result type for all tax-recovery operations
pub type TaxRecoveryResult<T> = Result<T, TaxRecoveryError>;
