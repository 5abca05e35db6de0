pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "schedules")]
pub mod schedules;

#[cfg(feature = "presentation")]
pub mod presentation;

#[cfg(feature = "proposal")]
pub mod proposal;

pub use error::AmortizationError;
pub use types::*;

/// Standard result type for all amortization operations
pub type AmortizationResult<T> = Result<T, AmortizationError>;
