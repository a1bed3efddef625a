pub mod error;
pub mod rate_math;
pub mod types;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "costs")]
pub mod costs;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "advisor")]
pub mod advisor;

pub use error::WealthCalcError;
pub use types::*;

/// Standard result type for all wealthcalc operations
pub type WealthCalcResult<T> = Result<T, WealthCalcError>;
