pub mod error;
pub mod fees;
pub mod plans;
pub mod proposal;
pub mod types;

pub use error::PayPlanError;
pub use types::*;

/// Standard result type for all payplan operations
pub type PayPlanResult<T> = Result<T, PayPlanError>;
