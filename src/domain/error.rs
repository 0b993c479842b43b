//! Domain errors for calculator inputs and caller-supplied requests.
//!
//! [`DomainError`] covers invariants of the pure domain functions (the
//! profitability calculator refuses non-positive cost). [`ValidationError`]
//! covers request shapes rejected before any worker is launched.
//!
//! # Examples
//!
//! ```
//! use flipdesk::domain::error::DomainError;
//! use flipdesk::domain::profitability::{compute, FeeSchedule};
//! use rust_decimal_macros::dec;
//!
//! let result = compute(dec!(0), dec!(15), &FeeSchedule::default());
//! assert!(matches!(result, Err(DomainError::NonPositiveCost { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Cost price must be strictly positive for fee and ROI computation.
    #[error("cost price must be positive, got {cost}")]
    NonPositiveCost {
        /// The invalid cost that was provided.
        cost: Decimal,
    },

    /// A step of the calculation does not fit in a decimal.
    #[error("{step} is too large to compute")]
    Overflow { step: &'static str },
}

/// Caller input rejected before any side effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
