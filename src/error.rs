//! Error taxonomy for the simulation core
//!
//! Every fallible operation in the crate surfaces one of these variants
//! synchronously to its caller. Nothing is retried: parameters are either
//! validated away at the setter boundary, or the bad record/operand is
//! rejected and prior state is kept.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// A setter was handed a value outside its allowed range.
    /// The previous value is retained; surfacing the rejection to the
    /// user is the caller's job.
    #[error("invalid {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// Explicit scalar division by exactly zero. Fails fast, never
    /// substitutes a default.
    #[error("cannot divide vector by zero scalar")]
    DivisionByZero,

    /// A body with non-positive mass reached the physics step. Should be
    /// unreachable given the constructor/setter validation.
    #[error("body mass must be strictly positive")]
    InvalidMass,

    /// One persisted body record could not be parsed. Isolated per record:
    /// the rest of the file still loads.
    #[error("malformed body record: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
