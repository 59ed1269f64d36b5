//! Calculator errors
//!
//! The two division errors are recoverable states, not faults: their
//! `Display` text is what the entry field shows until the user types a
//! digit or clears.

use crate::number::NumberError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Nonzero numerator divided by zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// Zero divided by zero.
    #[error("Result is undefined")]
    UndefinedResult,
    /// Evaluate or chain requested with nothing pending.
    #[error("no pending operation")]
    NoPendingOperation,
    /// The control is disabled while an error is displayed.
    #[error("input locked until the error is cleared")]
    Locked,
    #[error(transparent)]
    Number(#[from] NumberError),
}

impl CalcError {
    /// Whether this error puts the calculator into its error display.
    pub fn is_displayed(&self) -> bool {
        matches!(self, CalcError::DivisionByZero | CalcError::UndefinedResult)
    }
}
