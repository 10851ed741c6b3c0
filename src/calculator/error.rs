//! Calculator error types.
//!
//! Every error is recovered inside the evaluator: its `Display` text is what
//! ends up in the error line of the keypad.

use serde::Serialize;
use thiserror::Error;

/// Broad classification of a [`CalcError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Display text is not a valid number.
    Parse,
    /// Division with a zero right-hand operand.
    DivideByZero,
    /// Magnitude too large or too small to render.
    Range,
    /// Argument outside the function's domain.
    Domain,
    /// Intent not valid in the current state.
    State,
}

/// An error raised while handling a keypad intent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Too many decimals")]
    TooManyDecimals,

    #[error("Enter value")]
    EnterValue,

    #[error("Enter int value")]
    EnterIntValue,

    #[error("Enter int value to use factorial function")]
    EnterFactorialValue,

    #[error("Cannot divide by 0")]
    DivideByZero,

    #[error("Value too big")]
    TooBig,

    #[error("Value too small")]
    TooSmall,

    #[error("Not a number")]
    NotANumber,

    #[error("Cannot take root of negative value")]
    NegativeRoot,

    /// Factorial argument above the supported maximum.
    #[error("Value too big")]
    FactorialTooBig,

    /// Factorial argument below zero.
    #[error("Value too small")]
    FactorialNegative,

    #[error("Operator button is pressed. Enter value.")]
    OperatorPending,

    #[error("Nothing to delete")]
    NothingToDelete,

    #[error("No memory slot {0}")]
    NoSuchSlot(usize),
}

impl CalcError {
    /// Get the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooManyDecimals
            | Self::EnterValue
            | Self::EnterIntValue
            | Self::EnterFactorialValue => ErrorKind::Parse,
            Self::DivideByZero => ErrorKind::DivideByZero,
            Self::TooBig | Self::TooSmall => ErrorKind::Range,
            Self::NotANumber
            | Self::NegativeRoot
            | Self::FactorialTooBig
            | Self::FactorialNegative => ErrorKind::Domain,
            Self::OperatorPending | Self::NothingToDelete | Self::NoSuchSlot(_) => {
                ErrorKind::State
            }
        }
    }
}
