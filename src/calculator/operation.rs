//! Binary operators and unary functions of the keypad.

use super::error::CalcError;
use super::format::{parse_integer, parse_number};
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

/// Largest argument accepted by the factorial function.
pub const MAX_FACTORIAL: i32 = 15;

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Get the symbol printed on the key.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A unary function key, applied to the displayed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryFn {
    Percent,
    Ln,
    Log,
    Pi,
    Factorial,
    Root,
    Square,
}

impl UnaryFn {
    /// Get the label printed on the key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Pi => "π",
            Self::Factorial => "n!",
            Self::Root => "√",
            Self::Square => "x²",
        }
    }
}

impl fmt::Display for UnaryFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry flags that influence a binary calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntryContext {
    /// No binary calculation has run since the chain started.
    pub first_entry: bool,
    /// An operator was chosen and no operand has been typed since.
    pub operator_just_selected: bool,
}

/// Combine two operands.
///
/// When an operator was just selected the left operand is returned as-is.
/// During the first entry of a chain, multiply, divide and power also
/// return the left operand unchanged.
pub fn calculate(lhs: f64, rhs: f64, op: Operator, ctx: EntryContext) -> Result<f64, CalcError> {
    if ctx.operator_just_selected {
        return Ok(lhs);
    }

    match op {
        Operator::Add => Ok(lhs + rhs),
        Operator::Subtract => Ok(lhs - rhs),
        Operator::Multiply | Operator::Divide | Operator::Power if ctx.first_entry => Ok(lhs),
        Operator::Multiply => Ok(lhs * rhs),
        Operator::Divide if rhs == 0.0 => Err(CalcError::DivideByZero),
        Operator::Divide => Ok(lhs / rhs),
        Operator::Power => Ok(lhs.powf(rhs)),
    }
}

/// Compute `n!` for `0 <= n <= 15`.
pub fn factorial(n: i32) -> Result<u64, CalcError> {
    if n > MAX_FACTORIAL {
        return Err(CalcError::FactorialTooBig);
    }
    if n < 0 {
        return Err(CalcError::FactorialNegative);
    }
    Ok((1..=n as u64).product())
}

/// Apply a unary function to the display text.
pub fn apply_unary(func: UnaryFn, text: &str) -> Result<f64, CalcError> {
    let number = || parse_number(text).ok_or(CalcError::EnterValue);

    match func {
        UnaryFn::Percent => Ok(number()? / 100.0),
        UnaryFn::Ln => Ok(number()?.ln()),
        UnaryFn::Log => Ok(number()?.log10()),
        UnaryFn::Pi => Ok(PI),
        UnaryFn::Square => {
            let value = number()?;
            Ok(value * value)
        }
        UnaryFn::Factorial => {
            let n = parse_integer(text).ok_or(CalcError::EnterFactorialValue)?;
            Ok(factorial(n)? as f64)
        }
        UnaryFn::Root => {
            let n = parse_integer(text).ok_or(CalcError::EnterIntValue)?;
            if n < 0 {
                return Err(CalcError::NegativeRoot);
            }
            Ok(f64::from(n).sqrt())
        }
    }
}
