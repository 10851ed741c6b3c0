//! Keypad calculator core.
//!
//! This module provides:
//! - A display buffer for digit entry and a five-slot result memory
//! - An evaluator state machine for binary operators and unary functions
//! - Key-name parsing for driving the evaluator from text

mod buffer;
mod display;
mod engine;
mod error;
mod format;
pub mod keys;
mod memory;
mod operation;
mod state;

pub use buffer::{DisplayBuffer, Token};
pub use display::DisplayState;
pub use engine::Calculator;
pub use error::{CalcError, ErrorKind};
pub use format::{format_number, parse_integer, parse_number};
pub use keys::{KeyError, parse_script};
pub use memory::{EMPTY_SLOT, MemorySlots, SLOT_COUNT};
pub use operation::{
    EntryContext, MAX_FACTORIAL, Operator, UnaryFn, apply_unary, calculate, factorial,
};
pub use state::{CalculatorState, Intent, MATH_ERROR, PendingCalculation, Phase};
