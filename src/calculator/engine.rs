//! Keypad-facing calculator.
//!
//! [`Calculator`] owns a [`CalculatorState`] and replaces it on every press,
//! returning the [`DisplayState`] the presentation layer should paint.

use super::buffer::Token;
use super::display::DisplayState;
use super::operation::{Operator, UnaryFn};
use super::state::{CalculatorState, Intent};

/// The keypad calculator behind one window or session.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    /// Create a calculator with a cleared display and empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the underlying evaluator state.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Get the current display snapshot.
    pub fn display(&self) -> DisplayState {
        DisplayState::from(&self.state)
    }

    /// Handle one intent.
    pub fn dispatch(&mut self, intent: Intent) -> DisplayState {
        self.state = self.state.apply(intent);
        self.display()
    }

    /// Handle a sequence of intents, returning the final display.
    pub fn run(&mut self, intents: impl IntoIterator<Item = Intent>) -> DisplayState {
        for intent in intents {
            self.state = self.state.apply(intent);
        }
        self.display()
    }

    pub fn press_digit(&mut self, token: Token) -> DisplayState {
        self.dispatch(Intent::Digit(token))
    }

    pub fn press_operator(&mut self, op: Operator) -> DisplayState {
        self.dispatch(Intent::Operator(op))
    }

    pub fn press_equals(&mut self) -> DisplayState {
        self.dispatch(Intent::Equals)
    }

    pub fn press_unary(&mut self, func: UnaryFn) -> DisplayState {
        self.dispatch(Intent::Unary(func))
    }

    pub fn press_delete(&mut self) -> DisplayState {
        self.dispatch(Intent::Delete)
    }

    pub fn press_all_clear(&mut self) -> DisplayState {
        self.dispatch(Intent::AllClear)
    }

    /// Recall memory slot `index` (1 to 5).
    pub fn recall_slot(&mut self, index: usize) -> DisplayState {
        self.dispatch(Intent::Recall(index))
    }
}
