//! Snapshot of what the keypad should paint after an intent.

use super::error::ErrorKind;
use super::memory::SLOT_COUNT;
use super::operation::Operator;
use super::state::{CalculatorState, Phase};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// Text on the main display.
    pub text: String,
    /// Error line; empty when the last intent succeeded.
    pub error: String,
    pub error_kind: Option<ErrorKind>,
    pub delete_enabled: bool,
    pub function_buttons_enabled: bool,
    /// Stored results, most recent first.
    pub memory_slots: [String; SLOT_COUNT],
    pub phase: Phase,
    /// Operator waiting for its right-hand operand.
    pub pending_operator: Option<Operator>,
}

impl DisplayState {
    /// Check whether the last intent raised an error.
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Get the text to copy to the clipboard.
    /// Returns the error message when the display holds the error marker.
    pub fn text_for_clipboard(&self) -> &str {
        if self.phase == Phase::Error {
            &self.error
        } else {
            &self.text
        }
    }
}

impl From<&CalculatorState> for DisplayState {
    fn from(state: &CalculatorState) -> Self {
        let error = state.error();
        Self {
            text: state.text().to_string(),
            error: error.map(ToString::to_string).unwrap_or_default(),
            error_kind: error.map(|e| e.kind()),
            delete_enabled: state.delete_enabled(),
            function_buttons_enabled: state.functions_enabled(),
            memory_slots: state.memory().as_array().clone(),
            phase: state.phase(),
            pending_operator: state.pending().operator,
        }
    }
}
