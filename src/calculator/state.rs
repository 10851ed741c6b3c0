//! Keypad evaluator state and its transitions.
//!
//! [`CalculatorState`] is a plain value: [`CalculatorState::apply`] takes an
//! [`Intent`] and returns the next state, leaving the original untouched.

use super::buffer::{DisplayBuffer, Token};
use super::error::CalcError;
use super::format::{format_number, parse_number};
use super::memory::MemorySlots;
use super::operation::{EntryContext, Operator, UnaryFn, apply_unary, calculate};
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;
use tracing::{debug, warn};

/// Display text shown after a failed binary calculation.
pub const MATH_ERROR: &str = "Math Error";

/// A single keypress delivered by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Digit(Token),
    Operator(Operator),
    Equals,
    Unary(UnaryFn),
    Delete,
    AllClear,
    /// Recall a memory slot by its 1-based index.
    Recall(usize),
}

impl Intent {
    /// Check whether this intent belongs to a function button, which is
    /// disabled while an exponent is being entered.
    pub fn is_function_button(&self) -> bool {
        matches!(self, Self::Operator(_) | Self::Unary(_) | Self::Delete)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(token) => write!(f, "{}", token),
            Self::Operator(op) => write!(f, "{}", op),
            Self::Equals => f.write_str("="),
            Self::Unary(func) => write!(f, "{}", func),
            Self::Delete => f.write_str("⌫"),
            Self::AllClear => f.write_str("AC"),
            Self::Recall(index) => write!(f, "M{}", index),
        }
    }
}

/// Where the evaluator is within an entry chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing on the display.
    Idle,
    /// The display shows digits typed by the user.
    OperandEntered,
    /// An operator was chosen and the next operand has not been typed yet.
    OperatorPending,
    /// The display shows a computed or recalled value.
    ResultDisplayed,
    /// The last binary calculation failed.
    Error,
}

/// The binary calculation in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingCalculation {
    /// Running total the next operand is combined with.
    pub left_operand: f64,
    pub operator: Option<Operator>,
    /// True until the first operator of a chain has been committed.
    pub first_entry: bool,
    /// True between an operator press and the next typed operand.
    pub operator_just_selected: bool,
}

impl Default for PendingCalculation {
    fn default() -> Self {
        Self {
            left_operand: 0.0,
            operator: None,
            first_entry: true,
            operator_just_selected: false,
        }
    }
}

impl PendingCalculation {
    fn context(&self) -> EntryContext {
        EntryContext {
            first_entry: self.first_entry,
            operator_just_selected: self.operator_just_selected,
        }
    }
}

/// Everything the keypad evaluator remembers between keypresses.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    buffer: DisplayBuffer,
    pending: PendingCalculation,
    memory: MemorySlots,
    error: Option<CalcError>,
    delete_enabled: bool,
    functions_enabled: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Create the power-on state: empty display, empty memory.
    pub fn new() -> Self {
        Self {
            buffer: DisplayBuffer::new(),
            pending: PendingCalculation::default(),
            memory: MemorySlots::new(),
            error: None,
            delete_enabled: false,
            functions_enabled: true,
        }
    }

    /// Get the rendered display text.
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Get the typed tokens together with the rendered text.
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Get the binary calculation in progress.
    pub fn pending(&self) -> &PendingCalculation {
        &self.pending
    }

    /// Get the stored results, most recent first.
    pub fn memory(&self) -> &MemorySlots {
        &self.memory
    }

    /// Get the error raised by the last intent, if any.
    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Check whether the delete key currently acts.
    pub fn delete_enabled(&self) -> bool {
        self.delete_enabled
    }

    /// Check whether operator and function keys currently act.
    pub fn functions_enabled(&self) -> bool {
        self.functions_enabled
    }

    /// Derive the current [`Phase`] from the display and pending calculation.
    pub fn phase(&self) -> Phase {
        let text = self.buffer.text();
        if self.error.is_some() && text == MATH_ERROR {
            Phase::Error
        } else if self.pending.operator_just_selected {
            Phase::OperatorPending
        } else if text.is_empty() {
            Phase::Idle
        } else if self.is_typed() {
            Phase::OperandEntered
        } else {
            Phase::ResultDisplayed
        }
    }

    /// Compute the state that follows `intent`.
    pub fn apply(&self, intent: Intent) -> Self {
        let mut next = self.clone();

        if !self.functions_enabled && intent.is_function_button() {
            debug!(%intent, "function buttons locked during exponent entry");
            return next;
        }
        if intent == Intent::Delete && !self.delete_enabled {
            debug!("delete disabled");
            return next;
        }

        match intent {
            Intent::Digit(token) => next.enter_digit(token),
            Intent::Operator(op) => next.select_operator(op),
            Intent::Equals => next.commit_equals(),
            Intent::Unary(UnaryFn::Pi) => next.insert_pi(),
            Intent::Unary(func) => next.apply_function(func),
            Intent::Delete => next.delete(),
            Intent::AllClear => next.all_clear(),
            Intent::Recall(index) => next.recall(index),
        }

        debug!(%intent, text = next.text(), phase = ?next.phase(), "applied intent");
        next
    }

    fn is_typed(&self) -> bool {
        let tokens = self.buffer.tokens();
        !tokens.is_empty()
            && self.buffer.text().chars().eq(tokens.iter().map(|t| t.as_char()))
    }

    fn enter_digit(&mut self, token: Token) {
        if self.pending.operator_just_selected {
            self.pending.operator_just_selected = false;
            self.buffer.clear();
        }

        let text = self.buffer.text();
        if text == self.memory.latest() || text.eq_ignore_ascii_case(MATH_ERROR) {
            self.buffer.clear();
        }

        if !self.buffer.push(token) {
            debug!(%token, "keypress dropped");
        }

        self.error = None;
        self.delete_enabled = true;
        self.functions_enabled = true;
    }

    fn select_operator(&mut self, op: Operator) {
        self.buffer.clear_tokens();

        if self.pending.operator_just_selected {
            self.pending.operator = Some(op);
            self.functions_enabled = op != Operator::Power;
            return;
        }

        let outcome = self.operand().and_then(|current| {
            let value = match self.pending.operator {
                Some(previous) if !self.pending.first_entry => calculate(
                    self.pending.left_operand,
                    current,
                    previous,
                    self.pending.context(),
                )?,
                _ => current,
            };
            Ok((value, format_number(value)?))
        });

        match outcome {
            Ok((value, text)) => {
                self.buffer.show(text);
                self.pending = PendingCalculation {
                    left_operand: value,
                    operator: Some(op),
                    first_entry: false,
                    operator_just_selected: true,
                };
                self.error = None;
                self.delete_enabled = false;
                if op == Operator::Power {
                    self.functions_enabled = false;
                }
            }
            Err(err) => self.fail(err),
        }
    }

    fn commit_equals(&mut self) {
        let text = self.buffer.text();
        if text.is_empty() {
            return;
        }
        let Some(current) = parse_number(text) else {
            self.fail(CalcError::TooManyDecimals);
            return;
        };

        let pending = self.pending;
        let value = match pending.operator {
            Some(op) if pending.operator_just_selected || !pending.first_entry => {
                calculate(pending.left_operand, current, op, pending.context())
            }
            _ => Ok(current),
        };

        match value.and_then(format_number) {
            Ok(text) => {
                self.buffer.clear();
                self.buffer.show(text.clone());
                self.memory.push(text);
                self.pending = PendingCalculation::default();
                self.error = None;
                self.delete_enabled = false;
                self.functions_enabled = true;
            }
            Err(err) => self.fail(err),
        }
    }

    fn insert_pi(&mut self) {
        match format_number(PI) {
            Ok(text) => {
                self.buffer.show(text);
                self.pending.operator_just_selected = false;
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
    }

    fn apply_function(&mut self, func: UnaryFn) {
        if self.pending.operator_just_selected {
            self.error = Some(CalcError::OperatorPending);
            return;
        }

        match apply_unary(func, self.buffer.text()).and_then(format_number) {
            Ok(text) => {
                self.buffer.show(text.clone());
                self.memory.push(text);
                self.error = None;
                self.delete_enabled = false;
            }
            Err(err) => {
                if matches!(
                    err,
                    CalcError::EnterIntValue | CalcError::EnterFactorialValue
                ) {
                    self.buffer.clear();
                }
                debug!(%func, %err, "function rejected");
                self.error = Some(err);
            }
        }
    }

    fn delete(&mut self) {
        self.error = match self.buffer.pop() {
            Some(_) => None,
            None => Some(CalcError::NothingToDelete),
        };
    }

    fn all_clear(&mut self) {
        self.buffer.clear();
        self.pending = PendingCalculation::default();
        self.error = None;
        self.delete_enabled = false;
        self.functions_enabled = true;
    }

    fn recall(&mut self, index: usize) {
        match self.memory.value(index) {
            Ok(value) => {
                if let Some(text) = value.map(str::to_string) {
                    self.buffer.show(text);
                    self.pending.operator_just_selected = false;
                }
                if self.pending.operator == Some(Operator::Power) {
                    self.functions_enabled = true;
                }
            }
            Err(err) => self.error = Some(err),
        }
    }

    fn operand(&self) -> Result<f64, CalcError> {
        parse_number(self.buffer.text()).ok_or(CalcError::EnterValue)
    }

    fn fail(&mut self, err: CalcError) {
        warn!(%err, "calculation failed");
        self.buffer.clear();
        self.buffer.show(MATH_ERROR);
        self.error = Some(err);
        self.delete_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(state: CalculatorState, keys: &str) -> CalculatorState {
        keys.chars().fold(state, |s, c| {
            s.apply(Intent::Digit(Token::from_char(c).unwrap()))
        })
    }

    #[test]
    fn test_initial_state() {
        let state = CalculatorState::new();
        assert_eq!(state.text(), "");
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.pending(), &PendingCalculation::default());
        assert!(state.error().is_none());
        assert!(state.functions_enabled());
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let state = digits(CalculatorState::new(), "12");
        let next = state.apply(Intent::Digit(Token::Digit(3)));
        assert_eq!(state.text(), "12");
        assert_eq!(next.text(), "123");
    }

    #[test]
    fn test_first_operator_seeds_left_operand() {
        let state = digits(CalculatorState::new(), "7")
            .apply(Intent::Operator(Operator::Divide));
        assert_eq!(state.text(), "7");
        assert_eq!(state.pending().left_operand, 7.0);
        assert_eq!(state.pending().operator, Some(Operator::Divide));
        assert!(!state.pending().first_entry);
        assert!(state.pending().operator_just_selected);
        assert_eq!(state.phase(), Phase::OperatorPending);
    }

    #[test]
    fn test_operator_swap_without_calculation() {
        let state = digits(CalculatorState::new(), "6")
            .apply(Intent::Operator(Operator::Add))
            .apply(Intent::Operator(Operator::Multiply));
        assert_eq!(state.pending().operator, Some(Operator::Multiply));
        assert_eq!(state.pending().left_operand, 6.0);
        assert_eq!(state.text(), "6");
    }

    #[test]
    fn test_chain_commits_previous_operator() {
        let state = digits(CalculatorState::new(), "2")
            .apply(Intent::Operator(Operator::Add));
        let state = digits(state, "3").apply(Intent::Operator(Operator::Multiply));
        assert_eq!(state.text(), "5");
        assert_eq!(state.pending().left_operand, 5.0);
        assert_eq!(state.pending().operator, Some(Operator::Multiply));
    }

    #[test]
    fn test_zero_running_total_keeps_calculating() {
        let state = digits(CalculatorState::new(), "5")
            .apply(Intent::Operator(Operator::Subtract));
        let state = digits(state, "5").apply(Intent::Operator(Operator::Subtract));
        assert_eq!(state.text(), "0");
        let state = digits(state, "3").apply(Intent::Equals);
        assert_eq!(state.text(), "-3");
    }

    #[test]
    fn test_operator_on_empty_display() {
        let state = CalculatorState::new().apply(Intent::Operator(Operator::Add));
        assert_eq!(state.text(), MATH_ERROR);
        assert_eq!(state.error(), Some(&CalcError::EnterValue));
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.pending().operator, None);
    }

    #[test]
    fn test_equals_resets_pending() {
        let state = digits(CalculatorState::new(), "9")
            .apply(Intent::Operator(Operator::Subtract));
        let state = digits(state, "4").apply(Intent::Equals);
        assert_eq!(state.text(), "5");
        assert_eq!(state.memory().latest(), "5");
        assert_eq!(state.pending(), &PendingCalculation::default());
        assert!(!state.buffer().has_tokens());
        assert_eq!(state.phase(), Phase::ResultDisplayed);
    }

    #[test]
    fn test_equals_without_pending_operator() {
        let state = digits(CalculatorState::new(), "5.").apply(Intent::Equals);
        assert_eq!(state.text(), "5");
        assert_eq!(state.memory().latest(), "5");
    }

    #[test]
    fn test_equals_on_empty_display_is_noop() {
        let state = CalculatorState::new();
        assert_eq!(state.apply(Intent::Equals), state);
    }

    #[test]
    fn test_equals_on_lone_point() {
        let state = digits(CalculatorState::new(), ".").apply(Intent::Equals);
        assert_eq!(state.text(), MATH_ERROR);
        assert_eq!(state.error(), Some(&CalcError::TooManyDecimals));
    }

    #[test]
    fn test_equals_right_after_operator_uses_left_operand() {
        let state = digits(CalculatorState::new(), "8")
            .apply(Intent::Operator(Operator::Divide))
            .apply(Intent::Equals);
        assert_eq!(state.text(), "8");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_typing_after_result_starts_fresh() {
        let state = digits(CalculatorState::new(), "4")
            .apply(Intent::Operator(Operator::Add));
        let state = digits(state, "4").apply(Intent::Equals);
        let state = digits(state, "1");
        assert_eq!(state.text(), "1");
    }

    #[test]
    fn test_typing_after_error_starts_fresh() {
        let state = CalculatorState::new().apply(Intent::Operator(Operator::Add));
        let state = digits(state, "3");
        assert_eq!(state.text(), "3");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_unary_rejected_while_operator_pending() {
        let state = digits(CalculatorState::new(), "4")
            .apply(Intent::Operator(Operator::Add))
            .apply(Intent::Unary(UnaryFn::Square));
        assert_eq!(state.error(), Some(&CalcError::OperatorPending));
        assert_eq!(state.text(), "4");
    }

    #[test]
    fn test_unary_result_is_stored() {
        let state = digits(CalculatorState::new(), "50").apply(Intent::Unary(UnaryFn::Percent));
        assert_eq!(state.text(), "0.5");
        assert_eq!(state.memory().latest(), "0.5");
        assert!(!state.delete_enabled());
    }

    #[test]
    fn test_unary_range_error_keeps_display() {
        let state = digits(CalculatorState::new(), "99999999")
            .apply(Intent::Unary(UnaryFn::Square));
        assert_eq!(state.text(), "99999999");
        assert_eq!(state.error(), Some(&CalcError::TooBig));
    }

    #[test]
    fn test_integer_functions_clear_display_on_parse_error() {
        let state = digits(CalculatorState::new(), "2.5");
        let root = state.apply(Intent::Unary(UnaryFn::Root));
        assert_eq!(root.text(), "");
        assert_eq!(root.error(), Some(&CalcError::EnterIntValue));

        let fact = state.apply(Intent::Unary(UnaryFn::Factorial));
        assert_eq!(fact.text(), "");
        assert_eq!(fact.error(), Some(&CalcError::EnterFactorialValue));

        let ln = state.apply(Intent::Unary(UnaryFn::Ln));
        assert_eq!(ln.text(), "0.916290732");
    }

    #[test]
    fn test_ln_of_zero_is_rejected() {
        let state = digits(CalculatorState::new(), "0").apply(Intent::Unary(UnaryFn::Ln));
        assert_eq!(state.error(), Some(&CalcError::TooSmall));
        assert_eq!(state.text(), "0");
    }

    #[test]
    fn test_pi_clears_pending_operator_flag() {
        let state = digits(CalculatorState::new(), "2")
            .apply(Intent::Operator(Operator::Add))
            .apply(Intent::Unary(UnaryFn::Pi));
        assert_eq!(state.text(), "3.141592654");
        assert!(!state.pending().operator_just_selected);
        let state = state.apply(Intent::Equals);
        assert_eq!(state.text(), "5.141592654");
    }

    #[test]
    fn test_power_locks_function_buttons() {
        let state = digits(CalculatorState::new(), "2").apply(Intent::Operator(Operator::Power));
        assert!(!state.functions_enabled());

        let locked = state.apply(Intent::Unary(UnaryFn::Square));
        assert_eq!(locked, state);
        let locked = state.apply(Intent::Operator(Operator::Add));
        assert_eq!(locked.pending().operator, Some(Operator::Power));

        let state = digits(state, "10");
        assert!(state.functions_enabled());
        assert_eq!(state.apply(Intent::Equals).text(), "1024");
    }

    #[test]
    fn test_recall_lifts_power_lock() {
        let state = digits(CalculatorState::new(), "3").apply(Intent::Equals);
        let state = digits(state, "2").apply(Intent::Operator(Operator::Power));
        let state = state.apply(Intent::Recall(1));
        assert!(state.functions_enabled());
        assert_eq!(state.text(), "3");
        assert_eq!(state.apply(Intent::Equals).text(), "8");
    }

    #[test]
    fn test_recall_empty_slot_keeps_display() {
        let state = digits(CalculatorState::new(), "12").apply(Intent::Recall(2));
        assert_eq!(state.text(), "12");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_recall_out_of_range() {
        let state = digits(CalculatorState::new(), "12").apply(Intent::Recall(9));
        assert_eq!(state.text(), "12");
        assert_eq!(state.error(), Some(&CalcError::NoSuchSlot(9)));
    }

    #[test]
    fn test_delete() {
        let state = digits(CalculatorState::new(), "123").apply(Intent::Delete);
        assert_eq!(state.text(), "12");

        let state = digits(CalculatorState::new(), "1")
            .apply(Intent::Delete)
            .apply(Intent::Delete);
        assert_eq!(state.error(), Some(&CalcError::NothingToDelete));
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_delete_ignored_while_disabled() {
        let state = CalculatorState::new();
        assert_eq!(state.apply(Intent::Delete), state);

        let state = digits(CalculatorState::new(), "123").apply(Intent::Unary(UnaryFn::Square));
        assert_eq!(state.text(), "15129");
        assert!(!state.delete_enabled());
        let next = state.apply(Intent::Delete);
        assert_eq!(next, state);
        assert_eq!(next.text(), "15129");

        let state = digits(state, "4");
        assert!(state.delete_enabled());
        assert_eq!(state.apply(Intent::Delete).text(), "");
    }

    #[test]
    fn test_divide_by_zero_on_operator_commit() {
        let state = digits(CalculatorState::new(), "7")
            .apply(Intent::Operator(Operator::Divide));
        let state = digits(state, "0").apply(Intent::Operator(Operator::Add));
        assert_eq!(state.text(), MATH_ERROR);
        assert_eq!(state.error(), Some(&CalcError::DivideByZero));
        assert_eq!(state.phase(), Phase::Error);
        assert!(!state.delete_enabled());
    }

    #[test]
    fn test_result_too_big_on_operator_commit() {
        let state = digits(CalculatorState::new(), "99999999")
            .apply(Intent::Operator(Operator::Multiply));
        let state = digits(state, "99999999").apply(Intent::Operator(Operator::Subtract));
        assert_eq!(state.text(), MATH_ERROR);
        assert_eq!(state.error(), Some(&CalcError::TooBig));
    }

    #[test]
    fn test_result_too_small_on_equals() {
        let state = digits(CalculatorState::new(), "0")
            .apply(Intent::Operator(Operator::Subtract));
        let state = digits(state, "99999999").apply(Intent::Equals);
        assert_eq!(state.text(), "-99999999");

        let state = state.apply(Intent::Operator(Operator::Multiply));
        let state = digits(state, "99999999").apply(Intent::Equals);
        assert_eq!(state.text(), MATH_ERROR);
        assert_eq!(state.error(), Some(&CalcError::TooSmall));
        assert_eq!(state.memory().latest(), "-99999999");
    }

    #[test]
    fn test_failed_power_does_not_lock() {
        let state = CalculatorState::new().apply(Intent::Operator(Operator::Power));
        assert_eq!(state.text(), MATH_ERROR);
        assert_eq!(state.error(), Some(&CalcError::EnterValue));
        assert!(state.functions_enabled());

        let state = state.apply(Intent::Unary(UnaryFn::Pi));
        assert_eq!(state.text(), "3.141592654");
    }

    #[test]
    fn test_switching_to_power_locks() {
        let state = digits(CalculatorState::new(), "2")
            .apply(Intent::Operator(Operator::Add))
            .apply(Intent::Operator(Operator::Power));
        assert_eq!(state.pending().operator, Some(Operator::Power));
        assert!(!state.functions_enabled());
    }

    #[test]
    fn test_all_clear_keeps_memory() {
        let state = digits(CalculatorState::new(), "2")
            .apply(Intent::Operator(Operator::Add));
        let state = digits(state, "3").apply(Intent::Equals);
        let state = digits(state, "7")
            .apply(Intent::Operator(Operator::Multiply))
            .apply(Intent::AllClear);
        assert_eq!(state.text(), "");
        assert_eq!(state.pending(), &PendingCalculation::default());
        assert_eq!(state.memory().latest(), "5");

        assert_eq!(state.apply(Intent::AllClear), state);
    }
}
