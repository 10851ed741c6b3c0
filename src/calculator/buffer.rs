//! Display buffer holding the operand being typed.

use std::fmt;

/// Maximum rendered length while entering an integer.
const MAX_INTEGER_LEN: usize = 13;

/// Maximum rendered length once a decimal point is present.
const MAX_DECIMAL_LEN: usize = 14;

/// A single keypad entry token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Digit(u8),
    Point,
}

impl Token {
    /// Parse a single keypad character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Point),
            '0'..='9' => c.to_digit(10).map(|d| Self::Digit(d as u8)),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Digit(d) => char::from(b'0' + d),
            Self::Point => '.',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The typed tokens plus the text currently rendered on the display.
///
/// Results and recalled values overwrite the rendered text without touching
/// the typed tokens, so the two can diverge until the next clear or delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    tokens: Vec<Token>,
    text: String,
}

impl DisplayBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the rendered display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the tokens typed since the last clear.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Check whether any tokens have been typed.
    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Empty both the tokens and the rendered text.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.text.clear();
    }

    /// Forget typed tokens but keep the rendered text.
    pub fn clear_tokens(&mut self) {
        self.tokens.clear();
    }

    /// Append a token to the rendered text.
    ///
    /// Returns `false` if the token was dropped because the display is full
    /// or a second decimal point was entered.
    pub fn push(&mut self, token: Token) -> bool {
        let has_point = self.text.contains('.');
        if token == Token::Point && has_point {
            return false;
        }

        let max_len = if has_point {
            MAX_DECIMAL_LEN
        } else {
            MAX_INTEGER_LEN
        };
        if self.text.chars().count() >= max_len {
            return false;
        }

        self.text.push(token.as_char());
        self.tokens.push(token);
        true
    }

    /// Remove the last typed token and re-render from the remaining ones.
    pub fn pop(&mut self) -> Option<Token> {
        let token = self.tokens.pop()?;
        self.text = self.tokens.iter().map(|t| t.as_char()).collect();
        Some(token)
    }

    /// Overwrite the rendered text.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
