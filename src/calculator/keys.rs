//! Key names understood by the terminal keypad.
//!
//! A key script is a line of key names such as `12 + 3.5 =` or `9 sqrt m1`.
//! Runs of digits are split into one keypress per character.

use super::buffer::Token;
use super::operation::{Operator, UnaryFn};
use super::state::Intent;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// One key per match: `x²` or `x2`, a digit run, a memory slot, a word
    /// (with an optional `!`), or any other single character.
    static ref KEY: Regex = Regex::new(r"(?i)x²|x2|[0-9.]+|m[1-5]|[a-z]+!?|\S").unwrap();
}

/// A key script that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Unknown key '{0}'")]
    Unknown(String),
}

/// Parse a whole key script into intents.
pub fn parse_script(script: &str) -> Result<Vec<Intent>, KeyError> {
    let mut intents = Vec::new();
    for key in KEY.find_iter(script) {
        intents.extend(parse_key(key.as_str())?);
    }
    Ok(intents)
}

/// Parse a single key name. Digit runs yield one intent per character.
pub fn parse_key(key: &str) -> Result<Vec<Intent>, KeyError> {
    if let Some(tokens) = key.chars().map(Token::from_char).collect::<Option<Vec<_>>>()
        && !tokens.is_empty()
    {
        return Ok(tokens.into_iter().map(Intent::Digit).collect());
    }

    let lower = key.to_lowercase();
    let intent = match lower.as_str() {
        "+" => Intent::Operator(Operator::Add),
        "-" => Intent::Operator(Operator::Subtract),
        "*" | "x" | "×" => Intent::Operator(Operator::Multiply),
        "/" | "÷" => Intent::Operator(Operator::Divide),
        "^" => Intent::Operator(Operator::Power),
        "=" => Intent::Equals,
        "%" => Intent::Unary(UnaryFn::Percent),
        "ln" => Intent::Unary(UnaryFn::Ln),
        "log" => Intent::Unary(UnaryFn::Log),
        "pi" | "π" => Intent::Unary(UnaryFn::Pi),
        "!" | "n!" | "fact" => Intent::Unary(UnaryFn::Factorial),
        "sqrt" | "root" | "√" => Intent::Unary(UnaryFn::Root),
        "sqr" | "x2" | "x²" => Intent::Unary(UnaryFn::Square),
        "del" | "<" | "⌫" => Intent::Delete,
        "ac" | "c" => Intent::AllClear,
        _ => match lower.strip_prefix('m').and_then(|n| n.parse::<usize>().ok()) {
            Some(index) => Intent::Recall(index),
            None => return Err(KeyError::Unknown(key.to_string())),
        },
    };
    Ok(vec![intent])
}
