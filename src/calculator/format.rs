//! Number formatting and parsing for the keypad display.

use super::error::CalcError;
use lazy_static::lazy_static;
use regex::Regex;

/// Widest rendering that is shown as-is.
const DISPLAY_WIDTH: usize = 14;

/// Largest magnitude the display can hold.
const DISPLAY_LIMIT: f64 = 99_999_999_999_999.0;

/// Digits kept after the decimal point when a value is too wide.
const FALLBACK_PRECISION: usize = 9;

lazy_static! {
    /// A decimal point followed only by zeros up to the end of the string.
    static ref ZERO_FRACTION: Regex = Regex::new(r"\.0*$").unwrap();
}

/// Format a value for the display.
///
/// Values whose plain rendering is wider than the display are rounded to
/// nine decimal places, unless their magnitude exceeds the display limit.
/// An all-zero fractional part is dropped together with the decimal point.
pub fn format_number(value: f64) -> Result<String, CalcError> {
    if value.is_nan() {
        return Err(CalcError::NotANumber);
    }

    let mut rendered = value.to_string();
    if value.is_infinite() || rendered.len() > DISPLAY_WIDTH {
        if value > DISPLAY_LIMIT {
            return Err(CalcError::TooBig);
        }
        if value < -DISPLAY_LIMIT {
            return Err(CalcError::TooSmall);
        }
        rendered = format!("{:.*}", FALLBACK_PRECISION, value);
    }

    Ok(ZERO_FRACTION.replace(&rendered, "").into_owned())
}

/// Parse display text as a finite number.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse display text as a 32-bit integer.
pub fn parse_integer(text: &str) -> Option<i32> {
    text.parse::<i32>().ok()
}
