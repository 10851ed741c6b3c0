//! A keypad calculator: digit entry, five binary operators applied left to
//! right, unary math functions, and a five-slot memory of recent results.

pub mod calculator;
pub mod config;
pub mod ui;
