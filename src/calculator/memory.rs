//! Five-slot memory of committed results, most recent first.

use super::error::CalcError;
use serde::Serialize;

/// Number of memory slots.
pub const SLOT_COUNT: usize = 5;

/// Text of a slot that holds no value.
pub const EMPTY_SLOT: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MemorySlots {
    slots: [String; SLOT_COUNT],
}

impl Default for MemorySlots {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySlots {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| EMPTY_SLOT.to_string()),
        }
    }

    /// Store a value in slot 1, shifting older values back and evicting slot 5.
    pub fn push(&mut self, value: impl Into<String>) {
        self.slots.rotate_right(1);
        self.slots[0] = value.into();
    }

    /// Get a slot's text by its 1-based index.
    pub fn get(&self, index: usize) -> Result<&str, CalcError> {
        index
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .map(String::as_str)
            .ok_or(CalcError::NoSuchSlot(index))
    }

    /// Get a slot's value if it is not empty.
    pub fn value(&self, index: usize) -> Result<Option<&str>, CalcError> {
        self.get(index)
            .map(|text| (text != EMPTY_SLOT).then_some(text))
    }

    /// Get the most recently stored text.
    pub fn latest(&self) -> &str {
        &self.slots[0]
    }

    pub fn as_array(&self) -> &[String; SLOT_COUNT] {
        &self.slots
    }
}
