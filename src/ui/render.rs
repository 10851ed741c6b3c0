//! Display state rendering for the terminal.
//!
//! Text output mimics the keypad window: the main display right-aligned with
//! the highlighted operator on its left, the error line underneath and the
//! stored values at the bottom.

use crate::calculator::{DisplayState, Phase, SLOT_COUNT};
use crate::config::OutputFormat;

/// Width of the main display, in characters.
const DISPLAY_COLUMNS: usize = 16;

/// Render a display state in the configured format.
pub fn render(
    display: &DisplayState,
    format: OutputFormat,
    show_memory: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(display, show_memory)),
        OutputFormat::Json => Ok(serde_json::to_string(display)?),
    }
}

pub fn render_text(display: &DisplayState, show_memory: bool) -> String {
    let indicator = match (display.phase, display.pending_operator) {
        (Phase::OperatorPending, Some(op)) => op.symbol(),
        _ => " ",
    };

    let mut lines = vec![format!(
        "{} {:>width$}",
        indicator,
        display.text,
        width = DISPLAY_COLUMNS
    )];

    if display.is_error() {
        lines.push(format!("! {}", display.error));
    } else if !display.function_buttons_enabled {
        lines.push("  enter exponent".to_string());
    }

    if show_memory {
        lines.push(render_memory(&display.memory_slots));
    }

    lines.join("\n")
}

fn render_memory(slots: &[String; SLOT_COUNT]) -> String {
    slots
        .iter()
        .enumerate()
        .map(|(i, value)| format!("m{}:{}", i + 1, value))
        .collect::<Vec<_>>()
        .join("  ")
}
