pub mod clipboard;
pub mod render;
pub mod terminal;

pub use clipboard::copy_to_clipboard;
pub use render::{render, render_text};
pub use terminal::{Outcome, Session};
