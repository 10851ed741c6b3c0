//! Line-oriented keypad session.
//!
//! Each input line is a key script, or one of the `:` commands listed in
//! [`HELP`]. After every script the resulting display state is printed.

use super::clipboard::copy_to_clipboard;
use super::render::render;
use crate::calculator::{Calculator, DisplayState, Intent, parse_script};
use crate::config::{Config, OutputFormat};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

pub const HELP: &str = "\
keys:     0-9 .  + - * x / ^  =  % ln log pi n! sqrt sqr x2  del ac  m1-m5
commands: :copy  :help  :quit";

/// Result of executing one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print; may be empty.
    Print(String),
    Quit,
}

/// A keypad session: one calculator plus the settings used to print it.
pub struct Session {
    calculator: Calculator,
    config: Config,
}

impl Session {
    /// Start a session with a cleared calculator.
    pub fn new(config: Config) -> Self {
        Self {
            calculator: Calculator::new(),
            config,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Execute a single input line.
    pub fn execute(&mut self, line: &str) -> anyhow::Result<Outcome> {
        let line = line.trim();
        match line {
            "" => return Ok(Outcome::Print(String::new())),
            ":q" | ":quit" => return Ok(Outcome::Quit),
            ":help" => return Ok(Outcome::Print(HELP.to_string())),
            ":copy" => {
                let display = self.calculator.display();
                return Ok(Outcome::Print(
                    match copy_to_clipboard(display.text_for_clipboard()) {
                        Ok(()) => format!("copied {}", display.text_for_clipboard()),
                        Err(err) => format!("! {:#}", err),
                    },
                ));
            }
            _ => {}
        }

        let intents = match parse_script(line) {
            Ok(intents) => intents,
            Err(err) => return Ok(Outcome::Print(format!("! {}", err))),
        };
        debug!(count = intents.len(), "running key script");

        let commits = ends_with_equals(&intents);
        let display = self.calculator.run(intents);
        if commits && self.config.copy_results {
            self.copy_result(&display);
        }

        Ok(Outcome::Print(render(
            &display,
            self.config.output,
            self.config.show_memory,
        )?))
    }

    /// Read lines until end of input or `:quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> anyhow::Result<()> {
        let prompt = match self.config.output {
            OutputFormat::Text => self.config.prompt.clone(),
            OutputFormat::Json => String::new(),
        };

        write!(out, "{}", prompt)?;
        out.flush()?;
        for line in input.lines() {
            match self.execute(&line?)? {
                Outcome::Quit => break,
                Outcome::Print(text) if text.is_empty() => {}
                Outcome::Print(text) => writeln!(out, "{}", text)?,
            }
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        Ok(())
    }

    fn copy_result(&self, display: &DisplayState) {
        if display.is_error() {
            return;
        }
        if let Err(err) = copy_to_clipboard(&display.text) {
            warn!("could not copy result: {:#}", err);
        }
    }
}

/// Check whether a script finishes on `=`, leaving a committed result on
/// the display.
fn ends_with_equals(intents: &[Intent]) -> bool {
    intents.last() == Some(&Intent::Equals)
}
