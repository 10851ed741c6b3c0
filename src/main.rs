use anyhow::Context;
use clap::Parser;
use padcalc::config::{Config, OutputFormat};
use padcalc::ui::{Outcome, Session};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A keypad calculator for the terminal.
///
/// Each line of input is a key script such as `12 + 3.5 =` or `9 sqrt`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Run a single key script and print the final display.
    #[arg(short, long, value_name = "SCRIPT")]
    keys: Option<String>,

    /// Print display states as JSON.
    #[arg(long)]
    json: bool,

    /// Copy every equals result to the clipboard.
    #[arg(long)]
    copy: bool,

    /// Hide the memory row.
    #[arg(long)]
    no_memory: bool,

    /// Path to a config file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if args.json {
        config.output = OutputFormat::Json;
    }
    if args.copy {
        config.copy_results = true;
    }
    if args.no_memory {
        config.show_memory = false;
    }

    init_tracing(&config.log_level);
    info!(output = ?config.output, "starting padcalc");

    let mut session = Session::new(config);
    match args.keys {
        Some(script) => {
            if let Outcome::Print(text) = session.execute(&script)? {
                println!("{}", text);
            }
        }
        None => {
            let stdin = std::io::stdin();
            session
                .run(stdin.lock(), std::io::stdout())
                .context("Keypad session failed")?;
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
