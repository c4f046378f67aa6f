//! Terminal front end for the calculator keypad.
//!
//! Key presses come from the arguments, or from stdin one line at a time,
//! and the display is printed after each batch, followed by the refreshed
//! history when a calculation succeeded. `history` and
//! `clear-history` talk to the backend directly.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use keypad::{
    CalculatorGateway, ClientSettings, HistoryEntry, HttpCalculatorGateway, KeyOutcome, Keypad,
    parse_keys,
};
use tokio::runtime::{Builder, Runtime};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `keypad` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "keypad",
    about = "Press calculator keys against the calculator backend",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Keys to press, e.g. `7+3=`. Reads stdin lines when omitted.
    #[arg(value_name = "KEYS")]
    keys: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List recent calculations, newest first.
    History,
    /// Delete every stored calculation.
    ClearHistory,
}

fn main() -> ExitCode {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{error}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> io::Result<()> {
    let settings = ClientSettings::load_for("keypad").map_err(io::Error::other)?;
    let base = settings.api_url().map_err(io::Error::other)?;
    let gateway = HttpCalculatorGateway::new(base, settings.timeout())
        .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;

    match cli.command {
        Some(Command::History) => print_history(&runtime, &gateway),
        Some(Command::ClearHistory) => {
            runtime
                .block_on(gateway.clear_history())
                .map_err(io::Error::other)?;
            writeln!(io::stdout().lock(), "History cleared")
        }
        None if cli.keys.is_empty() => press_stdin_lines(&runtime, &gateway),
        None => {
            let mut keypad = Keypad::new();
            press_line(&runtime, &gateway, &mut keypad, &cli.keys.concat())
        }
    }
}

fn press_stdin_lines(runtime: &Runtime, gateway: &HttpCalculatorGateway) -> io::Result<()> {
    let mut keypad = Keypad::new();
    for line in io::stdin().lock().lines() {
        press_line(runtime, gateway, &mut keypad, &line?)?;
    }
    Ok(())
}

fn press_line(
    runtime: &Runtime,
    gateway: &HttpCalculatorGateway,
    keypad: &mut Keypad,
    line: &str,
) -> io::Result<()> {
    let keys = parse_keys(line)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    let mut refreshed = None;
    for key in keys {
        let KeyOutcome {
            evaluation,
            history,
        } = runtime.block_on(keypad.press_and_refresh(key, gateway));
        if let Some(Err(error)) = evaluation {
            writeln!(io::stderr().lock(), "{error}")?;
        }
        if let Some(Ok(entries)) = history {
            refreshed = Some(entries);
        }
    }
    {
        let mut out = io::stdout().lock();
        if keypad.expression().is_empty() {
            writeln!(out, "{}", keypad.display())?;
        } else {
            writeln!(out, "{} {}", keypad.expression(), keypad.display())?;
        }
    }
    match refreshed {
        Some(entries) => write_history(entries),
        None => Ok(()),
    }
}

fn print_history(runtime: &Runtime, gateway: &HttpCalculatorGateway) -> io::Result<()> {
    let entries = runtime
        .block_on(gateway.history())
        .map_err(io::Error::other)?;
    write_history(entries)
}

fn write_history(entries: Vec<HistoryEntry>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if entries.is_empty() {
        return writeln!(out, "No calculations yet");
    }
    for HistoryEntry {
        expression,
        result,
        created_at,
        ..
    } in entries
    {
        writeln!(out, "{expression} = {result}  ({})", created_at.to_rfc3339())?;
    }
    Ok(())
}
