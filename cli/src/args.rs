//! Command-line parsing.

use anyhow::{Result, bail};

pub const USAGE: &str = "\
Usage:
  vigil [LOCATION]        Run the terminal presentation (default location: /)
  vigil probe [ORIGIN]    Probe the status endpoint once and print the status line
  vigil --help | --version

Environment:
  VIGIL_ORIGIN            Site origin probed for status (overrides config)
  RUST_LOG                Log filter (logs go to ~/.vigil/logs/vigil.log)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the TUI at `location`, e.g. `/vigilum#cases`.
    Run { location: String },
    Probe { origin: Option<String> },
    Help,
    Version,
}

pub fn parse<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        return Ok(Command::Run {
            location: "/".to_string(),
        });
    };

    let command = match first.as_str() {
        "-h" | "--help" | "help" => Command::Help,
        "-V" | "--version" => Command::Version,
        "probe" => Command::Probe {
            origin: args.next(),
        },
        flag if flag.starts_with('-') => bail!("unknown option: {flag}\n\n{USAGE}"),
        _ => Command::Run { location: first },
    };

    if let Some(extra) = args.next() {
        bail!("unexpected argument: {extra}\n\n{USAGE}");
    }
    Ok(command)
}
