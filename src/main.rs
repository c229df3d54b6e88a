//! convo-utils CLI
//!
//! Usage:
//!   convo-utils [OPTIONS] <COMMAND>
//!
//! Commands:
//!   render     Fill a message template from conversation data
//!   check      Report placeholders the conversation cannot fill
//!   variables  List the variables available for a conversation
//!   quantile   Estimate quantiles of whitespace-separated numbers
//!   duration   Format a duration given in seconds
//!
//! Options:
//!   -s, --settings <FILE>  Settings file (TOML format)
//!   -h, --help             Print help

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use convo_utils::format::{format_time, seconds_to_time_unit};
use convo_utils::stats::SortedSamples;
use convo_utils::telemetry::init_tracing;
use convo_utils::template::{build_variable_map, substitute, undefined_placeholders};
use convo_utils::{Contact, Conversation, Error, Settings, VariableMap};

#[derive(Parser)]
#[command(name = "convo-utils")]
#[command(about = "Message template and statistics helpers for chat tooling")]
struct Cli {
    /// Settings file (TOML format)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a message template from conversation data
    Render {
        /// Message file (reads from stdin if not provided)
        input: Option<PathBuf>,

        #[command(flatten)]
        records: Records,

        /// Trim the result using the settings' trim options
        #[arg(long)]
        trim: bool,
    },

    /// Report placeholders the conversation cannot fill
    Check {
        /// Message file (reads from stdin if not provided)
        input: Option<PathBuf>,

        #[command(flatten)]
        records: Records,

        /// Disable colored diagnostics
        #[arg(long)]
        no_color: bool,
    },

    /// List the variables available for a conversation
    Variables {
        #[command(flatten)]
        records: Records,
    },

    /// Estimate quantiles of whitespace-separated numbers
    Quantile {
        /// Samples file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Comma-separated quantiles, e.g. 0.5,0.9 (defaults from settings)
        #[arg(short, long, value_delimiter = ',')]
        intervals: Vec<f64>,
    },

    /// Format a duration given in seconds
    Duration {
        seconds: f64,

        /// Print the duration in its largest unit instead
        #[arg(short, long)]
        unit: bool,
    },
}

#[derive(Args)]
struct Records {
    /// Conversation record (JSON)
    #[arg(short, long)]
    conversation: PathBuf,

    /// Contact record (JSON)
    #[arg(long)]
    contact: Option<PathBuf>,
}

impl Records {
    fn variables(&self) -> Result<VariableMap, Error> {
        let conversation = Conversation::from_file(&self.conversation)?;
        let contact = self
            .contact
            .as_deref()
            .map(Contact::from_file)
            .transpose()?;
        Ok(build_variable_map(&conversation, contact.as_ref()))
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Error> {
    let settings = match &cli.settings {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Command::Render {
            input,
            records,
            trim,
        } => {
            let message = read_input(input.as_deref())?;
            let rendered = substitute(&message, &records.variables()?);
            if trim {
                print!("{}", settings.trim.apply(&rendered));
            } else {
                print!("{}", rendered);
            }
            Ok(0)
        }
        Command::Check {
            input,
            records,
            no_color,
        } => {
            let message = read_input(input.as_deref())?;
            let filename = input
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<stdin>".to_string());
            let missing = undefined_placeholders(&message, &records.variables()?);
            for undefined in &missing {
                eprint!("{}", undefined.report(&message, &filename, !no_color));
            }
            Ok(if missing.is_empty() { 0 } else { 1 })
        }
        Command::Variables { records } => {
            for (key, value) in records.variables()?.iter() {
                match value {
                    Some(value) => println!("{}\t{}", key, value),
                    None => println!("{}\t(undefined)", key),
                }
            }
            Ok(0)
        }
        Command::Quantile { input, intervals } => {
            let samples = parse_samples(&read_input(input.as_deref())?)?;
            let intervals = if intervals.is_empty() {
                settings.stats.intervals.clone()
            } else {
                intervals
            };
            debug!(samples = samples.len(), "read samples");
            let sorted = SortedSamples::new(&samples);
            for (q, value) in intervals.iter().zip(sorted.quantiles(&intervals)?) {
                println!("{}\t{}", q, value);
            }
            Ok(0)
        }
        Command::Duration { seconds, unit } => {
            if unit {
                let converted = seconds_to_time_unit(Some(seconds), &settings.units);
                match converted.time {
                    Some(time) => println!("{} {}", time, converted.unit),
                    None => println!("- {}", converted.unit),
                }
            } else {
                println!("{}", format_time(seconds));
            }
            Ok(0)
        }
    }
}

/// Read a file, or stdin when no path is given
fn read_input(path: Option<&Path>) -> Result<String, Error> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Parse whitespace-separated numbers
fn parse_samples(text: &str) -> Result<Vec<f64>, Error> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| Error::InvalidSample(token.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_samples() {
        assert_eq!(parse_samples("1 2.5\n-3\t4").unwrap(), vec![1.0, 2.5, -3.0, 4.0]);
        assert!(parse_samples("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_samples_rejects_words() {
        assert!(matches!(parse_samples("1 two"), Err(Error::InvalidSample(s)) if s == "two"));
    }

    #[test]
    fn test_cli_parses_intervals() {
        let cli = Cli::try_parse_from(["convo-utils", "quantile", "--intervals", "0.5,0.9"])
            .expect("Should parse");
        match cli.command {
            Command::Quantile { intervals, input } => {
                assert_eq!(intervals, vec![0.5, 0.9]);
                assert!(input.is_none());
            }
            _ => panic!("expected quantile command"),
        }
    }

    #[test]
    fn test_cli_requires_conversation() {
        assert!(Cli::try_parse_from(["convo-utils", "render"]).is_err());
    }
}
