//! `slots` CLI — compute availability from JSON schedule documents.
//!
//! ## Usage
//!
//! ```sh
//! # Mutual availability of every participant in a document (stdin → stdout)
//! cat team.json | slots build
//!
//! # From file to file, dropping rule times that fall in a DST gap
//! slots build -i team.json -o free.json --dst skip
//!
//! # Intersect a JSON array of interval arrays
//! slots intersect -i sets.json
//!
//! # Remove busy time: {"source": [...], "excluded": [...]}
//! slots subtract -i busy.json
//! ```
//!
//! Logs go to stderr. `-v` enables debug logs; `RUST_LOG` overrides both.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use slot_engine::document::{AvailabilityDocument, SubtractionDocument};
use slot_engine::{DstPolicy, Interval};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Availability interval engine CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build mutual availability for every participant in a document
    Build {
        /// Input document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// What to do with rule times that fall in a DST gap
        #[arg(long, value_enum, default_value_t = DstArg::ShiftForward)]
        dst: DstArg,
    },
    /// Intersect a JSON array of interval arrays
    Intersect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove busy intervals from free intervals
    Subtract {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Trust that `excluded` is already sorted by start
        #[arg(long)]
        presorted: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DstArg {
    Skip,
    ShiftForward,
}

impl From<DstArg> for DstPolicy {
    fn from(arg: DstArg) -> Self {
        match arg {
            DstArg::Skip => DstPolicy::Skip,
            DstArg::ShiftForward => DstPolicy::ShiftForward,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build { input, output, dst } => {
            let json = read_input(input.as_deref())?;
            let document = AvailabilityDocument::from_json(&json)
                .context("Failed to parse availability document")?;
            debug!(
                participants = document.participants.len(),
                busy = document.busy.len(),
                "loaded availability document"
            );

            let slots = document
                .evaluate(dst.into())
                .context("Failed to evaluate availability document")?;
            info!(slots = slots.len(), "computed availability");

            write_intervals(output.as_deref(), &slots)?;
        }
        Commands::Intersect { input, output } => {
            let json = read_input(input.as_deref())?;
            let sets: Vec<Vec<Interval>> =
                serde_json::from_str(&json).context("Failed to parse interval sets")?;

            let common = slot_engine::intersect(&sets);
            info!(sets = sets.len(), common = common.len(), "intersected interval sets");

            write_intervals(output.as_deref(), &common)?;
        }
        Commands::Subtract {
            input,
            output,
            presorted,
        } => {
            let json = read_input(input.as_deref())?;
            let doc: SubtractionDocument =
                serde_json::from_str(&json).context("Failed to parse subtraction document")?;

            let remaining = if presorted {
                slot_engine::subtract_presorted(&doc.source, &doc.excluded)
            } else {
                slot_engine::subtract(&doc.source, &doc.excluded)
            };
            info!(remaining = remaining.len(), "subtracted busy intervals");

            write_intervals(output.as_deref(), &remaining)?;
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_intervals(path: Option<&str>, intervals: &[Interval]) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(intervals).context("Failed to serialize intervals")?;
    content.push('\n');

    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
