//! PLC Event Miner CLI Application
//!
//! This is the command-line interface for the PLC event miner.
//! It uses the plc-event-miner library and adds:
//! - One subcommand per pass (readings, messages) plus trace merging
//! - TOML configuration for column names and the merge date patch
//! - Logging setup and run summaries

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plc_event_miner::{read_trace, LogMerger, Miner};
use std::path::{Path, PathBuf};

mod config;
mod report;

/// PLC Event Miner - Turn industrial captures into state-change traces
#[derive(Parser, Debug)]
#[command(name = "plc-event-cli")]
#[command(about = "Mine state-change events from PLC readings and Modbus captures", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the columns of a readings table and mine their changes
    Readings {
        /// Readings table (CSV)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Text log to write
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Optional CSV log to write
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Optional JSON file receiving the column classification
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Mine the Modbus/TCP write commands of a capture table
    Messages {
        /// Capture table (CSV)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Text log to write
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Optional CSV log to write
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },

    /// Merge two text logs into one chronological trace
    Merge {
        /// First log; date-patched when its timestamps lack a date
        #[arg(long, value_name = "FILE")]
        first: PathBuf,

        /// Second log
        #[arg(long, value_name = "FILE")]
        second: PathBuf,

        /// Date (YYYY-MM-DD) for the first log, overriding the config
        #[arg(long, value_name = "DATE")]
        patch_date: Option<String>,

        /// Merged text trace to write
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Merged CSV trace to write
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("PLC Event Miner CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using miner library v{}", plc_event_miner::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let miner = Miner::with_config(app_config.miner.clone());

    match &args.command {
        Command::Readings {
            input,
            output,
            csv,
            report,
        } => readings_mode(&miner, input, output, csv.as_deref(), report.as_deref(), args.quiet),
        Command::Messages { input, output, csv } => {
            messages_mode(&miner, input, output, csv.as_deref(), args.quiet)
        }
        Command::Merge {
            first,
            second,
            patch_date,
            output,
            csv,
        } => {
            let patch_date = patch_date.clone().or(app_config.merge.patch_date);
            merge_mode(first, second, patch_date, output, csv, args.quiet)
        }
    }
}

/// Readings mode - classify columns, mine flips and trend reversals
fn readings_mode(
    miner: &Miner,
    input: &Path,
    output: &Path,
    csv: Option<&Path>,
    report_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let outcome = miner
        .mine_readings_file(input)
        .with_context(|| format!("Failed to mine readings from {:?}", input))?;

    outcome
        .log
        .write_text(output)
        .with_context(|| format!("Failed to write log: {:?}", output))?;
    if let Some(csv) = csv {
        outcome
            .log
            .write_csv(csv)
            .with_context(|| format!("Failed to write CSV log: {:?}", csv))?;
    }
    if let Some(path) = report_path {
        report::write_classification(path, &outcome.classification)?;
    }

    if !quiet {
        report::print_readings(&outcome.classification, &outcome.log);
    }
    Ok(())
}

/// Messages mode - mine register changes from write commands
fn messages_mode(
    miner: &Miner,
    input: &Path,
    output: &Path,
    csv: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let log = miner
        .mine_messages_file(input)
        .with_context(|| format!("Failed to mine messages from {:?}", input))?;

    log.write_text(output)
        .with_context(|| format!("Failed to write log: {:?}", output))?;
    if let Some(csv) = csv {
        log.write_csv(csv)
            .with_context(|| format!("Failed to write CSV log: {:?}", csv))?;
    }

    if !quiet {
        report::print_log(&log);
    }
    Ok(())
}

/// Merge mode - one chronological trace out of two logs
fn merge_mode(
    first: &Path,
    second: &Path,
    patch_date: Option<String>,
    output: &Path,
    csv: &Path,
    quiet: bool,
) -> Result<()> {
    let first_trace =
        read_trace(first).with_context(|| format!("Failed to read log: {:?}", first))?;
    let second_trace =
        read_trace(second).with_context(|| format!("Failed to read log: {:?}", second))?;

    let mut merger = LogMerger::new();
    if let Some(date) = patch_date {
        config::validate_date(&date)?;
        merger = merger.with_patch_date(date);
    }

    let merged = merger
        .merge(&[first_trace.as_slice(), second_trace.as_slice()])
        .context("Failed to merge logs")?;

    merged
        .write_text(output)
        .with_context(|| format!("Failed to write merged trace: {:?}", output))?;
    merged
        .write_csv(csv)
        .with_context(|| format!("Failed to write merged CSV: {:?}", csv))?;

    if !quiet {
        println!("Merged entries: {}", merged.len());
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
