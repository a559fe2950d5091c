//! slabq demo driver
//!
//! Wires reader and writer threads around a bounded blocking queue.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::DemoConfig;
use crate::demo::{run_handoff, run_timeout, HandoffReport, TimeoutReport};
use crate::observability::telemetry::{init_tracing, init_tracing_verbose};

#[derive(Parser, Debug)]
#[command(name = "slabq")]
#[command(about = "Fixed-capacity, drop-oldest blocking queue demos")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to ./slabq.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Verbose mode (queue events on stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Quiet mode (skip text reports; JSON output is still printed)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format for scenario reports
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,
}

/// Output format for CLI reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reader pops four times while a writer overruns the queue
    Handoff {
        /// Queue capacity
        #[arg(long)]
        capacity: Option<usize>,

        /// Writer pause after the first push
        #[arg(long, value_name = "MS")]
        short_delay_ms: Option<u64>,

        /// Writer pause before the last push
        #[arg(long, value_name = "MS")]
        long_delay_ms: Option<u64>,

        /// Reader pause after its first pop
        #[arg(long, value_name = "MS")]
        reader_pause_ms: Option<u64>,
    },

    /// Bounded pop on an empty queue
    Timeout {
        /// Queue capacity
        #[arg(long)]
        capacity: Option<usize>,

        /// Pop timeout
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        init_tracing_verbose();
    } else {
        init_tracing();
    }

    let mut config = DemoConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Handoff {
            capacity,
            short_delay_ms,
            long_delay_ms,
            reader_pause_ms,
        } => {
            override_with(&mut config.capacity, capacity);
            override_with(&mut config.short_delay_ms, short_delay_ms);
            override_with(&mut config.long_delay_ms, long_delay_ms);
            override_with(&mut config.reader_pause_ms, reader_pause_ms);

            let report = run_handoff(&config)?;
            emit(cli.format, cli.quiet, &report, format_handoff)
        }
        Commands::Timeout {
            capacity,
            timeout_ms,
        } => {
            override_with(&mut config.capacity, capacity);
            override_with(&mut config.pop_timeout_ms, timeout_ms);

            let report = run_timeout(&config)?;
            emit(cli.format, cli.quiet, &report, format_timeout)
        }
        Commands::Config => {
            config.validate()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn emit<R: Serialize>(
    format: OutputFormat,
    quiet: bool,
    report: &R,
    text: fn(&R) -> String,
) -> Result<()> {
    if let Some(rendered) = render(format, quiet, report, text)? {
        println!("{}", rendered);
    }
    Ok(())
}

fn render<R: Serialize>(
    format: OutputFormat,
    quiet: bool,
    report: &R,
    text: fn(&R) -> String,
) -> Result<Option<String>> {
    match format {
        OutputFormat::Text if quiet => Ok(None),
        OutputFormat::Text => Ok(Some(text(report))),
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map(Some)
            .context("Failed to serialize report"),
    }
}

fn format_handoff(report: &HandoffReport) -> String {
    format!(
        "Popped (capacity {}): {:?}\nNumber of elements in queue: {}\nElapsed: {} ms",
        report.capacity, report.popped, report.remaining, report.elapsed_ms
    )
}

fn format_timeout(report: &TimeoutReport) -> String {
    format!(
        "{} (bound {} ms, waited {} ms)",
        report.message, report.timeout_ms, report.elapsed_ms
    )
}
