//! Autoload entry point.
//!
//! Runs one discovery over a JSON table snapshot and prints the resource
//! and attribute sequences.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sonic_autoload::tables::{self, scalars};
use sonic_autoload::{
    discover, AutoloadConfig, AutoloadDetails, AutoloadError, MemorySource, DEFAULT_CONFIG_PATH,
};
use tracing::{error, info, warn};

/// Exit status for a run that failed on a transient source error
/// (`EX_TEMPFAIL`); the caller may retry.
const EXIT_RETRY: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Switch topology autoload
#[derive(Parser, Debug)]
#[command(name = "autoload")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON table snapshot of the device
    #[arg(short = 's', long, required_unless_present = "list_tables")]
    snapshot: Option<PathBuf>,

    /// Configuration file
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,

    /// Result output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Print the table and scalar names a snapshot should carry, then exit
    #[arg(long)]
    list_tables: bool,
}

fn init_logging(log_level: &str, format: LogFormat) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }
}

fn print_table(details: &AutoloadDetails) {
    println!("{:<14} {:<22} {:<32} {:<16} UNIQUE ID", "KIND", "MODEL", "NAME", "ADDRESS");
    for r in &details.resources {
        println!(
            "{:<14} {:<22} {:<32} {:<16} {}",
            r.kind.to_string(),
            r.model,
            r.name,
            r.relative_address,
            r.unique_identifier
        );
    }
    println!();
    println!("{:<16} {:<20} VALUE", "ADDRESS", "ATTRIBUTE");
    for a in &details.attributes {
        println!(
            "{:<16} {:<20} {}",
            a.relative_address, a.attribute_name, a.attribute_value
        );
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let config = AutoloadConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    let path = args
        .snapshot
        .as_ref()
        .context("--snapshot is required")?;
    let source = MemorySource::load_json_file(path)
        .await
        .with_context(|| format!("reading snapshot {}", path.display()))?;

    let details = discover(&source, &config).await?;
    info!(
        "Discovered {} resources, {} attributes",
        details.resources.len(),
        details.attributes.len()
    );

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&details)?),
        OutputFormat::Table => print_table(&details),
    }
    Ok(())
}

/// Maps a failed run onto an exit status, logging it at the level its
/// severity warrants.
fn failure_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AutoloadError>() {
        Some(autoload) if !autoload.is_fatal() => {
            warn!("Autoload interrupted, retry later: {:#}", err);
            EXIT_RETRY
        }
        _ => {
            error!("Autoload failed: {:#}", err);
            1
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_tables {
        for name in tables::ALL_TABLES.iter().chain(scalars::ALL) {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    init_logging(&args.log_level, args.log_format);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(failure_status(&e)),
    }
}
