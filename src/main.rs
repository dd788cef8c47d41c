//! PerfReport - average employee performance per position
//!
//! A CLI tool that reads employee CSV files, averages the performance
//! score of every position and prints a ranked table.
//!
//! Exit codes:
//!   0 - Success (unreadable input files are reported and skipped)
//!   1 - Runtime error (invalid arguments, bad config, non-numeric
//!       performance value, report could not be written)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod source;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::Config;
use models::{Report, ReportMetadata};
use source::InputOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("PerfReport v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Report failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .perfreport.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            config::DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", config::DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so stdout carries only the report.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete report workflow.
fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);
    config.validate()?;

    let report = generate_report(&args.files, &config)?;

    let text = report::render(&report, &config.report)?;
    report::emit(&text, args.report.as_deref())?;

    if let Some(ref path) = args.report {
        info!(path = %path.display(), rows = report.rows.len(), "Report saved");
    }

    Ok(())
}

/// Read all sources, aggregate them and assemble the report.
///
/// Unreadable sources are recorded in `Report::failures` and skipped.
fn generate_report(files: &[PathBuf], config: &Config) -> Result<Report> {
    let options = InputOptions::from_config(&config.input)?;
    let batch = source::read_all(files, &options);

    if batch.sources_read == 0 {
        warn!("No input file could be read; the report will be empty");
    }

    let columns = analysis::ColumnConfig::from(&config.input);
    let rows = analysis::aggregate(&batch.records, &columns, config.report.decimals)
        .context("Failed to aggregate performance values")?;

    info!(
        records = batch.records.len(),
        positions = rows.len(),
        "Aggregated records"
    );

    Ok(Report {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            sources_requested: files.len(),
            sources_read: batch.sources_read,
            sources_failed: batch.failures.len(),
            records: batch.records.len(),
        },
        rows,
        failures: batch.failures,
    })
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
