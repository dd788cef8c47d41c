//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest number of decimal places an average may be rounded to.
pub const MAX_DECIMALS: u32 = 6;

/// PerfReport - average performance per position
///
/// Reads one or more CSV files of employee scores, averages the
/// performance of every position and prints the positions ranked
/// from best to worst.
///
/// Examples:
///   perfreport --files employees1.csv employees2.csv
///   perfreport --files employees1.csv --report report.txt
///   perfreport --files scores.csv --delimiter ';' --format json
///   perfreport --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Input CSV files, read in the given order
    #[arg(
        short,
        long,
        value_name = "FILE",
        num_args = 1..,
        required_unless_present = "init_config"
    )]
    pub files: Vec<PathBuf>,

    /// Write the report to this file instead of stdout
    ///
    /// An existing file is overwritten.
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Output format (grid, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .perfreport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Column holding the position (category) label
    #[arg(long, value_name = "NAME", env = "PERFREPORT_CATEGORY_COLUMN")]
    pub category_column: Option<String>,

    /// Column holding the numeric performance value
    #[arg(long, value_name = "NAME", env = "PERFREPORT_VALUE_COLUMN")]
    pub value_column: Option<String>,

    /// Field delimiter of the input files
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Decimal places averages are rounded to
    #[arg(long, value_name = "N")]
    pub decimals: Option<u32>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .perfreport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bordered text table (default)
    #[default]
    Grid,
    /// JSON document with metadata
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.files.is_empty() {
            return Err("At least one input file is required".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err(format!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    delimiter
                ));
            }
        }

        if let Some(decimals) = self.decimals {
            if decimals > MAX_DECIMALS {
                return Err(format!("Decimals must be at most {}", MAX_DECIMALS));
            }
        }

        for (flag, column) in [
            ("--category-column", &self.category_column),
            ("--value-column", &self.value_column),
        ] {
            if column.as_deref().is_some_and(|c| c.trim().is_empty()) {
                return Err(format!("{} must not be empty", flag));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_args() -> Args {
        Args {
            files: vec![PathBuf::from("employees1.csv")],
            report: None,
            format: None,
            config: None,
            category_column: None,
            value_column: None,
            delimiter: None,
            decimals: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_repeated_files() {
        let args = Args::try_parse_from([
            "perfreport",
            "--files",
            "a.csv",
            "b.csv",
            "--report",
            "out.txt",
        ])
        .unwrap();

        assert_eq!(
            args.files,
            vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]
        );
        assert_eq!(args.report, Some(PathBuf::from("out.txt")));
        assert_eq!(args.format, None);
    }

    #[test]
    fn test_files_required() {
        assert!(Args::try_parse_from(["perfreport"]).is_err());
        assert!(Args::try_parse_from(["perfreport", "--init-config"]).is_ok());
    }

    #[test]
    fn test_parse_format() {
        let args =
            Args::try_parse_from(["perfreport", "-f", "a.csv", "--format", "json"]).unwrap();
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_validation_ok() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_decimals() {
        let mut args = make_args();
        args.decimals = Some(MAX_DECIMALS);
        assert!(args.validate().is_ok());

        args.decimals = Some(MAX_DECIMALS + 1);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_delimiter_and_columns() {
        let mut args = make_args();
        args.delimiter = Some('§');
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.value_column = Some("  ".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
