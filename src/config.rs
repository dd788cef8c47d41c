//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.perfreport.toml` files.

use crate::cli::{OutputFormat, MAX_DECIMALS};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".perfreport.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input parsing settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Report rendering settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// How input files are parsed and which columns the aggregation uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter (single byte).
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Column holding the category label.
    #[serde(default = "default_category_column")]
    pub category_column: String,

    /// Column holding the numeric performance value.
    #[serde(default = "default_value_column")]
    pub value_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            category_column: default_category_column(),
            value_column: default_value_column(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_category_column() -> String {
    "position".to_string()
}

fn default_value_column() -> String {
    "performance".to_string()
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal places averages are rounded to.
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            format: OutputFormat::default(),
        }
    }
}

fn default_decimals() -> u32 {
    2
}

impl InputConfig {
    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| {
                format!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                )
            })
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check values that the CLI validates for its own flags.
    ///
    /// Must hold after merging, since config files bypass `Args::validate`.
    pub fn validate(&self) -> Result<()> {
        if self.report.decimals > MAX_DECIMALS {
            bail!(
                "Decimals must be at most {}, got {}",
                MAX_DECIMALS,
                self.report.decimals
            );
        }

        self.input.delimiter_byte()?;

        for (key, column) in [
            ("category_column", &self.input.category_column),
            ("value_column", &self.input.value_column),
        ] {
            if column.trim().is_empty() {
                bail!("{} must not be empty", key);
            }
        }

        Ok(())
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(delimiter) = args.delimiter {
            self.input.delimiter = delimiter;
        }
        if let Some(ref column) = args.category_column {
            self.input.category_column = column.clone();
        }
        if let Some(ref column) = args.value_column {
            self.input.value_column = column.clone();
        }

        if let Some(decimals) = args.decimals {
            self.report.decimals = decimals;
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::make_args;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.delimiter, ',');
        assert_eq!(config.input.category_column, "position");
        assert_eq!(config.input.value_column, "performance");
        assert_eq!(config.report.decimals, 2);
        assert_eq!(config.report.format, OutputFormat::Grid);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[input]
delimiter = ";"
category_column = "role"

[report]
decimals = 3
format = "json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.delimiter, ';');
        assert_eq!(config.input.category_column, "role");
        assert_eq!(config.input.value_column, "performance");
        assert_eq!(config.report.decimals, 3);
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[report]\ndecimals = 1\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.report.decimals, 1);
        assert!(Config::load(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_merge_only_overrides_explicit_args() {
        let mut config: Config = toml::from_str("[input]\nvalue_column = \"score\"\n").unwrap();

        let mut args = make_args();
        args.category_column = Some("team".to_string());
        args.decimals = Some(1);
        config.merge_with_args(&args);

        assert_eq!(config.input.category_column, "team");
        assert_eq!(config.input.value_column, "score");
        assert_eq!(config.report.decimals, 1);
        assert_eq!(config.report.format, OutputFormat::Grid);
    }

    #[test]
    fn test_load_rejects_excessive_decimals() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[report]\ndecimals = 400\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Decimals must be at most"));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.report.decimals = MAX_DECIMALS;
        assert!(config.validate().is_ok());

        config.report.decimals = u32::MAX;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.input.value_column = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.input.delimiter = '→';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_delimiter_byte() {
        let mut input = InputConfig::default();
        assert_eq!(input.delimiter_byte().unwrap(), b',');

        input.delimiter = '\t';
        assert_eq!(input.delimiter_byte().unwrap(), b'\t');

        input.delimiter = 'é';
        assert!(input.delimiter_byte().is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[input]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.input.category_column, "position");
    }
}
