//! CSV record source.
//!
//! Each source is opened, parsed and closed inside a single call, so a
//! failure in one file never leaves a handle open or affects the others.

use crate::config::InputConfig;
use crate::error::SourceError;
use crate::models::{Record, SourceFailure};
use anyhow::Result;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Options for reading a source.
#[derive(Debug, Clone)]
pub struct InputOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Header names every source must contain.
    pub required_columns: Vec<String>,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            required_columns: vec!["position".to_string(), "performance".to_string()],
        }
    }
}

impl InputOptions {
    /// Build reader options from the input section of the configuration.
    pub fn from_config(config: &InputConfig) -> Result<Self> {
        Ok(Self {
            delimiter: config.delimiter_byte()?,
            required_columns: vec![config.category_column.clone(), config.value_column.clone()],
        })
    }
}

/// Records gathered from several sources, plus the sources that were skipped.
#[derive(Debug, Default)]
pub struct SourceBatch {
    /// All records, in source order then row order.
    pub records: Vec<Record>,
    /// Sources that could not be read.
    pub failures: Vec<SourceFailure>,
    /// Number of sources read successfully.
    pub sources_read: usize,
}

/// Read every row of a single delimited file.
///
/// The first row is the header; values are keyed by header name.
pub fn read_records(path: &Path, options: &InputOptions) -> Result<Vec<Record>, SourceError> {
    let parse_error = |source: csv::Error| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(Trim::Headers)
        .from_reader(file);

    let headers = reader.headers().map_err(parse_error)?;
    for column in &options.required_columns {
        if !headers.iter().any(|h| h == column) {
            return Err(SourceError::MissingColumn {
                path: path.to_path_buf(),
                column: column.clone(),
            });
        }
    }

    let records = reader
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(parse_error)?;

    debug!(source = %path.display(), records = records.len(), "Parsed source");
    Ok(records)
}

/// Read all sources in order, skipping (and logging) those that fail.
pub fn read_all(paths: &[PathBuf], options: &InputOptions) -> SourceBatch {
    let mut batch = SourceBatch::default();

    for path in paths {
        match read_records(path, options) {
            Ok(records) => {
                info!(source = %path.display(), records = records.len(), "Read source");
                batch.records.extend(records);
                batch.sources_read += 1;
            }
            Err(e) => {
                error!(source = %path.display(), error = %e, "Failed to read source, skipping");
                batch.failures.push(SourceFailure {
                    source: path.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    batch
}
