//! Error types for reading sources, aggregating and writing reports.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A source could not be read. Caught per source by the caller.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("'{}' has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// Aggregation failed on a specific record.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("record {row} has no '{field}' field")]
    MissingField { row: usize, field: String },
    #[error("record {row} ({position}): '{value}' is not a number")]
    ValueConversion {
        row: usize,
        position: String,
        value: String,
    },
}

/// The rendered report could not be produced or persisted.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report to '{}': {source}", path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write report to stdout: {0}")]
    Stdout(#[source] io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
