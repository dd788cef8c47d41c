//! Data models for the performance report.
//!
//! This module contains the core data structures used throughout
//! the application for representing input rows, report rows and
//! the serialized report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One raw input row, keyed by header name.
pub type Record = HashMap<String, String>;

/// A single line of the ranked report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Category label (job position).
    pub position: String,
    /// Mean performance, already rounded.
    pub average: f64,
}

impl ReportRow {
    pub fn new(position: impl Into<String>, average: f64) -> Self {
        Self {
            position: position.into(),
            average,
        }
    }
}

/// A source that was skipped because it could not be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFailure {
    /// Path of the failing source.
    pub source: PathBuf,
    /// Human-readable error message.
    pub message: String,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of sources given on the command line.
    pub sources_requested: usize,
    /// Number of sources read successfully.
    pub sources_read: usize,
    /// Number of sources skipped.
    pub sources_failed: usize,
    /// Number of records aggregated.
    pub records: usize,
}

/// The complete report, as written by the JSON output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// Rows ordered by average, highest first.
    pub rows: Vec<ReportRow>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<SourceFailure>,
}

/// Round `value` to `decimals` places, halves away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_two_decimals() {
        assert_eq!(round_to(4.8500000000000005, 2), 4.85);
        assert_eq!(round_to(4.55, 2), 4.55);
        assert_eq!(round_to(1.0 / 3.0, 2), 0.33);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
    }

    #[test]
    fn test_round_to_half_away_from_zero() {
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_round_to_exact_values_unchanged() {
        for value in [4.85, 4.5, 3.0, 0.01, 12.34] {
            assert_eq!(round_to(value, 2), value);
        }
    }

    #[test]
    fn test_report_omits_empty_failures() {
        let report = Report {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                sources_requested: 1,
                sources_read: 1,
                sources_failed: 0,
                records: 2,
            },
            rows: vec![ReportRow::new("Backend Developer", 4.85)],
            failures: Vec::new(),
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"position\":\"Backend Developer\""));
        assert!(!json.contains("failures"));
    }
}
