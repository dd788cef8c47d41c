//! Performance aggregation and ranking.
//!
//! This module groups records by position, averages their performance
//! and ranks the positions from best to worst.

use crate::config::InputConfig;
use crate::error::AggregateError;
use crate::models::{round_to, Record, ReportRow};
use std::collections::HashMap;

/// Running total for one position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupAccumulator {
    pub total: f64,
    pub count: usize,
}

impl GroupAccumulator {
    /// Add one value to the group.
    pub fn add(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    /// Mean of all values added so far. Only called on non-empty groups.
    pub fn mean(&self) -> f64 {
        self.total / self.count as f64
    }
}

/// Names of the two columns the aggregation reads.
#[derive(Debug, Clone)]
pub struct ColumnConfig {
    pub category: String,
    pub value: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self::from(&InputConfig::default())
    }
}

impl From<&InputConfig> for ColumnConfig {
    fn from(config: &InputConfig) -> Self {
        Self {
            category: config.category_column.clone(),
            value: config.value_column.clone(),
        }
    }
}

/// Group records by category, in the order categories first appear.
///
/// Fails on the first record whose value is missing or not a finite number.
pub fn group_records<'a>(
    records: &'a [Record],
    columns: &ColumnConfig,
) -> Result<Vec<(&'a str, GroupAccumulator)>, AggregateError> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, GroupAccumulator)> = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let row = i + 1;
        let category = field(record, &columns.category, row)?;
        let raw = field(record, &columns.value, row)?;
        let value = parse_value(raw).ok_or_else(|| AggregateError::ValueConversion {
            row,
            position: category.to_string(),
            value: raw.to_string(),
        })?;

        let slot = match index.get(category) {
            Some(&slot) => slot,
            None => {
                groups.push((category, GroupAccumulator::default()));
                index.insert(category, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].1.add(value);
    }

    Ok(groups)
}

/// Average performance per category, highest first.
///
/// Averages are rounded to `decimals` places before ranking; equal
/// averages keep the order in which their categories first appeared.
pub fn aggregate(
    records: &[Record],
    columns: &ColumnConfig,
    decimals: u32,
) -> Result<Vec<ReportRow>, AggregateError> {
    let mut rows: Vec<ReportRow> = group_records(records, columns)?
        .into_iter()
        .map(|(category, group)| ReportRow::new(category, round_to(group.mean(), decimals)))
        .collect();

    // sort_by is stable, which keeps ties in first-seen order
    rows.sort_by(|a, b| b.average.total_cmp(&a.average));

    Ok(rows)
}

fn field<'a>(record: &'a Record, name: &str, row: usize) -> Result<&'a str, AggregateError> {
    record
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| AggregateError::MissingField {
            row,
            field: name.to_string(),
        })
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
