//! Text and JSON report generation.
//!
//! This module renders ranked rows as a bordered text table or as a
//! JSON document, and writes the result to stdout or a file.

use crate::cli::OutputFormat;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::models::{Report, ReportRow};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Header of the category column.
pub const POSITION_HEADER: &str = "Position";
/// Header of the average column.
pub const AVERAGE_HEADER: &str = "Average Performance";

/// Minimum spaces between a header and its column edge.
const HEADER_PADDING: usize = 2;

/// Column alignment inside a grid cell.
#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// Render the report in the configured format.
pub fn render(report: &Report, config: &ReportConfig) -> Result<String, ReportError> {
    match config.format {
        OutputFormat::Grid => Ok(render_grid(&report.rows, config)),
        OutputFormat::Json => render_json(report),
    }
}

/// Render rows as a grid table, one data row per position.
///
/// Rows are printed in the order given. Averages drop trailing zeros and
/// line up on the decimal point; headers get at least two columns of
/// padding.
pub fn render_grid(rows: &[ReportRow], config: &ReportConfig) -> String {
    let positions: Vec<&str> = rows.iter().map(|row| row.position.as_str()).collect();
    let averages = align_decimal(
        rows.iter()
            .map(|row| format_average(row.average, config.decimals))
            .collect(),
    );

    let position_width = positions
        .iter()
        .map(|position| display_width(position))
        .fold(display_width(POSITION_HEADER) + HEADER_PADDING, usize::max);
    let average_width = averages
        .iter()
        .map(|average| display_width(average))
        .fold(display_width(AVERAGE_HEADER) + HEADER_PADDING, usize::max);
    let widths = [position_width, average_width];

    let border = separator_line('-', &widths);
    let mut lines = vec![
        border.clone(),
        row_line(POSITION_HEADER, AVERAGE_HEADER, &widths),
        separator_line('=', &widths),
    ];

    for (position, average) in positions.iter().zip(&averages) {
        lines.push(row_line(position, average, &widths));
        lines.push(border.clone());
    }

    lines.join("\n")
}

/// Format an already rounded average with at most `decimals` places and
/// no trailing zeros, so `4.50` prints as `4.5` and `5.00` as `5`.
pub fn format_average(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.*}", decimals as usize, value);
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Pad numbers on the right so their decimal points share a column.
fn align_decimal(cells: Vec<String>) -> Vec<String> {
    let after_point = |cell: &str| match cell.find('.') {
        Some(dot) => (cell.len() - dot - 1) as isize,
        None => -1,
    };
    let max_after = cells.iter().map(|c| after_point(c.as_str())).max().unwrap_or(-1);

    cells
        .into_iter()
        .map(|cell| {
            let fill = (max_after - after_point(cell.as_str())) as usize;
            format!("{}{}", cell, " ".repeat(fill))
        })
        .collect()
}

/// Render the full report as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Print `text` to stdout, or write it to `destination`, replacing any
/// existing content.
pub fn emit(text: &str, destination: Option<&Path>) -> Result<(), ReportError> {
    match destination {
        Some(path) => {
            let write_error = |source: io::Error| ReportError::DestinationWrite {
                path: path.to_path_buf(),
                source,
            };

            let mut file = File::create(path).map_err(write_error)?;
            file.write_all(text.as_bytes()).map_err(write_error)?;
            file.flush().map_err(write_error)
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text).map_err(ReportError::Stdout)
        }
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn separator_line(fill: char, widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat(fill).take(width + 2));
        line.push('+');
    }
    line
}

fn row_line(position: &str, average: &str, widths: &[usize; 2]) -> String {
    format!(
        "| {} | {} |",
        pad(position, widths[0], Align::Left),
        pad(average, widths[1], Align::Right)
    )
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(text)));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}
