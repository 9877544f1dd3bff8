//! Output formatting and persistence for reading summaries.
//!
//! Supports the plain text report, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use csv::WriterBuilder;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::parser::ParseError;
use crate::reading::Pollutant;
use crate::stats::Summary;

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// One CSV row: the winning field for a single hour bucket.
#[derive(Debug, Serialize)]
struct HourRecord<'a> {
    generated_at: DateTime<Utc>,
    reading_count: usize,
    hour: u32,
    highest_pollutant: &'a str,
}

/// Formats one `Average <Field>: <value>` line per field, to 2 decimals.
pub fn average_lines(averages: &BTreeMap<Pollutant, f64>) -> Vec<String> {
    averages
        .iter()
        .map(|(pollutant, avg)| format!("Average {}: {:.2}", pollutant, avg))
        .collect()
}

/// Formats one `Hour <h>: Highest Pollutant - <Field>` line per hour bucket.
///
/// An hour with no winner gets an empty field name.
pub fn hourly_peak_lines(peaks: &BTreeMap<u32, Option<Pollutant>>) -> Vec<String> {
    peaks
        .iter()
        .map(|(hour, pollutant)| {
            format!(
                "Hour {}: Highest Pollutant - {}",
                hour,
                pollutant.map(Pollutant::name).unwrap_or_default()
            )
        })
        .collect()
}

/// Every report line for `summary`, averages first.
pub fn text_lines(summary: &Summary) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(averages) = &summary.averages {
        lines.extend(average_lines(averages));
    }
    if let Some(peaks) = &summary.hourly_peaks {
        lines.extend(hourly_peak_lines(peaks));
    }
    lines
}

/// The line reported in place of any results when the payload does not parse.
pub fn error_line(err: &ParseError) -> String {
    format!("Error parsing readings: {err}")
}

/// Everything to print for one run.
///
/// A parse failure yields the error line alone, whatever the format.
pub fn report_lines(report: &Result<Summary, ParseError>, format: Format) -> Result<Vec<String>> {
    let lines = match report {
        Err(e) => vec![error_line(e)],
        Ok(summary) => match format {
            Format::Text => text_lines(summary),
            Format::Json => vec![serde_json::to_string_pretty(summary)?],
        },
    };
    Ok(lines)
}

/// Appends one row per hour bucket of `summary` to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, summary: &Summary) -> Result<()> {
    let Some(peaks) = &summary.hourly_peaks else {
        debug!(path, "No hourly data, nothing to append");
        return Ok(());
    };

    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = peaks.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    let generated_at = Utc::now();
    for (&hour, pollutant) in peaks {
        writer.serialize(HourRecord {
            generated_at,
            reading_count: summary.reading_count,
            hour,
            highest_pollutant: pollutant.map(Pollutant::name).unwrap_or_default(),
        })?;
    }
    writer.flush()?;

    Ok(())
}
