//! Aggregations over a batch of readings.

use chrono::Timelike;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::parser::{ParseError, parse_readings};
use crate::reading::{Pollutant, Reading};

/// Running sum and number of contributing readings for one field.
#[derive(Debug, Default, Clone, Copy)]
struct Total {
    sum: f64,
    count: usize,
}

impl Total {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Computes the mean of every numeric field across all `readings`.
///
/// Returns `None` for an empty batch.
pub fn calculate_averages(readings: &[Reading]) -> Option<BTreeMap<Pollutant, f64>> {
    if readings.is_empty() {
        return None;
    }

    let count = readings.len() as f64;
    let mut totals: BTreeMap<Pollutant, f64> = BTreeMap::new();

    for reading in readings {
        for (pollutant, value) in reading.values() {
            *totals.entry(pollutant).or_default() += value;
        }
    }

    Some(
        totals
            .into_iter()
            .map(|(pollutant, sum)| (pollutant, sum / count))
            .collect(),
    )
}

/// Finds, for each hour of day present in `readings`, the field with the
/// highest average within that hour.
///
/// The hour is read in the timestamp's own offset. A field must average
/// strictly above `0.0` to win, so an hour where nothing does maps to `None`.
/// Ties go to the field that sorts first by name.
///
/// Returns `None` for an empty batch.
pub fn find_highest_pollutant_by_hour(
    readings: &[Reading],
) -> Option<BTreeMap<u32, Option<Pollutant>>> {
    if readings.is_empty() {
        return None;
    }

    let mut buckets: BTreeMap<u32, BTreeMap<Pollutant, Total>> = BTreeMap::new();

    for reading in readings {
        let bucket = buckets.entry(reading.timestamp.hour()).or_default();
        for (pollutant, value) in reading.values() {
            bucket.entry(pollutant).or_default().add(value);
        }
    }

    let result = buckets
        .into_iter()
        .map(|(hour, totals)| {
            let mut highest = None;
            let mut highest_average = 0.0;

            for (pollutant, total) in totals {
                let average = total.mean();
                if average > highest_average {
                    highest_average = average;
                    highest = Some(pollutant);
                }
            }

            debug!(hour, ?highest, highest_average, "Hour bucket evaluated");
            (hour, highest)
        })
        .collect();

    Some(result)
}

/// Everything computed for one batch of readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub reading_count: usize,
    pub averages: Option<BTreeMap<Pollutant, f64>>,
    pub hourly_peaks: Option<BTreeMap<u32, Option<Pollutant>>>,
}

impl Summary {
    /// Runs both aggregations over `readings`.
    pub fn from_readings(readings: &[Reading]) -> Self {
        Summary {
            reading_count: readings.len(),
            averages: calculate_averages(readings),
            hourly_peaks: find_highest_pollutant_by_hour(readings),
        }
    }
}

/// Parses a JSON payload and summarizes it.
///
/// Nothing is aggregated when the payload does not parse.
pub fn summarize(bytes: &[u8]) -> Result<Summary, ParseError> {
    let readings = parse_readings(bytes)?;
    Ok(Summary::from_readings(&readings))
}
