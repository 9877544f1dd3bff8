//! JSON parser for batches of air-quality readings.

use thiserror::Error;
use tracing::debug;

use crate::reading::Reading;

/// The payload could not be decoded into a list of readings.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ParseError(#[from] serde_json::Error);

/// Decodes a JSON array of reading records from raw bytes.
///
/// Records keep their input order. Unknown keys are ignored.
///
/// # Errors
///
/// Returns [`ParseError`] if the bytes are not a JSON array of records with a
/// string `sensor_id`, an RFC 3339 `timestamp` and numeric `pm25` and `co2`.
pub fn parse_readings(bytes: &[u8]) -> Result<Vec<Reading>, ParseError> {
    let readings: Vec<Reading> = serde_json::from_slice(bytes)?;
    debug!(count = readings.len(), "Readings decoded");
    Ok(readings)
}
