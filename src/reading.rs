//! Sensor reading record and the set of numeric measurement fields.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A numeric measurement field carried by every [`Reading`].
///
/// Variants are declared in lexicographic order of their display names, so
/// the derived `Ord` doubles as the tie-break order for the hourly peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Pollutant {
    #[serde(rename = "CO2")]
    Co2,
    #[serde(rename = "PM25")]
    Pm25,
}

impl Pollutant {
    /// Every numeric field defined on [`Reading`].
    pub const ALL: [Pollutant; 2] = [Pollutant::Co2, Pollutant::Pm25];

    pub fn name(self) -> &'static str {
        match self {
            Pollutant::Co2 => "CO2",
            Pollutant::Pm25 => "PM25",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One air-quality sensor observation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reading {
    pub sensor_id: String,
    #[serde(deserialize_with = "rfc3339")]
    pub timestamp: DateTime<FixedOffset>,
    pub pm25: f64,
    pub co2: f64,
}

/// Accepts only RFC 3339 timestamps, rejecting chrono's looser forms such as
/// `+0000` offsets or a space between date and time.
fn rfc3339<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
}

impl Reading {
    /// Returns the value of `pollutant` for this reading.
    pub fn value(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Co2 => self.co2,
            Pollutant::Pm25 => self.pm25,
        }
    }

    /// Iterates `(field, value)` for every numeric field.
    pub fn values(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL.iter().map(move |&p| (p, self.value(p)))
    }
}
