//! Raw and enriched sensor readings

use crate::error::{Result, ResultExt};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Readings below this temperature (°C) raise an alert
pub const TEMPERATURE_MIN_C: f64 = -10.0;

/// Readings above this temperature (°C) raise an alert
pub const TEMPERATURE_MAX_C: f64 = 60.0;

/// Readings below this relative humidity (%) raise an alert
pub const HUMIDITY_MIN: f64 = 10.0;

/// Readings above this relative humidity (%) raise an alert
pub const HUMIDITY_MAX: f64 = 90.0;

/// A record as it appears in the feed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawReading {
    pub mesh_id: String,
    pub device_id: String,
    /// RFC 3339 timestamp, any offset
    pub timestamp: DateTime<FixedOffset>,
    pub temperature_c: f64,
    pub humidity: f64,
    /// Passed through unchanged
    pub status: String,
}

/// A reading normalized to UTC with derived fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    pub mesh_id: String,
    pub device_id: String,
    pub timestamp_utc: DateTime<Utc>,
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub humidity: f64,
    pub status: String,
    pub temperature_alert: bool,
    pub humidity_alert: bool,
}

impl RawReading {
    /// Normalize and enrich this reading
    pub fn transform(&self) -> SensorReading {
        SensorReading {
            mesh_id: self.mesh_id.clone(),
            device_id: self.device_id.clone(),
            timestamp_utc: self.timestamp.with_timezone(&Utc),
            temperature_c: self.temperature_c,
            temperature_f: celsius_to_fahrenheit(self.temperature_c),
            humidity: self.humidity,
            status: self.status.clone(),
            temperature_alert: temperature_alert(self.temperature_c),
            humidity_alert: humidity_alert(self.humidity),
        }
    }
}

impl From<RawReading> for SensorReading {
    fn from(raw: RawReading) -> Self {
        raw.transform()
    }
}

/// Convert °C to °F
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// True when the temperature is strictly outside the accepted range
pub fn temperature_alert(celsius: f64) -> bool {
    celsius < TEMPERATURE_MIN_C || celsius > TEMPERATURE_MAX_C
}

/// True when the humidity is strictly outside the accepted range
pub fn humidity_alert(humidity: f64) -> bool {
    humidity < HUMIDITY_MIN || humidity > HUMIDITY_MAX
}

/// Parse and transform every crawled record
///
/// Fails on the first record that does not have the reading shape.
pub fn transform_records(records: &[Value]) -> Result<Vec<SensorReading>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let raw = RawReading::deserialize(record)
                .context(format!("Malformed reading at index {index}"))?;
            Ok(raw.transform())
        })
        .collect()
}
