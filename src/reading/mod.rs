//! Reading module
//!
//! Typed view of crawled sensor records. The server serves records opaquely;
//! `crawl --transform` uses this module to normalize each record to UTC and
//! flag out-of-range temperature and humidity.

mod types;

pub use types::{
    celsius_to_fahrenheit, humidity_alert, temperature_alert, transform_records, RawReading,
    SensorReading, HUMIDITY_MAX, HUMIDITY_MIN, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C,
};

#[cfg(test)]
mod tests;
