//! Tests for the reading transform

use super::*;
use crate::error::Error;
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use test_case::test_case;

fn raw(temperature_c: f64, humidity: f64) -> RawReading {
    RawReading::deserialize(&json!({
        "mesh_id": "mesh-001",
        "device_id": "device-A",
        "timestamp": "2025-03-26T18:45:00Z",
        "temperature_c": temperature_c,
        "humidity": humidity,
        "status": "ok"
    }))
    .unwrap()
}

#[test_case(25.0, false ; "normal")]
#[test_case(-15.0, true ; "too cold")]
#[test_case(65.0, true ; "too hot")]
#[test_case(-10.0, false ; "lower bound is inclusive")]
#[test_case(60.0, false ; "upper bound is inclusive")]
#[test_case(-10.1, true ; "just below lower bound")]
#[test_case(60.1, true ; "just above upper bound")]
fn test_temperature_alert(celsius: f64, expected: bool) {
    assert_eq!(raw(celsius, 50.0).transform().temperature_alert, expected);
}

#[test_case(50.0, false ; "normal")]
#[test_case(5.0, true ; "too dry")]
#[test_case(95.0, true ; "too humid")]
#[test_case(10.0, false ; "lower bound is inclusive")]
#[test_case(90.0, false ; "upper bound is inclusive")]
#[test_case(9.9, true ; "just below lower bound")]
#[test_case(90.1, true ; "just above upper bound")]
fn test_humidity_alert(humidity: f64, expected: bool) {
    assert_eq!(raw(25.0, humidity).transform().humidity_alert, expected);
}

#[test_case(0.0, 32.0 ; "freezing")]
#[test_case(100.0, 212.0 ; "boiling")]
#[test_case(-40.0, -40.0 ; "scales cross")]
fn test_celsius_to_fahrenheit(celsius: f64, fahrenheit: f64) {
    assert!((celsius_to_fahrenheit(celsius) - fahrenheit).abs() < 1e-9);
}

#[test]
fn test_timestamp_normalized_to_utc() {
    let reading = RawReading::deserialize(&json!({
        "mesh_id": "mesh-001",
        "device_id": "device-A",
        "timestamp": "2025-03-26T20:45:00+02:00",
        "temperature_c": 20.0,
        "humidity": 50.0,
        "status": "ok"
    }))
    .unwrap();

    let expected = Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap();
    assert_eq!(reading.transform().timestamp_utc, expected);
}

#[test]
fn test_fields_preserved() {
    let mut reading = raw(20.0, 45.0);
    reading.status = "warning".to_string();

    let transformed = SensorReading::from(reading);
    assert_eq!(transformed.mesh_id, "mesh-001");
    assert_eq!(transformed.device_id, "device-A");
    assert_eq!(transformed.status, "warning");
    assert_eq!(transformed.temperature_c, 20.0);
    assert_eq!(transformed.humidity, 45.0);
    assert_eq!(transformed.temperature_f, 68.0);
}

#[test]
fn test_serialized_shape() {
    let value = serde_json::to_value(raw(-12.0, 95.0).transform()).unwrap();
    let timestamp: DateTime<Utc> = serde_json::from_value(value["timestamp_utc"].clone()).unwrap();

    assert_eq!(timestamp, Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap());
    assert_eq!(value["temperature_alert"], true);
    assert_eq!(value["humidity_alert"], true);
    assert!(value.get("timestamp").is_none());
}

#[test]
fn test_transform_records() {
    let records = vec![
        json!({"mesh_id": "m", "device_id": "a", "timestamp": "2025-03-26T13:45:00Z",
               "temperature_c": 22.4, "humidity": 41.0, "status": "ok"}),
        json!({"mesh_id": "m", "device_id": "b", "timestamp": "2025-03-26T13:46:00Z",
               "temperature_c": 63.1, "humidity": 38.5, "status": "warning"}),
    ];

    let readings = transform_records(&records).unwrap();
    assert_eq!(readings.len(), 2);
    assert!(!readings[0].temperature_alert);
    assert!(readings[1].temperature_alert);
}

#[test]
fn test_transform_records_reports_bad_index() {
    let records = vec![
        json!({"mesh_id": "m", "device_id": "a", "timestamp": "2025-03-26T13:45:00Z",
               "temperature_c": 22.4, "humidity": 41.0, "status": "ok"}),
        json!({"mesh_id": "m", "device_id": "b"}),
    ];

    let err = transform_records(&records).unwrap_err();
    assert!(matches!(err, Error::Other(_)));
    assert!(err.to_string().starts_with("Malformed reading at index 1"));
}
