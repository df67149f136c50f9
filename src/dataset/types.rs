//! Dataset types

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// A single opaque record, passed through to clients unchanged
pub type Record = Value;

/// An ordered, read-only sequence of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset from records already in memory
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a dataset from a JSON array
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(records) => Ok(Self::new(records)),
            other => Err(Error::Other(format!(
                "expected a JSON array of records, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Load a dataset from a JSON file
    pub async fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();

        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound { path: display });
            }
            Err(e) => return Err(Error::dataset(display, e.to_string())),
        };

        Self::from_json_str(&contents).map_err(|e| Error::dataset(display, e.to_string()))
    }

    /// All records in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
