//! Reusable field filters
//!
//! These filters normalize form field values before validation

use anyhow::Result;
use serde_json::Value;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: convert string to lowercase
pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.to_lowercase()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: trim every string of an array and drop the empty ones
pub fn compact_list() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::Array(entries) => Ok(Value::Array(
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(s) if s.trim().is_empty() => None,
                    Value::String(s) => Some(Value::String(s.trim().to_string())),
                    other => Some(other),
                })
                .collect(),
        )),
        other => Ok(other),
    }
}
