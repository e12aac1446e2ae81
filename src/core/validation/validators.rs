//! Reusable field validators
//!
//! Each validator receives the field name and its JSON value. Validators only
//! judge the kind of value they understand and let everything else through,
//! so they compose in any order behind `required()`.

use crate::core::field::FieldFormat;
use serde_json::Value;

/// Human label for a field name ("affected_regions" -> "Affected regions")
pub fn label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Validator: field is required (not null, not blank, not an empty list)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        let missing = match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(a) => a.is_empty(),
            _ => false,
        };
        if missing {
            Err(format!("{} is required", label(field)))
        } else {
            Ok(())
        }
    }
}

/// Validator: string must have at least `min` characters
pub fn min_length(min: usize) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.chars().count() < min {
                return Err(format!(
                    "{} must be at least {} characters",
                    label(field),
                    min
                ));
            }
        }
        Ok(())
    }
}

/// Validator: string must not exceed `max` characters
pub fn max_length(max: usize) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.chars().count() > max {
                return Err(format!(
                    "{} must not exceed {} characters",
                    label(field),
                    max
                ));
            }
        }
        Ok(())
    }
}

/// Validator: string must look like an email address
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !FieldFormat::Email.matches(s) {
                return Err("Please enter a valid email address".to_string());
            }
        }
        Ok(())
    }
}

/// Validator: array must contain at least one entry
pub fn non_empty_list() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Array(entries) if entries.is_empty() => Err(format!(
            "{} must contain at least one entry",
            label(field)
        )),
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !allowed.iter().any(|a| a == s) {
                return Err(format!(
                    "{} must be one of: {}",
                    label(field),
                    allowed.join(", ")
                ));
            }
        }
        Ok(())
    }
}
