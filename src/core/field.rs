//! Field value types, comparison and format validation

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    List(Vec<String>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view used by range facets and the sort comparator.
    ///
    /// Dates are expressed as epoch milliseconds and booleans as 0/1.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::DateTime(dt) => Some(dt.timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Categorical values carried by this field (one for scalars, many for lists)
    pub fn categories(&self) -> Vec<&str> {
        match self {
            FieldValue::String(s) => vec![s.as_str()],
            FieldValue::List(values) => values.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

/// Conversion of entity fields into [`FieldValue`]s
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for u32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl ToFieldValue for Vec<String> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::List(self.clone())
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// Compare two optional field values for sorting.
///
/// Dates compare by epoch milliseconds, strings by case-insensitive collation
/// and numbers by magnitude (`NaN` after every number). A `Null` value sorts
/// after every present value. A field missing from the item and mismatched
/// kinds compare `Equal` so the stable sort keeps their input order.
pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    let (Some(a), Some(b)) = (a, b) else {
        return Ordering::Equal;
    };

    match (a, b) {
        (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Null, _) => Ordering::Greater,
        (_, FieldValue::Null) => Ordering::Less,
        (FieldValue::DateTime(x), FieldValue::DateTime(y)) => {
            x.timestamp_millis().cmp(&y.timestamp_millis())
        }
        (FieldValue::String(x), FieldValue::String(y)) => collate(x, y),
        (FieldValue::List(_), _) | (_, FieldValue::List(_)) => Ordering::Equal,
        (FieldValue::DateTime(_), _) | (_, FieldValue::DateTime(_)) => Ordering::Equal,
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
    }
}

fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Field format validators for automatic validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let Some(string_value) = value.as_string() else {
            return false;
        };
        self.matches(string_value)
    }

    /// Validate a raw string against this format
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
        EMAIL_REGEX
            .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok())
            .as_ref()
            .is_some_and(|regex| regex.is_match(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn s(v: &str) -> FieldValue {
        FieldValue::String(v.to_string())
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(s("test").as_string(), Some("test"));
        assert_eq!(FieldValue::Integer(42).as_integer(), Some(42));
        assert_eq!(FieldValue::Float(2.5).as_number(), Some(2.5));
        assert_eq!(FieldValue::Boolean(true).as_number(), Some(1.0));
        assert!(FieldValue::Null.is_null());
        assert_eq!(s("x").as_integer(), None);
    }

    #[test]
    fn test_categories_of_list() {
        let value = FieldValue::List(vec!["Khumbu".into(), "Annapurna".into()]);
        assert_eq!(value.categories(), vec!["Khumbu", "Annapurna"]);
        assert!(FieldValue::Integer(3).categories().is_empty());
    }

    #[test]
    fn test_compare_numbers() {
        let four = FieldValue::Integer(4);
        let twelve = FieldValue::Float(12.0);
        assert_eq!(compare_values(Some(&four), Some(&twelve)), Ordering::Less);
        assert_eq!(compare_values(Some(&twelve), Some(&four)), Ordering::Greater);
        assert_eq!(
            compare_values(Some(&FieldValue::Float(f64::NAN)), Some(&four)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_strings_case_insensitive() {
        assert_eq!(compare_values(Some(&s("annapurna")), Some(&s("Everest"))), Ordering::Less);
        assert_eq!(compare_values(Some(&s("Langtang")), Some(&s("langtang"))), Ordering::Equal);
    }

    #[test]
    fn test_compare_dates() {
        let early = FieldValue::DateTime(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        let late = FieldValue::DateTime(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap());
        assert_eq!(compare_values(Some(&early), Some(&late)), Ordering::Less);
    }

    #[test]
    fn test_compare_missing_or_mismatched_is_equal() {
        assert_eq!(compare_values(None, Some(&s("a"))), Ordering::Equal);
        assert_eq!(compare_values(Some(&s("a")), Some(&FieldValue::Integer(1))), Ordering::Equal);
    }

    #[test]
    fn test_null_sorts_after_present_values() {
        let null = FieldValue::Null;
        let one = FieldValue::Integer(1);
        let three = FieldValue::Integer(3);
        assert_eq!(compare_values(Some(&null), Some(&one)), Ordering::Greater);
        assert_eq!(compare_values(Some(&three), Some(&null)), Ordering::Less);
        assert_eq!(compare_values(Some(&null), Some(&null)), Ordering::Equal);

        // Transitive through a null: 1 < 3 < null and 1 < null
        assert_eq!(compare_values(Some(&one), Some(&three)), Ordering::Less);
        assert_eq!(compare_values(Some(&one), Some(&null)), Ordering::Less);
    }

    #[test]
    fn test_email_validation() {
        let format = FieldFormat::Email;

        assert!(format.validate(&s("admin@nepaltrekexplorer.com")));
        assert!(format.matches("user.name+tag@example.co.uk"));
        assert!(!format.matches("invalid-email"));
        assert!(!format.matches("@example.com"));
        assert!(!format.validate(&FieldValue::Integer(42)));
    }

    #[test]
    fn test_custom_regex_validation() {
        let format = FieldFormat::Custom(Regex::new(r"^[A-Z]{3}\d{3}$").unwrap());

        assert!(format.matches("ABC123"));
        assert!(!format.matches("abc123"));
    }

    #[test]
    fn test_option_to_field_value() {
        let none: Option<String> = None;
        assert_eq!(none.to_field_value(), FieldValue::Null);
        assert_eq!(Some(3u32).to_field_value(), FieldValue::Integer(3));
    }
}
