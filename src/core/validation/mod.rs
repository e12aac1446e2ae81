//! Validation and filtering system
//!
//! Forms declare per-field filters and validators. Every field is checked
//! independently and reports its first failing message, so an error on one
//! field never hides or blocks another.

pub mod extractor;
pub mod filters;
pub mod forms;
pub mod validators;

pub use extractor::ValidatedJson;
pub use forms::{AlertForm, LoginForm};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

type ValidatorFn = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type FilterFn = Box<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Field-level error messages, in form field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, keeping the first one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Default)]
struct FieldRule {
    filters: Vec<FilterFn>,
    validators: Vec<ValidatorFn>,
}

/// Declarative rule set of one form
#[derive(Default)]
pub struct FormRules {
    fields: IndexMap<&'static str, FieldRule>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter applied to `field` before validation
    pub fn filter<F>(mut self, field: &'static str, filter: F) -> Self
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.fields
            .entry(field)
            .or_default()
            .filters
            .push(Box::new(filter));
        self
    }

    /// Add a validator for `field`; validators run in insertion order
    pub fn rule<V>(mut self, field: &'static str, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields
            .entry(field)
            .or_default()
            .validators
            .push(Box::new(validator));
        self
    }

    /// Filter then validate a JSON object, returning the filtered payload
    pub fn validate_and_filter(&self, mut payload: Value) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();

        for (field, rule) in &self.fields {
            let mut value = payload.get(*field).cloned().unwrap_or(Value::Null);

            for filter in &rule.filters {
                value = match filter(*field, value) {
                    Ok(filtered) => filtered,
                    Err(e) => {
                        errors.insert(*field, e.to_string());
                        Value::Null
                    }
                };
            }

            if let Some(message) = rule
                .validators
                .iter()
                .find_map(|validate| validate(*field, &value).err())
            {
                errors.insert(*field, message);
            }

            if let Some(object) = payload.as_object_mut() {
                object.insert((*field).to_string(), value);
            }
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

/// A submitted form with declarative rules
pub trait Form: Serialize + DeserializeOwned + Send + Sized {
    /// Default rule set for this form
    fn rules() -> FormRules;

    /// Validate against the default rules, returning the normalized form
    fn validate(&self) -> Result<Self, FieldErrors> {
        self.validate_with(&Self::rules())
    }

    /// Validate against an explicit rule set
    fn validate_with(&self, rules: &FormRules) -> Result<Self, FieldErrors> {
        let payload = serde_json::to_value(self).map_err(form_error)?;
        let filtered = rules.validate_and_filter(payload)?;
        serde_json::from_value(filtered).map_err(form_error)
    }
}

fn form_error(err: serde_json::Error) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert("form", err.to_string());
    errors
}
