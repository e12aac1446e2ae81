//! Axum extractor for validated forms
//!
//! `ValidatedJson<F>` parses the request body as JSON, runs the form's filters
//! and validators, and hands the normalized form to the handler.

use super::{FieldErrors, Form};
use crate::core::error::ExplorerError;
use axum::{
    Json,
    extract::{FromRequest, Request},
};

/// Axum extractor that validates and filters a form payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_alert(
///     ValidatedJson(form): ValidatedJson<AlertForm>,
/// ) -> Result<Json<SafetyAlert>, ExplorerError> {
///     // form is already validated and filtered!
/// }
/// ```
pub struct ValidatedJson<F>(pub F);

impl<F> ValidatedJson<F> {
    /// Get the inner form
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F> std::ops::Deref for ValidatedJson<F> {
    type Target = F;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, F> FromRequest<S> for ValidatedJson<F>
where
    S: Send + Sync,
    F: Form + 'static,
{
    type Rejection = ExplorerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<serde_json::Value> = Json::from_request(req, state)
            .await
            .map_err(|e| ExplorerError::InvalidRequest(e.body_text()))?;

        let filtered = F::rules()
            .validate_and_filter(payload)
            .map_err(ExplorerError::Validation)?;

        let form = serde_json::from_value::<F>(filtered).map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert("form", e.to_string());
            ExplorerError::Validation(errors)
        })?;

        Ok(ValidatedJson(form))
    }
}
