//! Typed error handling for the trek explorer engine
//!
//! Errors are handled where they are produced; this module gives them one
//! shape so every surface (screens, login flow, HTTP handlers) can report
//! them consistently.
//!
//! # Error Categories
//!
//! - [`ExplorerError::Validation`]: field-level form errors
//! - [`AuthError`]: login, session and role failures
//! - [`ModerationError`]: rejected moderation transitions
//! - [`ExplorerError::NotFound`]: unknown item ids
//! - [`ExplorerError::Timeout`] / [`ExplorerError::Cancelled`]: async boundary outcomes
//!
//! # Example
//!
//! ```rust,ignore
//! match flow.submit(form, &store, &service).await {
//!     Ok(session) => println!("Welcome {}", session.name),
//!     Err(ExplorerError::Auth(AuthError::InvalidCredentials { attempts, .. })) => {
//!         println!("Attempt {} failed", attempts);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::auth::{AdminRole, AttemptWarning};
use crate::core::moderation::{ModerationAction, ModerationStatus};
use crate::core::validation::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::time::Duration;

/// The main error type of the crate
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// Form validation failed on one or more fields
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// Authentication or authorization failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Moderation transition rejected
    #[error(transparent)]
    Moderation(#[from] ModerationError),

    /// Item was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// Malformed query or body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service did not answer in time
    #[error("Operation timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The owning scope was torn down before completion
    #[error("Operation cancelled")]
    Cancelled,

    /// Data or auth service failure
    #[error("Service error: {0}")]
    Service(anyhow::Error),
}

/// A moderation conflict raised inside a service call keeps its own status
impl From<anyhow::Error> for ExplorerError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ModerationError>() {
            Ok(conflict) => ExplorerError::Moderation(conflict),
            Err(err) => ExplorerError::Service(err),
        }
    }
}

/// Errors related to login and session handling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Email/password mismatch
    #[error("Invalid email or password")]
    InvalidCredentials {
        attempts: u32,
        warning: Option<AttemptWarning>,
    },

    /// No admin session is active
    #[error("Authentication required")]
    Unauthenticated,

    /// The active role may not access this resource
    #[error("Role '{role}' may not access {resource}")]
    Forbidden { role: AdminRole, resource: String },
}

/// Errors related to the moderation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ModerationError {
    #[error("Cannot {action} content that is already {from}")]
    InvalidTransition {
        from: ModerationStatus,
        action: ModerationAction,
    },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ExplorerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExplorerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ExplorerError::Auth(AuthError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            ExplorerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ExplorerError::Moderation(_) => StatusCode::CONFLICT,
            ExplorerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ExplorerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ExplorerError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ExplorerError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ExplorerError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ExplorerError::Validation(_) => "VALIDATION_ERROR",
            ExplorerError::Auth(AuthError::InvalidCredentials { .. }) => "INVALID_CREDENTIALS",
            ExplorerError::Auth(AuthError::Unauthenticated) => "UNAUTHENTICATED",
            ExplorerError::Auth(AuthError::Forbidden { .. }) => "FORBIDDEN",
            ExplorerError::Moderation(_) => "INVALID_TRANSITION",
            ExplorerError::NotFound { .. } => "NOT_FOUND",
            ExplorerError::InvalidRequest(_) => "INVALID_REQUEST",
            ExplorerError::Timeout(_) => "TIMEOUT",
            ExplorerError::Cancelled => "CANCELLED",
            ExplorerError::Service(_) => "SERVICE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ExplorerError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            ExplorerError::Auth(AuthError::InvalidCredentials { attempts, warning }) => {
                Some(serde_json::json!({
                    "attempts": attempts,
                    "warning": warning.map(|w| w.message()),
                }))
            }
            ExplorerError::NotFound { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
