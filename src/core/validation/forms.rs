//! Admin console forms

use super::filters::{compact_list, lowercase, trim};
use super::validators::{email, in_list, max_length, min_length, non_empty_list, required};
use super::{Form, FormRules};
use crate::entities::alert::{AlertKind, AlertSeverity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum password length accepted by the login form unless configured otherwise
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Admin login form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    pub fn remember(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    /// Rule set with an explicit password minimum
    pub fn rules_with_min_password(min_password: usize) -> FormRules {
        FormRules::new()
            .filter("email", trim())
            .filter("email", lowercase())
            .rule("email", required())
            .rule("email", email())
            .rule("password", required())
            .rule("password", min_length(min_password))
    }
}

impl Form for LoginForm {
    fn rules() -> FormRules {
        Self::rules_with_min_password(DEFAULT_MIN_PASSWORD_LENGTH)
    }
}

/// Safety alert creation form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertForm {
    pub title: String,
    pub description: String,
    pub severity: String,
    pub kind: String,
    pub affected_regions: Vec<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Form for AlertForm {
    fn rules() -> FormRules {
        FormRules::new()
            .filter("title", trim())
            .rule("title", required())
            .rule("title", min_length(5))
            .rule("title", max_length(120))
            .filter("description", trim())
            .rule("description", required())
            .rule("description", min_length(20))
            .rule("severity", required())
            .rule("severity", in_list(AlertSeverity::keywords()))
            .rule("kind", required())
            .rule("kind", in_list(AlertKind::keywords()))
            .filter("affected_regions", compact_list())
            .rule("affected_regions", non_empty_list())
    }
}
