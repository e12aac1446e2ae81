//! Admin authentication
//!
//! Provides:
//! - Admin roles
//! - The `AuthService` boundary and an in-memory mock implementation
//! - Failed-attempt tracking with escalating (advisory) warnings
//! - The login flow tying validation, the service and the session together

use crate::core::error::{AuthError, ExplorerError};
use crate::core::session::{AdminSession, SessionStore};
use crate::core::task::with_timeout;
use crate::core::validation::{Form, FormRules, LoginForm};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Role of an admin console user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    ContentModerator,
    SafetyOfficer,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::ContentModerator => "content_moderator",
            AdminRole::SafetyOfficer => "safety_officer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "Super Admin",
            AdminRole::ContentModerator => "Content Moderator",
            AdminRole::SafetyOfficer => "Safety Officer",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(AdminRole::SuperAdmin),
            "content_moderator" => Ok(AdminRole::ContentModerator),
            "safety_officer" => Ok(AdminRole::SafetyOfficer),
            _ => Err(format!("invalid admin role: {}", s)),
        }
    }
}

/// Identity returned by a successful authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub email: String,
    pub name: String,
    pub role: AdminRole,
}

/// Authentication boundary
///
/// `Ok(None)` means the credentials did not match; `Err` is a service failure.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<AdminProfile>>;
}

/// One mock admin account
#[derive(Debug, Clone)]
pub struct MockCredential {
    pub email: String,
    pub password: String,
    pub profile: AdminProfile,
}

impl MockCredential {
    pub fn new(email: &str, password: &str, name: &str, role: AdminRole) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            profile: AdminProfile {
                email: email.to_string(),
                name: name.to_string(),
                role,
            },
        }
    }
}

/// In-memory credential check with a simulated network delay
#[derive(Debug, Clone)]
pub struct MockAuthService {
    credentials: Vec<MockCredential>,
    latency: Duration,
}

impl MockAuthService {
    pub fn new(credentials: Vec<MockCredential>) -> Self {
        Self {
            credentials,
            latency: Duration::ZERO,
        }
    }

    /// The seeded admin console accounts
    pub fn with_default_accounts() -> Self {
        Self::new(vec![
            MockCredential::new(
                "admin@nepaltrekexplorer.com",
                "Admin@123",
                "Aarav Sharma",
                AdminRole::SuperAdmin,
            ),
            MockCredential::new(
                "moderator@nepaltrekexplorer.com",
                "Moderator@123",
                "Sita Gurung",
                AdminRole::ContentModerator,
            ),
            MockCredential::new(
                "safety@nepaltrekexplorer.com",
                "Safety@123",
                "Pemba Sherpa",
                AdminRole::SafetyOfficer,
            ),
        ])
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<AdminProfile>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self
            .credentials
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email) && c.password == password)
            .map(|c| c.profile.clone()))
    }
}

/// Escalating warning shown after repeated failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptWarning {
    Caution,
    Severe,
}

impl AttemptWarning {
    pub fn message(&self) -> &'static str {
        match self {
            AttemptWarning::Caution => {
                "Multiple failed attempts detected. Please check your credentials."
            }
            AttemptWarning::Severe => {
                "Too many failed attempts. Contact your system administrator if you forgot your password."
            }
        }
    }
}

/// Failed login counter; warnings are cosmetic and never lock the account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempts {
    count: u32,
    warn_after: u32,
    severe_after: u32,
}

impl LoginAttempts {
    pub fn new(warn_after: u32, severe_after: u32) -> Self {
        Self {
            count: 0,
            warn_after,
            severe_after: severe_after.max(warn_after),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Warning for the current count
    pub fn warning(&self) -> Option<AttemptWarning> {
        if self.count >= self.severe_after {
            Some(AttemptWarning::Severe)
        } else if self.count >= self.warn_after {
            Some(AttemptWarning::Caution)
        } else {
            None
        }
    }

    /// Record one failure and return the resulting error
    pub fn record_failure(&mut self) -> AuthError {
        self.count = self.count.saturating_add(1);
        AuthError::InvalidCredentials {
            attempts: self.count,
            warning: self.warning(),
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl Default for LoginAttempts {
    fn default() -> Self {
        Self::new(3, 5)
    }
}

/// The admin login flow
pub struct LoginFlow {
    attempts: LoginAttempts,
    rules: FormRules,
    timeout: Duration,
}

impl LoginFlow {
    pub fn new(attempts: LoginAttempts, min_password: usize, timeout: Duration) -> Self {
        Self {
            attempts,
            rules: LoginForm::rules_with_min_password(min_password),
            timeout,
        }
    }

    pub fn attempts(&self) -> &LoginAttempts {
        &self.attempts
    }

    /// Validate, authenticate and persist the session.
    ///
    /// An invalid form never reaches the service and does not count as an attempt.
    pub async fn submit(
        &mut self,
        form: LoginForm,
        store: &dyn SessionStore,
        service: &dyn AuthService,
    ) -> Result<AdminSession, ExplorerError> {
        let form = form
            .validate_with(&self.rules)
            .map_err(ExplorerError::Validation)?;

        let profile = with_timeout(self.timeout, service.authenticate(&form.email, &form.password))
            .await??;

        match profile {
            Some(profile) => {
                self.attempts.reset();
                let session = AdminSession::from_profile(profile);
                session.persist(store, form.remember_me);
                tracing::info!(email = %session.email, role = %session.role, "admin logged in");
                Ok(session)
            }
            None => {
                let err = self.attempts.record_failure();
                tracing::warn!(
                    email = %form.email,
                    attempts = self.attempts.count(),
                    "admin login rejected"
                );
                Err(err.into())
            }
        }
    }
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new(
            LoginAttempts::default(),
            crate::core::validation::forms::DEFAULT_MIN_PASSWORD_LENGTH,
            Duration::from_secs(5),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{InMemorySessionStore, keys};

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [AdminRole::SuperAdmin, AdminRole::ContentModerator, AdminRole::SafetyOfficer] {
            assert_eq!(role.as_str().parse::<AdminRole>().unwrap(), role);
        }
        assert!("root".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_attempt_warnings_escalate() {
        let mut attempts = LoginAttempts::new(3, 5);
        let warnings: Vec<_> = (0..6)
            .map(|_| match attempts.record_failure() {
                AuthError::InvalidCredentials { warning, .. } => warning,
                other => panic!("unexpected error {:?}", other),
            })
            .collect();

        assert_eq!(
            warnings,
            vec![
                None,
                None,
                Some(AttemptWarning::Caution),
                Some(AttemptWarning::Caution),
                Some(AttemptWarning::Severe),
                Some(AttemptWarning::Severe),
            ]
        );
        attempts.reset();
        assert_eq!(attempts.warning(), None);
    }

    #[tokio::test]
    async fn test_mock_service_matches_case_insensitive_email() {
        let service = MockAuthService::with_default_accounts();
        let profile = service
            .authenticate("ADMIN@nepaltrekexplorer.com", "Admin@123")
            .await
            .expect("authenticate should succeed");
        assert_eq!(profile.map(|p| p.role), Some(AdminRole::SuperAdmin));

        let rejected = service
            .authenticate("admin@nepaltrekexplorer.com", "wrong")
            .await
            .expect("authenticate should succeed");
        assert!(rejected.is_none());
    }

    #[tokio::test]
    async fn test_login_flow_success_persists_session() {
        let store = InMemorySessionStore::new();
        let service = MockAuthService::with_default_accounts();
        let mut flow = LoginFlow::default();

        let session = flow
            .submit(
                LoginForm::new("moderator@nepaltrekexplorer.com", "Moderator@123").remember(true),
                &store,
                &service,
            )
            .await
            .expect("login should succeed");

        assert_eq!(session.role, AdminRole::ContentModerator);
        assert_eq!(store.get(keys::ADMIN_AUTH).as_deref(), Some("true"));
        assert_eq!(store.get(keys::REMEMBER_ME).as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_login_flow_invalid_form_is_not_an_attempt() {
        let store = InMemorySessionStore::new();
        let service = MockAuthService::with_default_accounts();
        let mut flow = LoginFlow::default();

        let err = flow
            .submit(LoginForm::new("nope", "x"), &store, &service)
            .await
            .unwrap_err();

        assert!(matches!(err, ExplorerError::Validation(ref fields) if fields.len() == 2));
        assert_eq!(flow.attempts().count(), 0);
        assert_eq!(store.get(keys::ADMIN_AUTH), None);
    }

    #[tokio::test]
    async fn test_login_flow_mismatch_counts_attempts() {
        let store = InMemorySessionStore::new();
        let service = MockAuthService::with_default_accounts();
        let mut flow = LoginFlow::default();

        for expected in 1..=3 {
            let err = flow
                .submit(
                    LoginForm::new("admin@nepaltrekexplorer.com", "wrong-password"),
                    &store,
                    &service,
                )
                .await
                .unwrap_err();
            match err {
                ExplorerError::Auth(AuthError::InvalidCredentials { attempts, .. }) => {
                    assert_eq!(attempts, expected)
                }
                other => panic!("unexpected error {:?}", other),
            }
        }
        assert_eq!(flow.attempts().warning(), Some(AttemptWarning::Caution));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_flow_times_out() {
        let store = InMemorySessionStore::new();
        let service =
            MockAuthService::with_default_accounts().with_latency(Duration::from_secs(10));
        let mut flow = LoginFlow::new(LoginAttempts::default(), 6, Duration::from_secs(2));

        let err = flow
            .submit(
                LoginForm::new("admin@nepaltrekexplorer.com", "Admin@123"),
                &store,
                &service,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExplorerError::Timeout(d) if d == Duration::from_secs(2)));
        assert_eq!(flow.attempts().count(), 0);
    }
}
