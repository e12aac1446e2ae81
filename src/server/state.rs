//! Application state shared across handlers

use crate::config::AppConfig;
use crate::core::auth::{AuthService, LoginFlow};
use crate::core::bulk::EffectSink;
use crate::core::error::{AuthError, ExplorerError};
use crate::core::service::DataService;
use crate::core::session::{AdminSession, SessionStore};
use crate::core::task::{UiScope, with_timeout};
use crate::entities::{ContentItem, Provider, SafetyAlert, Trek};
use crate::screens::Page;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub treks: Arc<dyn DataService<Trek>>,
    pub content: Arc<dyn DataService<ContentItem>>,
    pub alerts: Arc<dyn DataService<SafetyAlert>>,
    pub providers: Arc<dyn DataService<Provider>>,
    /// The one persisted session of this server (a single browser profile)
    pub sessions: Arc<dyn SessionStore>,
    pub auth: Arc<dyn AuthService>,
    pub effects: Arc<dyn EffectSink>,
    /// Attempt counter carried across login submissions
    pub login: Arc<Mutex<LoginFlow>>,
    /// Closed on shutdown so in-flight service completions are dropped
    pub scope: Arc<UiScope>,
}

impl AppState {
    /// Await a service call under the configured deadline and the server scope
    pub async fn call<F, T>(&self, future: F) -> Result<T, ExplorerError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        let deadline = self.config.services.timeout();
        Ok(self.scope.run(with_timeout(deadline, future)).await???)
    }

    pub fn session(&self) -> Option<AdminSession> {
        AdminSession::load(self.sessions.as_ref())
    }

    /// The active session, provided its role may open `page`
    pub fn require(&self, page: Page) -> Result<AdminSession, ExplorerError> {
        let session = self.session().ok_or(AuthError::Unauthenticated)?;
        if !page.allows(session.role) {
            tracing::warn!(
                email = %session.email,
                role = %session.role,
                page = page.path(),
                "admin page denied"
            );
            return Err(AuthError::Forbidden {
                role: session.role,
                resource: page.path().to_string(),
            }
            .into());
        }
        Ok(session)
    }
}
