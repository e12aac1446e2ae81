//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_router;
use super::state::AppState;
use crate::config::AppConfig;
use crate::core::auth::{AuthService, LoginAttempts, LoginFlow, MockAuthService};
use crate::core::bulk::{EffectSink, LoggingEffectSink};
use crate::core::service::DataService;
use crate::core::session::{InMemorySessionStore, SessionStore};
use crate::core::task::UiScope;
use crate::entities::{ContentItem, Provider, SafetyAlert, Trek, seed};
use crate::storage::InMemoryDataService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Builder for the HTTP server
///
/// Every collaborator defaults to its in-memory implementation over the
/// seeded datasets, so `ServerBuilder::new(config).build()` is a complete app.
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new(AppConfig::default())
///     .with_effect_sink(MyExporter::new())
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    treks: Option<Arc<dyn DataService<Trek>>>,
    content: Option<Arc<dyn DataService<ContentItem>>>,
    alerts: Option<Arc<dyn DataService<SafetyAlert>>>,
    providers: Option<Arc<dyn DataService<Provider>>>,
    sessions: Option<Arc<dyn SessionStore>>,
    auth: Option<Arc<dyn AuthService>>,
    effects: Option<Arc<dyn EffectSink>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            treks: None,
            content: None,
            alerts: None,
            providers: None,
            sessions: None,
            auth: None,
            effects: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_treks(mut self, service: impl DataService<Trek> + 'static) -> Self {
        self.treks = Some(Arc::new(service));
        self
    }

    pub fn with_content(mut self, service: impl DataService<ContentItem> + 'static) -> Self {
        self.content = Some(Arc::new(service));
        self
    }

    pub fn with_alerts(mut self, service: impl DataService<SafetyAlert> + 'static) -> Self {
        self.alerts = Some(Arc::new(service));
        self
    }

    pub fn with_providers(mut self, service: impl DataService<Provider> + 'static) -> Self {
        self.providers = Some(Arc::new(service));
        self
    }

    /// Pass an `Arc` to keep a handle on the store (e.g. to inspect it in tests)
    pub fn with_session_store(mut self, store: impl SessionStore + 'static) -> Self {
        self.sessions = Some(Arc::new(store));
        self
    }

    pub fn with_auth_service(mut self, service: impl AuthService + 'static) -> Self {
        self.auth = Some(Arc::new(service));
        self
    }

    pub fn with_effect_sink(mut self, sink: impl EffectSink + 'static) -> Self {
        self.effects = Some(Arc::new(sink));
        self
    }

    /// Add routes outside the built-in table; they share the middleware stack
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared state, filling unset collaborators with defaults
    pub fn build_state(&mut self) -> AppState {
        let latency = self.config.services.simulated_latency();
        let attempts = LoginAttempts::new(self.config.auth.warn_after, self.config.auth.severe_after);
        let login = LoginFlow::new(
            attempts,
            self.config.auth.min_password_length,
            self.config.services.timeout(),
        );

        AppState {
            config: Arc::new(self.config.clone()),
            treks: self.treks.take().unwrap_or_else(|| {
                Arc::new(InMemoryDataService::seeded(seed::treks()).with_latency(latency))
            }),
            content: self.content.take().unwrap_or_else(|| {
                Arc::new(InMemoryDataService::seeded(seed::content()).with_latency(latency))
            }),
            alerts: self.alerts.take().unwrap_or_else(|| {
                Arc::new(InMemoryDataService::seeded(seed::alerts()).with_latency(latency))
            }),
            providers: self.providers.take().unwrap_or_else(|| {
                Arc::new(InMemoryDataService::seeded(seed::providers()).with_latency(latency))
            }),
            sessions: self
                .sessions
                .take()
                .unwrap_or_else(|| Arc::new(InMemorySessionStore::new())),
            auth: self.auth.take().unwrap_or_else(|| {
                Arc::new(MockAuthService::with_default_accounts().with_latency(latency))
            }),
            effects: self
                .effects
                .take()
                .unwrap_or_else(|| Arc::new(LoggingEffectSink)),
            login: Arc::new(Mutex::new(login)),
            scope: Arc::new(UiScope::new("server")),
        }
    }

    /// Build the final router
    pub fn build(mut self) -> Router {
        let state = self.build_state();
        build_router(state, std::mem::take(&mut self.custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(mut self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let state = self.build_state();
        let scope = state.scope.clone();
        let app = build_router(state, std::mem::take(&mut self.custom_routes));
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                scope.close();
            })
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
