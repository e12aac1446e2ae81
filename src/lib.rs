//! # Trek Explorer
//!
//! The listing, moderation and admin-console engine behind the Nepal Trek
//! Explorer platform.
//!
//! ## Features
//!
//! - **Derivation Engine**: Pure filter + stable sort over any item collection
//! - **Typed Facets**: Multi-select, inclusive ranges and tri-state flags
//! - **Selection Sets**: Hash-backed, with a configurable policy for hidden ids
//! - **Bulk Actions**: Closed action enums per screen, export/delete as external effects
//! - **Moderation**: A state machine that keeps terminal states terminal
//! - **Admin Sessions**: Injected key/value session store and login flow with attempt warnings
//! - **Async Boundary**: Service traits with timeouts and scope-bound cancellation
//! - **REST Surface**: Axum routes for listings, moderation, alerts and the dashboard
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trek_explorer::prelude::*;
//!
//! let treks = seed::treks();
//! let filters = FilterState::new()
//!     .with_search("base camp")
//!     .with_facet("difficulty", Facet::any_of(["Hard"]));
//!
//! let visible = derive(&treks, &filters, &SortSpec::desc("duration_days"));
//!
//! let mut selection = SelectionSet::new(PrunePolicy::Inert);
//! selection.select_all(visible.iter().map(|t| t.id.clone()));
//!
//! let targets = selection.actionable(visible.iter().map(|t| t.id.as_str()));
//! let outcome = apply_bulk(TrekAction::Feature, &targets, &treks);
//! println!("{} treks featured", outcome.changed_count());
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod screens;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Engine ===
    pub use crate::core::{
        bulk::{
            BulkAction, BulkOutcome, BulkReport, BulkTarget, EffectSink, ExternalKind,
            ExternalRequest, LoggingEffectSink, apply_bulk,
        },
        entity::Entity,
        field::{FieldValue, ToFieldValue, compare_values},
        filter::{ALL, Facet, FilterState},
        moderation::{ModerationAction, ModerationStatus},
        query::{
            Derivation, PaginatedResponse, PaginationMeta, QueryParams, SortDirection, SortSpec,
            derive, paginate,
        },
        selection::{PrunePolicy, SelectionSet},
        service::DataService,
    };

    // === Session, login and async boundary ===
    pub use crate::core::{
        auth::{
            AdminProfile, AdminRole, AttemptWarning, AuthService, LoginAttempts, LoginFlow,
            MockAuthService, MockCredential,
        },
        error::{AuthError, ExplorerError, ModerationError},
        session::{AdminSession, InMemorySessionStore, SessionStore},
        task::{UiScope, with_timeout},
        validation::{AlertForm, FieldErrors, Form, FormRules, LoginForm, ValidatedJson},
    };

    // === Items ===
    pub use crate::entities::{
        AlertAction, AlertKind, AlertSeverity, AlertStatus, ContentItem, ContentType, Difficulty,
        Provider, ProviderKind, SafetyAlert, Trek, TrekAction, TrekStatus, seed,
    };

    // === Macros ===
    pub use crate::{impl_entity, impl_field_enum};

    // === Screens ===
    pub use crate::screens::{DashboardSummary, Intent, ListScreen, ListView, Page, RouteDecision};

    // === Configuration ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
