//! Core module containing the filter, sort, selection and bulk engine
//! together with the session, login and async boundaries it relies on

pub mod auth;
pub mod bulk;
pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod moderation;
pub mod query;
pub mod selection;
pub mod service;
pub mod session;
pub mod task;
pub mod validation;

pub use auth::{AdminProfile, AdminRole, AuthService, LoginAttempts, LoginFlow, MockAuthService};
pub use bulk::{
    BulkAction, BulkOutcome, BulkReport, BulkTarget, EffectSink, ExternalKind, ExternalRequest,
    LoggingEffectSink, apply_bulk,
};
pub use entity::Entity;
pub use error::{AuthError, ExplorerError, ModerationError};
pub use field::{FieldFormat, FieldValue, ToFieldValue, compare_values};
pub use filter::{Facet, FilterState};
pub use moderation::{ModerationAction, ModerationStatus};
pub use query::{Derivation, PaginatedResponse, PaginationMeta, QueryParams, SortDirection, SortSpec, derive, paginate};
pub use selection::{PrunePolicy, SelectionSet};
pub use service::DataService;
pub use session::{AdminSession, InMemorySessionStore, SessionStore};
pub use task::{UiScope, with_timeout};
