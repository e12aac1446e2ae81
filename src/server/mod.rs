//! HTTP surface over the listing, moderation and admin-console engine
//!
//! This module provides a `ServerBuilder` that registers:
//! - Public listing routes (treks, providers, stories, alerts)
//! - Admin console routes (login, dashboard, bulk actions, moderation)
//! - Page route resolution for the client-side router

pub mod admin;
pub mod builder;
pub mod public;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use router::build_router;
pub use state::AppState;
