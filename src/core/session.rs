//! Persisted admin session
//!
//! Session state lives in an injected string key/value store instead of
//! ambient global storage. The keys match the browser storage layout of the
//! admin console so existing sessions stay readable.

use crate::core::auth::{AdminProfile, AdminRole};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Storage keys
pub mod keys {
    pub const ADMIN_AUTH: &str = "adminAuth";
    pub const ADMIN_ROLE: &str = "adminRole";
    pub const ADMIN_EMAIL: &str = "adminEmail";
    pub const ADMIN_NAME: &str = "adminName";
    pub const REMEMBER_ME: &str = "rememberMe";
    pub const SESSION_EXPIRED: &str = "sessionExpired";
}

/// String key/value store carrying session state across page loads
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn clear(&self, key: &str);
}

/// A shared store, so the caller can keep a handle to it
impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) {
        (**self).clear(key)
    }
}

/// In-memory session store
///
/// Uses RwLock for thread-safe access; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());
    }

    fn clear(&self, key: &str) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.remove(key);
    }
}

/// The authenticated admin, as read from a [`SessionStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub email: String,
    pub name: String,
    pub role: AdminRole,
}

impl AdminSession {
    pub fn from_profile(profile: AdminProfile) -> Self {
        Self {
            email: profile.email,
            name: profile.name,
            role: profile.role,
        }
    }

    /// Read the session, if the store carries a complete authenticated one
    pub fn load(store: &dyn SessionStore) -> Option<Self> {
        if store.get(keys::ADMIN_AUTH).as_deref() != Some("true") {
            return None;
        }
        let role = store.get(keys::ADMIN_ROLE)?.parse().ok()?;
        Some(Self {
            email: store.get(keys::ADMIN_EMAIL)?,
            name: store.get(keys::ADMIN_NAME).unwrap_or_default(),
            role,
        })
    }

    /// Write the session; `remember` keeps the email for the next login form
    pub fn persist(&self, store: &dyn SessionStore, remember: bool) {
        store.set(keys::ADMIN_AUTH, "true");
        store.set(keys::ADMIN_ROLE, self.role.as_str());
        store.set(keys::ADMIN_EMAIL, &self.email);
        store.set(keys::ADMIN_NAME, &self.name);
        if remember {
            store.set(keys::REMEMBER_ME, "true");
        } else {
            store.clear(keys::REMEMBER_ME);
        }
        store.clear(keys::SESSION_EXPIRED);
    }

    /// Remove the session. The email survives when "remember me" was set.
    pub fn logout(store: &dyn SessionStore) {
        store.clear(keys::ADMIN_AUTH);
        store.clear(keys::ADMIN_ROLE);
        store.clear(keys::ADMIN_NAME);
        if store.get(keys::REMEMBER_ME).as_deref() != Some("true") {
            store.clear(keys::ADMIN_EMAIL);
        }
    }

    /// End the session because it expired; the next login page shows a notice once
    pub fn expire(store: &dyn SessionStore) {
        Self::logout(store);
        store.set(keys::SESSION_EXPIRED, "true");
    }
}

/// Consume the one-shot "session expired" flag
pub fn take_session_expired(store: &dyn SessionStore) -> bool {
    let expired = store.get(keys::SESSION_EXPIRED).as_deref() == Some("true");
    if expired {
        store.clear(keys::SESSION_EXPIRED);
    }
    expired
}

/// Email to pre-fill on the login form
pub fn remembered_email(store: &dyn SessionStore) -> Option<String> {
    if store.get(keys::REMEMBER_ME).as_deref() == Some("true") {
        store.get(keys::ADMIN_EMAIL)
    } else {
        None
    }
}
