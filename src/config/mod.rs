//! Configuration loading and management

use crate::core::selection::PrunePolicy;
use crate::core::validation::forms::DEFAULT_MIN_PASSWORD_LENGTH;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Environment variable holding the path of the YAML configuration file
pub const CONFIG_ENV: &str = "TREK_EXPLORER_CONFIG";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (e.g., "127.0.0.1:3000")
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(self.bind.parse()?)
    }
}

/// Listing screen settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Rows per page unless the request asks for another size
    pub page_size: usize,

    /// Upper bound for a requested page size
    pub max_page_size: usize,

    /// What happens to selected ids that leave the visible view
    pub prune_policy: PrunePolicy,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_page_size: 100,
            prune_policy: PrunePolicy::default(),
        }
    }
}

/// Admin login settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Failed attempts before the first warning
    pub warn_after: u32,

    /// Failed attempts before the stronger warning
    pub severe_after: u32,

    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            warn_after: 3,
            severe_after: 5,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

/// Data and authentication service boundary settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Deadline for one service call
    pub timeout_ms: u64,

    /// Latency added by the in-memory mock services
    pub simulated_latency_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            simulated_latency_ms: 0,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "trek_explorer=info,tower_http=info".to_string(),
        }
    }
}

/// Complete application configuration
///
/// Every section and field has a default, so an empty document is valid.
///
/// ```yaml
/// server:
///   bind: 0.0.0.0:8080
/// listing:
///   page_size: 12
///   prune_policy: auto_prune
/// auth:
///   warn_after: 3
///   severe_after: 5
/// services:
///   timeout_ms: 2000
///   simulated_latency_ms: 300
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub listing: ListingConfig,
    pub auth: AuthConfig,
    pub services: ServiceConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `TREK_EXPLORER_CONFIG`, or use defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject settings that cannot work together
    pub fn validate(&self) -> Result<()> {
        if self.listing.page_size == 0 {
            bail!("listing.page_size must be at least 1");
        }
        if self.listing.page_size > self.listing.max_page_size {
            bail!(
                "listing.page_size ({}) exceeds listing.max_page_size ({})",
                self.listing.page_size,
                self.listing.max_page_size
            );
        }
        if self.auth.warn_after == 0 || self.auth.warn_after >= self.auth.severe_after {
            bail!("auth.warn_after must be at least 1 and below auth.severe_after");
        }
        if self.services.timeout_ms == 0 {
            bail!("services.timeout_ms must be positive");
        }
        Ok(())
    }
}
