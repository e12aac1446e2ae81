//! Items rendered by the listing and moderation screens

#[macro_use]
pub mod macros;

pub mod alert;
pub mod content;
pub mod provider;
pub mod seed;
pub mod trek;

pub use alert::{AlertAction, AlertKind, AlertSeverity, AlertStatus, SafetyAlert};
pub use content::{ContentItem, ContentType};
pub use provider::{Provider, ProviderKind};
pub use trek::{Difficulty, Trek, TrekAction, TrekStatus};
