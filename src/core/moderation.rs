//! Moderation lifecycle of content submissions
//!
//! ```text
//! pending ──approve──▶ approved
//!    │ ──reject───▶ rejected
//!    └──flag─────▶ flagged
//! ```
//!
//! Every state other than `pending` is terminal.

use crate::core::bulk::BulkAction;
use crate::core::error::ModerationError;
use crate::core::field::{FieldValue, ToFieldValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a content submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Flagged,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Flagged => "flagged",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Actions offered to a moderator for an item in this state
    pub fn available_actions(&self) -> &'static [ModerationAction] {
        match self {
            Self::Pending => &[
                ModerationAction::Approve,
                ModerationAction::Reject,
                ModerationAction::Flag,
            ],
            _ => &[],
        }
    }

    /// Apply `action`, rejecting any move out of a terminal state
    pub fn transition(self, action: ModerationAction) -> Result<Self, ModerationError> {
        match self {
            Self::Pending => Ok(action.target()),
            from => Err(ModerationError::InvalidTransition {
                from,
                action,
            }),
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToFieldValue for ModerationStatus {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.as_str().to_string())
    }
}

impl FromStr for ModerationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "flagged" => Ok(Self::Flagged),
            _ => Err(format!("invalid moderation status: {}", s)),
        }
    }
}

/// Moderation actions, usable one at a time or in bulk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Flag,
}

impl ModerationAction {
    /// State reached from `pending`
    pub fn target(&self) -> ModerationStatus {
        match self {
            Self::Approve => ModerationStatus::Approved,
            Self::Reject => ModerationStatus::Rejected,
            Self::Flag => ModerationStatus::Flagged,
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl BulkAction for ModerationAction {
    fn keyword(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Flag => "flag",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        let pending = ModerationStatus::Pending;
        assert_eq!(pending.transition(ModerationAction::Approve), Ok(ModerationStatus::Approved));
        assert_eq!(pending.transition(ModerationAction::Reject), Ok(ModerationStatus::Rejected));
        assert_eq!(pending.transition(ModerationAction::Flag), Ok(ModerationStatus::Flagged));
    }

    #[test]
    fn test_terminal_states_reject_every_action() {
        for state in [
            ModerationStatus::Approved,
            ModerationStatus::Rejected,
            ModerationStatus::Flagged,
        ] {
            assert!(state.is_terminal());
            assert!(state.available_actions().is_empty());
            for action in [ModerationAction::Approve, ModerationAction::Reject, ModerationAction::Flag] {
                assert_eq!(
                    state.transition(action),
                    Err(ModerationError::InvalidTransition { from: state, action })
                );
            }
        }
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for state in ["pending", "approved", "rejected", "flagged"] {
            let parsed: ModerationStatus = state.parse().unwrap();
            assert_eq!(parsed.as_str(), state);
        }
        assert!("archived".parse::<ModerationStatus>().is_err());
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(ModerationStatus::default(), ModerationStatus::Pending);
        assert_eq!(ModerationStatus::Pending.available_actions().len(), 3);
    }
}
