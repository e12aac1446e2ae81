//! Safety alerts issued by safety officers

use crate::core::bulk::{BulkAction, BulkTarget};
use crate::core::error::ExplorerError;
use crate::core::validation::AlertForm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

crate::impl_field_enum!(AlertSeverity {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Weather,
    Landslide,
    RouteClosure,
    Health,
    Security,
}

crate::impl_field_enum!(AlertKind {
    Weather => "weather",
    Landslide => "landslide",
    RouteClosure => "route_closure",
    Health => "health",
    Security => "security",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Active,
    Resolved,
    Archived,
}

crate::impl_field_enum!(AlertStatus {
    Active => "active",
    Resolved => "resolved",
    Archived => "archived",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAlert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub kind: AlertKind,
    pub affected_regions: Vec<String>,
    pub status: AlertStatus,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

crate::impl_entity!(
    SafetyAlert, "alert", "alerts",
    searchable: ["title", "kind", "description"],
    fields: {
        "title" => title,
        "description" => description,
        "severity" => severity,
        "kind" => kind,
        "affected_regions" => affected_regions,
        "status" => status,
        "issued_at" => issued_at,
        "expires_at" => expires_at,
    }
);

impl SafetyAlert {
    /// Build a new active alert from a validated creation form
    pub fn from_form(form: AlertForm) -> Result<Self, ExplorerError> {
        let severity = form
            .severity
            .parse::<AlertSeverity>()
            .map_err(ExplorerError::InvalidRequest)?;
        let kind = form
            .kind
            .parse::<AlertKind>()
            .map_err(ExplorerError::InvalidRequest)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: form.title,
            description: form.description,
            severity,
            kind,
            affected_regions: form.affected_regions,
            status: AlertStatus::Active,
            issued_at: Utc::now(),
            expires_at: form.expires_at,
        })
    }

    /// Active and not past its expiry at `now`
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == AlertStatus::Active && self.expires_at.is_none_or(|at| at > now)
    }
}

/// Bulk actions of the safety management screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertAction {
    Resolve,
    Archive,
    Reactivate,
}

impl BulkAction for AlertAction {
    fn keyword(&self) -> &'static str {
        match self {
            AlertAction::Resolve => "resolve",
            AlertAction::Archive => "archive",
            AlertAction::Reactivate => "reactivate",
        }
    }
}

impl BulkTarget<AlertAction> for SafetyAlert {
    fn apply_action(&self, action: AlertAction) -> Option<Self> {
        let status = match action {
            AlertAction::Resolve => AlertStatus::Resolved,
            AlertAction::Archive => AlertStatus::Archived,
            AlertAction::Reactivate => AlertStatus::Active,
        };
        (status != self.status).then(|| SafetyAlert {
            status,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn form() -> AlertForm {
        AlertForm {
            title: "Heavy snowfall on Thorong La".to_string(),
            description: "Pass closed until the snow settles, expect delays.".to_string(),
            severity: "critical".to_string(),
            kind: "route_closure".to_string(),
            affected_regions: vec!["Annapurna".to_string()],
            expires_at: None,
        }
    }

    #[test]
    fn test_from_form() {
        let alert = SafetyAlert::from_form(form()).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.kind, AlertKind::RouteClosure);
        assert_eq!(alert.status, AlertStatus::Active);
        assert!(Uuid::parse_str(&alert.id).is_ok());
    }

    #[test]
    fn test_from_form_rejects_unknown_kind() {
        let mut form = form();
        form.kind = "yeti".to_string();
        assert!(matches!(
            SafetyAlert::from_form(form),
            Err(ExplorerError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_is_live() {
        let now = Utc::now();
        let mut alert = SafetyAlert::from_form(form()).unwrap();
        assert!(alert.is_live(now));

        alert.expires_at = Some(now - Duration::hours(1));
        assert!(!alert.is_live(now));

        alert.expires_at = None;
        alert.status = AlertStatus::Resolved;
        assert!(!alert.is_live(now));
    }

    #[test]
    fn test_resolve_and_reactivate() {
        let alert = SafetyAlert::from_form(form()).unwrap();
        assert!(alert.apply_action(AlertAction::Reactivate).is_none());

        let resolved = alert.apply_action(AlertAction::Resolve).unwrap();
        assert_eq!(resolved.status, AlertStatus::Resolved);

        let active = resolved.apply_action(AlertAction::Reactivate).unwrap();
        assert_eq!(active.status, AlertStatus::Active);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(AlertSeverity::Critical > AlertSeverity::High);
        assert_eq!(AlertKind::keywords().len(), 5);
    }
}
