//! Admin dashboard summary

use crate::core::moderation::ModerationStatus;
use crate::entities::{
    AlertSeverity, ContentItem, Provider, ProviderKind, SafetyAlert, Trek, TrekStatus,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrekCounts {
    pub total: usize,
    pub published: usize,
    pub draft: usize,
    pub archived: usize,
    pub featured: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub flagged: usize,
    /// Pending submissions with at least one user report
    pub reported: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCounts {
    pub live: usize,
    /// Live alerts per severity, most severe first
    pub by_severity: IndexMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCounts {
    pub hotels: usize,
    pub guides: usize,
    pub verified: usize,
}

/// Counters shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub treks: TrekCounts,
    pub moderation: ModerationCounts,
    pub alerts: AlertCounts,
    pub providers: ProviderCounts,
}

impl DashboardSummary {
    pub fn compute(
        treks: &[Trek],
        content: &[ContentItem],
        alerts: &[SafetyAlert],
        providers: &[Provider],
        now: DateTime<Utc>,
    ) -> Self {
        let mut summary = Self::default();

        for trek in treks {
            summary.treks.total += 1;
            match trek.status {
                TrekStatus::Published => summary.treks.published += 1,
                TrekStatus::Draft => summary.treks.draft += 1,
                TrekStatus::Archived => summary.treks.archived += 1,
            }
            if trek.featured {
                summary.treks.featured += 1;
            }
        }

        for item in content {
            summary.moderation.total += 1;
            match item.status {
                ModerationStatus::Pending => {
                    summary.moderation.pending += 1;
                    if item.reports > 0 {
                        summary.moderation.reported += 1;
                    }
                }
                ModerationStatus::Approved => summary.moderation.approved += 1,
                ModerationStatus::Rejected => summary.moderation.rejected += 1,
                ModerationStatus::Flagged => summary.moderation.flagged += 1,
            }
        }

        let severities = [
            AlertSeverity::Critical,
            AlertSeverity::High,
            AlertSeverity::Medium,
            AlertSeverity::Low,
        ];
        summary.alerts.by_severity = severities
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for alert in alerts.iter().filter(|a| a.is_live(now)) {
            summary.alerts.live += 1;
            *summary
                .alerts
                .by_severity
                .entry(alert.severity.as_str().to_string())
                .or_default() += 1;
        }

        for provider in providers {
            match provider.kind {
                ProviderKind::Hotel => summary.providers.hotels += 1,
                ProviderKind::Guide => summary.providers.guides += 1,
            }
            if provider.verified {
                summary.providers.verified += 1;
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::seed;

    #[test]
    fn test_summary_of_seed_data() {
        let summary = DashboardSummary::compute(
            &seed::treks(),
            &seed::content(),
            &seed::alerts(),
            &seed::providers(),
            Utc::now(),
        );

        assert_eq!(summary.treks.total, 10);
        assert_eq!(summary.treks.published, 7);
        assert_eq!(summary.treks.draft, 2);
        assert_eq!(summary.treks.archived, 1);
        assert_eq!(summary.treks.featured, 3);

        assert_eq!(summary.moderation.pending, 8);
        assert_eq!(summary.moderation.reported, 3);

        assert_eq!(summary.alerts.live, 3);
        assert_eq!(summary.alerts.by_severity.get("critical"), Some(&1));
        assert_eq!(summary.alerts.by_severity.get("medium"), Some(&0));
        assert_eq!(
            summary.alerts.by_severity.keys().next().map(String::as_str),
            Some("critical")
        );

        assert_eq!(summary.providers.hotels, 3);
        assert_eq!(summary.providers.guides, 3);
        assert_eq!(summary.providers.verified, 4);
    }

    #[test]
    fn test_empty_collections() {
        let summary = DashboardSummary::compute(&[], &[], &[], &[], Utc::now());
        assert_eq!(summary.treks, TrekCounts::default());
        assert_eq!(summary.alerts.live, 0);
        assert_eq!(summary.alerts.by_severity.len(), 4);
    }
}
