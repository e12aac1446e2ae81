//! Trek listings and the trek management screen's bulk actions

use crate::core::bulk::{BulkAction, BulkTarget, ExternalKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
    Hard,
}

crate::impl_field_enum!(Difficulty {
    Easy => "Easy",
    Moderate => "Moderate",
    Challenging => "Challenging",
    Hard => "Hard",
});

/// Publication state of a trek listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrekStatus {
    Published,
    #[default]
    Draft,
    Archived,
}

crate::impl_field_enum!(TrekStatus {
    Published => "published",
    Draft => "draft",
    Archived => "archived",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trek {
    pub id: String,
    pub name: String,
    pub region: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub duration_days: u32,
    pub max_altitude_m: u32,
    pub rating: f64,
    pub reviews: u32,
    pub price_usd: f64,
    pub permit_required: bool,
    pub featured: bool,
    pub status: TrekStatus,
    pub best_seasons: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(
    Trek, "trek", "treks",
    searchable: ["name", "region", "description"],
    fields: {
        "name" => name,
        "region" => region,
        "difficulty" => difficulty,
        "description" => description,
        "duration_days" => duration_days,
        "max_altitude_m" => max_altitude_m,
        "rating" => rating,
        "reviews" => reviews,
        "price_usd" => price_usd,
        "permit_required" => permit_required,
        "featured" => featured,
        "status" => status,
        "best_seasons" => best_seasons,
        "created_at" => created_at,
        "updated_at" => updated_at,
    }
);

/// Bulk actions of the trek management screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrekAction {
    Publish,
    Draft,
    Archive,
    Feature,
    Unfeature,
    Export,
    Delete,
}

impl BulkAction for TrekAction {
    fn keyword(&self) -> &'static str {
        match self {
            TrekAction::Publish => "publish",
            TrekAction::Draft => "draft",
            TrekAction::Archive => "archive",
            TrekAction::Feature => "feature",
            TrekAction::Unfeature => "unfeature",
            TrekAction::Export => "export",
            TrekAction::Delete => "delete",
        }
    }

    fn external(&self) -> Option<ExternalKind> {
        match self {
            TrekAction::Export => Some(ExternalKind::Export),
            TrekAction::Delete => Some(ExternalKind::Delete),
            _ => None,
        }
    }
}

impl BulkTarget<TrekAction> for Trek {
    fn apply_action(&self, action: TrekAction) -> Option<Self> {
        let (status, featured) = match action {
            TrekAction::Publish => (TrekStatus::Published, self.featured),
            TrekAction::Draft => (TrekStatus::Draft, self.featured),
            TrekAction::Archive => (TrekStatus::Archived, false),
            TrekAction::Feature => (self.status, true),
            TrekAction::Unfeature => (self.status, false),
            TrekAction::Export | TrekAction::Delete => return None,
        };
        if status == self.status && featured == self.featured {
            return None;
        }
        Some(Trek {
            status,
            featured,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }
}

impl Trek {
    /// Whether the trek is shown on the public listing
    pub fn is_public(&self) -> bool {
        self.status == TrekStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::field::FieldValue;
    use crate::entities::seed;

    fn trek() -> Trek {
        seed::treks()
            .into_iter()
            .find(|t| t.id == "everest-base-camp")
            .expect("seeded trek")
    }

    #[test]
    fn test_field_values() {
        let trek = trek();
        assert_eq!(trek.field_value("difficulty"), Some(FieldValue::String("Hard".into())));
        assert_eq!(trek.field_value("duration_days"), Some(FieldValue::Integer(14)));
        assert_eq!(trek.field_value("id"), Some(FieldValue::String("everest-base-camp".into())));
        assert_eq!(trek.field_value("unknown"), None);
        assert!(Trek::has_field("price_usd"));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Published".parse::<TrekStatus>(), Ok(TrekStatus::Published));
        assert!("easyish".parse::<Difficulty>().is_err());
        assert_eq!(TrekStatus::keywords(), vec!["published", "draft", "archived"]);
    }

    #[test]
    fn test_publish_and_feature() {
        let mut draft = trek();
        draft.status = TrekStatus::Draft;
        draft.featured = false;

        let published = draft.apply_action(TrekAction::Publish).expect("should change");
        assert_eq!(published.status, TrekStatus::Published);
        assert!(published.apply_action(TrekAction::Publish).is_none());

        let featured = published.apply_action(TrekAction::Feature).expect("should change");
        assert!(featured.featured);
        assert_eq!(featured.status, TrekStatus::Published);
    }

    #[test]
    fn test_archive_unfeatures() {
        let mut trek = trek();
        trek.featured = true;
        let archived = trek.apply_action(TrekAction::Archive).expect("should change");
        assert_eq!(archived.status, TrekStatus::Archived);
        assert!(!archived.featured);
    }

    #[test]
    fn test_export_and_delete_are_external() {
        let trek = trek();
        assert!(trek.apply_action(TrekAction::Export).is_none());
        assert_eq!(TrekAction::Delete.external(), Some(ExternalKind::Delete));
        assert_eq!(TrekAction::Feature.external(), None);
    }
}
