//! User-submitted content awaiting moderation

use crate::core::bulk::BulkTarget;
use crate::core::error::ModerationError;
use crate::core::moderation::{ModerationAction, ModerationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Story,
    Review,
    Photo,
    Question,
}

crate::impl_field_enum!(ContentType {
    Story => "story",
    Review => "review",
    Photo => "photo",
    Question => "question",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content_type: ContentType,
    pub region: String,
    pub excerpt: String,
    pub status: ModerationStatus,
    /// Number of user reports against this submission
    pub reports: u32,
    pub likes: u32,
    pub submitted_at: DateTime<Utc>,
    pub moderated_at: Option<DateTime<Utc>>,
}

crate::impl_entity!(
    ContentItem, "content", "content",
    searchable: ["title", "author", "content_type", "excerpt"],
    fields: {
        "title" => title,
        "author" => author,
        "content_type" => content_type,
        "region" => region,
        "excerpt" => excerpt,
        "status" => status,
        "reports" => reports,
        "likes" => likes,
        "submitted_at" => submitted_at,
        "moderated_at" => moderated_at,
    }
);

impl ContentItem {
    /// Replacement record after a single moderation decision
    pub fn moderated(&self, action: ModerationAction) -> Result<Self, ModerationError> {
        let status = self.status.transition(action)?;
        Ok(ContentItem {
            status,
            moderated_at: Some(Utc::now()),
            ..self.clone()
        })
    }
}

/// Bulk moderation skips items that already left `pending`
impl BulkTarget<ModerationAction> for ContentItem {
    fn apply_action(&self, action: ModerationAction) -> Option<Self> {
        self.moderated(action).ok()
    }
}
