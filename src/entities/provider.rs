//! Hotels and guides listed in the provider directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Hotel,
    Guide,
}

crate::impl_field_enum!(ProviderKind {
    Hotel => "hotel",
    Guide => "guide",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub kind: ProviderKind,
    pub region: String,
    pub description: String,
    pub rating: f64,
    pub reviews: u32,
    /// Nightly rate for hotels, daily rate for guides
    pub price_usd: f64,
    pub verified: bool,
    pub languages: Vec<String>,
    pub joined_at: DateTime<Utc>,
}

crate::impl_entity!(
    Provider, "provider", "providers",
    searchable: ["name", "kind", "description"],
    fields: {
        "name" => name,
        "kind" => kind,
        "region" => region,
        "description" => description,
        "rating" => rating,
        "reviews" => reviews,
        "price_usd" => price_usd,
        "verified" => verified,
        "languages" => languages,
        "joined_at" => joined_at,
    }
);
