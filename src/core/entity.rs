//! Entity trait defining the core abstraction for every listed item

use crate::core::field::FieldValue;

/// Base trait for all items rendered in a list (treks, content submissions,
/// safety alerts, providers).
///
/// Items are identified by a string id and expose their fields dynamically so
/// that filters and sort specifications can address them by name.
/// Items are never mutated in place: changes produce a replacement record.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "treks", "alerts")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "trek", "alert")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this item
    fn id(&self) -> &str;

    /// Fields matched by free-text search
    fn searchable_fields() -> &'static [&'static str];

    /// Every field name addressable through [`Entity::field_value`]
    fn field_names() -> &'static [&'static str];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Case-insensitive substring match over the searchable fields.
    ///
    /// `needle` must already be lowercased.
    fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        Self::searchable_fields().iter().any(|field| {
            self.field_value(field).is_some_and(|value| {
                value
                    .categories()
                    .iter()
                    .any(|text| text.to_lowercase().contains(needle))
            })
        })
    }

    /// Check whether a field name is known to this item type
    fn has_field(field: &str) -> bool {
        field == "id" || Self::field_names().contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestItem {
        id: String,
        name: String,
        tags: Vec<String>,
    }

    impl Entity for TestItem {
        fn resource_name() -> &'static str {
            "test_items"
        }

        fn resource_name_singular() -> &'static str {
            "test_item"
        }

        fn id(&self) -> &str {
            &self.id
        }

        fn searchable_fields() -> &'static [&'static str] {
            &["name", "tags"]
        }

        fn field_names() -> &'static [&'static str] {
            &["name", "tags"]
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "id" => Some(FieldValue::String(self.id.clone())),
                "name" => Some(FieldValue::String(self.name.clone())),
                "tags" => Some(FieldValue::List(self.tags.clone())),
                _ => None,
            }
        }
    }

    fn item() -> TestItem {
        TestItem {
            id: "1".to_string(),
            name: "Everest Base Camp".to_string(),
            tags: vec!["Khumbu".to_string()],
        }
    }

    #[test]
    fn test_matches_search_case_insensitive() {
        let item = item();
        assert!(item.matches_search("everest"));
        assert!(item.matches_search("khumbu"));
        assert!(item.matches_search(""));
        assert!(!item.matches_search("annapurna"));
    }

    #[test]
    fn test_has_field() {
        assert!(TestItem::has_field("id"));
        assert!(TestItem::has_field("name"));
        assert!(!TestItem::has_field("duration"));
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(TestItem::resource_name(), "test_items");
        assert_eq!(TestItem::resource_name_singular(), "test_item");
    }
}
