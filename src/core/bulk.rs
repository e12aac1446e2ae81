//! Bulk action dispatcher
//!
//! Every screen defines a closed action enum. The item type maps each action
//! onto a replacement record through [`BulkTarget`]; actions that only signal
//! an external effect (export, delete) never touch the collection and are
//! handed to an [`EffectSink`] instead.

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Effect that leaves the in-memory collection untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalKind {
    Export,
    Delete,
}

impl fmt::Display for ExternalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalKind::Export => write!(f, "export"),
            ExternalKind::Delete => write!(f, "delete"),
        }
    }
}

/// Request handed to an external collaborator for export/delete actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRequest {
    pub kind: ExternalKind,
    pub resource: String,
    /// Target ids in collection order
    pub ids: Vec<String>,
}

/// A closed set of bulk actions offered by one screen
pub trait BulkAction: Copy + fmt::Debug + Send + Sync + 'static {
    /// Keyword used on the wire and in logs (e.g. "approve")
    fn keyword(&self) -> &'static str;

    /// `Some` when the action is delegated to an external collaborator
    fn external(&self) -> Option<ExternalKind> {
        None
    }
}

/// Item types that know how to apply a screen's bulk actions
pub trait BulkTarget<A: BulkAction>: Entity {
    /// Replacement record for `action`, or `None` when the item is unchanged
    fn apply_action(&self, action: A) -> Option<Self>;
}

/// Result of dispatching one bulk action
#[derive(Debug, Clone)]
pub struct BulkOutcome<T> {
    /// The new collection, same order as the input
    pub items: Vec<T>,
    /// Selected ids whose record was replaced
    pub changed: Vec<String>,
    /// Selected ids the action left unchanged
    pub skipped: Vec<String>,
    /// External effect to dispatch, if the action is not a state change
    pub external: Option<ExternalRequest>,
}

impl<T> BulkOutcome<T> {
    pub fn changed_count(&self) -> usize {
        self.changed.len()
    }
}

/// Summary of a bulk dispatch, returned to callers that do not need the items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReport {
    pub action: String,
    pub changed: Vec<String>,
    pub skipped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalRequest>,
}

impl<T> BulkOutcome<T> {
    pub fn report(&self, action: &str) -> BulkReport {
        BulkReport {
            action: action.to_string(),
            changed: self.changed.clone(),
            skipped: self.skipped.clone(),
            external: self.external.clone(),
        }
    }
}

/// Apply `action` to every item whose id is in `selection`.
///
/// Items outside the selection are passed through unchanged. The input slice
/// is never mutated.
pub fn apply_bulk<T, A>(action: A, selection: &HashSet<String>, items: &[T]) -> BulkOutcome<T>
where
    T: BulkTarget<A>,
    A: BulkAction,
{
    if let Some(kind) = action.external() {
        let ids: Vec<String> = items
            .iter()
            .filter(|item| selection.contains(item.id()))
            .map(|item| item.id().to_string())
            .collect();
        return BulkOutcome {
            items: items.to_vec(),
            changed: Vec::new(),
            skipped: Vec::new(),
            external: Some(ExternalRequest {
                kind,
                resource: T::resource_name().to_string(),
                ids,
            }),
        };
    }

    let mut changed = Vec::new();
    let mut skipped = Vec::new();
    let items = items
        .iter()
        .map(|item| {
            if !selection.contains(item.id()) {
                return item.clone();
            }
            match item.apply_action(action) {
                Some(replacement) => {
                    changed.push(item.id().to_string());
                    replacement
                }
                None => {
                    skipped.push(item.id().to_string());
                    item.clone()
                }
            }
        })
        .collect();

    BulkOutcome {
        items,
        changed,
        skipped,
        external: None,
    }
}

/// Collaborator receiving export/delete requests
#[async_trait]
pub trait EffectSink: Send + Sync {
    async fn dispatch(&self, request: ExternalRequest) -> Result<()>;
}

/// A shared sink, so the caller can keep a handle to it
#[async_trait]
impl<S: EffectSink + ?Sized> EffectSink for Arc<S> {
    async fn dispatch(&self, request: ExternalRequest) -> Result<()> {
        (**self).dispatch(request).await
    }
}

/// Effect sink that records the intent in the log and does nothing else
#[derive(Debug, Clone, Default)]
pub struct LoggingEffectSink;

#[async_trait]
impl EffectSink for LoggingEffectSink {
    async fn dispatch(&self, request: ExternalRequest) -> Result<()> {
        tracing::info!(
            kind = %request.kind,
            resource = %request.resource,
            count = request.ids.len(),
            ids = ?request.ids,
            "external bulk effect requested"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Lamp {
        id: String,
        on: bool,
    }

    #[derive(Debug, Clone, Copy)]
    enum LampAction {
        SwitchOn,
        Export,
    }

    impl BulkAction for LampAction {
        fn keyword(&self) -> &'static str {
            match self {
                LampAction::SwitchOn => "switch_on",
                LampAction::Export => "export",
            }
        }

        fn external(&self) -> Option<ExternalKind> {
            match self {
                LampAction::Export => Some(ExternalKind::Export),
                LampAction::SwitchOn => None,
            }
        }
    }

    impl Entity for Lamp {
        fn resource_name() -> &'static str {
            "lamps"
        }

        fn resource_name_singular() -> &'static str {
            "lamp"
        }

        fn id(&self) -> &str {
            &self.id
        }

        fn searchable_fields() -> &'static [&'static str] {
            &[]
        }

        fn field_names() -> &'static [&'static str] {
            &["on"]
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            (field == "on").then_some(FieldValue::Boolean(self.on))
        }
    }

    impl BulkTarget<LampAction> for Lamp {
        fn apply_action(&self, action: LampAction) -> Option<Self> {
            match action {
                LampAction::SwitchOn if !self.on => Some(Lamp {
                    on: true,
                    ..self.clone()
                }),
                _ => None,
            }
        }
    }

    fn lamps() -> Vec<Lamp> {
        vec![
            Lamp { id: "a".into(), on: false },
            Lamp { id: "b".into(), on: true },
            Lamp { id: "c".into(), on: false },
        ]
    }

    fn select(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_only_selected_items_change() {
        let items = lamps();
        let outcome = apply_bulk(LampAction::SwitchOn, &select(&["a", "b"]), &items);

        assert_eq!(outcome.changed, vec!["a".to_string()]);
        assert_eq!(outcome.skipped, vec!["b".to_string()]);
        assert!(outcome.items[0].on);
        assert_eq!(outcome.items[2], items[2]);
        assert!(!items[0].on, "source collection must not be mutated");
    }

    #[test]
    fn test_external_action_leaves_items_untouched() {
        let items = lamps();
        let outcome = apply_bulk(LampAction::Export, &select(&["c", "a"]), &items);

        assert_eq!(outcome.items, items);
        assert_eq!(outcome.changed_count(), 0);
        let request = outcome.external.expect("export should be external");
        assert_eq!(request.kind, ExternalKind::Export);
        assert_eq!(request.resource, "lamps");
        assert_eq!(request.ids, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_report_carries_action_keyword() {
        let outcome = apply_bulk(LampAction::SwitchOn, &select(&["c"]), &lamps());
        let report = outcome.report(LampAction::SwitchOn.keyword());
        assert_eq!(report.action, "switch_on");
        assert_eq!(report.changed, vec!["c".to_string()]);
    }

    #[tokio::test]
    async fn test_logging_sink_accepts_requests() {
        let sink = LoggingEffectSink;
        let result = sink
            .dispatch(ExternalRequest {
                kind: ExternalKind::Delete,
                resource: "lamps".into(),
                ids: vec!["a".into()],
            })
            .await;
        assert!(result.is_ok());
    }
}
