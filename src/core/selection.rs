//! Selection set used for bulk operations

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What happens to selected ids that leave the visible view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrunePolicy {
    /// Remove ids that are no longer visible after each re-derivation
    AutoPrune,

    /// Keep ids that are no longer visible; they are never acted on
    #[default]
    Inert,
}

/// Set of item ids currently checked for a bulk action.
///
/// Independent of filter and sort state. Bulk actions only ever consume
/// [`SelectionSet::actionable`], so ids outside the visible view have no
/// effect under either [`PrunePolicy`].
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<String>,
    policy: PrunePolicy,
}

impl SelectionSet {
    pub fn new(policy: PrunePolicy) -> Self {
        Self {
            ids: HashSet::new(),
            policy,
        }
    }

    pub fn policy(&self) -> PrunePolicy {
        self.policy
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Replace the selection with exactly the visible ids
    pub fn select_all<I, S>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = visible_ids.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in no particular order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Apply the prune policy after the visible view changed.
    ///
    /// Returns the number of ids removed.
    pub fn reconcile<'a, I>(&mut self, visible_ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.policy == PrunePolicy::Inert {
            return 0;
        }
        let visible: HashSet<&str> = visible_ids.into_iter().collect();
        let before = self.ids.len();
        self.ids.retain(|id| visible.contains(id.as_str()));
        before - self.ids.len()
    }

    /// The selected ids that are currently visible
    pub fn actionable<'a, I>(&self, visible_ids: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        visible_ids
            .into_iter()
            .filter(|id| self.ids.contains(*id))
            .map(str::to_string)
            .collect()
    }

    /// Whether every visible id is selected (and at least one is visible)
    pub fn covers<'a, I>(&self, visible_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut any = false;
        for id in visible_ids {
            if !self.ids.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }
}
