//! Filter state and facet predicates
//!
//! A [`FilterState`] is a plain record of active criteria. It is replaced
//! wholesale on every edit and every facet left at its default means
//! "no constraint on this field".

use crate::core::entity::Entity;
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Value that selects every category in a single-select control
pub const ALL: &str = "all";

/// One filterable dimension of a [`FilterState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    /// Categorical multi-select; empty or containing `"all"` is unconstrained
    AnyOf(BTreeSet<String>),

    /// Inclusive numeric range, either end may be open
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },

    /// Tri-state boolean; `None` is unconstrained
    Flag(Option<bool>),
}

impl Facet {
    /// Build a categorical facet from any list of values
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Facet::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Build an inclusive range facet
    pub fn range(min: impl Into<Option<f64>>, max: impl Into<Option<f64>>) -> Self {
        Facet::Range {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Whether this facet leaves its field unconstrained
    pub fn is_unconstrained(&self) -> bool {
        match self {
            Facet::AnyOf(values) => values.is_empty() || values.contains(ALL),
            Facet::Range { min, max } => min.is_none() && max.is_none(),
            Facet::Flag(flag) => flag.is_none(),
        }
    }

    /// Check a field value against this facet.
    ///
    /// A missing value only passes an unconstrained facet.
    pub fn matches(&self, value: Option<&FieldValue>) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };

        match self {
            Facet::AnyOf(allowed) => value
                .categories()
                .iter()
                .any(|category| allowed.contains(*category)),
            Facet::Range { min, max } => value.as_number().is_some_and(|n| {
                min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi)
            }),
            Facet::Flag(expected) => value.as_bool().is_some_and(|b| Some(b) == *expected),
        }
    }
}

/// Record of active filter criteria for one screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text search, matched case-insensitively against searchable fields
    pub search: String,

    /// Facets keyed by field name, in the order they were added
    pub facets: IndexMap<String, Facet>,
}

impl FilterState {
    /// Create an unconstrained filter state
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search text
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Replace (or add) one facet
    pub fn with_facet(mut self, field: impl Into<String>, facet: Facet) -> Self {
        self.facets.insert(field.into(), facet);
        self
    }

    /// Drop one facet, returning the field to unconstrained
    pub fn without_facet(mut self, field: &str) -> Self {
        self.facets.shift_remove(field);
        self
    }

    /// Unconstrained state, as after the screen's "reset filters" control
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Whether no criterion is active
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty() && self.facets.values().all(Facet::is_unconstrained)
    }

    /// Number of active (non-default) criteria
    pub fn active_count(&self) -> usize {
        let search = usize::from(!self.search.trim().is_empty());
        search + self.facets.values().filter(|f| !f.is_unconstrained()).count()
    }

    /// Check one item against every active criterion
    pub fn matches<T: Entity>(&self, item: &T) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !item.matches_search(&needle) {
            return false;
        }

        self.facets
            .iter()
            .filter(|(_, facet)| !facet.is_unconstrained())
            .all(|(field, facet)| facet.matches(item.field_value(field).as_ref()))
    }
}
