//! State holder for one listing or moderation screen

use crate::config::ListingConfig;
use crate::core::bulk::{BulkAction, BulkReport, BulkTarget, apply_bulk};
use crate::core::filter::{Facet, FilterState};
use crate::core::query::{Derivation, PaginatedResponse, PaginationMeta, SortSpec, paginate};
use crate::core::selection::SelectionSet;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// User intents dispatched upward by the presentational layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent<A> {
    SetSearch { search: String },
    SetFacet { field: String, facet: Facet },
    ClearFacet { field: String },
    ResetFilters,
    SetSort { sort: SortSpec },
    /// Sort by `field`, flipping the direction if it is already the sort field
    ToggleSort { field: String },
    SetPage { page: usize },
    Toggle { id: String },
    SelectAllVisible,
    ClearSelection,
    Bulk { action: A },
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row<T> {
    pub item: T,
    pub selected: bool,
}

/// What a screen renders: a page of rows or an explicit empty state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView<T> {
    Empty {
        message: String,
        /// Whether the empty state comes from active filters
        filtered: bool,
    },
    Page {
        rows: Vec<Row<T>>,
        pagination: PaginationMeta,
        /// Selected ids inside the visible view
        selected: usize,
        all_selected: bool,
        active_filters: usize,
    },
}

impl<T> ListView<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty { .. })
    }

    pub fn rows(&self) -> &[Row<T>] {
        match self {
            ListView::Empty { .. } => &[],
            ListView::Page { rows, .. } => rows,
        }
    }
}

/// Items plus the filter, sort, selection and page state of one screen.
///
/// Intents are applied in dispatch order. The derived list is memoized
/// for the lifetime of the screen and recomputed only when the filters, the
/// sort or the items change.
#[derive(Debug, Clone)]
pub struct ListScreen<T, A> {
    items: Vec<T>,
    filters: FilterState,
    sort: SortSpec,
    selection: SelectionSet,
    page: usize,
    page_size: usize,
    derivation: Derivation<T>,
    _actions: PhantomData<fn(A)>,
}

impl<T, A> ListScreen<T, A>
where
    T: BulkTarget<A>,
    A: BulkAction,
{
    pub fn new(items: Vec<T>, sort: SortSpec, config: &ListingConfig) -> Self {
        Self {
            items,
            filters: FilterState::default(),
            sort,
            selection: SelectionSet::new(config.prune_policy),
            page: 1,
            page_size: config.page_size.max(1),
            derivation: Derivation::new(),
            _actions: PhantomData,
        }
    }

    /// Start from an existing filter state instead of an unconstrained one
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self.derivation.invalidate();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the source collection, e.g. after a reload from the data service
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.derivation.invalidate();
        self.reconcile_selection();
    }

    /// The derived list in output order
    pub fn visible(&mut self) -> &[T] {
        self.derivation.get(&self.items, &self.filters, &self.sort)
    }

    pub fn visible_ids(&mut self) -> Vec<String> {
        self.visible().iter().map(|item| item.id().to_string()).collect()
    }

    /// Apply one intent. Returns a report when a bulk action ran.
    pub fn dispatch(&mut self, intent: Intent<A>) -> Option<BulkReport> {
        tracing::debug!(resource = T::resource_name(), intent = ?intent, "dispatch");

        match intent {
            Intent::SetSearch { search } => {
                self.set_filters(self.filters.clone().with_search(search));
            }
            Intent::SetFacet { field, facet } => {
                self.set_filters(self.filters.clone().with_facet(field, facet));
            }
            Intent::ClearFacet { field } => {
                self.set_filters(self.filters.clone().without_facet(&field));
            }
            Intent::ResetFilters => {
                self.set_filters(self.filters.clone().reset());
                self.selection.clear();
            }
            Intent::SetSort { sort } => {
                self.sort = sort;
                self.page = 1;
            }
            Intent::ToggleSort { field } => {
                self.sort = self.sort.toggled(&field);
                self.page = 1;
            }
            Intent::SetPage { page } => {
                self.page = page.max(1);
            }
            Intent::Toggle { id } => {
                self.selection.toggle(&id);
            }
            Intent::SelectAllVisible => {
                let visible = self.visible_ids();
                self.selection.select_all(visible);
            }
            Intent::ClearSelection => {
                self.selection.clear();
            }
            Intent::Bulk { action } => return self.apply(action),
        }
        None
    }

    /// Apply several intents in order, collecting bulk reports
    pub fn dispatch_all<I>(&mut self, intents: I) -> Vec<BulkReport>
    where
        I: IntoIterator<Item = Intent<A>>,
    {
        intents
            .into_iter()
            .filter_map(|intent| self.dispatch(intent))
            .collect()
    }

    fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.page = 1;
        self.reconcile_selection();
    }

    fn reconcile_selection(&mut self) {
        let visible = self.derivation.get(&self.items, &self.filters, &self.sort);
        let pruned = self.selection.reconcile(visible.iter().map(|item| item.id()));
        if pruned > 0 {
            tracing::debug!(resource = T::resource_name(), pruned, "pruned hidden selection");
        }
    }

    /// Run a bulk action over the visible part of the selection
    fn apply(&mut self, action: A) -> Option<BulkReport> {
        let visible = self.derivation.get(&self.items, &self.filters, &self.sort);
        let targets = self.selection.actionable(visible.iter().map(|item| item.id()));
        if targets.is_empty() {
            tracing::debug!(
                resource = T::resource_name(),
                action = action.keyword(),
                "bulk action ignored, nothing selected in view"
            );
            return None;
        }

        let outcome = apply_bulk(action, &targets, &self.items);
        let report = outcome.report(action.keyword());
        tracing::info!(
            resource = T::resource_name(),
            action = action.keyword(),
            changed = report.changed.len(),
            skipped = report.skipped.len(),
            external = report.external.is_some(),
            "bulk action applied"
        );

        if !outcome.changed.is_empty() {
            self.items = outcome.items;
            self.derivation.invalidate();
        }
        self.selection.clear();
        Some(report)
    }

    /// Render the current page, or the empty state when nothing is visible
    pub fn view(&mut self) -> ListView<T> {
        let active_filters = self.filters.active_count();
        let visible = self.derivation.get(&self.items, &self.filters, &self.sort);

        if visible.is_empty() {
            let message = if active_filters > 0 {
                format!("No {} match the current filters", T::resource_name())
            } else {
                format!("No {} yet", T::resource_name())
            };
            return ListView::Empty {
                message,
                filtered: active_filters > 0,
            };
        }

        let ids = || visible.iter().map(|item| item.id());
        let selected = self.selection.actionable(ids()).len();
        let all_selected = self.selection.covers(ids());

        let last_page = visible.len().div_ceil(self.page_size);
        let PaginatedResponse { data, pagination } =
            paginate(visible, self.page.min(last_page), self.page_size);
        let rows = data
            .into_iter()
            .map(|item| Row {
                selected: self.selection.is_selected(item.id()),
                item,
            })
            .collect();

        ListView::Page {
            rows,
            pagination,
            selected,
            all_selected,
            active_filters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::{ModerationAction, ModerationStatus};
    use crate::core::selection::PrunePolicy;
    use crate::entities::content::ContentItem;
    use crate::entities::seed;
    use crate::entities::trek::{Trek, TrekAction, TrekStatus};

    fn config(policy: PrunePolicy) -> ListingConfig {
        ListingConfig {
            page_size: 3,
            max_page_size: 10,
            prune_policy: policy,
        }
    }

    fn trek_screen(policy: PrunePolicy) -> ListScreen<Trek, TrekAction> {
        ListScreen::new(seed::treks(), SortSpec::asc("name"), &config(policy))
    }

    fn region(name: &str) -> Intent<TrekAction> {
        Intent::SetFacet {
            field: "region".to_string(),
            facet: Facet::any_of([name]),
        }
    }

    #[test]
    fn test_view_paginates_derived_list() {
        let mut screen = trek_screen(PrunePolicy::Inert);
        let ListView::Page { rows, pagination, .. } = screen.view() else {
            panic!("expected a page");
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(pagination.total, seed::treks().len());
        assert!(pagination.has_next);
        assert_eq!(rows[0].item.name, "Annapurna Circuit");
    }

    #[test]
    fn test_page_past_end_shows_last_page() {
        let mut screen = trek_screen(PrunePolicy::Inert);
        screen.dispatch(Intent::SetPage { page: 99 });
        let ListView::Page { pagination, rows, .. } = screen.view() else {
            panic!("expected a page");
        };
        assert!(!pagination.has_next);
        assert!(!rows.is_empty());
    }

    #[test]
    fn test_empty_state_when_filtered_out() {
        let mut screen = trek_screen(PrunePolicy::Inert);
        screen.dispatch(Intent::SetSearch {
            search: "no such trek anywhere".to_string(),
        });
        let view = screen.view();
        assert_eq!(
            view,
            ListView::Empty {
                message: "No treks match the current filters".to_string(),
                filtered: true,
            }
        );
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_empty_state_without_items() {
        let mut screen: ListScreen<Trek, TrekAction> =
            ListScreen::new(Vec::new(), SortSpec::asc("name"), &config(PrunePolicy::Inert));
        assert!(matches!(screen.view(), ListView::Empty { filtered: false, .. }));
    }

    #[test]
    fn test_select_all_then_bulk_only_touches_visible() {
        let mut screen = trek_screen(PrunePolicy::Inert);
        let reports = screen.dispatch_all([
            region("Khumbu"),
            Intent::SelectAllVisible,
            Intent::Bulk {
                action: TrekAction::Archive,
            },
        ]);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].changed.len(), 2);
        assert!(screen.selection().is_empty());
        for trek in screen.items() {
            let archived = trek.status == TrekStatus::Archived;
            assert_eq!(archived, trek.region == "Khumbu" || trek.id == "helambu");
        }
    }

    #[test]
    fn test_inert_hidden_selection_is_not_acted_on() {
        let mut screen = trek_screen(PrunePolicy::Inert);
        screen.dispatch(Intent::Toggle {
            id: "everest-base-camp".to_string(),
        });
        screen.dispatch(Intent::Toggle {
            id: "poon-hill".to_string(),
        });
        screen.dispatch(region("Annapurna"));
        assert_eq!(screen.selection().len(), 2);

        let report = screen
            .dispatch(Intent::Bulk {
                action: TrekAction::Feature,
            })
            .expect("poon-hill is visible");
        assert_eq!(report.changed, vec!["poon-hill".to_string()]);

        let everest = screen.items().iter().find(|t| t.id == "everest-base-camp").unwrap();
        assert_eq!(everest, &seed::treks()[0]);
    }

    #[test]
    fn test_auto_prune_drops_hidden_selection() {
        let mut screen = trek_screen(PrunePolicy::AutoPrune);
        screen.dispatch(Intent::Toggle {
            id: "everest-base-camp".to_string(),
        });
        screen.dispatch(region("Annapurna"));
        assert!(screen.selection().is_empty());
        assert!(
            screen
                .dispatch(Intent::Bulk {
                    action: TrekAction::Publish,
                })
                .is_none()
        );
    }

    #[test]
    fn test_reset_filters_clears_selection() {
        let mut screen = trek_screen(PrunePolicy::Inert);
        screen.dispatch_all([region("Khumbu"), Intent::SelectAllVisible, Intent::ResetFilters]);
        assert!(screen.selection().is_empty());
        assert!(screen.filters().is_unconstrained());
    }

    #[test]
    fn test_toggle_sort_flips_direction() {
        let mut screen = trek_screen(PrunePolicy::Inert);
        screen.dispatch(Intent::ToggleSort {
            field: "duration_days".to_string(),
        });
        let first = screen.visible()[0].duration_days;
        screen.dispatch(Intent::ToggleSort {
            field: "duration_days".to_string(),
        });
        let flipped = screen.visible()[0].duration_days;
        assert!(first < flipped);
    }

    #[test]
    fn test_export_leaves_items_untouched() {
        let mut screen = trek_screen(PrunePolicy::Inert);
        let reports = screen.dispatch_all([
            Intent::Toggle {
                id: "poon-hill".to_string(),
            },
            Intent::Bulk {
                action: TrekAction::Export,
            },
        ]);
        let external = reports[0].external.as_ref().expect("export request");
        assert_eq!(external.ids, vec!["poon-hill".to_string()]);
        assert_eq!(screen.items(), seed::treks().as_slice());
    }

    #[test]
    fn test_moderation_screen() {
        let mut screen: ListScreen<ContentItem, ModerationAction> =
            ListScreen::new(seed::content(), SortSpec::desc("submitted_at"), &config(PrunePolicy::Inert));
        screen.dispatch_all([
            Intent::SetFacet {
                field: "content_type".to_string(),
                facet: Facet::any_of(["photo"]),
            },
            Intent::SelectAllVisible,
            Intent::Bulk {
                action: ModerationAction::Approve,
            },
        ]);
        let approved = screen
            .items()
            .iter()
            .filter(|c| c.status == ModerationStatus::Approved)
            .count();
        assert_eq!(approved, 2);

        let ListView::Page { selected, all_selected, .. } = screen.view() else {
            panic!("expected a page");
        };
        assert_eq!(selected, 0);
        assert!(!all_selected);
    }
}
