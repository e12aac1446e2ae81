//! Sort specifications, list derivation and pagination utilities

use crate::core::entity::Entity;
use crate::core::field::compare_values;
use crate::core::filter::FilterState;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// The opposite direction, used when a column header is clicked twice
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort field and direction
///
/// # Format
/// - `field:asc` or `field` (ascending)
/// - `field:desc` (descending)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Sort by `field`, flipping the direction when already sorted by it
    pub fn toggled(&self, field: &str) -> Self {
        if self.field == field {
            Self {
                field: self.field.clone(),
                direction: self.direction.flipped(),
            }
        } else {
            Self::asc(field)
        }
    }

    /// Compare two items by this specification.
    ///
    /// A field absent from either item compares `Equal`.
    pub fn compare<T: Entity>(&self, a: &T, b: &T) -> Ordering {
        let ordering = compare_values(
            a.field_value(&self.field).as_ref(),
            b.field_value(&self.field).as_ref(),
        );
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some((_, other)) => return Err(format!("invalid sort direction: {}", other)),
            None => (s, SortDirection::Asc),
        };
        if field.trim().is_empty() {
            return Err("sort field must not be empty".to_string());
        }
        Ok(Self {
            field: field.trim().to_string(),
            direction,
        })
    }
}

/// Produce the visible subset of `items` in output order.
///
/// Pure: the source slice is never mutated and a new collection is returned.
/// The sort is stable, so items with equal keys keep their input order in
/// either direction.
pub fn derive<T: Entity>(items: &[T], filters: &FilterState, sort: &SortSpec) -> Vec<T> {
    let mut visible: Vec<T> = items
        .iter()
        .filter(|item| filters.matches(*item))
        .cloned()
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Memoized derivation for the lifetime of one screen.
///
/// The cached result is reused while the filter and sort inputs are unchanged
/// and `items` is the same slice (same start and length) as last time. A
/// collection edited in place keeps that identity, so callers that replace
/// records without reallocating must call [`Derivation::invalidate`].
#[derive(Debug, Clone)]
pub struct Derivation<T> {
    cached: Option<Cached<T>>,
}

#[derive(Debug, Clone)]
struct Cached<T> {
    source: (usize, usize),
    filters: FilterState,
    sort: SortSpec,
    visible: Vec<T>,
}

fn source_key<T>(items: &[T]) -> (usize, usize) {
    (items.as_ptr() as usize, items.len())
}

impl<T: Entity> Derivation<T> {
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// Return the derived list, recomputing only when inputs changed
    pub fn get(&mut self, items: &[T], filters: &FilterState, sort: &SortSpec) -> &[T] {
        let source = source_key(items);
        let fresh = self.cached.as_ref().is_some_and(|cached| {
            cached.source == source && &cached.filters == filters && &cached.sort == sort
        });
        if !fresh {
            tracing::debug!(
                resource = T::resource_name(),
                total = items.len(),
                sort = %sort,
                "deriving visible list"
            );
            self.cached = Some(Cached {
                source,
                filters: filters.clone(),
                sort: sort.clone(),
                visible: derive(items, filters, sort),
            });
        }
        match &self.cached {
            Some(cached) => &cached.visible,
            None => &[],
        }
    }

    /// Drop the cached result after the source collection changed
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl<T: Entity> Default for Derivation<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters for pagination, search, filtering and sorting
///
/// # Example
/// ```text
/// GET /api/treks?page=2&limit=10
/// GET /api/treks?search=everest&sort=duration_days:desc
/// GET /api/treks?filter={"facets":{"difficulty":{"any_of":["Hard"]}}}
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of items per page, the screen's page size when absent
    pub limit: Option<usize>,

    /// Free-text search, merged into the filter state
    pub search: Option<String>,

    /// Filter state as a JSON object
    pub filter: Option<String>,

    /// Sort field and direction (`field:asc` / `field:desc`)
    pub sort: Option<String>,
}

fn default_page() -> usize {
    1
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, falling back to `default` and clamped between 1 and `max`
    pub fn limit(&self, default: usize, max: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, max.max(1))
    }

    /// Parse the filter JSON and merge the `search` parameter into it
    pub fn filter_state(&self) -> Result<FilterState, String> {
        let mut filters = match &self.filter {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<FilterState>(raw)
                .map_err(|e| format!("invalid filter: {}", e))?,
            _ => FilterState::default(),
        };
        if let Some(search) = &self.search {
            filters.search = search.clone();
        }
        Ok(filters)
    }

    /// Parse the sort parameter, falling back to `default` when absent
    pub fn sort_spec(&self, default: SortSpec) -> Result<SortSpec, String> {
        match &self.sort {
            Some(raw) if !raw.trim().is_empty() => raw.parse(),
            _ => Ok(default),
        }
    }
}

/// Paginated response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1) * limit;

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start + limit < total,
            has_prev: page > 1,
        }
    }
}

/// Slice one page out of a derived list
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> PaginatedResponse<T> {
    let pagination = PaginationMeta::new(page, limit, items.len());
    let start = ((pagination.page - 1) * pagination.limit).min(items.len());
    let end = (start + pagination.limit).min(items.len());

    PaginatedResponse {
        data: items[start..end].to_vec(),
        pagination,
    }
}
