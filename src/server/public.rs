//! Public listing handlers
//!
//! Every listing accepts the same query parameters (`page`, `limit`,
//! `search`, `filter`, `sort`) and returns one page of the derived list.

use super::state::AppState;
use crate::config::ListingConfig;
use crate::core::entity::Entity;
use crate::core::error::ExplorerError;
use crate::core::moderation::ModerationStatus;
use crate::core::query::{PaginatedResponse, QueryParams, SortSpec, derive, paginate};
use crate::entities::{ContentItem, Provider, SafetyAlert, Trek};
use crate::screens::{RouteDecision, resolve};
use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

/// Derive and paginate `items` according to the query parameters
pub(crate) fn listing<T: Entity>(
    items: &[T],
    params: &QueryParams,
    config: &ListingConfig,
    default_sort: SortSpec,
) -> Result<PaginatedResponse<T>, ExplorerError> {
    let filters = params
        .filter_state()
        .map_err(ExplorerError::InvalidRequest)?;
    let sort = params
        .sort_spec(default_sort)
        .map_err(ExplorerError::InvalidRequest)?;

    let visible = derive(items, &filters, &sort);
    Ok(paginate(
        &visible,
        params.page(),
        params.limit(config.page_size, config.max_page_size),
    ))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Published treks, best rated first
pub async fn list_treks(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PaginatedResponse<Trek>>, ExplorerError> {
    let treks: Vec<Trek> = state
        .call(state.treks.list())
        .await?
        .into_iter()
        .filter(Trek::is_public)
        .collect();
    listing(&treks, &params, &state.config.listing, SortSpec::desc("rating")).map(Json)
}

pub async fn get_trek(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Trek>, ExplorerError> {
    state
        .call(state.treks.get(&id))
        .await?
        .filter(Trek::is_public)
        .map(Json)
        .ok_or(ExplorerError::NotFound {
            entity_type: Trek::resource_name_singular().to_string(),
            id,
        })
}

/// Hotels and guides
pub async fn list_providers(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PaginatedResponse<Provider>>, ExplorerError> {
    let providers = state.call(state.providers.list()).await?;
    listing(&providers, &params, &state.config.listing, SortSpec::desc("rating")).map(Json)
}

/// Approved submissions, newest first
pub async fn list_stories(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PaginatedResponse<ContentItem>>, ExplorerError> {
    let stories = state
        .call(state.content.list_by("status", ModerationStatus::Approved.as_str()))
        .await?;
    listing(&stories, &params, &state.config.listing, SortSpec::desc("submitted_at")).map(Json)
}

/// Live alerts, most recent first
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PaginatedResponse<SafetyAlert>>, ExplorerError> {
    let now = Utc::now();
    let alerts: Vec<SafetyAlert> = state
        .call(state.alerts.list())
        .await?
        .into_iter()
        .filter(|alert| alert.is_live(now))
        .collect();
    listing(&alerts, &params, &state.config.listing, SortSpec::desc("issued_at")).map(Json)
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub path: String,
}

/// What navigating to a page path shows for the current session
pub async fn resolve_route(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> Json<RouteDecision> {
    let session = state.session();
    Json(resolve(&params.path, session.as_ref()))
}
