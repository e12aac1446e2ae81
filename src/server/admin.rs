//! Admin console handlers
//!
//! Every handler except login and session lookup requires a persisted admin
//! session whose role may open the matching page.

use super::public::listing;
use super::state::AppState;
use crate::core::bulk::{BulkAction, BulkReport, BulkTarget};
use crate::core::entity::Entity;
use crate::core::error::ExplorerError;
use crate::core::filter::FilterState;
use crate::core::moderation::ModerationAction;
use crate::core::query::{PaginatedResponse, QueryParams, SortSpec};
use crate::core::service::{Change, DataService};
use crate::core::session::{AdminSession, remembered_email, take_session_expired};
use crate::core::validation::{AlertForm, LoginForm, ValidatedJson};
use crate::entities::{AlertAction, ContentItem, SafetyAlert, Trek, TrekAction};
use crate::screens::{DashboardSummary, Intent, ListScreen, Page};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session: AdminSession,
    pub redirect: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: Option<AdminSession>,
    /// Email to pre-fill when "remember me" was set
    pub remembered_email: Option<String>,
    /// Set once after a session expired, then cleared
    pub session_expired: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub redirect: String,
}

/// Bulk action over a selection, evaluated against the caller's current view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequest<A> {
    pub action: A,
    pub ids: Vec<String>,
    #[serde(default)]
    pub filter: FilterState,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateRequest {
    pub action: ModerationAction,
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>, ExplorerError> {
    let mut flow = state.login.lock().await;
    let session = flow
        .submit(form, state.sessions.as_ref(), state.auth.as_ref())
        .await?;

    Ok(Json(LoginResponse {
        session,
        redirect: Page::AdminDashboard.path().to_string(),
    }))
}

pub async fn logout(State(state): State<AppState>) -> Json<LogoutResponse> {
    if let Some(session) = state.session() {
        tracing::info!(email = %session.email, "admin logged out");
    }
    AdminSession::logout(state.sessions.as_ref());
    Json(LogoutResponse {
        redirect: Page::AdminLogin.path().to_string(),
    })
}

pub async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    let store = state.sessions.as_ref();
    Json(SessionResponse {
        session: AdminSession::load(store),
        remembered_email: remembered_email(store),
        session_expired: take_session_expired(store),
    })
}

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, ExplorerError> {
    state.require(Page::AdminDashboard)?;

    let (treks, content, alerts, providers) = futures::try_join!(
        state.call(state.treks.list()),
        state.call(state.content.list()),
        state.call(state.alerts.list()),
        state.call(state.providers.list()),
    )?;

    Ok(Json(DashboardSummary::compute(
        &treks,
        &content,
        &alerts,
        &providers,
        Utc::now(),
    )))
}

pub async fn list_treks(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PaginatedResponse<Trek>>, ExplorerError> {
    state.require(Page::TrekManagement)?;
    let treks = state.call(state.treks.list()).await?;
    listing(&treks, &params, &state.config.listing, SortSpec::desc("updated_at")).map(Json)
}

pub async fn bulk_treks(
    State(state): State<AppState>,
    Json(request): Json<BulkRequest<TrekAction>>,
) -> Result<Json<BulkReport>, ExplorerError> {
    state.require(Page::TrekManagement)?;
    run_bulk(&state, state.treks.as_ref(), SortSpec::desc("updated_at"), request)
        .await
        .map(Json)
}

pub async fn list_content(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PaginatedResponse<ContentItem>>, ExplorerError> {
    state.require(Page::ContentModeration)?;
    let content = state.call(state.content.list()).await?;
    listing(&content, &params, &state.config.listing, SortSpec::desc("submitted_at")).map(Json)
}

pub async fn bulk_content(
    State(state): State<AppState>,
    Json(request): Json<BulkRequest<ModerationAction>>,
) -> Result<Json<BulkReport>, ExplorerError> {
    state.require(Page::ContentModeration)?;
    run_bulk(&state, state.content.as_ref(), SortSpec::desc("submitted_at"), request)
        .await
        .map(Json)
}

/// Single-item moderation; leaving a terminal state is a conflict.
///
/// The transition is checked against the stored record under the service's
/// write lock, so of two racing decisions on one item only the first lands.
pub async fn moderate_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ModerateRequest>,
) -> Result<Json<ContentItem>, ExplorerError> {
    let session = state.require(Page::ContentModeration)?;
    let action = request.action;
    let change: Change<ContentItem> =
        Box::new(move |item: &ContentItem| -> anyhow::Result<Option<ContentItem>> {
            Ok(Some(item.moderated(action)?))
        });

    let stored = state
        .call(state.content.modify(&id, change))
        .await?
        .ok_or_else(|| ExplorerError::NotFound {
            entity_type: ContentItem::resource_name_singular().to_string(),
            id: id.clone(),
        })?;

    tracing::info!(
        id = %id,
        action = %action,
        moderator = %session.email,
        "content moderated"
    );
    Ok(Json(stored))
}

pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PaginatedResponse<SafetyAlert>>, ExplorerError> {
    state.require(Page::SafetyManagement)?;
    let alerts = state.call(state.alerts.list()).await?;
    listing(&alerts, &params, &state.config.listing, SortSpec::desc("issued_at")).map(Json)
}

pub async fn create_alert(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<AlertForm>,
) -> Result<(StatusCode, Json<SafetyAlert>), ExplorerError> {
    let session = state.require(Page::SafetyManagement)?;
    let alert = SafetyAlert::from_form(form)?;
    let created = state.call(state.alerts.create(alert)).await?;
    tracing::info!(
        id = %created.id,
        severity = %created.severity,
        issued_by = %session.email,
        "safety alert issued"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn bulk_alerts(
    State(state): State<AppState>,
    Json(request): Json<BulkRequest<AlertAction>>,
) -> Result<Json<BulkReport>, ExplorerError> {
    state.require(Page::SafetyManagement)?;
    run_bulk(&state, state.alerts.as_ref(), SortSpec::desc("issued_at"), request)
        .await
        .map(Json)
}

/// Replay the caller's view on a fresh screen, select the requested ids and
/// dispatch the action. Only ids visible in that view are acted on.
async fn run_bulk<T, A>(
    state: &AppState,
    service: &dyn DataService<T>,
    default_sort: SortSpec,
    request: BulkRequest<A>,
) -> Result<BulkReport, ExplorerError>
where
    T: BulkTarget<A>,
    A: BulkAction,
{
    let items = state.call(service.list()).await?;
    let sort = request.sort.unwrap_or(default_sort);
    let mut screen: ListScreen<T, A> =
        ListScreen::new(items, sort, &state.config.listing).with_filters(request.filter);

    let mut seen = HashSet::new();
    let mut intents: Vec<Intent<A>> = request
        .ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .map(|id| Intent::Toggle { id })
        .collect();
    intents.push(Intent::Bulk {
        action: request.action,
    });

    let Some(mut report) = screen.dispatch_all(intents).pop() else {
        return Ok(BulkReport {
            action: request.action.keyword().to_string(),
            changed: Vec::new(),
            skipped: Vec::new(),
            external: None,
        });
    };

    // The view was evaluated on a snapshot; each change is applied again to
    // the stored record, and one that no longer applies is skipped
    let action = request.action;
    for id in std::mem::take(&mut report.changed) {
        let change: Change<T> =
            Box::new(move |current: &T| -> anyhow::Result<Option<T>> {
                Ok(current.apply_action(action))
            });
        if state.call(service.modify(&id, change)).await?.is_some() {
            report.changed.push(id);
        } else {
            tracing::debug!(
                id = %id,
                action = action.keyword(),
                "stored record changed since the view was read"
            );
            report.skipped.push(id);
        }
    }
    if let Some(external) = &report.external {
        state.effects.dispatch(external.clone()).await?;
    }

    Ok(report)
}
