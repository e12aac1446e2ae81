//! Route table and middleware stack

use super::state::AppState;
use super::{admin, public};
use crate::core::error::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Public pages: listings, story feed, directory, alerts and route resolution
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health_check))
        .route("/healthz", get(public::health_check))
        .route("/api/treks", get(public::list_treks))
        .route("/api/treks/{id}", get(public::get_trek))
        .route("/api/providers", get(public::list_providers))
        .route("/api/stories", get(public::list_stories))
        .route("/api/alerts", get(public::list_alerts))
        .route("/api/routes/resolve", get(public::resolve_route))
}

/// Admin console: session, dashboard, management and moderation screens
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/session", get(admin::session))
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route("/api/admin/treks", get(admin::list_treks))
        .route("/api/admin/treks/bulk", post(admin::bulk_treks))
        .route("/api/admin/content", get(admin::list_content))
        .route("/api/admin/content/bulk", post(admin::bulk_content))
        .route(
            "/api/admin/content/{id}/moderate",
            post(admin::moderate_content),
        )
        .route(
            "/api/admin/alerts",
            get(admin::list_alerts).post(admin::create_alert),
        )
        .route("/api/admin/alerts/bulk", post(admin::bulk_alerts))
}

/// Assemble every route and wrap them in tracing, CORS and the panic boundary
pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
    let mut app = public_routes().merge(admin_routes()).with_state(state);
    for custom in custom_routes {
        app = app.merge(custom);
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

/// Render a handler panic as the JSON error every other failure uses
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(panic = %detail, "handler panicked");

    let body = ErrorResponse {
        code: "INTERNAL_ERROR".to_string(),
        message: "Internal server error".to_string(),
        details: None,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
