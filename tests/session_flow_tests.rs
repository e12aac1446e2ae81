//! Integration tests for the admin login flow, persisted sessions and
//! scope-bound async work

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use trek_explorer::core::session::{keys, remembered_email, take_session_expired};
use trek_explorer::prelude::*;

/// Auth service that never answers before the flow gives up
struct StalledAuthService;

#[async_trait]
impl AuthService for StalledAuthService {
    async fn authenticate(
        &self,
        _email: &str,
        _password: &str,
    ) -> anyhow::Result<Option<AdminProfile>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }
}

fn flow() -> LoginFlow {
    LoginFlow::new(LoginAttempts::new(3, 5), 6, Duration::from_secs(5))
}

fn failure(err: ExplorerError) -> (u32, Option<AttemptWarning>) {
    match err {
        ExplorerError::Auth(AuthError::InvalidCredentials { attempts, warning }) => {
            (attempts, warning)
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_attempts_escalate_warnings() {
    let store = InMemorySessionStore::new();
    let service = MockAuthService::with_default_accounts();
    let mut flow = flow();

    let mut seen = Vec::new();
    for _ in 0..5 {
        let err = assert_err!(
            flow.submit(
                LoginForm::new("safety@nepaltrekexplorer.com", "Wrong@123"),
                &store,
                &service,
            )
            .await
        );
        seen.push(failure(err));
    }

    assert_eq!(
        seen,
        vec![
            (1, None),
            (2, None),
            (3, Some(AttemptWarning::Caution)),
            (4, Some(AttemptWarning::Caution)),
            (5, Some(AttemptWarning::Severe)),
        ]
    );
    assert_eq!(AdminSession::load(&store), None);

    // Warnings never lock the account
    let session = assert_ok!(
        flow.submit(
            LoginForm::new("safety@nepaltrekexplorer.com", "Safety@123"),
            &store,
            &service,
        )
        .await
    );
    assert_eq!(session.role, AdminRole::SafetyOfficer);
    assert_eq!(session.name, "Pemba Sherpa");
    assert_eq!(flow.attempts().count(), 0);
}

#[tokio::test]
async fn test_session_survives_reload_until_logout() {
    let store = InMemorySessionStore::new();
    let service = MockAuthService::with_default_accounts();

    let session = assert_ok!(
        flow()
            .submit(
                LoginForm::new("admin@nepaltrekexplorer.com", "Admin@123"),
                &store,
                &service,
            )
            .await
    );
    assert_eq!(session.role, AdminRole::SuperAdmin);

    // A second reader of the same store sees the same session
    let shared = store.clone();
    assert_eq!(AdminSession::load(&shared), Some(session));
    assert_eq!(remembered_email(&shared), None);

    AdminSession::logout(&store);
    assert_eq!(AdminSession::load(&store), None);
    assert_eq!(store.get(keys::ADMIN_EMAIL), None);
}

#[tokio::test]
async fn test_remember_me_keeps_email_after_logout() {
    let store = InMemorySessionStore::new();
    let service = MockAuthService::with_default_accounts();

    assert_ok!(
        flow()
            .submit(
                LoginForm::new("moderator@nepaltrekexplorer.com", "Moderator@123").remember(true),
                &store,
                &service,
            )
            .await
    );
    AdminSession::logout(&store);

    assert_eq!(AdminSession::load(&store), None);
    assert_eq!(
        remembered_email(&store).as_deref(),
        Some("moderator@nepaltrekexplorer.com")
    );
}

#[test]
fn test_expired_notice_shows_once() {
    let store = InMemorySessionStore::new();
    let session = AdminSession {
        email: "admin@nepaltrekexplorer.com".to_string(),
        name: "Aarav Sharma".to_string(),
        role: AdminRole::SuperAdmin,
    };
    session.persist(&store, false);

    AdminSession::expire(&store);

    assert_eq!(AdminSession::load(&store), None);
    assert!(take_session_expired(&store));
    assert!(!take_session_expired(&store));
}

#[tokio::test]
async fn test_invalid_form_reports_field_messages() {
    let store = InMemorySessionStore::new();
    let service = MockAuthService::with_default_accounts();
    let mut flow = flow();

    let err = assert_err!(
        flow.submit(LoginForm::new("", "12345"), &store, &service)
            .await
    );

    match err {
        ExplorerError::Validation(fields) => {
            assert_eq!(fields.get("email"), Some("Email is required"));
            assert_eq!(
                fields.get("password"),
                Some("Password must be at least 6 characters")
            );
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(flow.attempts().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_service_times_out() {
    let store = InMemorySessionStore::new();
    let mut flow = flow();

    let err = assert_err!(
        flow.submit(
            LoginForm::new("admin@nepaltrekexplorer.com", "Admin@123"),
            &store,
            &StalledAuthService,
        )
        .await
    );

    assert!(matches!(err, ExplorerError::Timeout(limit) if limit == Duration::from_secs(5)));
    assert_eq!(flow.attempts().count(), 0);
    assert_eq!(AdminSession::load(&store), None);
}

#[tokio::test(start_paused = true)]
async fn test_closed_screen_discards_late_completion() {
    let screen = UiScope::new("content-moderation");
    let service = InMemoryDataService::seeded(seed::content()).with_latency(Duration::from_secs(2));
    let applied = Arc::new(AtomicBool::new(false));
    let flag = applied.clone();

    let handle = screen.spawn(
        async move { service.list().await },
        move |_items| flag.store(true, Ordering::SeqCst),
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
    screen.close();

    let was_applied = assert_ok!(handle.await);
    assert!(!was_applied);
    assert!(!applied.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_child_scope_closes_with_parent() {
    let server = UiScope::new("server");
    let screen = server.child("dashboard");
    let service = InMemoryDataService::seeded(seed::alerts()).with_latency(Duration::from_secs(1));

    let loaded = assert_ok!(screen.run(service.list()).await);
    assert_eq!(assert_ok!(loaded).len(), seed::alerts().len());

    server.close();
    assert!(screen.is_closed());
    let err = assert_err!(screen.run(service.list()).await);
    assert!(matches!(err, ExplorerError::Cancelled));
}
