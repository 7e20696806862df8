//! Authentication Flow Tests
//!
//! Integration tests for login, signup, admin admission and session
//! persistence.

mod common;

use common::{auth_json, sessions, Services};
use msa_admin::router::{self, Screen};
use msa_admin::validation::FormMode;
use msa_admin::views::{Feedback, LoginOutcome, LoginView};
use msa_admin::{AuthState, SessionHolder, SessionScope, SessionStore};
use serde_json::json;
use tempfile::TempDir;

fn login_form(scope: SessionScope, email: &str, password: &str) -> LoginView {
    let mut view = LoginView::new(scope, true);
    view.email = email.to_string();
    view.password = password.to_string();
    view
}

#[tokio::test]
async fn test_admin_login_admits_admin_role() {
    let services = Services::start().await;
    services.auth.on(
        "POST",
        "/api/v1/auth/login",
        200,
        auth_json("admin-tok", "admin", "ADMIN"),
    );
    let mut holder = sessions();
    let mut view = login_form(SessionScope::Admin, "admin", "password1");

    let outcome = view.submit(&services.api(), &mut holder).await;
    assert_eq!(outcome, LoginOutcome::SignedIn);
    assert!(holder.admin_admitted());
    assert_eq!(holder.token(SessionScope::Admin), Some("admin-tok"));
    assert!(holder.session(SessionScope::User).is_none());
    assert!(view.password.is_empty());

    let resolution = router::resolve("/admin", &holder);
    assert_eq!(resolution.screen, Screen::AdminUsers);
}

#[tokio::test]
async fn test_admin_login_without_admin_role() {
    let services = Services::start().await;
    services.auth.on(
        "POST",
        "/api/v1/auth/login",
        200,
        auth_json("user-tok", "kim@example.com", "USER"),
    );
    let mut holder = sessions();
    let mut view = login_form(SessionScope::Admin, "kim@example.com", "password1");

    let outcome = view.submit(&services.api(), &mut holder).await;
    assert_eq!(outcome, LoginOutcome::NotAdmin);
    assert!(!holder.admin_admitted());
    assert_eq!(
        view.feedback(),
        Some(&Feedback::Rejected("feedback.admin_required"))
    );

    let resolution = router::resolve("/admin/boards", &holder);
    assert_eq!(resolution.screen, Screen::AdminLogin);
    assert!(resolution.admin_refused);
}

#[tokio::test]
async fn test_failed_login_leaves_scope_anonymous() {
    let services = Services::start().await;
    services.auth.on(
        "POST",
        "/api/v1/auth/login",
        401,
        json!({ "message": "Invalid credentials." }),
    );
    let mut holder = sessions();
    common::sign_in(&mut holder, SessionScope::User, "old-tok", "USER");
    let mut view = login_form(SessionScope::User, "kim@example.com", "password1");

    let outcome = view.submit(&services.api(), &mut holder).await;
    assert_eq!(outcome, LoginOutcome::Failed);
    assert_eq!(holder.state(SessionScope::User), AuthState::Anonymous);
    assert!(holder.token(SessionScope::User).is_none());
    assert_eq!(
        view.feedback(),
        Some(&Feedback::Error("Invalid credentials.".to_string()))
    );
}

#[tokio::test]
async fn test_login_without_token_is_a_failure() {
    let services = Services::start().await;
    services.auth.on(
        "POST",
        "/api/v1/auth/login",
        200,
        auth_json("", "kim@example.com", "USER"),
    );
    let mut holder = sessions();
    let mut view = login_form(SessionScope::User, "kim@example.com", "password1");

    let outcome = view.submit(&services.api(), &mut holder).await;
    assert_eq!(outcome, LoginOutcome::Failed);
    assert!(holder.session(SessionScope::User).is_none());
    assert_eq!(view.feedback(), Some(&Feedback::Rejected("api.login_failed")));
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let services = Services::start().await;
    let mut holder = sessions();

    let mut view = login_form(SessionScope::User, "not-an-email", "password1");
    let outcome = view.submit(&services.api(), &mut holder).await;
    assert_eq!(outcome, LoginOutcome::Invalid);
    assert_eq!(
        view.feedback(),
        Some(&Feedback::Rejected("validation.email_invalid"))
    );

    let mut view = login_form(SessionScope::User, "kim@example.com", "short");
    assert_eq!(
        view.submit(&services.api(), &mut holder).await,
        LoginOutcome::Invalid
    );
    assert!(services.auth.requests().is_empty());
}

#[tokio::test]
async fn test_signup_returns_to_login_mode() {
    let services = Services::start().await;
    services.auth.on(
        "POST",
        "/api/v1/auth/signup",
        201,
        json!({
            "id": "u-1",
            "email": "new@example.com",
            "role": "USER",
            "status": "ACTIVE",
        }),
    );
    let mut holder = sessions();
    let mut view = LoginView::new(SessionScope::User, true);
    view.set_mode(FormMode::Signup);
    view.email = "new@example.com".to_string();
    view.password = "password1".to_string();
    view.confirm = "password1".to_string();

    let outcome = view.submit(&services.api(), &mut holder).await;
    assert_eq!(outcome, LoginOutcome::SignedUp);
    assert_eq!(view.mode(), FormMode::Login);
    assert_eq!(view.email, "new@example.com");
    assert!(view.password.is_empty() && view.confirm.is_empty());
    assert!(holder.session(SessionScope::User).is_none());
    assert_eq!(
        services.auth.requests()[0].json(),
        json!({ "email": "new@example.com", "password": "password1" })
    );
}

#[tokio::test]
async fn test_signup_rejects_admin_id() {
    let services = Services::start().await;
    let mut holder = sessions();
    let mut view = LoginView::new(SessionScope::User, true);
    view.set_mode(FormMode::Signup);
    view.email = "admin".to_string();
    view.password = "password1".to_string();
    view.confirm = "password1".to_string();

    let outcome = view.submit(&services.api(), &mut holder).await;
    assert_eq!(outcome, LoginOutcome::Invalid);
    assert!(services.auth.requests().is_empty());
}

#[tokio::test]
async fn test_sessions_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state").join("session.json");
    let services = Services::start().await;
    services.auth.on(
        "POST",
        "/api/v1/auth/login",
        200,
        auth_json("admin-tok", "admin", "ADMIN"),
    );

    {
        let mut holder = SessionHolder::restore(SessionStore::open(&path).unwrap());
        let mut view = login_form(SessionScope::Admin, "admin", "password1");
        view.submit(&services.api(), &mut holder).await;
    }

    let holder = SessionHolder::restore(SessionStore::open(&path).unwrap());
    assert!(holder.admin_admitted());
    assert_eq!(holder.token(SessionScope::Admin), Some("admin-tok"));
    assert!(holder.session(SessionScope::User).is_none());

    let mut holder = holder;
    holder.logout(SessionScope::Admin);
    let holder = SessionHolder::restore(SessionStore::open(&path).unwrap());
    assert!(holder.session(SessionScope::Admin).is_none());
}

#[tokio::test]
async fn test_login_survives_unwritable_session_file() {
    let temp_dir = TempDir::new().unwrap();
    let state_dir = temp_dir.path().join("state");
    let mut holder =
        SessionHolder::restore(SessionStore::open(state_dir.join("session.json")).unwrap());
    std::fs::write(&state_dir, "not a directory").unwrap();

    let services = Services::start().await;
    services.auth.on(
        "POST",
        "/api/v1/auth/login",
        200,
        auth_json("admin-tok", "admin", "ADMIN"),
    );
    let mut view = login_form(SessionScope::Admin, "admin", "password1");

    let outcome = view.submit(&services.api(), &mut holder).await;
    assert_eq!(outcome, LoginOutcome::SignedIn);
    assert_eq!(holder.state(SessionScope::Admin), AuthState::Authenticated);
    assert!(holder.admin_admitted());
    assert!(holder.take_save_error().is_some());
}
