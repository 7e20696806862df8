//! User Management Tests
//!
//! Integration tests for the user list and the two-service status change.

mod common;

use common::{identity_json, member_json, page_json, Services};
use msa_admin::i18n::I18n;
use msa_admin::models::UserStatus;
use msa_admin::views::{StatusUpdateOutcome, UsersView};
use serde_json::json;

const IDENTITY_PATH: &str = "/api/v1/admin/users/kim%40example.com/status";
const MEMBER_PATH: &str = "/api/v1/members/m-1/status";

async fn loaded_view(services: &Services) -> UsersView {
    services.member.on(
        "GET",
        "/api/v1/members",
        200,
        page_json(vec![member_json("m-1", "kim@example.com", "ACTIVE")], 0, 10, 1),
    );
    let mut view = UsersView::new(10);
    view.load(&services.api(), "tok").await;
    assert!(view.select("m-1"));
    view
}

fn rendered(view: &UsersView) -> String {
    view.feedback().unwrap().render(&I18n::builtin("en").unwrap())
}

#[tokio::test]
async fn test_status_change_writes_identity_then_member() {
    let services = Services::start().await;
    let mut view = loaded_view(&services).await;
    services
        .auth
        .on("PATCH", IDENTITY_PATH, 200, identity_json("i-1", "kim@example.com", "BLOCKED"));
    services
        .member
        .on("PATCH", MEMBER_PATH, 200, member_json("m-1", "kim@example.com", "BLOCKED"));

    let outcome = view
        .update_status(&services.api(), "tok", UserStatus::Blocked)
        .await
        .unwrap();
    assert!(matches!(outcome, StatusUpdateOutcome::BothSucceeded(_)));

    assert_eq!(services.auth.count("PATCH", IDENTITY_PATH), 1);
    assert_eq!(services.member.count("PATCH", MEMBER_PATH), 1);
    assert_eq!(
        services.member.requests_to("PATCH", MEMBER_PATH)[0].json(),
        json!({ "status": "BLOCKED" })
    );
    // Initial load plus exactly one refetch.
    assert_eq!(services.member.count("GET", "/api/v1/members"), 2);

    assert_eq!(view.selected().unwrap().status, UserStatus::Blocked);
    assert!(!view.feedback().unwrap().is_error());
    assert_eq!(rendered(&view), "Member status changed.");
}

#[tokio::test]
async fn test_identity_failure_skips_member_write() {
    let services = Services::start().await;
    let mut view = loaded_view(&services).await;
    services.auth.on(
        "PATCH",
        IDENTITY_PATH,
        403,
        json!({ "message": "Admin role required." }),
    );

    let outcome = view
        .update_status(&services.api(), "tok", UserStatus::Blocked)
        .await
        .unwrap();
    assert!(matches!(outcome, StatusUpdateOutcome::FirstFailed(_)));

    assert_eq!(services.member.count("PATCH", MEMBER_PATH), 0);
    assert_eq!(services.member.count("GET", "/api/v1/members"), 1);
    assert_eq!(view.selected().unwrap().status, UserStatus::Active);
    assert_eq!(rendered(&view), "Admin role required.");
}

#[tokio::test]
async fn test_member_failure_is_reported_as_partial() {
    let services = Services::start().await;
    let mut view = loaded_view(&services).await;
    services
        .auth
        .on("PATCH", IDENTITY_PATH, 200, identity_json("i-1", "kim@example.com", "BLOCKED"));
    services.member.on_empty("PATCH", MEMBER_PATH, 503);

    let outcome = view
        .update_status(&services.api(), "tok", UserStatus::Blocked)
        .await
        .unwrap();
    match outcome {
        StatusUpdateOutcome::SecondFailed { identity, error } => {
            assert_eq!(identity.status, UserStatus::Blocked);
            assert_eq!(error.status(), Some(503));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert_eq!(services.member.count("GET", "/api/v1/members"), 2);
    assert_eq!(view.selected().unwrap().status, UserStatus::Blocked);
    let text = rendered(&view);
    assert!(view.feedback().unwrap().is_error());
    assert!(text.contains("Could not change the member status."));
}

#[tokio::test]
async fn test_status_change_without_selection() {
    let services = Services::start().await;
    let mut view = UsersView::new(10);

    let outcome = view
        .update_status(&services.api(), "tok", UserStatus::Blocked)
        .await;
    assert!(outcome.is_none());
    assert!(services.auth.requests().is_empty());
    assert_eq!(rendered(&view), "Nothing is selected.");
}

#[tokio::test]
async fn test_search_is_sent_and_resets_page() {
    let services = Services::start().await;
    services.member.on(
        "GET",
        "/api/v1/members",
        200,
        page_json(vec![member_json("m-1", "kim@example.com", "ACTIVE")], 0, 10, 25),
    );
    let api = services.api();
    let mut view = UsersView::new(10);
    view.load(&api, "tok").await;
    assert!(view.paginate(msa_admin::views::PageCommand::Next));
    view.load(&api, "tok").await;

    view.set_query(" kim ");
    view.load(&api, "tok").await;

    let targets: Vec<String> = services
        .member
        .requests()
        .iter()
        .map(|r| r.target())
        .collect();
    assert_eq!(
        targets,
        vec![
            "/api/v1/members?page=0&size=10",
            "/api/v1/members?page=1&size=10",
            "/api/v1/members?page=0&size=10&q=kim",
        ]
    );
}

#[tokio::test]
async fn test_load_error_keeps_previous_rows() {
    let services = Services::start().await;
    services.member.on(
        "GET",
        "/api/v1/members",
        200,
        page_json(vec![member_json("m-1", "kim@example.com", "ACTIVE")], 0, 10, 1),
    );
    services.member.on_empty("GET", "/api/v1/members", 500);
    let api = services.api();
    let mut view = UsersView::new(10);
    view.load(&api, "tok").await;

    view.refresh(&api, "tok").await;

    let state = view.list();
    assert_eq!(state.data.unwrap().content.len(), 1);
    assert_eq!(state.error, Some("Could not load members."));
}
