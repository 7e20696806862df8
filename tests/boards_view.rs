//! Board Management Tests
//!
//! Integration tests for the admin board list and the user's board reader.

mod common;

use common::{board_json, page_json, Services};
use msa_admin::i18n::I18n;
use msa_admin::models::{BoardPatch, BoardStatus, Visibility};
use msa_admin::views::{BoardsMode, BoardsView, Feedback};
use serde_json::json;

fn rendered(view: &BoardsView) -> String {
    view.feedback().unwrap().render(&I18n::builtin("en").unwrap())
}

fn seed_list(services: &Services) {
    services.board.on(
        "GET",
        "/api/v1/boards",
        200,
        page_json(
            vec![
                board_json("b-1", "Notice", "PUBLIC", "ACTIVE"),
                board_json("b-2", "Staff", "PRIVATE", "ACTIVE"),
            ],
            0,
            10,
            2,
        ),
    );
}

#[tokio::test]
async fn test_admin_filters_are_sent() {
    let services = Services::start().await;
    seed_list(&services);
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);

    view.set_query("not");
    view.set_visibility_filter(Some(Visibility::Private));
    view.set_status_filter(Some(BoardStatus::Inactive));
    view.load(&api, "tok").await;

    assert_eq!(
        services.board.requests()[0].target(),
        "/api/v1/boards?page=0&size=10&q=not&visibility=PRIVATE&status=INACTIVE"
    );
}

#[tokio::test]
async fn test_reader_only_sees_public_active_boards() {
    let services = Services::start().await;
    seed_list(&services);
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Reader, 10);

    view.set_visibility_filter(Some(Visibility::Private));
    view.set_status_filter(None);
    view.load(&api, "user-tok").await;

    let request = &services.board.requests()[0];
    assert_eq!(
        request.target(),
        "/api/v1/boards?page=0&size=10&visibility=PUBLIC&status=ACTIVE"
    );
    assert_eq!(request.authorization.as_deref(), Some("Bearer user-tok"));
}

#[tokio::test]
async fn test_create_board_trims_name_and_refetches_once() {
    let services = Services::start().await;
    seed_list(&services);
    services.board.on(
        "POST",
        "/api/v1/boards",
        201,
        board_json("b-3", "Events", "PRIVATE", "ACTIVE"),
    );
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);
    view.load(&api, "tok").await;

    view.new_name = "  Events  ".to_string();
    view.new_visibility = Visibility::Private;
    assert!(view.create(&api, "tok").await);

    let created = services.board.requests_to("POST", "/api/v1/boards");
    assert_eq!(created.len(), 1);
    assert_eq!(
        created[0].json(),
        json!({ "name": "Events", "visibility": "PRIVATE" })
    );
    assert_eq!(services.board.count("GET", "/api/v1/boards"), 2);
    assert!(view.new_name.is_empty());
    assert_eq!(rendered(&view), "Board created.");
}

#[tokio::test]
async fn test_blank_board_name_is_rejected_locally() {
    let services = Services::start().await;
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);

    view.new_name = "   ".to_string();
    assert!(!view.create(&api, "tok").await);
    assert!(services.board.requests().is_empty());
    assert_eq!(
        view.feedback(),
        Some(&Feedback::Rejected("validation.board_name_empty"))
    );
}

#[tokio::test]
async fn test_create_failure_shows_server_message() {
    let services = Services::start().await;
    services.board.on(
        "POST",
        "/api/v1/boards",
        409,
        json!({ "message": "Board name already exists." }),
    );
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);

    view.new_name = "Notice".to_string();
    assert!(!view.create(&api, "tok").await);
    assert_eq!(rendered(&view), "Board name already exists.");
    assert_eq!(view.new_name, "Notice");
}

#[tokio::test]
async fn test_update_status_patches_selected_board() {
    let services = Services::start().await;
    seed_list(&services);
    services.board.on(
        "PATCH",
        "/api/v1/boards/b-1",
        200,
        board_json("b-1", "Notice", "PUBLIC", "INACTIVE"),
    );
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);
    view.load(&api, "tok").await;
    assert!(view.select_index(0));

    assert!(view.update_status(&api, "tok", BoardStatus::Inactive).await);

    let patches = services.board.requests_to("PATCH", "/api/v1/boards/b-1");
    assert_eq!(patches[0].json(), json!({ "status": "INACTIVE" }));
    assert_eq!(view.selected().unwrap().status, BoardStatus::Inactive);
    assert_eq!(services.board.count("GET", "/api/v1/boards"), 2);
    assert_eq!(rendered(&view), "Board updated.");
}

#[tokio::test]
async fn test_rename_sends_trimmed_name() {
    let services = Services::start().await;
    seed_list(&services);
    services.board.on(
        "PATCH",
        "/api/v1/boards/b-1",
        200,
        board_json("b-1", "News", "PUBLIC", "ACTIVE"),
    );
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);
    view.load(&api, "tok").await;
    assert!(view.select("b-1"));

    let patch = BoardPatch {
        name: Some("  News  ".to_string()),
        ..Default::default()
    };
    assert!(view.update(&api, "tok", &patch).await);

    let patches = services.board.requests_to("PATCH", "/api/v1/boards/b-1");
    assert_eq!(patches[0].json(), json!({ "name": "News" }));
    assert_eq!(view.selected().unwrap().name, "News");
}

#[tokio::test]
async fn test_rename_to_blank_is_rejected_locally() {
    let services = Services::start().await;
    seed_list(&services);
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);
    view.load(&api, "tok").await;
    assert!(view.select("b-1"));

    let patch = BoardPatch {
        name: Some("   ".to_string()),
        ..Default::default()
    };
    assert!(!view.update(&api, "tok", &patch).await);
    assert_eq!(services.board.count("PATCH", "/api/v1/boards/b-1"), 0);
    assert_eq!(
        view.feedback(),
        Some(&Feedback::Rejected("validation.board_name_empty"))
    );
}

#[tokio::test]
async fn test_rename_without_selection() {
    let services = Services::start().await;
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);

    let patch = BoardPatch {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    assert!(!view.update(&api, "tok", &patch).await);
    assert!(services.board.requests().is_empty());
    assert_eq!(rendered(&view), "Select a board.");
}

#[tokio::test]
async fn test_reader_cannot_create_boards() {
    let services = Services::start().await;
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Reader, 10);

    view.new_name = "Mine".to_string();
    assert!(!view.create(&api, "tok").await);
    assert!(services.board.requests().is_empty());
}

#[tokio::test]
async fn test_reload_selected_reads_detail() {
    let services = Services::start().await;
    seed_list(&services);
    services.board.on(
        "GET",
        "/api/v1/boards/b-2",
        200,
        board_json("b-2", "Staff room", "PRIVATE", "ACTIVE"),
    );
    let api = services.api();
    let mut view = BoardsView::new(BoardsMode::Admin, 10);
    view.load(&api, "tok").await;
    assert!(view.select("b-2"));
    assert_eq!(view.posts().unwrap().board_id(), "b-2");

    assert!(view.reload_selected(&api, "tok").await);
    assert_eq!(view.selected().unwrap().name, "Staff room");
}
