//! End-to-end navigation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then walks the object graph
//! over real HTTP: member boards, lists, cards, custom fields, labels,
//! checklists, attachments, members and organizations. The main walk uses
//! the default reqwest transport; the ureq test swaps in a host-side
//! transport to show the seam works for any executor. The Tokio tests drive
//! the reqwest transport from inside a runtime, both blocking and async.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use trello_core::{
    ApiError, Attachment, CheckList, ClientConfig, Label, LabelColor, NewAttachment, NewCard,
    NewCheckItem, ReqwestTransport, Trello,
};

use common::{spawn_server, UreqTransport};

fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(mock_server::APPLICATION_KEY).with_base_url(base_url)
}

#[test]
fn navigation_walk() {
    let base_url = spawn_server();
    let transport = Arc::new(ReqwestTransport::new().unwrap());
    let trello = Trello::with_transport(config(&base_url), transport);

    // Step 1: without a token every read is rejected.
    let err = trello.boards().unwrap_err();
    assert!(matches!(err, ApiError::Authentication { ref body } if body == "invalid token"));

    // Step 2: authorize and find the board.
    trello.authorize(mock_server::MEMBER_TOKEN);
    let boards = trello.boards().unwrap();
    let board = boards.get("Roadmap").expect("seeded board");
    assert!(boards.get("roadmap").is_none());
    let board_labels = board.on_board_labels();
    assert_eq!(board_labels["Urgent"].color, Some(LabelColor::Red));
    assert!(!board_labels.contains_key(""));

    // Step 3: lists and cards.
    let lists = board.lists().unwrap();
    assert_eq!(lists.len(), 2);
    let todo = lists.get("Todo").unwrap();
    let cards = todo.cards().unwrap();
    let card = cards.get("Write docs").unwrap();
    assert_eq!(card.description, "User guide");
    assert_eq!(card.board_id, board.id);

    // Step 4: custom fields read through the owning board.
    assert_eq!(card.inner_system_task_id().unwrap(), 7);
    assert_eq!(card.customer_project().unwrap(), "Apollo");
    assert!(card.set_inner_system_task_id(42).unwrap());
    assert!(card.set_customer_project("Gemini").unwrap());
    // The held card still has the old values; a fresh fetch sees the new ones.
    let refreshed = todo.cards().unwrap();
    let card_now = refreshed.get("Write docs").unwrap();
    assert_eq!(card_now.inner_system_task_id().unwrap(), 42);
    assert_eq!(card_now.customer_project().unwrap(), "Gemini");
    assert_eq!(refreshed.find_by_task_id(42).unwrap().unwrap().id, card.id);
    assert!(refreshed.find_by_task_id(99).unwrap().is_none());

    // Step 5: labels. Adding does not change the fetched collection.
    let labels = card.labels().unwrap();
    assert_eq!(labels.get("Urgent").unwrap().color, Some(LabelColor::Red));
    labels.add(&Label::new("Blocked", LabelColor::Black)).unwrap();
    assert_eq!(labels.len(), 1);
    let labels = card.labels().unwrap();
    assert_eq!(labels.len(), 2);
    assert!(labels.get("blocked").is_some());

    // Step 6: checklists and items.
    let checklists = card.checklists().unwrap();
    assert!(checklists.is_empty());
    checklists.add("QA").unwrap();
    let checklists = card.checklists().unwrap();
    let qa = checklists.get("QA").unwrap();
    qa.add_item(&NewCheckItem::new("Smoke test", true)).unwrap();
    qa.add_item(&NewCheckItem::new("Release notes", false)).unwrap();
    assert!(qa.check_items.is_empty());
    let checklists = card.checklists().unwrap();
    let qa = checklists.get("QA").unwrap();
    assert!(qa.item("Smoke test").unwrap().is_checked());
    assert!(!qa.item_at(1).unwrap().is_checked());

    // Step 7: attachments, one per payload kind.
    let path = std::env::temp_dir().join(format!("trello-core-it-{}.txt", std::process::id()));
    std::fs::write(&path, b"file contents").unwrap();
    let attachments = card.attachments().unwrap();
    attachments
        .add(&NewAttachment::url("Spec", "https://example.com/spec"))
        .unwrap();
    attachments
        .add(&NewAttachment::bytes("notes.txt", b"hello".to_vec()))
        .unwrap();
    attachments.add(&NewAttachment::file("Report", &path)).unwrap();
    std::fs::remove_file(&path).unwrap();
    let attachments = card.attachments().unwrap();
    assert_eq!(attachments.len(), 3);
    assert_eq!(
        attachments.get("Spec").unwrap().url,
        "https://example.com/spec"
    );
    assert!(attachments.get("notes.txt").is_some());
    assert!(attachments.get("Report").is_some());

    // Step 8: create a card in the list.
    let created = cards
        .add(
            &NewCard::new("Task A")
                .with_due(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
                .with_description("x"),
        )
        .unwrap()
        .expect("card is created");
    assert_eq!(created.list_id, todo.id);
    assert_eq!(
        created.due.unwrap().date_naive(),
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    );
    assert!(cards.add(&NewCard::new("")).unwrap().is_none());
    assert_eq!(todo.cards().unwrap().len(), 2);

    // Step 9: members and organizations.
    assert_eq!(board.members().unwrap().len(), 2);
    assert_eq!(card.members().unwrap().get("ada").unwrap().initials, "AL");
    let me = trello.me().unwrap().unwrap();
    let orgs = me.organizations().unwrap();
    let engines = orgs.get("engines").unwrap();
    assert_eq!(engines.display_name, "Analytical Engines");
    assert_eq!(engines.members().unwrap().len(), 2);
    assert_eq!(engines.boards().unwrap().get("Roadmap").unwrap().id, board.id);
    assert_eq!(me.boards().unwrap().len(), 1);

    // Step 10: missing resources are empty, not errors.
    let client = trello.client();
    let ghost = client
        .request_for::<trello_core::Board>(&trello_core::requests::board("nope"))
        .unwrap();
    assert!(ghost.is_none());
    let none = client
        .request_all::<trello_core::List>(&trello_core::requests::lists_for_board("nope"))
        .unwrap();
    assert!(none.is_empty());
    assert!(lists.get("Nope").is_none());

    // Step 11: after logging out, navigation from held entities fails again.
    trello.deauthorize();
    let err = board.lists().unwrap_err();
    assert!(matches!(err, ApiError::Authentication { .. }));
}

#[test]
fn ureq_host_transport() {
    let base_url = spawn_server();
    let trello = Trello::with_transport(config(&base_url), Arc::new(UreqTransport::new()));
    trello.authorize(mock_server::MEMBER_TOKEN);

    let boards = trello.boards().unwrap();
    let board = boards.get("Roadmap").unwrap();
    let lists = board.lists().unwrap();
    let done = lists.get("Done").unwrap();
    let cards = done.cards().unwrap();
    assert!(cards.is_empty());

    let created = cards.add(&NewCard::new("Shipped")).unwrap().unwrap();
    assert_eq!(created.board_id, board.id);
    assert_eq!(done.cards().unwrap().get("Shipped").unwrap().id, created.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn request_async_over_http() {
    let base_url = spawn_server();
    let client = trello_core::TrelloClient::with_transport(
        config(&base_url),
        Arc::new(UreqTransport::new()),
    );

    let checklist = trello_core::requests::add_checklist("c-docs", "Async");
    let err = client.request_async(&checklist).await.unwrap_err();
    assert!(matches!(err, ApiError::Authentication { .. }));

    client.authorize(mock_server::MEMBER_TOKEN);
    client.request_async(&checklist).await.unwrap();

    let err = client
        .request_async(&trello_core::requests::add_checklist("missing", "Async"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Request { status: 400, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn request_async_over_reqwest() {
    let base_url = spawn_server();
    let client = trello_core::TrelloClient::new(config(&base_url)).unwrap();

    let checklist = trello_core::requests::add_checklist("c-docs", "Async");
    let err = client.request_async(&checklist).await.unwrap_err();
    assert!(matches!(err, ApiError::Authentication { .. }));

    client.authorize(mock_server::MEMBER_TOKEN);
    client.request_async(&checklist).await.unwrap();

    let attachment = NewAttachment::bytes("async.txt", b"async body".to_vec());
    let upload = trello_core::requests::add_attachment("c-docs", &attachment);
    client.request_async(&upload).await.unwrap();

    // Blocking reads from a runtime worker run on their own thread.
    let checklists = client
        .request_all::<CheckList>(&trello_core::requests::checklists_of_card("c-docs"))
        .unwrap();
    assert!(checklists.iter().any(|c| c.name == "Async"));
    let attachments = client
        .request_all::<Attachment>(&trello_core::requests::attachments_of_card("c-docs"))
        .unwrap();
    assert!(attachments.iter().any(|a| a.name == "async.txt"));
}

#[tokio::test]
async fn blocking_calls_inside_runtime() {
    let base_url = spawn_server();
    let transport = Arc::new(ReqwestTransport::new().unwrap());
    let trello = Trello::with_transport(config(&base_url), transport);
    trello.authorize(mock_server::MEMBER_TOKEN);

    let client = trello.client();
    client
        .request(&trello_core::requests::board("b-roadmap"))
        .unwrap();
    let board = client
        .request_for::<trello_core::Board>(&trello_core::requests::board("b-roadmap"))
        .unwrap()
        .unwrap();
    assert_eq!(board.name, "Roadmap");
    assert_eq!(trello.boards().unwrap().len(), 1);
}
