//! Integration tests for the list/editor controller against a live service.
//!
//! Drives `Controller` intents through `HttpTodoApi` and the in-process
//! stub server.
//!
//! These tests validate:
//! - A successful create prepends the task and clears the draft
//! - Update and toggle replace only the matching task
//! - Delete removes exactly one task
//! - Listing twice with no mutation in between yields the same tasks
//! - An empty search query restores the full collection
//! - Failures leave items intact and set the action's message

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use tasklist::client::{HttpTodoApi, TodoApi};
use tasklist::controller::Controller;
use tasklist_proto::{Task, TaskId};
use tasklist_stub::server::{self, StubState};
use tasklist_stub::store::TodoStore;

async fn start_stub(tasks: Vec<Task>) -> HttpTodoApi {
    let state = Arc::new(StubState::with_config(TodoStore::with_tasks(tasks), true));
    let (addr, _handle) = server::start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("failed to start stub server");
    HttpTodoApi::new(&format!("http://{addr}/api"), Duration::from_secs(5))
        .expect("valid base url")
}

/// A controller that has already loaded the full collection.
async fn loaded(api: &HttpTodoApi) -> Controller {
    let mut controller = Controller::new();
    let ticket = controller.refresh();
    controller.perform(api, ticket).await;
    controller
}

fn seed() -> Vec<Task> {
    vec![
        Task::new("1", "buy milk"),
        Task::new("2", "walk dog"),
        Task::new("3", "call mom"),
    ]
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_prepends_and_clears_draft() {
    let api = start_stub(seed()).await;
    let mut controller = loaded(&api).await;

    controller.set_draft("water plants");
    let ticket = controller.submit_draft().expect("non-blank draft issues a request");
    controller.perform(&api, ticket).await;

    assert_eq!(controller.items().len(), 4);
    assert_eq!(controller.items()[0].text, "water plants");
    assert_eq!(controller.draft_text(), "");
    assert!(!controller.is_loading());
    assert_eq!(controller.last_error(), "");
}

#[tokio::test]
async fn create_into_empty_list() {
    let api = start_stub(Vec::new()).await;
    let mut controller = loaded(&api).await;
    assert!(controller.is_empty_view());

    controller.set_draft("buy milk");
    let ticket = controller.submit_draft().unwrap();
    controller.perform(&api, ticket).await;

    assert_eq!(controller.items().len(), 1);
    assert_eq!(controller.items()[0].text, "buy milk");
    assert!(!controller.items()[0].completed);
}

#[tokio::test]
async fn local_order_matches_server_after_create() {
    let api = start_stub(seed()).await;
    let mut controller = loaded(&api).await;

    controller.set_draft("water plants");
    let ticket = controller.submit_draft().unwrap();
    controller.perform(&api, ticket).await;
    let local = controller.items().to_vec();

    let ticket = controller.refresh();
    controller.perform(&api, ticket).await;
    assert_eq!(controller.items(), local.as_slice());
}

// =============================================================================
// Update / toggle / delete
// =============================================================================

#[tokio::test]
async fn save_edit_replaces_only_target() {
    let api = start_stub(seed()).await;
    let mut controller = loaded(&api).await;

    assert!(controller.start_edit(&TaskId::new("2")));
    assert_eq!(controller.edit_draft_text(), "walk dog");
    controller.set_edit_draft("walk the dog");
    let ticket = controller.save_edit().unwrap();
    controller.perform(&api, ticket).await;

    assert_eq!(
        controller.items(),
        &[
            Task::new("1", "buy milk"),
            Task::new("2", "walk the dog"),
            Task::new("3", "call mom"),
        ]
    );
    assert!(controller.editing_id().is_none());
}

#[tokio::test]
async fn toggle_replaces_only_target() {
    let api = start_stub(seed()).await;
    let mut controller = loaded(&api).await;

    let ticket = controller.toggle(&TaskId::new("1"));
    assert!(!controller.is_loading());
    controller.perform(&api, ticket).await;

    assert!(controller.items()[0].completed);
    assert_eq!(controller.items()[1..], seed()[1..]);
}

#[tokio::test]
async fn delete_removes_exactly_one() {
    let api = start_stub(seed()).await;
    let mut controller = loaded(&api).await;

    let ticket = controller.delete(&TaskId::new("2"));
    controller.perform(&api, ticket).await;

    assert_eq!(controller.items().len(), 2);
    assert!(controller.items().iter().all(|t| t.id != TaskId::new("2")));
}

// =============================================================================
// Listing and search
// =============================================================================

#[tokio::test]
async fn listing_twice_is_idempotent() {
    let api = start_stub(seed()).await;
    let mut controller = loaded(&api).await;
    let first = controller.items().to_vec();

    let ticket = controller.refresh();
    controller.perform(&api, ticket).await;
    assert_eq!(controller.items(), first.as_slice());
}

#[tokio::test]
async fn empty_query_restores_full_list() {
    let api = start_stub(seed()).await;
    let mut controller = loaded(&api).await;
    let full = controller.items().to_vec();

    let ticket = controller.set_search_query("milk");
    controller.perform(&api, ticket).await;
    assert_eq!(controller.items(), &[Task::new("1", "buy milk")]);

    let ticket = controller.set_search_query("");
    controller.perform(&api, ticket).await;
    assert_eq!(controller.items(), full.as_slice());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn failed_toggle_keeps_items_and_sets_message() {
    let api = start_stub(seed()).await;
    let mut controller = loaded(&api).await;

    // Remove the task behind the controller's back.
    api.delete(&TaskId::new("1")).await.unwrap();

    let before = controller.items().to_vec();
    let ticket = controller.toggle(&TaskId::new("1"));
    controller.perform(&api, ticket).await;

    assert_eq!(controller.items(), before.as_slice());
    assert_eq!(controller.last_error(), "Failed to toggle status");
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn unreachable_service_sets_fetch_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = HttpTodoApi::new(&format!("http://{addr}/api"), Duration::from_secs(2)).unwrap();

    let mut controller = Controller::new();
    let ticket = controller.refresh();
    controller.perform(&api, ticket).await;

    assert!(controller.items().is_empty());
    assert_eq!(controller.last_error(), "Failed to fetch todos");
    assert!(!controller.is_loading());
}
