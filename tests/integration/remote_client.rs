//! Integration tests for the HTTP remote collection client.
//!
//! Runs `HttpTodoApi` against the in-process stub server.
//!
//! These tests validate:
//! - All six operations hit the right route with the right method and body
//! - Enveloped and bare responses decode to the same tasks
//! - Non-success statuses surface as `RemoteError::Status`
//! - Unreachable services surface as `RemoteError::Transport`
//! - Search queries are URL-encoded

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use tasklist::client::{HttpTodoApi, RemoteError, TodoApi};
use tasklist_proto::{Task, TaskId};
use tasklist_stub::server::{self, StubState};
use tasklist_stub::store::TodoStore;

/// Start the stub server in-process and return a client pointed at it.
async fn start_stub(tasks: Vec<Task>, envelope: bool) -> (HttpTodoApi, Arc<StubState>) {
    let state = Arc::new(StubState::with_config(TodoStore::with_tasks(tasks), envelope));
    let (addr, _handle) = server::start_server_with_state("127.0.0.1:0", Arc::clone(&state))
        .await
        .expect("failed to start stub server");
    let api = HttpTodoApi::new(&format!("http://{addr}/api"), Duration::from_secs(5))
        .expect("valid base url");
    (api, state)
}

fn seed() -> Vec<Task> {
    vec![
        Task::new("1", "buy milk"),
        Task::new("2", "walk dog").with_completed(true),
    ]
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn list_all_returns_collection() {
    let (api, _state) = start_stub(seed(), true).await;
    assert_eq!(api.list_all().await.unwrap(), seed());
}

#[tokio::test]
async fn bare_and_enveloped_lists_agree() {
    let (enveloped, _a) = start_stub(seed(), true).await;
    let (bare, _b) = start_stub(seed(), false).await;

    assert_eq!(
        enveloped.list_all().await.unwrap(),
        bare.list_all().await.unwrap()
    );
}

#[tokio::test]
async fn search_encodes_query() {
    let tasks = vec![
        Task::new("1", "fish & chips"),
        Task::new("2", "chips"),
        Task::new("3", "tea"),
    ];
    let (api, _state) = start_stub(tasks, true).await;

    let hits = api.search("fish & chips").await.unwrap();
    assert_eq!(hits, vec![Task::new("1", "fish & chips")]);
}

#[tokio::test]
async fn empty_search_returns_everything() {
    let (api, _state) = start_stub(seed(), true).await;
    assert_eq!(api.search("").await.unwrap(), api.list_all().await.unwrap());
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn create_returns_stored_task() {
    let (api, state) = start_stub(Vec::new(), true).await;

    let task = api.create("buy milk").await.unwrap();
    assert_eq!(task.text, "buy milk");
    assert!(!task.completed);
    assert_eq!(state.store.list(), vec![task]);
}

#[tokio::test]
async fn create_works_without_envelope() {
    let (api, _state) = start_stub(Vec::new(), false).await;
    let task = api.create("buy milk").await.unwrap();
    assert_eq!(task.text, "buy milk");
    assert!(!task.id.is_empty());
}

#[tokio::test]
async fn update_replaces_text() {
    let (api, _state) = start_stub(seed(), true).await;
    let task = api.update(&TaskId::new("1"), "buy oat milk").await.unwrap();
    assert_eq!(task, Task::new("1", "buy oat milk"));
}

#[tokio::test]
async fn toggle_flips_completion() {
    let (api, _state) = start_stub(seed(), true).await;
    let task = api.toggle_completed(&TaskId::new("2")).await.unwrap();
    assert!(!task.completed);
}

#[tokio::test]
async fn delete_removes_task() {
    let (api, state) = start_stub(seed(), true).await;
    api.delete(&TaskId::new("1")).await.unwrap();
    assert_eq!(state.store.list(), vec![Task::new("2", "walk dog").with_completed(true)]);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn unknown_id_is_status_error() {
    let (api, _state) = start_stub(seed(), true).await;

    let err = api.delete(&TaskId::new("missing")).await.unwrap_err();
    match err {
        RemoteError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected Status, got: {other:?}"),
    }
}

#[tokio::test]
async fn blank_create_is_status_error() {
    let (api, _state) = start_stub(Vec::new(), true).await;
    assert!(matches!(
        api.create("  ").await,
        Err(RemoteError::Status { .. })
    ));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    // Bind and drop a listener to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpTodoApi::new(&format!("http://{addr}/api"), Duration::from_secs(2)).unwrap();
    assert!(matches!(
        api.list_all().await,
        Err(RemoteError::Transport(_))
    ));
}
