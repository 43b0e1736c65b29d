//! HTTP routes of the stub todo service.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/api/todos` | all tasks |
//! | POST | `/api/todos` | created task |
//! | GET | `/api/todos/search?query=q` | matching tasks |
//! | PUT | `/api/todos/{id}` | updated task |
//! | DELETE | `/api/todos/{id}` | deleted task |
//! | PATCH | `/api/todos/{id}/toggle` | toggled task |
//!
//! Payloads are wrapped as `{"data": ...}` unless the server runs with the
//! envelope turned off.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, put},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tasklist_proto::{TaskId, TodoBody, payload::ENVELOPE_KEY};

use crate::store::TodoStore;

/// Shared state for all route handlers.
pub struct StubState {
    /// The task collection.
    pub store: TodoStore,
    /// Whether responses are wrapped in a `data` envelope.
    pub envelope: bool,
}

impl Default for StubState {
    fn default() -> Self {
        Self::new()
    }
}

impl StubState {
    /// Creates an empty, enveloping state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TodoStore::new(), true)
    }

    /// Creates a state around a pre-built store.
    #[must_use]
    pub const fn with_config(store: TodoStore, envelope: bool) -> Self {
        Self { store, envelope }
    }

    fn respond(&self, payload: impl serde::Serialize) -> Response {
        let value = serde_json::to_value(payload).unwrap_or(Value::Null);
        if self.envelope {
            Json(json!({ ENVELOPE_KEY: value })).into_response()
        } else {
            Json(value).into_response()
        }
    }
}

/// Request failures reported to the client.
#[derive(Debug, thiserror::Error)]
pub enum StubError {
    /// No task has the requested id.
    #[error("todo {0} not found")]
    NotFound(TaskId),
    /// The request body carried blank text.
    #[error("todo text must not be empty")]
    EmptyTodo,
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyTodo => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchParams {
    query: String,
}

/// Build the router for the todo service.
pub fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/search", get(search_todos))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .with_state(state)
}

/// Starts the stub server on the given address and returns the bound address
/// and a join handle.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(StubState::new())).await
}

/// Starts the stub server with a pre-configured [`StubState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<StubState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "stub server error");
        }
    });

    Ok((bound_addr, handle))
}

async fn list_todos(State(state): State<Arc<StubState>>) -> Response {
    let tasks = state.store.list();
    tracing::debug!(count = tasks.len(), "list todos");
    state.respond(tasks)
}

async fn search_todos(
    State(state): State<Arc<StubState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let tasks = state.store.search(&params.query);
    tracing::debug!(query = %params.query, count = tasks.len(), "search todos");
    state.respond(tasks)
}

async fn create_todo(
    State(state): State<Arc<StubState>>,
    Json(body): Json<TodoBody>,
) -> Result<Response, StubError> {
    if body.todo.trim().is_empty() {
        return Err(StubError::EmptyTodo);
    }
    let task = state.store.create(&body.todo);
    tracing::debug!(id = %task.id, "created todo");
    Ok(state.respond(task))
}

async fn update_todo(
    State(state): State<Arc<StubState>>,
    Path(id): Path<TaskId>,
    Json(body): Json<TodoBody>,
) -> Result<Response, StubError> {
    if body.todo.trim().is_empty() {
        return Err(StubError::EmptyTodo);
    }
    let task = state
        .store
        .update(&id, &body.todo)
        .ok_or(StubError::NotFound(id))?;
    Ok(state.respond(task))
}

async fn delete_todo(
    State(state): State<Arc<StubState>>,
    Path(id): Path<TaskId>,
) -> Result<Response, StubError> {
    let task = state.store.delete(&id).ok_or(StubError::NotFound(id))?;
    tracing::debug!(id = %task.id, "deleted todo");
    Ok(state.respond(task))
}

async fn toggle_todo(
    State(state): State<Arc<StubState>>,
    Path(id): Path<TaskId>,
) -> Result<Response, StubError> {
    let task = state.store.toggle(&id).ok_or(StubError::NotFound(id))?;
    Ok(state.respond(task))
}
