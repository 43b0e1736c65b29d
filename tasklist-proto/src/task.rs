//! Task model for the todo REST contract.
//!
//! The remote service owns identity: a [`TaskId`] is assigned on creation
//! and never changes. On the wire a task looks like
//! `{ "_id": "...", "todo": "...", "completed": false }`; every field is
//! optional on decode so that partial records from a loosely specified
//! service still produce a usable [`Task`].

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque task identifier assigned by the remote service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an identifier string received from (or destined for) the service.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the placeholder id carried by an empty record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Service-assigned identifier, the reconciliation key.
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: TaskId,
    /// Free-form task text.
    #[serde(rename = "todo", default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Whether the task has been marked done.
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

/// Decodes an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Task {
    /// Creates an open task.
    pub fn new(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }

    /// Builder-style setter for the completed flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Request body for create and update: `{ "todo": "<text>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoBody {
    /// New task text.
    pub todo: String,
}

impl TodoBody {
    /// Creates a body carrying the given text.
    pub fn new(todo: impl Into<String>) -> Self {
        Self { todo: todo.into() }
    }
}
