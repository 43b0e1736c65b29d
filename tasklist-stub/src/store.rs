//! In-memory todo collection.
//!
//! The [`TodoStore`] keeps tasks newest first, so a freshly created task is
//! at the head of the next listing, matching where the client inserts it.

use parking_lot::RwLock;
use tasklist_proto::{Task, TaskId};

/// In-memory task collection.
///
/// Thread-safe via [`RwLock`]. Ids are time-ordered UUIDv7 strings.
#[derive(Default)]
pub struct TodoStore {
    tasks: RwLock<Vec<Task>>,
}

impl TodoStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tasks`, kept in the given order.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }

    /// All tasks, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }

    /// Tasks whose text contains `query`, ignoring case.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Task> {
        let needle = query.to_lowercase();
        self.tasks
            .read()
            .iter()
            .filter(|task| task.text.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Adds a new incomplete task and returns it.
    pub fn create(&self, text: &str) -> Task {
        let task = Task::new(uuid::Uuid::now_v7().to_string(), text);
        self.tasks.write().insert(0, task.clone());
        task
    }

    /// Replaces the text of the task with `id`, returning the updated task.
    pub fn update(&self, id: &TaskId, text: &str) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let task = tasks.iter_mut().find(|task| &task.id == id)?;
        text.clone_into(&mut task.text);
        Some(task.clone())
    }

    /// Flips the completion flag of the task with `id`, returning the
    /// updated task.
    pub fn toggle(&self, id: &TaskId) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let task = tasks.iter_mut().find(|task| &task.id == id)?;
        task.completed = !task.completed;
        Some(task.clone())
    }

    /// Removes the task with `id`, returning it if it existed.
    pub fn delete(&self, id: &TaskId) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let idx = tasks.iter().position(|task| &task.id == id)?;
        Some(tasks.remove(idx))
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    /// Whether the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}
