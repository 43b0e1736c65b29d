//! List/editor controller: the authoritative local copy of the task list.
//!
//! Every user intent follows the same three phases:
//!
//! 1. **Begin**: an intent method (`refresh`, `submit_draft`, ...) updates
//!    the transient flags and returns a [`Ticket`] describing one request.
//! 2. **Dispatch**: [`execute`] runs the ticket against a [`TodoApi`] and
//!    produces a [`Settlement`]. This step owns no controller state, so many
//!    tickets may be in flight at once.
//! 3. **Settle**: [`Controller::settle`] merges the outcome into `items`, or
//!    records the action's fixed failure message.
//!
//! Settlements are applied in whatever order they arrive. With
//! [`StaleResults::Apply`] the last list/search to settle wins, even if it
//! was issued first. [`StaleResults::Discard`] drops list/search results
//! older than the most recently issued one.

use serde::Deserialize;
use tasklist_proto::{Task, TaskId};

use crate::client::{RemoteError, TodoApi};

/// How list/search settlements that have been superseded are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleResults {
    /// Apply every settlement as it arrives; the last to settle wins.
    #[default]
    Apply,
    /// Ignore list/search results issued before the latest one.
    Discard,
}

/// One request against the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch the whole collection.
    ListAll,
    /// Create a task with the given text.
    Create {
        /// Text of the new task.
        text: String,
    },
    /// Replace the text of a task.
    Update {
        /// Task being edited.
        id: TaskId,
        /// Replacement text.
        text: String,
    },
    /// Delete a task.
    Delete {
        /// Task to remove.
        id: TaskId,
    },
    /// Flip the completed flag of a task.
    Toggle {
        /// Task to toggle.
        id: TaskId,
    },
    /// Fetch tasks matching a query.
    Search {
        /// Non-blank query text.
        query: String,
    },
}

impl Request {
    /// Short action name used in logs.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::ListAll => "list",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Toggle { .. } => "toggle",
            Self::Search { .. } => "search",
        }
    }

    /// The fixed user-facing message shown when this request fails.
    #[must_use]
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::ListAll => "Failed to fetch todos",
            Self::Create { .. } => "Failed to create todo",
            Self::Update { .. } => "Failed to update todo",
            Self::Delete { .. } => "Failed to delete todo",
            Self::Toggle { .. } => "Failed to toggle status",
            Self::Search { .. } => "Failed to search todos",
        }
    }

    /// Whether this request drives the loading indicator.
    ///
    /// Toggle is treated as lightweight and leaves the indicator alone.
    #[must_use]
    pub const fn shows_loading(&self) -> bool {
        !matches!(self, Self::Toggle { .. })
    }

    /// Whether a successful result replaces the whole list.
    #[must_use]
    pub const fn replaces_list(&self) -> bool {
        matches!(self, Self::ListAll | Self::Search { .. })
    }
}

/// A request issued by the controller, stamped with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Monotonic issue order, starting at 1.
    pub generation: u64,
    /// What to send.
    pub request: Request,
}

/// The successful result of a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Full collection from `list_all`.
    Listed(Vec<Task>),
    /// Matching tasks from `search`.
    Searched(Vec<Task>),
    /// The task returned by `create`.
    Created(Task),
    /// The task returned by `update`, keyed by the id that was requested.
    Updated {
        /// Requested id.
        id: TaskId,
        /// Task as returned by the service.
        task: Task,
    },
    /// A task was deleted.
    Deleted {
        /// Requested id.
        id: TaskId,
    },
    /// The task returned by `toggle_completed`, keyed by the requested id.
    Toggled {
        /// Requested id.
        id: TaskId,
        /// Task as returned by the service.
        task: Task,
    },
}

/// A ticket paired with the result of dispatching it.
#[derive(Debug)]
pub struct Settlement {
    /// The request that was dispatched.
    pub ticket: Ticket,
    /// What came back.
    pub result: Result<Outcome, RemoteError>,
}

impl Settlement {
    /// A settlement for a ticket that could not be dispatched at all.
    #[must_use]
    pub const fn failed(ticket: Ticket, error: RemoteError) -> Self {
        Self {
            ticket,
            result: Err(error),
        }
    }
}

/// Runs one ticket against the remote collection.
///
/// Never panics and never retries; any failure is carried in the returned
/// [`Settlement`].
pub async fn execute<A: TodoApi>(api: &A, ticket: Ticket) -> Settlement {
    let result = match &ticket.request {
        Request::ListAll => api.list_all().await.map(Outcome::Listed),
        Request::Search { query } => api.search(query).await.map(Outcome::Searched),
        Request::Create { text } => api.create(text).await.map(Outcome::Created),
        Request::Update { id, text } => api.update(id, text).await.map(|task| Outcome::Updated {
            id: id.clone(),
            task,
        }),
        Request::Delete { id } => api
            .delete(id)
            .await
            .map(|()| Outcome::Deleted { id: id.clone() }),
        Request::Toggle { id } => api
            .toggle_completed(id)
            .await
            .map(|task| Outcome::Toggled {
                id: id.clone(),
                task,
            }),
    };
    Settlement { ticket, result }
}

/// The task currently under inline edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Which task is being edited.
    pub id: TaskId,
    /// Pending replacement text.
    pub draft: String,
}

/// Local task list plus transient UI state.
#[derive(Debug, Default)]
pub struct Controller {
    items: Vec<Task>,
    draft_text: String,
    search_query: String,
    editing: Option<EditSession>,
    is_loading: bool,
    last_error: String,
    generation: u64,
    latest_list_generation: u64,
    stale_results: StaleResults,
}

impl Controller {
    /// Creates an empty controller that applies every settlement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty controller with the given stale-result policy.
    #[must_use]
    pub fn with_stale_results(stale_results: StaleResults) -> Self {
        Self {
            stale_results,
            ..Self::default()
        }
    }

    /// Tasks in display order.
    #[must_use]
    pub fn items(&self) -> &[Task] {
        &self.items
    }

    /// Pending new-task text.
    #[must_use]
    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    /// Current search input; empty means unfiltered.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The inline edit in progress, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Id of the task under edit, if any.
    #[must_use]
    pub fn editing_id(&self) -> Option<&TaskId> {
        self.editing.as_ref().map(|session| &session.id)
    }

    /// Pending replacement text, or `""` when nothing is being edited.
    #[must_use]
    pub fn edit_draft_text(&self) -> &str {
        self.editing.as_ref().map_or("", |session| &session.draft)
    }

    /// True while a loading-indicator request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Last failure message, or `""`.
    #[must_use]
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// The configured stale-result policy.
    #[must_use]
    pub const fn stale_results(&self) -> StaleResults {
        self.stale_results
    }

    /// True when there is nothing to show and nothing is loading.
    #[must_use]
    pub fn is_empty_view(&self) -> bool {
        self.items.is_empty() && !self.is_loading
    }

    /// Begin phase shared by every intent.
    fn issue(&mut self, request: Request) -> Ticket {
        self.generation += 1;
        if request.replaces_list() {
            self.latest_list_generation = self.generation;
        }
        if request.shows_loading() {
            self.is_loading = true;
        }
        self.last_error.clear();
        tracing::debug!(
            generation = self.generation,
            action = request.action(),
            "request issued"
        );
        Ticket {
            generation: self.generation,
            request,
        }
    }

    /// Requests the full collection (also used on start).
    pub fn refresh(&mut self) -> Ticket {
        self.issue(Request::ListAll)
    }

    /// Replaces the new-task input buffer.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    /// Requests creation of the drafted task.
    ///
    /// Returns `None` without touching any state when the draft is blank.
    pub fn submit_draft(&mut self) -> Option<Ticket> {
        if self.draft_text.trim().is_empty() {
            return None;
        }
        let text = self.draft_text.clone();
        Some(self.issue(Request::Create { text }))
    }

    /// Starts editing a task, seeding the draft with its current text.
    ///
    /// Any edit already in progress is discarded. Returns `false` if the id
    /// is not in the list.
    pub fn start_edit(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.items.iter().find(|task| task.id == *id) else {
            return false;
        };
        self.editing = Some(EditSession {
            id: task.id.clone(),
            draft: task.text.clone(),
        });
        true
    }

    /// Replaces the pending edit text. No-op when nothing is being edited.
    pub fn set_edit_draft(&mut self, text: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.draft = text.into();
        }
    }

    /// Abandons the edit in progress.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Requests an update with the pending edit text.
    ///
    /// Returns `None` when nothing is being edited or the draft is blank.
    pub fn save_edit(&mut self) -> Option<Ticket> {
        let session = self.editing.as_ref()?;
        if session.draft.trim().is_empty() {
            return None;
        }
        let request = Request::Update {
            id: session.id.clone(),
            text: session.draft.clone(),
        };
        Some(self.issue(request))
    }

    /// Requests deletion of a task.
    pub fn delete(&mut self, id: &TaskId) -> Ticket {
        self.issue(Request::Delete { id: id.clone() })
    }

    /// Requests a completed-flag flip. Does not raise the loading flag.
    pub fn toggle(&mut self, id: &TaskId) -> Ticket {
        self.issue(Request::Toggle { id: id.clone() })
    }

    /// Stores the search input and requests the matching view.
    ///
    /// A blank query requests the full collection; anything else a search.
    /// Every call issues a request.
    pub fn set_search_query(&mut self, query: impl Into<String>) -> Ticket {
        self.search_query = query.into();
        if self.search_query.trim().is_empty() {
            self.issue(Request::ListAll)
        } else {
            let query = self.search_query.clone();
            self.issue(Request::Search { query })
        }
    }

    /// Applies a settlement to the local state.
    pub fn settle(&mut self, settlement: Settlement) {
        let Settlement { ticket, result } = settlement;

        if ticket.request.replaces_list()
            && self.stale_results == StaleResults::Discard
            && ticket.generation < self.latest_list_generation
        {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.latest_list_generation,
                action = ticket.request.action(),
                "discarding stale result"
            );
            return;
        }

        if ticket.request.shows_loading() {
            self.is_loading = false;
        }

        match result {
            Ok(outcome) => {
                tracing::debug!(
                    generation = ticket.generation,
                    action = ticket.request.action(),
                    "request settled"
                );
                self.last_error.clear();
                self.merge(outcome);
            }
            Err(e) => {
                tracing::warn!(
                    generation = ticket.generation,
                    action = ticket.request.action(),
                    error = %e,
                    "request failed"
                );
                ticket
                    .request
                    .failure_message()
                    .clone_into(&mut self.last_error);
            }
        }
    }

    /// Dispatches one ticket and settles it before returning.
    pub async fn perform<A: TodoApi>(&mut self, api: &A, ticket: Ticket) {
        let settlement = execute(api, ticket).await;
        self.settle(settlement);
    }

    fn merge(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Listed(tasks) | Outcome::Searched(tasks) => self.items = tasks,
            Outcome::Created(task) => {
                self.items.insert(0, task);
                self.draft_text.clear();
            }
            Outcome::Updated { id, task } => {
                self.replace(&id, task);
                self.editing = None;
            }
            Outcome::Deleted { id } => self.items.retain(|task| task.id != id),
            Outcome::Toggled { id, task } => self.replace(&id, task),
        }
    }

    fn replace(&mut self, id: &TaskId, task: Task) {
        if let Some(slot) = self.items.iter_mut().find(|existing| existing.id == *id) {
            *slot = task;
        }
    }
}
