//! Remote collection client for the todo REST service.
//!
//! Defines the [`TodoApi`] trait (six request/response operations) and
//! [`HttpTodoApi`], its `reqwest` implementation. Every operation is a single
//! HTTP exchange: no retry, no caching, no batching. Response bodies go
//! through [`Payload`] so that enveloped (`{ "data": ... }`) and bare
//! payloads are both accepted.
//!
//! ```text
//! list_all()             GET    {base}/todos
//! create(text)           POST   {base}/todos            { "todo": text }
//! update(id, text)       PUT    {base}/todos/{id}       { "todo": text }
//! delete(id)             DELETE {base}/todos/{id}
//! toggle_completed(id)   PATCH  {base}/todos/{id}/toggle
//! search(query)          GET    {base}/todos/search?query={query}
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use tasklist_proto::{Payload, Task, TaskId, TodoBody};
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A failed remote call.
///
/// Callers treat every variant the same way ("the call failed"); the
/// variants exist only to carry the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("server responded with {status}: {body}")]
    Status {
        /// HTTP status code.
        status: StatusCode,
        /// Response body text, possibly empty.
        body: String,
    },

    /// The request URL could not be built from the configured base.
    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    /// The request never reached the service (e.g. dispatch queue closed).
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// The six operations of the remote todo collection.
///
/// Implementations must be cheap to share across tasks; the TUI keeps one
/// behind an `Arc` and issues overlapping calls against it.
pub trait TodoApi: Send + Sync {
    /// Fetch the full collection, in server order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Task>, RemoteError>> + Send;

    /// Create a task. Callers are responsible for rejecting empty text.
    fn create(&self, text: &str) -> impl Future<Output = Result<Task, RemoteError>> + Send;

    /// Replace the text of an existing task.
    fn update(
        &self,
        id: &TaskId,
        text: &str,
    ) -> impl Future<Output = Result<Task, RemoteError>> + Send;

    /// Delete a task. The response body is ignored.
    fn delete(&self, id: &TaskId) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Flip the completed flag of a task.
    fn toggle_completed(
        &self,
        id: &TaskId,
    ) -> impl Future<Output = Result<Task, RemoteError>> + Send;

    /// Fetch the tasks matching a free-form query.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Task>, RemoteError>> + Send;
}

/// [`TodoApi`] over HTTP using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    http: Client,
    base_url: Url,
}

impl HttpTodoApi {
    /// Creates a client for the given base URL (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Endpoint`] if the URL cannot serve as a base,
    /// or [`RemoteError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let base_url =
            Url::parse(base_url).map_err(|e| RemoteError::Endpoint(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::Endpoint(base_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Creates a client around an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::Endpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Performs one exchange and classifies the response body.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&TodoBody>,
    ) -> Result<Payload, RemoteError> {
        let path = url.path().to_string();
        tracing::debug!(%method, %path, "todo api request");

        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.inspect_err(|e| {
            tracing::warn!(%method, %path, error = %e, "todo api request failed");
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%method, %path, %status, %body, "todo api error status");
            return Err(RemoteError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(%method, %path, %status, len = bytes.len(), "todo api response");
        Ok(Payload::from_slice(&bytes))
    }
}

impl TodoApi for HttpTodoApi {
    async fn list_all(&self) -> Result<Vec<Task>, RemoteError> {
        let url = self.endpoint(&["todos"])?;
        Ok(self.send(Method::GET, url, None).await?.into_tasks())
    }

    async fn create(&self, text: &str) -> Result<Task, RemoteError> {
        let url = self.endpoint(&["todos"])?;
        let body = TodoBody::new(text);
        Ok(self.send(Method::POST, url, Some(&body)).await?.into_task())
    }

    async fn update(&self, id: &TaskId, text: &str) -> Result<Task, RemoteError> {
        let url = self.endpoint(&["todos", id.as_str()])?;
        let body = TodoBody::new(text);
        Ok(self.send(Method::PUT, url, Some(&body)).await?.into_task())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), RemoteError> {
        let url = self.endpoint(&["todos", id.as_str()])?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn toggle_completed(&self, id: &TaskId) -> Result<Task, RemoteError> {
        let url = self.endpoint(&["todos", id.as_str(), "toggle"])?;
        Ok(self.send(Method::PATCH, url, None).await?.into_task())
    }

    async fn search(&self, query: &str) -> Result<Vec<Task>, RemoteError> {
        let mut url = self.endpoint(&["todos", "search"])?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(self.send(Method::GET, url, None).await?.into_tasks())
    }
}
