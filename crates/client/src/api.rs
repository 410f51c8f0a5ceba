use std::future::Future;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tasklist_core::{CreateTaskRequest, ErrorBody, Task, TaskId, UpdateTaskRequest};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// The four collection operations as seen from a client.
pub trait TaskApi: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<Task>, ClientError>> + Send;

    fn create(
        &self,
        req: &CreateTaskRequest,
    ) -> impl Future<Output = Result<Task, ClientError>> + Send;

    fn update(
        &self,
        id: &TaskId,
        patch: &UpdateTaskRequest,
    ) -> impl Future<Output = Result<Task, ClientError>> + Send;

    fn delete(&self, id: &TaskId) -> impl Future<Output = Result<Task, ClientError>> + Send;
}

/// [`TaskApi`] over HTTP against a running daemon.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTaskApi {
    /// `base_url` is the daemon root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }
}

impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let resp = self.client.get(self.tasks_url()).send().await?;
        read_json(resp).await
    }

    async fn create(&self, req: &CreateTaskRequest) -> Result<Task, ClientError> {
        let resp = self.client.post(self.tasks_url()).json(req).send().await?;
        read_json(resp).await
    }

    async fn update(&self, id: &TaskId, patch: &UpdateTaskRequest) -> Result<Task, ClientError> {
        let resp = self.client.put(self.task_url(id)).json(patch).send().await?;
        read_json(resp).await
    }

    async fn delete(&self, id: &TaskId) -> Result<Task, ClientError> {
        let resp = self.client.delete(self.task_url(id)).send().await?;
        read_json(resp).await
    }
}

/// Decodes a success body, or turns the error envelope into [`ClientError::Status`].
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Status { status, message })
}
