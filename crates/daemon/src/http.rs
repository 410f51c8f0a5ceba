use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use tasklist_core::{CreateTaskRequest, ErrorBody, Task, TaskId, UpdateTaskRequest};
use tasklist_storage::TaskStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::{ServiceError, TaskService};

pub struct AppState<S> {
    svc: Arc<TaskService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            svc: Arc::clone(&self.svc),
        }
    }
}

pub fn router<S: TaskStore>(svc: Arc<TaskService<S>>) -> Router {
    let state = AppState { svc };
    Router::new()
        .route("/healthz", get(healthz))
        .route("/tasks", get(list_tasks::<S>).post(create_task::<S>))
        .route("/tasks/{id}", put(update_task::<S>).delete(delete_task::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_tasks<S: TaskStore>(State(st): State<AppState<S>>) -> Json<Vec<Task>> {
    Json(st.svc.list().await)
}

async fn create_task<S: TaskStore>(
    State(st): State<AppState<S>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let Json(req) = payload?;
    Ok(Json(st.svc.create(req).await?))
}

async fn update_task<S: TaskStore>(
    State(st): State<AppState<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Task>, AppError> {
    let patch = parse_patch(&body)?;
    Ok(Json(st.svc.update(&TaskId::from(id), patch).await?))
}

/// A blank body is an empty patch, so the id lookup still decides 404.
fn parse_patch(body: &[u8]) -> Result<UpdateTaskRequest, ServiceError> {
    if body.trim_ascii().is_empty() {
        return Ok(UpdateTaskRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ServiceError::InvalidInput(format!("invalid update body: {e}")))
}

async fn delete_task<S: TaskStore>(
    State(st): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, AppError> {
    Ok(Json(st.svc.delete(&TaskId::from(id)).await?))
}

#[derive(Debug)]
pub struct AppError(ServiceError);

impl From<ServiceError> for AppError {
    fn from(value: ServiceError) -> Self {
        Self(value)
    }
}

/// Unparseable bodies (bad JSON, unknown status, wrong types) count as invalid input.
impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self(ServiceError::InvalidInput(value.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, %status, "request rejected");
        }
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}
