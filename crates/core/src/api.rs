use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Task, TaskId, TaskStatus};

/// Body of `POST /tasks`.
///
/// `title` is optional at the type level so a missing title surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    /// Request with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Checks the required title and applies defaults for the optional fields.
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        let title = match self.title {
            None => return Err(ValidationError::MissingTitle),
            Some(t) if t.is_empty() => return Err(ValidationError::EmptyTitle),
            Some(t) => t,
        };
        Ok(NewTask {
            title,
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Create input that passed validation, defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl NewTask {
    /// Stamps the server-assigned fields onto the record.
    pub fn into_task(self, id: TaskId, created_at: String) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            created_at,
        }
    }
}

/// Body of `PUT /tasks/{id}`: a partial set of the mutable fields.
///
/// Has no `id` or `createdAt` fields; if a client sends them they are dropped
/// during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// Patch that only moves the task to `status`.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// A supplied title must still be non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.title {
            Some(t) if t.is_empty() => Err(ValidationError::EmptyTitle),
            _ => Ok(()),
        }
    }

    /// Merges the patch over `task`, field by field. `id` and `created_at`
    /// always come from `task`.
    pub fn apply_to(&self, task: &Task) -> Task {
        Task {
            id: task.id.clone(),
            created_at: task.created_at.clone(),
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| task.description.clone()),
            status: self.status.unwrap_or(task.status),
        }
    }
}

/// Rejected create/update input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("title must not be empty")]
    EmptyTitle,
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Wraps a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
