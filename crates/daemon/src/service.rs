use tasklist_core::{now_iso, CreateTaskRequest, Task, TaskId, UpdateTaskRequest, ValidationError};
use tasklist_storage::{StoreError, TaskStore};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

/// The task collection operations.
///
/// Every call is one load -> mutate -> save pass over the whole collection.
/// No lock spans a call, so two overlapping writers can lose one update.
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn list(&self) -> Vec<Task> {
        self.store.load().await
    }

    pub async fn create(&self, req: CreateTaskRequest) -> Result<Task, ServiceError> {
        let new_task = req.validate()?;

        let mut tasks = self.store.load().await;
        let task = new_task.into_task(fresh_id(&tasks), now_iso());
        tasks.push(task.clone());
        self.store.save(&tasks).await?;

        info!(task_id = %task.id, "task created");
        Ok(task)
    }

    pub async fn update(&self, id: &TaskId, patch: UpdateTaskRequest) -> Result<Task, ServiceError> {
        let mut tasks = self.store.load().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;
        patch.validate()?;

        if patch.is_empty() {
            debug!(task_id = %id, "empty patch; nothing to save");
            return Ok(slot.clone());
        }

        *slot = patch.apply_to(slot);
        let updated = slot.clone();
        self.store.save(&tasks).await?;

        info!(task_id = %id, status = %updated.status, "task updated");
        Ok(updated)
    }

    /// Removes the task and hands it back to the caller.
    pub async fn delete(&self, id: &TaskId) -> Result<Task, ServiceError> {
        let mut tasks = self.store.load().await;
        let idx = tasks
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;

        let removed = tasks.remove(idx);
        self.store.save(&tasks).await?;

        info!(task_id = %id, "task deleted");
        Ok(removed)
    }
}

fn fresh_id(existing: &[Task]) -> TaskId {
    loop {
        let id = TaskId::new();
        if existing.iter().all(|t| t.id != id) {
            return id;
        }
    }
}
