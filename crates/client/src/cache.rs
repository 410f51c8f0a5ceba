use tasklist_core::{CreateTaskRequest, Task, TaskId, TaskStatus, UpdateTaskRequest};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::TaskApi;

/// In-process mirror of the server's task list for one client session.
///
/// Every mutation follows the same contract:
/// - `add` and `remove` change the mirror only after the server confirms,
///   since there is nothing sensible to show before that (no id yet, or a
///   delete that may still be refused).
/// - `update` is optimistic: the locally merged record is published before
///   the request, replaced by the server's copy on success and put back to
///   its previous value on any failure.
/// - A failed `fetch_all` keeps the current mirror.
///
/// The mirror lives in a [`watch`] channel; [`TaskCache::subscribe`] hands
/// out receivers that see each of these states as it is published, including
/// the optimistic record while the update request is still in flight.
///
/// API errors are logged and reported as `false`/`None`; they never escape.
/// Writes from other clients stay invisible until the next `fetch_all`.
pub struct TaskCache<A> {
    api: A,
    tasks: watch::Sender<Vec<Task>>,
}

impl<A: TaskApi> TaskCache<A> {
    pub fn new(api: A) -> Self {
        let (tasks, _) = watch::channel(Vec::new());
        Self { api, tasks }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the mirror.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    pub fn get(&self, id: &TaskId) -> Option<Task> {
        self.tasks.borrow().iter().find(|t| t.id == *id).cloned()
    }

    /// Receiver notified on every change to the mirror.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks.subscribe()
    }

    /// Replaces the mirror with the server's list.
    pub async fn fetch_all(&mut self) -> bool {
        match self.api.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "fetched tasks");
                self.tasks.send_replace(tasks);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch tasks; keeping cached list");
                false
            }
        }
    }

    pub async fn add(&mut self, req: CreateTaskRequest) -> Option<Task> {
        match self.api.create(&req).await {
            Ok(task) => {
                debug!(task_id = %task.id, "task added");
                self.tasks.send_modify(|tasks| tasks.push(task.clone()));
                Some(task)
            }
            Err(e) => {
                warn!(error = %e, "failed to add task");
                None
            }
        }
    }

    pub async fn update(&mut self, id: &TaskId, patch: UpdateTaskRequest) -> Option<Task> {
        let previous = self.get(id).inspect(|current| {
            self.splice(id, patch.apply_to(current));
        });

        match self.api.update(id, &patch).await {
            Ok(task) => {
                self.splice(id, task.clone());
                debug!(task_id = %id, "task updated");
                Some(task)
            }
            Err(e) => {
                warn!(task_id = %id, error = %e, "failed to update task; reverting");
                if let Some(before) = previous {
                    self.splice(id, before);
                }
                None
            }
        }
    }

    /// Shorthand for an update that only changes the status.
    pub async fn update_status(&mut self, id: &TaskId, status: TaskStatus) -> Option<Task> {
        self.update(id, UpdateTaskRequest::status(status)).await
    }

    pub async fn remove(&mut self, id: &TaskId) -> Option<Task> {
        match self.api.delete(id).await {
            Ok(removed) => {
                self.tasks.send_modify(|tasks| tasks.retain(|t| t.id != *id));
                debug!(task_id = %id, "task removed");
                Some(removed)
            }
            Err(e) => {
                warn!(task_id = %id, error = %e, "failed to delete task");
                None
            }
        }
    }

    /// Overwrites the mirrored record with `id`; a no-op if it is not mirrored.
    fn splice(&self, id: &TaskId, task: Task) {
        self.tasks
            .send_if_modified(|tasks| match tasks.iter_mut().find(|t| t.id == *id) {
                Some(slot) => {
                    *slot = task;
                    true
                }
                None => false,
            });
    }
}
