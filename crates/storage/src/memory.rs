use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tasklist_core::Task;

use crate::traits::{StoreError, TaskStore};

/// In-memory storage for tests and throwaway daemons. Not durable.
#[derive(Default)]
pub struct InMemoryStore {
    tasks: Mutex<Vec<Task>>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl TaskStore for InMemoryStore {
    async fn load(&self) -> Vec<Task> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        *self.tasks.lock().unwrap_or_else(PoisonError::into_inner) = tasks.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::{TaskId, TaskStatus};

    fn task(id: &str) -> Task {
        Task {
            id: TaskId::from(id),
            title: format!("task {id}"),
            description: String::new(),
            status: TaskStatus::Todo,
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_new_creates_empty_storage() {
        let store = InMemoryStore::new();
        assert!(store.load().await.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_with_tasks_seeds_collection() {
        let store = InMemoryStore::with_tasks(vec![task("a"), task("b")]);
        let ids: Vec<_> = store.load().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TaskId::from("a"), TaskId::from("b")]);
    }

    #[tokio::test]
    async fn test_save_replaces_whole_collection() {
        let store = InMemoryStore::with_tasks(vec![task("a"), task("b")]);
        store.save(&[task("c")]).await.unwrap();
        assert_eq!(store.load().await, vec![task("c")]);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_load_returns_a_copy() {
        let store = InMemoryStore::with_tasks(vec![task("a")]);
        let mut loaded = store.load().await;
        loaded.clear();
        assert_eq!(store.load().await.len(), 1);
    }
}
