use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tasklist_core::Task;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("write {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save of the entire task collection as one unit.
///
/// Nothing here locks: two overlapping load -> save cycles race and whichever
/// `save` lands last is what persists.
pub trait TaskStore: Send + Sync + 'static {
    /// Reads the full collection. Missing or unreadable backing data yields an
    /// empty collection rather than an error.
    fn load(&self) -> impl Future<Output = Vec<Task>> + Send;

    /// Overwrites the full collection.
    fn save(&self, tasks: &[Task]) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<S: TaskStore> TaskStore for Arc<S> {
    fn load(&self) -> impl Future<Output = Vec<Task>> + Send {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).save(tasks)
    }
}
