#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared task model and wire types for the tasklist daemon and its clients.

pub mod api;
pub mod model;

mod util;

pub use api::{CreateTaskRequest, ErrorBody, NewTask, UpdateTaskRequest, ValidationError};
pub use model::{Task, TaskId, TaskStatus, UnknownStatus};
pub use util::now_iso;
