#![forbid(unsafe_code)]

//! Client side of the tasklist service: HTTP transport plus a local mirror
//! of the task list.

pub mod api;
pub mod cache;

pub use api::{ClientError, HttpTaskApi, TaskApi};
pub use cache::TaskCache;
