#![forbid(unsafe_code)]

//! Task collection API served over HTTP.

pub mod config;
pub mod http;
pub mod service;

pub use service::{ServiceError, TaskService};
