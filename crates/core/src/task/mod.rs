//! Task module
//!
//! This module contains task-related types and logic.

mod file_store;
mod memory_store;
mod model;
mod paginate;
mod query;
mod repository;
mod service;
mod validate;

pub use file_store::FileTaskStore;
pub use memory_store::MemoryTaskStore;
pub use model::*;
pub use paginate::{paginate, PageMeta, PageParams, DEFAULT_LIMIT, MAX_LIMIT};
pub use query::TaskFilter;
pub use repository::TaskStore;
pub use service::{ListResult, TaskService};
pub use validate::{validate, ValidationErrors, ValidationProfile};
