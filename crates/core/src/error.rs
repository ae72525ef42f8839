//! Error types for the core library

use thiserror::Error;

use crate::task::ValidationErrors;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    #[error("Request body must be a JSON object")]
    MalformedBody,

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
