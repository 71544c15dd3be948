use crate::domain::Column;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Task {task} is not in column {column}")]
    TaskNotInColumn { task: String, column: Column },

    #[error("Task is already in column {0}")]
    SameColumn(Column),

    #[error("Another status update is still in flight")]
    MutationInFlight,

    #[error("Status update timed out after {0:?}")]
    PersistTimeout(Duration),

    #[error("Task service error: {0}")]
    Service(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
