use crate::{
    domain::{Task, TaskId},
    error::Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod memory;
pub mod notify;

pub use memory::MemoryTaskService;
pub use notify::{MemoryNotifier, TracingNotifier};

/// Source of truth for tasks, supplied by the surrounding application
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Returns the full canonical task list
    async fn fetch_tasks(&self) -> Result<Vec<Task>>;

    /// Persists a status change. Any error counts as a failed update.
    async fn update_task_status(&self, id: &TaskId, raw_status: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A user-facing message emitted by the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Fire-and-forget sink for user-facing messages
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}
