//! # Taskboard Core
//!
//! Drag-and-drop engine for three-column task boards.
//!
//! The board is a pure projection of an externally owned task list into
//! To Do, In Progress and Completed columns. Pointer and keyboard gestures are
//! turned into same-column reorders or cross-column moves; moves are applied
//! optimistically and reconciled against the task service when it rejects them.
//! Nothing here depends on a particular UI toolkit or backend.

pub mod config;
pub mod domain;
pub mod drag;
pub mod error;
pub mod mutator;
pub mod service;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use config::BoardConfig;
pub use domain::{project, Board, Column, Priority, StatusMapper, Task, TaskId};
pub use drag::{
    collision::{DropTarget, Point, Rect, TargetId},
    keyboard::Direction,
    DragController, DropOutcome, MoveRequest,
};
pub use error::{BoardError, Result};
pub use mutator::{MoveOutcome, Mutator};
pub use service::{NotificationKind, Notifier, TaskService};
pub use session::{Resolution, TaskBoard};
pub use store::{BoardSnapshot, BoardStore};
