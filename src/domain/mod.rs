pub mod board;
pub mod projection;
pub mod status;
pub mod task;

pub use board::{Board, Column};
pub use projection::project;
pub use status::{StatusMapper, StatusVocabulary};
pub use task::{Priority, Task, TaskId};
