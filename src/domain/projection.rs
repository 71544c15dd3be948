use crate::domain::{board::Board, board::Column, status::StatusMapper, task::Task};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Builds a board from the canonical task list.
///
/// Single pass: each task is appended to the column its status maps to, so
/// within-column order follows the input order. Duplicate ids keep their first
/// occurrence only.
pub fn project(tasks: &[Task], mapper: &StatusMapper) -> Board {
    let mut board = Board::new();
    let mut seen = HashSet::with_capacity(tasks.len());

    for task in tasks {
        if !seen.insert(&task.id) {
            warn!(task = %task.id, "duplicate task id in task list; keeping first");
            continue;
        }
        if !mapper.is_recognized(&task.status) {
            debug!(task = %task.id, status = %task.status, "unrecognized status; using To Do");
        }
        board.push(mapper.to_column(&task.status), task.id.clone());
    }

    debug!(
        todo = board.column(Column::ToDo).len(),
        in_progress = board.column(Column::InProgress).len(),
        completed = board.column(Column::Completed).len(),
        "projected board"
    );
    board
}
