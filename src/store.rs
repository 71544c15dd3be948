use crate::{
    domain::{project, Board, Column, StatusMapper, Task},
    drag::MoveRequest,
    error::{BoardError, Result},
};
use tokio::sync::watch;

/// The canonical task list together with the board projected from it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    pub board: Board,
}

/// Single owner of board state.
///
/// Every change is published to subscribers, including the optimistic state
/// of a move that the task service has not confirmed yet.
#[derive(Debug)]
pub struct BoardStore {
    mapper: StatusMapper,
    tx: watch::Sender<BoardSnapshot>,
}

impl BoardStore {
    pub fn new(mapper: StatusMapper) -> Self {
        let (tx, _rx) = watch::channel(BoardSnapshot::default());
        Self { mapper, tx }
    }

    pub fn mapper(&self) -> &StatusMapper {
        &self.mapper
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.tx.borrow().clone()
    }

    pub fn board(&self) -> Board {
        self.tx.borrow().board.clone()
    }

    /// Replaces the canonical task list and rebuilds the whole board
    pub fn replace_tasks(&self, tasks: Vec<Task>) {
        let board = project(&tasks, &self.mapper);
        self.tx.send_replace(BoardSnapshot { tasks, board });
    }

    /// Puts back a previously taken snapshot
    pub fn restore(&self, snapshot: BoardSnapshot) {
        self.tx.send_replace(snapshot);
    }

    /// Same-column reorder
    pub fn reorder(&self, column: Column, from: usize, to: usize) -> Result<()> {
        let mut result = Ok(());
        self.tx.send_if_modified(|snapshot| {
            result = snapshot.board.reorder(column, from, to);
            result.is_ok() && from != to
        });
        result
    }

    /// Optimistic half of a cross-column move: relocates the id and rewrites
    /// the task's raw status in one published update.
    pub fn apply_move(&self, request: &MoveRequest, raw_status: &str) -> Result<()> {
        let mut result = Ok(());
        self.tx.send_if_modified(|snapshot| {
            let Some(task) = snapshot.tasks.iter_mut().find(|t| t.id == request.task_id) else {
                result = Err(BoardError::TaskNotFound(request.task_id.to_string()));
                return false;
            };
            if let Err(e) = snapshot.board.move_task(
                &request.task_id,
                request.from,
                request.to,
                request.index,
            ) {
                result = Err(e);
                return false;
            }
            task.status = raw_status.to_string();
            true
        });
        result
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(StatusMapper::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new(1u64, "Buy milk", "Pending"),
            Task::new(2u64, "Walk dog", "Completed"),
            Task::new(3u64, "Plan trip", "Pending"),
        ]
    }

    fn ids(board: &Board, column: Column) -> Vec<&str> {
        board.column(column).iter().map(TaskId::as_str).collect()
    }

    #[test]
    fn test_replace_tasks_projects_board() {
        let store = BoardStore::default();
        store.replace_tasks(sample_tasks());

        let snapshot = store.snapshot();
        assert_eq!(ids(&snapshot.board, Column::ToDo), vec!["1", "3"]);
        assert!(snapshot.board.is_partition_of(&snapshot.tasks));
    }

    #[test]
    fn test_apply_move_rewrites_status() {
        let store = BoardStore::default();
        store.replace_tasks(sample_tasks());

        let request = MoveRequest {
            task_id: 1u64.into(),
            from: Column::ToDo,
            to: Column::InProgress,
            index: None,
        };
        store.apply_move(&request, "In Progress").unwrap();

        let snapshot = store.snapshot();
        assert_eq!(ids(&snapshot.board, Column::ToDo), vec!["3"]);
        assert_eq!(ids(&snapshot.board, Column::InProgress), vec!["1"]);
        assert_eq!(snapshot.tasks[0].status, "In Progress");
        assert!(snapshot.board.is_partition_of(&snapshot.tasks));
    }

    #[test]
    fn test_apply_move_unknown_task_leaves_state() {
        let store = BoardStore::default();
        store.replace_tasks(sample_tasks());
        let before = store.snapshot();

        let request = MoveRequest {
            task_id: 9u64.into(),
            from: Column::ToDo,
            to: Column::InProgress,
            index: None,
        };
        assert!(matches!(
            store.apply_move(&request, "In Progress"),
            Err(BoardError::TaskNotFound(_))
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_apply_move_wrong_source_column_keeps_status() {
        let store = BoardStore::default();
        store.replace_tasks(sample_tasks());

        let request = MoveRequest {
            task_id: 2u64.into(),
            from: Column::ToDo,
            to: Column::InProgress,
            index: None,
        };
        assert!(store.apply_move(&request, "In Progress").is_err());
        assert_eq!(store.snapshot().tasks[1].status, "Completed");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = BoardStore::default();
        let mut rx = store.subscribe();

        store.replace_tasks(sample_tasks());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().board.len(), 3);

        store.reorder(Column::ToDo, 0, 1).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(ids(&rx.borrow_and_update().board, Column::ToDo), vec!["3", "1"]);

        // A no-op reorder is not published
        store.reorder(Column::ToDo, 0, 0).unwrap();
        assert!(!rx.has_changed().unwrap());
    }
}
