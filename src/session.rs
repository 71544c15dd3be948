use crate::{
    config::BoardConfig,
    domain::{Board, StatusMapper, Task, TaskId},
    drag::{
        collision::{DropTarget, Point, Rect},
        keyboard::Direction,
        DragController, DragPhase, DragSession, DropOutcome,
    },
    error::Result,
    mutator::{MoveOutcome, Mutator},
    service::{Notifier, TaskService},
    store::{BoardSnapshot, BoardStore},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// What happened when a gesture ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub drop: DropOutcome,
    /// Set when the drop turned into a cross-column move
    pub moved: Option<MoveOutcome>,
}

/// A task board bound to its task service and notification sink.
///
/// Gesture adapters feed pointer and keyboard events in; renderers subscribe to
/// snapshots.
pub struct TaskBoard<S: TaskService, N: Notifier> {
    service: Arc<S>,
    store: BoardStore,
    controller: DragController,
    mutator: Mutator<S, N>,
}

impl<S: TaskService, N: Notifier> TaskBoard<S, N> {
    pub fn new(service: Arc<S>, notifier: Arc<N>, config: &BoardConfig) -> Self {
        Self {
            store: BoardStore::new(StatusMapper::new(&config.vocabulary)),
            controller: DragController::from_config(config),
            mutator: Mutator::from_config(service.clone(), notifier, config),
            service,
        }
    }

    /// Initial fetch of the canonical task list
    pub async fn load(&self) -> Result<()> {
        let tasks = self.service.fetch_tasks().await?;
        info!(tasks = tasks.len(), "loaded task board");
        self.store.replace_tasks(tasks);
        Ok(())
    }

    /// Applies an externally changed task list
    pub fn set_tasks(&self, tasks: Vec<Task>) {
        self.store.replace_tasks(tasks);
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.store.subscribe()
    }

    pub fn board(&self) -> Board {
        self.store.board()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.store.snapshot()
    }

    pub fn phase(&self) -> DragPhase {
        self.controller.phase()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.controller.session()
    }

    /// Whether a status update is still waiting on the task service
    pub fn is_busy(&self) -> bool {
        self.mutator.is_busy()
    }

    pub fn pointer_down(&mut self, task_id: impl Into<TaskId>, at: Point, card: Rect) -> bool {
        let board = self.store.board();
        self.controller.pointer_down(task_id.into(), at, card, &board)
    }

    pub fn pointer_move(&mut self, at: Point) -> bool {
        self.controller.pointer_move(at)
    }

    pub async fn pointer_up(&mut self, at: Point, targets: &[DropTarget]) -> Result<Resolution> {
        let mut board = self.store.board();
        let drop = self.controller.pointer_up(at, targets, &mut board);
        self.settle(drop).await
    }

    pub fn key_pick_up(&mut self, task_id: impl Into<TaskId>) -> bool {
        let board = self.store.board();
        self.controller.key_pick_up(task_id.into(), &board)
    }

    pub fn key_nudge(&mut self, direction: Direction) -> bool {
        let board = self.store.board();
        self.controller.key_nudge(direction, &board)
    }

    pub async fn key_drop(&mut self) -> Result<Resolution> {
        let mut board = self.store.board();
        let drop = self.controller.key_drop(&mut board);
        self.settle(drop).await
    }

    pub fn cancel(&mut self) -> DropOutcome {
        self.controller.cancel()
    }

    async fn settle(&self, drop: DropOutcome) -> Result<Resolution> {
        let moved = match &drop {
            DropOutcome::Reordered {
                column, from, to, ..
            } => {
                self.store.reorder(*column, *from, *to)?;
                None
            }
            DropOutcome::Move(request) => Some(self.mutator.move_task(&self.store, request).await?),
            _ => None,
        };
        Ok(Resolution { drop, moved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Column,
        drag::MoveRequest,
        service::{MemoryNotifier, MemoryTaskService, NotificationKind},
    };

    const CARD: Rect = Rect {
        x: 10.0,
        y: 60.0,
        width: 280.0,
        height: 80.0,
    };

    fn targets() -> Vec<DropTarget> {
        vec![
            DropTarget::column(Column::ToDo, Rect::new(0.0, 0.0, 300.0, 800.0)),
            DropTarget::column(Column::InProgress, Rect::new(320.0, 0.0, 300.0, 800.0)),
            DropTarget::column(Column::Completed, Rect::new(640.0, 0.0, 300.0, 800.0)),
            DropTarget::task(1u64, Rect::new(10.0, 60.0, 280.0, 80.0)),
            DropTarget::task(2u64, Rect::new(650.0, 60.0, 280.0, 80.0)),
        ]
    }

    fn ids(board: &Board, column: Column) -> Vec<&str> {
        board.column(column).iter().map(TaskId::as_str).collect()
    }

    async fn example_board() -> (
        Arc<MemoryTaskService>,
        Arc<MemoryNotifier>,
        TaskBoard<MemoryTaskService, MemoryNotifier>,
    ) {
        let service = Arc::new(MemoryTaskService::new(vec![
            Task::new(1u64, "Buy milk", "Pending"),
            Task::new(2u64, "Walk dog", "Completed"),
        ]));
        let notifier = Arc::new(MemoryNotifier::new());
        let board = TaskBoard::new(service.clone(), notifier.clone(), &BoardConfig::default());
        board.load().await.unwrap();
        (service, notifier, board)
    }

    async fn drag_task_one_to_in_progress(
        board: &mut TaskBoard<MemoryTaskService, MemoryNotifier>,
    ) -> Resolution {
        assert!(board.pointer_down(1u64, Point::new(100.0, 100.0), CARD));
        assert!(board.pointer_move(Point::new(300.0, 100.0)));
        board
            .pointer_up(Point::new(430.0, 100.0), &targets())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_projects_tasks() {
        let (_service, _notifier, board) = example_board().await;
        let snapshot = board.snapshot();

        assert_eq!(ids(&snapshot.board, Column::ToDo), vec!["1"]);
        assert!(snapshot.board.column(Column::InProgress).is_empty());
        assert_eq!(ids(&snapshot.board, Column::Completed), vec!["2"]);
        assert!(snapshot.board.is_partition_of(&snapshot.tasks));
    }

    #[tokio::test]
    async fn test_drag_across_columns_confirmed() {
        let (service, notifier, mut board) = example_board().await;

        let resolution = drag_task_one_to_in_progress(&mut board).await;

        assert_eq!(
            resolution.drop,
            DropOutcome::Move(MoveRequest {
                task_id: 1u64.into(),
                from: Column::ToDo,
                to: Column::InProgress,
                index: None,
            })
        );
        assert_eq!(resolution.moved, Some(MoveOutcome::Confirmed));

        let snapshot = board.snapshot();
        assert!(snapshot.board.column(Column::ToDo).is_empty());
        assert_eq!(ids(&snapshot.board, Column::InProgress), vec!["1"]);
        assert_eq!(snapshot.tasks[0].status, "In Progress");
        assert_eq!(service.fetch_tasks().await.unwrap()[0].status, "In Progress");
        assert_eq!(notifier.of_kind(NotificationKind::Success).len(), 1);
        assert_eq!(board.phase(), DragPhase::Idle);
    }

    #[tokio::test]
    async fn test_drag_across_columns_rejected_snaps_back() {
        let (service, notifier, mut board) = example_board().await;
        service.fail_updates(true);
        let rx = board.subscribe();

        let resolution = drag_task_one_to_in_progress(&mut board).await;

        assert_eq!(resolution.moved, Some(MoveOutcome::Resynced));
        let snapshot = board.snapshot();
        assert_eq!(ids(&snapshot.board, Column::ToDo), vec!["1"]);
        assert!(snapshot.board.column(Column::InProgress).is_empty());
        assert_eq!(snapshot.tasks[0].status, "Pending");
        assert_eq!(notifier.of_kind(NotificationKind::Error).len(), 1);
        assert!(notifier.of_kind(NotificationKind::Success).is_empty());
        assert!(rx.has_changed().unwrap());
        assert_eq!(board.phase(), DragPhase::Idle);
    }

    #[tokio::test]
    async fn test_reorder_makes_no_service_call() {
        let service = Arc::new(MemoryTaskService::new(vec![
            Task::new(1u64, "First", "Pending"),
            Task::new(2u64, "Second", "Pending"),
        ]));
        let notifier = Arc::new(MemoryNotifier::new());
        let mut board = TaskBoard::new(service.clone(), notifier.clone(), &BoardConfig::default());
        board.load().await.unwrap();

        // Lift task 2 and drop it above task 1
        assert!(board.key_pick_up(2u64));
        assert!(board.key_nudge(Direction::Up));
        let resolution = board.key_drop().await.unwrap();

        assert!(matches!(resolution.drop, DropOutcome::Reordered { from: 1, to: 0, .. }));
        assert_eq!(resolution.moved, None);
        assert_eq!(ids(&board.board(), Column::ToDo), vec!["2", "1"]);
        assert!(service.updates().is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_status_lands_in_todo() {
        let service = Arc::new(MemoryTaskService::new(vec![Task::new(5u64, "Fix bike", "Blocked")]));
        let board = TaskBoard::new(service, Arc::new(MemoryNotifier::new()), &BoardConfig::default());
        board.load().await.unwrap();

        assert_eq!(ids(&board.board(), Column::ToDo), vec!["5"]);
    }

    #[tokio::test]
    async fn test_drop_in_empty_space_changes_nothing() {
        let (service, _notifier, mut board) = example_board().await;
        let before = board.snapshot();

        board.pointer_down(1u64, Point::new(100.0, 100.0), CARD);
        board.pointer_move(Point::new(150.0, 100.0));
        let resolution = board
            .pointer_up(Point::new(5000.0, 5000.0), &targets())
            .await
            .unwrap();

        assert_eq!(resolution.drop, DropOutcome::Cancelled);
        assert_eq!(board.snapshot(), before);
        assert!(service.updates().is_empty());
        assert_eq!(board.phase(), DragPhase::Idle);
    }

    #[tokio::test]
    async fn test_click_is_not_a_drag() {
        let (service, _notifier, mut board) = example_board().await;

        board.pointer_down(1u64, Point::new(100.0, 100.0), CARD);
        let resolution = board
            .pointer_up(Point::new(101.0, 100.0), &targets())
            .await
            .unwrap();

        assert_eq!(resolution.drop, DropOutcome::Click(1u64.into()));
        assert!(service.updates().is_empty());
    }

    #[tokio::test]
    async fn test_escape_cancels_keyboard_drag() {
        let (service, _notifier, mut board) = example_board().await;
        let before = board.snapshot();

        board.key_pick_up(1u64);
        board.key_nudge(Direction::Right);
        assert_eq!(board.cancel(), DropOutcome::Cancelled);

        assert_eq!(board.snapshot(), before);
        assert!(service.updates().is_empty());
        assert!(board.session().is_none());
    }

    #[tokio::test]
    async fn test_external_change_rebuilds_board() {
        let (_service, _notifier, board) = example_board().await;

        board.set_tasks(vec![
            Task::new(3u64, "New", "working"),
            Task::new(1u64, "Buy milk", "done"),
        ]);

        let snapshot = board.snapshot();
        assert!(snapshot.board.column(Column::ToDo).is_empty());
        assert_eq!(ids(&snapshot.board, Column::InProgress), vec!["3"]);
        assert_eq!(ids(&snapshot.board, Column::Completed), vec!["1"]);
    }

    #[tokio::test]
    async fn test_custom_vocabulary_written_on_move() {
        let service = Arc::new(MemoryTaskService::new(vec![Task::new(1u64, "A", "todo")]));
        let config = BoardConfig::from_json(
            r#"{ "vocabulary": { "in_progress_status": "doing", "in_progress": ["doing"] } }"#,
        )
        .unwrap();
        let mut board = TaskBoard::new(service.clone(), Arc::new(MemoryNotifier::new()), &config);
        board.load().await.unwrap();

        board.key_pick_up(1u64);
        board.key_nudge(Direction::Right);
        let resolution = board.key_drop().await.unwrap();

        assert_eq!(resolution.moved, Some(MoveOutcome::Confirmed));
        assert_eq!(service.updates(), vec![(TaskId::from(1u64), "doing".to_string())]);
        assert_eq!(ids(&board.board(), Column::InProgress), vec!["1"]);
    }

    #[tokio::test]
    async fn test_custom_literal_survives_reload() {
        let service = Arc::new(MemoryTaskService::new(vec![Task::new(1u64, "A", "Pending")]));
        let config =
            BoardConfig::from_json(r#"{ "vocabulary": { "completed_status": "Shipped" } }"#)
                .unwrap();
        let mut board = TaskBoard::new(service.clone(), Arc::new(MemoryNotifier::new()), &config);
        board.load().await.unwrap();

        board.key_pick_up(1u64);
        board.key_nudge(Direction::Right);
        board.key_nudge(Direction::Right);
        let resolution = board.key_drop().await.unwrap();
        assert_eq!(resolution.moved, Some(MoveOutcome::Confirmed));
        assert_eq!(service.updates(), vec![(TaskId::from(1u64), "Shipped".to_string())]);

        board.load().await.unwrap();

        let snapshot = board.snapshot();
        assert!(snapshot.board.column(Column::ToDo).is_empty());
        assert_eq!(ids(&snapshot.board, Column::Completed), vec!["1"]);
    }

    #[tokio::test]
    async fn test_task_changed_column_during_drag() {
        let (service, _notifier, mut board) = example_board().await;

        assert!(board.pointer_down(1u64, Point::new(100.0, 100.0), CARD));
        assert!(board.pointer_move(Point::new(300.0, 100.0)));
        board.set_tasks(vec![
            Task::new(1u64, "Buy milk", "In Progress"),
            Task::new(2u64, "Walk dog", "Completed"),
        ]);

        let resolution = board
            .pointer_up(Point::new(750.0, 100.0), &targets())
            .await
            .unwrap();

        assert_eq!(
            resolution.drop,
            DropOutcome::Move(MoveRequest {
                task_id: 1u64.into(),
                from: Column::InProgress,
                to: Column::Completed,
                index: None,
            })
        );
        assert_eq!(resolution.moved, Some(MoveOutcome::Confirmed));
        let snapshot = board.snapshot();
        assert!(snapshot.board.column(Column::InProgress).is_empty());
        assert_eq!(ids(&snapshot.board, Column::Completed), vec!["2", "1"]);
        assert!(snapshot.board.is_partition_of(&snapshot.tasks));
        assert_eq!(service.updates(), vec![(TaskId::from(1u64), "Completed".to_string())]);
    }
}
