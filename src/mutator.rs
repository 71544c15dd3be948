//! Optimistic cross-column moves.
//!
//! A move is applied to the [`BoardStore`] first, then persisted through the
//! [`TaskService`]. When persisting fails or times out the board is resynced
//! from a fresh fetch rather than undone step by step, so the user may see the
//! card snap back. If that fetch fails too, the snapshot taken before the move
//! is restored.
//!
//! Only one move may be in flight. A second call while the first is pending
//! fails with [`BoardError::MutationInFlight`] and changes nothing.

use crate::{
    config::BoardConfig,
    domain::Column,
    drag::MoveRequest,
    error::{BoardError, Result},
    service::{NotificationKind, Notifier, TaskService},
    store::{BoardSnapshot, BoardStore},
};
use std::{sync::Arc, time::Duration};
use tokio::{sync::Mutex, time};
use tracing::{error, info, warn};

/// How a move ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task service accepted the update; the optimistic board stands
    Confirmed,
    /// The update failed and the board was rebuilt from a fresh fetch
    Resynced,
    /// The update and the refetch both failed; the pre-move board was restored
    RolledBack,
}

pub struct Mutator<S: TaskService, N: Notifier> {
    service: Arc<S>,
    notifier: Arc<N>,
    persist_timeout: Duration,
    in_flight: Mutex<()>,
}

impl<S: TaskService, N: Notifier> Mutator<S, N> {
    pub fn new(service: Arc<S>, notifier: Arc<N>, persist_timeout: Duration) -> Self {
        Self {
            service,
            notifier,
            persist_timeout,
            in_flight: Mutex::new(()),
        }
    }

    pub fn from_config(service: Arc<S>, notifier: Arc<N>, config: &BoardConfig) -> Self {
        Self::new(service, notifier, config.persist_timeout())
    }

    /// Whether a move is currently waiting on the task service
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Moves a task to another column.
    ///
    /// Returns `Err` only when the move could not start: another move is in
    /// flight, or the request does not match the board. Persistence failures
    /// are reported through the notifier and end in `Resynced` or
    /// `RolledBack`.
    pub async fn move_task(&self, store: &BoardStore, request: &MoveRequest) -> Result<MoveOutcome> {
        let _slot = self
            .in_flight
            .try_lock()
            .map_err(|_| BoardError::MutationInFlight)?;

        let raw_status = store.mapper().to_raw_status(request.to).to_string();
        let previous = store.snapshot();
        store.apply_move(request, &raw_status)?;
        info!(
            task = %request.task_id,
            from = %request.from,
            to = %request.to,
            status = %raw_status,
            "applied optimistic move"
        );

        match self.persist(request, &raw_status).await {
            Ok(()) => {
                info!(task = %request.task_id, "status update confirmed");
                self.notifier
                    .notify(&success_message(request.to), NotificationKind::Success);
                Ok(MoveOutcome::Confirmed)
            }
            Err(e) => {
                warn!(task = %request.task_id, error = %e, "status update failed; resyncing");
                self.notifier
                    .notify("Failed to update task status", NotificationKind::Error);
                Ok(self.reconcile(store, previous).await)
            }
        }
    }

    async fn persist(&self, request: &MoveRequest, raw_status: &str) -> Result<()> {
        let update = self
            .service
            .update_task_status(&request.task_id, raw_status);
        match time::timeout(self.persist_timeout, update).await {
            Ok(result) => result,
            Err(_) => Err(BoardError::PersistTimeout(self.persist_timeout)),
        }
    }

    async fn reconcile(&self, store: &BoardStore, previous: BoardSnapshot) -> MoveOutcome {
        match self.service.fetch_tasks().await {
            Ok(tasks) => {
                info!(tasks = tasks.len(), "board resynced from task service");
                store.replace_tasks(tasks);
                MoveOutcome::Resynced
            }
            Err(e) => {
                error!(error = %e, "refetch after failed update also failed; restoring previous board");
                store.restore(previous);
                MoveOutcome::RolledBack
            }
        }
    }
}

fn success_message(column: Column) -> String {
    format!("Task moved to {}", column)
}
