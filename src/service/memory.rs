use crate::{
    domain::{Task, TaskId},
    error::{BoardError, Result},
    service::TaskService,
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

/// In-process task service.
///
/// Accepted status updates are applied to the held task list. Failures can be
/// switched on to exercise the board's reconciliation path.
#[derive(Debug, Default)]
pub struct MemoryTaskService {
    tasks: Mutex<Vec<Task>>,
    updates: Mutex<Vec<(TaskId, String)>>,
    fail_updates: AtomicBool,
    fail_fetches: AtomicBool,
}

impl MemoryTaskService {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    /// Makes every following status update fail
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Makes every following fetch fail
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Replaces the held tasks, as if another client had changed them
    pub fn set_tasks(&self, tasks: Vec<Task>) -> Result<()> {
        *lock(&self.tasks)? = tasks;
        Ok(())
    }

    /// Status updates received so far, including rejected ones
    pub fn updates(&self) -> Vec<(TaskId, String)> {
        lock(&self.updates).map(|u| u.clone()).unwrap_or_default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| BoardError::Service("task service lock poisoned".to_string()))
}

#[async_trait]
impl TaskService for MemoryTaskService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(BoardError::Service("fetch rejected".to_string()));
        }
        Ok(lock(&self.tasks)?.clone())
    }

    async fn update_task_status(&self, id: &TaskId, raw_status: &str) -> Result<()> {
        lock(&self.updates)?.push((id.clone(), raw_status.to_string()));

        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(BoardError::Service("update rejected".to_string()));
        }

        let mut tasks = lock(&self.tasks)?;
        let task = tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound(id.to_string()))?;
        task.status = raw_status.to_string();
        Ok(())
    }
}
