use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::{ApiError, TaskApi};
use crate::model::{Task, TaskDraft, TaskId, UserId};

/// Task store kept in process memory, in insertion order.
///
/// Stands in for the remote store when none is reachable, e.g. in tests. It
/// can be switched to `unavailable` to make every call fail with a 503.
pub struct MemoryTaskApi {
    tasks: Mutex<Vec<Task>>,
    unavailable: AtomicBool,
}

impl MemoryTaskApi {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<(), ApiError> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(ApiError::Status {
                status: 503,
                body: "task store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MemoryTaskApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &TaskId) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("task {} not found", id),
    }
}

#[async_trait]
impl TaskApi for MemoryTaskApi {
    async fn list(&self, user: &UserId) -> Result<Vec<Task>, ApiError> {
        self.check_available()?;
        let tasks = self.lock();
        Ok(tasks
            .iter()
            .filter(|task| task.user_id == *user)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &TaskDraft, user: &UserId) -> Result<Task, ApiError> {
        self.check_available()?;
        let task = Task {
            id: TaskId::from(Uuid::new_v4().simple().to_string()),
            user_id: user.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: draft.date,
            status: draft.status,
        };
        self.lock().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.check_available()?;
        let mut tasks = self.lock();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == *id)
            .ok_or_else(|| not_found(id))?;
        task.title = draft.title.clone();
        task.description = draft.description.clone();
        task.date = draft.date;
        task.status = draft.status;
        Ok(task.clone())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        self.check_available()?;
        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.retain(|task| task.id != *id);
        if tasks.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
