use tracing::{error, info, instrument};

use super::error::StoreError;
use crate::model::{Task, TaskDraft, TaskId, UserId};
use crate::remote::TaskApi;

/// Stable sort putting the most recent date first. Undated tasks go last.
pub fn sort_newest_first(tasks: &mut [Task]) {
    // Option orders None below any date, so reversing the comparison keeps
    // undated tasks at the end.
    tasks.sort_by(|a, b| b.date.cmp(&a.date));
}

/// In-memory copy of one user's tasks, kept newest first and changed only
/// after the task store confirmed the change.
pub struct TaskListStore<A> {
    api: A,
    tasks: Vec<Task>,
}

impl<A> TaskListStore<A>
where
    A: TaskApi,
{
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == *id)
    }

    #[instrument(skip(self))]
    pub async fn list(&mut self, user: &UserId) -> Result<&[Task], StoreError> {
        match self.api.list(user).await {
            Ok(mut tasks) => {
                sort_newest_first(&mut tasks);
                info!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
                Ok(&self.tasks)
            }
            Err(err) => {
                error!(reason = %err, "Unable to fetch tasks.");
                Err(err.into())
            }
        }
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&mut self, draft: &TaskDraft, user: &UserId) -> Result<Task, StoreError> {
        let task = self.api.create(draft, user).await.map_err(|err| {
            error!(reason = %err, "Unable to create task.");
            StoreError::from(err)
        })?;
        info!(id = %task.id, "task created");
        self.tasks.insert(0, task.clone());
        sort_newest_first(&mut self.tasks);
        Ok(task)
    }

    /// Replaces the task carrying the same id. The caller has already stored
    /// `updated` remotely.
    #[instrument(skip(self, updated), fields(id = %updated.id))]
    pub fn update(&mut self, updated: Task) -> Result<(), StoreError> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|task| task.id == updated.id)
            .ok_or_else(|| StoreError::NotFound(updated.id.clone()))?;
        *slot = updated;
        sort_newest_first(&mut self.tasks);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &TaskId) -> Result<(), StoreError> {
        if let Err(err) = self.api.delete(id).await {
            error!(reason = %err, "Unable to delete task.");
            return Err(err.into());
        }
        self.tasks.retain(|task| task.id != *id);
        info!("task deleted");
        Ok(())
    }
}
