mod error;
mod rest;
mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::model::{Task, TaskDraft, TaskId, UserId};
pub use error::ApiError;
pub use rest::HttpTaskApi;
pub use memory::MemoryTaskApi;

// Remote document store holding the tasks
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list(&self, user: &UserId) -> Result<Vec<Task>, ApiError>;
    async fn create(&self, draft: &TaskDraft, user: &UserId) -> Result<Task, ApiError>;
    async fn update(&self, id: &TaskId, draft: &TaskDraft) -> Result<Task, ApiError>;
    async fn delete(&self, id: &TaskId) -> Result<(), ApiError>;
}

#[async_trait]
impl<T> TaskApi for Arc<T>
where
    T: TaskApi + ?Sized,
{
    async fn list(&self, user: &UserId) -> Result<Vec<Task>, ApiError> {
        (**self).list(user).await
    }

    async fn create(&self, draft: &TaskDraft, user: &UserId) -> Result<Task, ApiError> {
        (**self).create(draft, user).await
    }

    async fn update(&self, id: &TaskId, draft: &TaskDraft) -> Result<Task, ApiError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        (**self).delete(id).await
    }
}
