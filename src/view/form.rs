use tracing::{error, info};

use crate::model::task::parse_task_date;
use crate::model::{ModelError, Task, TaskDraft, TaskId, TaskStatus};
use crate::remote::TaskApi;
use crate::session::Session;
use crate::store::{StoreError, TaskListStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

/// Modal form for adding or editing one task.
///
/// A successful submit closes the form. A failed submit leaves it open with
/// the fields untouched so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    mode: FormMode,
    fields: TaskDraft,
    open: bool,
}

impl EditForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: TaskDraft::default(),
            open: true,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id.clone()),
            fields: task.draft(),
            open: true,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn fields(&self) -> &TaskDraft {
        &self.fields
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.fields.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.description = description.into();
    }

    /// Takes the date as typed; blank clears it.
    pub fn set_date(&mut self, date: &str) -> Result<(), ModelError> {
        self.fields.date = parse_task_date(date)?;
        Ok(())
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.fields.status = status;
    }

    /// Sends the full field set to the task store and reconciles the board.
    pub async fn submit<A: TaskApi>(
        &mut self,
        store: &mut TaskListStore<A>,
        session: &Session,
    ) -> Result<Task, StoreError> {
        let task = match &self.mode {
            FormMode::Create => store.create(&self.fields, &session.user_id).await?,
            FormMode::Edit(id) => {
                let task = store.api().update(id, &self.fields).await.map_err(|err| {
                    error!(id = %id, reason = %err, "Unable to update task.");
                    StoreError::from(err)
                })?;
                store.update(task.clone())?;
                info!(id = %id, "task updated");
                task
            }
        };
        self.open = false;
        Ok(task)
    }
}
