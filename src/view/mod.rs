pub mod form;
pub mod item;
pub mod notice;

use chrono::NaiveDate;

use crate::model::{Task, TaskStatus};
pub use form::{EditForm, FormMode};
pub use item::{is_overdue, today, TaskItemView, Tone};
pub use notice::{Level as NoticeLevel, Notice, Operation};

/// Narrows the rendered board. The default shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub status: Option<TaskStatus>,
    pub overdue_only: bool,
}

impl Filter {
    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            overdue_only: false,
        }
    }

    pub fn overdue() -> Self {
        Self {
            status: None,
            overdue_only: true,
        }
    }

    pub fn matches(&self, item: &TaskItemView) -> bool {
        if let Some(status) = self.status {
            if item.task.status != status {
                return false;
            }
        }
        !self.overdue_only || item.overdue
    }
}

/// Item views for `tasks`, in collection order.
pub fn render<'a>(tasks: &'a [Task], today: NaiveDate, filter: &Filter) -> Vec<TaskItemView<'a>> {
    tasks
        .iter()
        .map(|task| TaskItemView::new(task, today))
        .filter(|item| filter.matches(item))
        .collect()
}
