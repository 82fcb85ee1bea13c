use chrono::{Local, NaiveDate};
use std::fmt;

use crate::model::task::format_task_date;
use crate::model::{Task, TaskStatus};

/// A task is overdue once its date lies more than this many days back.
pub const OVERDUE_AFTER_DAYS: i64 = 2;

/// Today's calendar date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Compares calendar dates only, so the threshold does not move with the
/// time of day or the timezone the date was stored in.
pub fn is_overdue(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match date {
        Some(date) => today.signed_duration_since(date).num_days() > OVERDUE_AFTER_DAYS,
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Default,
    Alert,
    Success,
}

impl From<TaskStatus> for Tone {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Normal => Tone::Default,
            TaskStatus::Important => Tone::Alert,
            TaskStatus::Completed => Tone::Success,
        }
    }
}

/// One task as displayed on the board. `overdue` is derived on every render
/// and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItemView<'a> {
    pub task: &'a Task,
    pub overdue: bool,
}

impl<'a> TaskItemView<'a> {
    pub fn new(task: &'a Task, today: NaiveDate) -> Self {
        Self {
            task,
            overdue: is_overdue(task.date, today),
        }
    }

    pub fn label(&self) -> &'static str {
        self.task.status.label()
    }

    pub fn tone(&self) -> Tone {
        Tone::from(self.task.status)
    }

    pub fn date_text(&self) -> String {
        self.task
            .date
            .as_ref()
            .map(format_task_date)
            .unwrap_or_else(|| "-".to_string())
    }
}

impl fmt::Display for TaskItemView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.overdue { "!" } else { " " };
        write!(
            f,
            "{}{:<10} {:<10} {:<26} {}",
            marker,
            self.date_text(),
            self.label(),
            self.task.id,
            self.task.title
        )?;
        if !self.task.description.is_empty() {
            write!(f, "\n{:>12}{}", "", self.task.description)?;
        }
        Ok(())
    }
}
