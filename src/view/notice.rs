use std::fmt;

use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// Board operation a notice reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn success(&self) -> Option<&'static str> {
        match self {
            Operation::Fetch => None,
            Operation::Create => Some("Task created successfully!"),
            Operation::Update => Some("Task updated successfully!"),
            Operation::Delete => Some("Task deleted successfully!"),
        }
    }

    // The store refused the call.
    fn rejected(&self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch tasks",
            Operation::Create => "Failed to create task",
            Operation::Update => "Failed to update task",
            Operation::Delete => "Failed to delete task",
        }
    }

    // The call never got a usable answer.
    fn broken(&self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch tasks",
            Operation::Create => "An error occurred while creating the task",
            Operation::Update => "An error occurred while updating the task",
            Operation::Delete => "An error occurred while deleting the task",
        }
    }
}

/// User facing message about the outcome of an operation. Error details stay
/// in the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// `None` when the operation succeeded quietly.
    pub fn for_outcome<T>(operation: Operation, outcome: &Result<T, StoreError>) -> Option<Self> {
        match outcome {
            Ok(_) => operation.success().map(|message| Notice::success(message)),
            Err(err) => Some(Notice::for_error(operation, err)),
        }
    }

    pub fn for_error(operation: Operation, err: &StoreError) -> Self {
        let message = match err {
            StoreError::Api(api_err) if !api_err.is_rejection() => operation.broken(),
            _ => operation.rejected(),
        };
        Notice::error(message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Success => write!(f, "[ok] {}", self.message),
            Level::Error => write!(f, "[error] {}", self.message),
        }
    }
}
