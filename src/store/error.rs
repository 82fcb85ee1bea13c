use thiserror::Error;

use crate::model::TaskId;
use crate::remote::ApiError;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("task store call failed: {0}")]
    Api(#[from] ApiError),
    #[error("task {0} is not on the board")]
    NotFound(TaskId),
}
