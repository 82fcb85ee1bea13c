mod error;
mod task_list;

pub use error::StoreError;
pub use task_list::{sort_newest_first, TaskListStore};
