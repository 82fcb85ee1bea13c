use thiserror::Error;

// Errors raised while reading task fields from user input or the wire
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown task status: {0:?}.")]
    UnknownStatus(String),
    #[error("Invalid task date {0:?}, expecting YYYY-MM-DD.")]
    InvalidDate(String),
}
