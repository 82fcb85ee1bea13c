use thiserror::Error;

// Failures of a single call to the task store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("task store unreachable: {0}")]
    Transport(String),
    #[error("task store answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unable to decode task store response: {0}")]
    Decode(String),
    #[error("unable to build task store request: {0}")]
    Request(String),
}

impl ApiError {
    /// True when the store was reached and refused the call.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::Request(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
