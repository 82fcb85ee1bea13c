use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("sign in required")]
    SignInRequired,
    #[error("the board has not been opened for a session")]
    NotOpened,
}
