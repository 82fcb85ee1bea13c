//! Authentication status as seen by the board.
//!
//! The status starts `Pending`, a [`SessionSource`] resolves it once, and the
//! [`SessionGate`] turns it into what the board should do next. The resolved
//! [`Session`] is handed explicitly to every call that needs the user.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::model::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub email: Option<String>,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            email: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Pending,
    Authenticated(Session),
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Show a loading placeholder, fetch nothing.
    Loading,
    RedirectToSignIn,
    Proceed(Session),
}

pub fn decide(status: &AuthStatus) -> GateDecision {
    match status {
        AuthStatus::Pending => GateDecision::Loading,
        AuthStatus::Authenticated(session) => GateDecision::Proceed(session.clone()),
        AuthStatus::Unauthenticated => GateDecision::RedirectToSignIn,
    }
}

/// Resolves who is signed in.
#[async_trait]
pub trait SessionSource: Send + Sync + 'static {
    async fn resolve(&self) -> anyhow::Result<Option<Session>>;
}

/// Session known up front, from configuration or the command line.
pub struct StaticSession(Option<Session>);

impl StaticSession {
    pub fn new(session: Option<Session>) -> Self {
        Self(session)
    }
}

#[async_trait]
impl SessionSource for StaticSession {
    async fn resolve(&self) -> anyhow::Result<Option<Session>> {
        Ok(self.0.clone())
    }
}

pub struct SessionGate {
    status: watch::Receiver<AuthStatus>,
}

impl SessionGate {
    pub fn new(status: watch::Receiver<AuthStatus>) -> Self {
        Self { status }
    }

    /// Starts resolving `source` in the background and returns a gate
    /// observing the outcome. A failed resolution counts as signed out.
    pub fn authenticate<S: SessionSource>(source: S) -> Self {
        let (tx_status, rx_status) = watch::channel(AuthStatus::Pending);
        tokio::spawn(async move {
            let status = match source.resolve().await {
                Ok(Some(session)) => {
                    info!(user = %session.user_id, "session authenticated");
                    AuthStatus::Authenticated(session)
                }
                Ok(None) => AuthStatus::Unauthenticated,
                Err(err) => {
                    warn!(reason = %err, "session check failed");
                    AuthStatus::Unauthenticated
                }
            };
            // nobody watching any more
            let _ = tx_status.send(status);
        });
        Self::new(rx_status)
    }

    pub fn current(&self) -> GateDecision {
        decide(&self.status.borrow())
    }

    /// Waits for the status to leave `Pending`. A source that goes away
    /// while still pending leaves the user signed out.
    pub async fn settled(&mut self) -> GateDecision {
        loop {
            let decision = self.current();
            if decision != GateDecision::Loading {
                return decision;
            }
            if self.status.changed().await.is_err() {
                return match self.current() {
                    GateDecision::Loading => GateDecision::RedirectToSignIn,
                    decision => decision,
                };
            }
        }
    }
}
