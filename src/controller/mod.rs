mod error;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

pub use error::ControllerError;

use crate::model::TaskId;
use crate::remote::TaskApi;
use crate::session::{GateDecision, Session, SessionGate};
use crate::store::TaskListStore;
use crate::view::{self, EditForm, Filter, FormMode, Notice, Operation, TaskItemView};

/// The task board of one signed in user.
///
/// Nothing is fetched until the session gate settles. Every action waits for
/// the task store and only then touches the local list.
pub struct Board<A> {
    gate: SessionGate,
    store: TaskListStore<A>,
    session: Option<Session>,
}

impl<A> Board<A>
where
    A: TaskApi,
{
    pub fn new(gate: SessionGate, store: TaskListStore<A>) -> Self {
        Self {
            gate,
            store,
            session: None,
        }
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    pub fn store(&self) -> &TaskListStore<A> {
        &self.store
    }

    pub fn session(&self) -> Result<&Session, ControllerError> {
        self.session.as_ref().ok_or(ControllerError::NotOpened)
    }

    /// Waits for the session and loads its tasks. The returned notice, if
    /// any, reports a failed fetch.
    #[instrument(skip(self))]
    pub async fn open(&mut self) -> Result<Option<Notice>, ControllerError> {
        match self.gate.settled().await {
            GateDecision::Proceed(session) => {
                info!(user = %session.user_id, "opening board");
                self.session = Some(session);
                self.refresh().await
            }
            GateDecision::RedirectToSignIn | GateDecision::Loading => {
                warn!("no session, sign in required");
                Err(ControllerError::SignInRequired)
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<Option<Notice>, ControllerError> {
        let user = self.session()?.user_id.clone();
        let outcome = self.store.list(&user).await.map(|_| ());
        Ok(Notice::for_outcome(Operation::Fetch, &outcome))
    }

    pub async fn submit(&mut self, form: &mut EditForm) -> Result<Option<Notice>, ControllerError> {
        let session = self.session()?.clone();
        let operation = match form.mode() {
            FormMode::Create => Operation::Create,
            FormMode::Edit(_) => Operation::Update,
        };
        let outcome = form.submit(&mut self.store, &session).await;
        Ok(Notice::for_outcome(operation, &outcome))
    }

    pub async fn delete(&mut self, id: &TaskId) -> Result<Option<Notice>, ControllerError> {
        self.session()?;
        let outcome = self.store.delete(id).await;
        Ok(Notice::for_outcome(Operation::Delete, &outcome))
    }

    pub fn items(&self, today: NaiveDate, filter: &Filter) -> Vec<TaskItemView<'_>> {
        view::render(self.store.tasks(), today, filter)
    }
}
