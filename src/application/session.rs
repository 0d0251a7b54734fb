//! FlowSession - one user's assessment, wired to progress persistence.
//!
//! The session owns a `FlowMachine`. Every accepted event hands its
//! `ProgressPatch` to the save queue when a user is bound and persistence
//! is enabled; the returned view never waits on storage.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use super::SaveQueue;
use crate::domain::flow::{
    FlowContent, FlowError, FlowEvent, FlowMachine, FlowState, FlowView, Identity,
};
use crate::domain::foundation::{SessionId, UserId};
use crate::ports::ProgressStore;

pub struct FlowSession {
    id: SessionId,
    user_id: Option<UserId>,
    machine: FlowMachine,
    store: Arc<dyn ProgressStore>,
    saves: SaveQueue,
    persist: bool,
}

impl FlowSession {
    /// Creates a session at the intro phase.
    ///
    /// Without a `user_id` nothing is loaded or saved.
    pub fn new(
        content: Arc<FlowContent>,
        user_id: Option<UserId>,
        store: Arc<dyn ProgressStore>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            machine: FlowMachine::new(content),
            saves: SaveQueue::new(Arc::clone(&store)),
            store,
            persist: true,
        }
    }

    /// Turns saving of transitions on or off.
    pub fn with_persistence(mut self, enabled: bool) -> Self {
        self.persist = enabled;
        self
    }

    /// Seeds the identity shown in views, e.g. from an account profile.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.machine.set_identity(identity);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn state(&self) -> &FlowState {
        self.machine.state()
    }

    pub fn view(&self) -> FlowView {
        self.machine.view()
    }

    /// Restores stored progress for the bound user.
    ///
    /// A missing record, a failed load, or no bound user all leave the
    /// session at a fresh intro.
    pub async fn resume(&mut self) -> FlowView {
        let Some(user_id) = self.user_id.clone() else {
            debug!(session_id = %self.id, "No user bound, starting fresh");
            return self.view();
        };

        match self.store.load(&user_id).await {
            Ok(Some(record)) => {
                self.machine.restore(&record);
                info!(
                    session_id = %self.id,
                    user_id = %user_id,
                    phase = %record.current_step,
                    "Resumed stored progress"
                );
            }
            Ok(None) => {
                debug!(session_id = %self.id, user_id = %user_id, "No stored progress");
            }
            Err(e) => {
                warn!(
                    session_id = %self.id,
                    user_id = %user_id,
                    error = %e,
                    "Failed to load progress, starting fresh"
                );
            }
        }
        self.view()
    }

    /// Applies an event and schedules its save.
    pub fn dispatch(&mut self, event: FlowEvent) -> Result<FlowView, FlowError> {
        let _span = info_span!("flow_session", session_id = %self.id).entered();
        let transition = self.machine.apply(event)?;

        if let (true, Some(user_id)) = (self.persist, &self.user_id) {
            self.saves.enqueue(user_id.clone(), transition.patch);
        }

        Ok(self.view())
    }

    pub fn start(&mut self) -> Result<FlowView, FlowError> {
        self.dispatch(FlowEvent::Start)
    }

    /// Submits the identity fields; the name step reads `name`, the age step reads `age`.
    pub fn submit_identity(&mut self, name: &str, age: u32) -> Result<FlowView, FlowError> {
        self.dispatch(FlowEvent::IdentitySubmitted(Identity::new(name, age)))
    }

    pub fn continue_flow(&mut self) -> Result<FlowView, FlowError> {
        self.dispatch(FlowEvent::Continue)
    }

    pub fn select_answer(&mut self, answer_index: usize) -> Result<FlowView, FlowError> {
        self.dispatch(FlowEvent::AnswerSelected { answer_index })
    }

    pub fn select_career(&mut self, title: &str) -> Result<FlowView, FlowError> {
        self.dispatch(FlowEvent::CareerSelected {
            title: title.to_string(),
        })
    }

    pub fn select_story_choice(&mut self, choice_index: usize) -> Result<FlowView, FlowError> {
        self.dispatch(FlowEvent::StoryChoiceSelected { choice_index })
    }

    pub fn restart(&mut self) -> Result<FlowView, FlowError> {
        self.dispatch(FlowEvent::Restart)
    }

    /// Waits for every pending save.
    pub async fn flush(&self) {
        self.saves.flush().await;
    }
}
