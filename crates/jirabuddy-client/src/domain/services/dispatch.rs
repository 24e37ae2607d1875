#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tokio::task::JoinHandle;

use super::SessionStore;
use crate::domain::models::ChatTransportBox;
use crate::domain::models::Message;
use crate::domain::models::Status;
use crate::errors::TransportError;

/// Shown in place of any reply the transport failed to produce.
pub const TRANSPORT_FAILURE_TEXT: &str = "Error: Could not connect to the chatbot.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The transport answered and its reply was appended.
    Replied,
    /// The transport failed and the generic failure reply was appended.
    Failed,
    /// Nothing was sent and the session is unchanged.
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        return !matches!(self, SubmitOutcome::Ignored(_));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Awaiting,
}

/// Holds the `Awaiting` phase for one dispatch. Dropping it, on any exit path
/// including a cancelled future, publishes `Idle` and reopens the controller.
/// A user turn left without an answer gets the failure reply first.
struct AwaitingGuard<'a> {
    phase: &'a Mutex<Phase>,
    store: &'a SessionStore,
    answered: bool,
}

impl AwaitingGuard<'_> {
    fn answer(&mut self, reply: Message) {
        self.store.append_message(reply);
        self.answered = true;
    }
}

impl Drop for AwaitingGuard<'_> {
    fn drop(&mut self) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.answered {
            tracing::warn!("chat request abandoned before the backend answered");
            self.store
                .append_message(Message::assistant(TRANSPORT_FAILURE_TEXT));
            self.store.set_status(Status::Error);
        }
        self.store.set_status(Status::Idle);
        *phase = Phase::Idle;
    }
}

/// Drives the conversation: the only component that mutates the session
/// store, and the single-flight gate in front of the transport.
pub struct DispatchController {
    store: Arc<SessionStore>,
    transport: ChatTransportBox,
    phase: Mutex<Phase>,
}

impl DispatchController {
    pub fn new(transport: ChatTransportBox) -> DispatchController {
        return DispatchController::with_store(Arc::new(SessionStore::new()), transport);
    }

    pub fn with_store(store: Arc<SessionStore>, transport: ChatTransportBox) -> DispatchController {
        return DispatchController {
            store,
            transport,
            phase: Mutex::new(Phase::Idle),
        };
    }

    pub fn store(&self) -> Arc<SessionStore> {
        return self.store.clone();
    }

    pub async fn submit(&self, raw_input: &str) -> SubmitOutcome {
        let text = raw_input.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        let (mut guard, request) = match self.begin(text) {
            Some(started) => started,
            None => {
                tracing::debug!("submission dropped, a request is already in flight");
                return SubmitOutcome::Ignored(IgnoreReason::Busy);
            }
        };

        tracing::debug!(messages = request.len(), "sending conversation to chat backend");

        let outcome = match self.transport.send_messages(request).await {
            Ok(reply) => match reply.into_reply() {
                Ok(reply) => {
                    guard.answer(reply);
                    SubmitOutcome::Replied
                }
                Err(err) => self.fail(&mut guard, err),
            },
            Err(err) => self.fail(&mut guard, err),
        };

        drop(guard);

        return outcome;
    }

    /// Fire-and-forget variant of [`DispatchController::submit`]. Completion is
    /// observed through the store.
    pub fn spawn_submit(self: &Arc<Self>, raw_input: impl Into<String>) -> JoinHandle<SubmitOutcome> {
        let controller = self.clone();
        let raw_input = raw_input.into();
        return tokio::spawn(async move { controller.submit(&raw_input).await });
    }

    /// Starts a new conversation. Refused while a request is in flight so a
    /// late reply cannot land in the fresh history.
    pub fn reset(&self) -> bool {
        let phase = self.phase();
        if *phase != Phase::Idle {
            return false;
        }

        self.store.clear();
        return true;
    }

    // Check-and-acquire, append, status change and snapshot happen under one
    // lock so a concurrent submit can neither slip in nor observe a half state.
    fn begin(&self, text: &str) -> Option<(AwaitingGuard<'_>, Vec<Message>)> {
        let mut phase = self.phase();
        if *phase != Phase::Idle {
            return None;
        }

        *phase = Phase::Awaiting;
        self.store.append_message(Message::user(text));
        self.store.set_status(Status::Pending);
        let request = self.store.snapshot();
        drop(phase);

        let guard = AwaitingGuard {
            phase: &self.phase,
            store: &self.store,
            answered: false,
        };

        return Some((guard, request));
    }

    fn fail(&self, guard: &mut AwaitingGuard<'_>, err: TransportError) -> SubmitOutcome {
        tracing::warn!(error = %err, "chat request failed");
        guard.answer(Message::assistant(TRANSPORT_FAILURE_TEXT));
        self.store.set_status(Status::Error);
        return SubmitOutcome::Failed;
    }

    fn phase(&self) -> MutexGuard<'_, Phase> {
        return self.phase.lock().unwrap_or_else(PoisonError::into_inner);
    }
}
