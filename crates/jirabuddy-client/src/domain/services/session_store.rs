#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tokio::sync::mpsc;

use crate::domain::models::Message;
use crate::domain::models::SessionEvent;
use crate::domain::models::Status;

#[derive(Default)]
struct SessionState {
    history: Vec<Message>,
    status: Status,
}

/// Holds the conversation history and request status. It applies no business
/// rules; only the dispatch controller mutates it, everyone else reads or
/// subscribes.
#[derive(Default)]
pub struct SessionStore {
    state: Mutex<SessionState>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<SessionEvent>>>,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        return SessionStore::default();
    }

    pub fn snapshot(&self) -> Vec<Message> {
        return self.state().history.clone();
    }

    pub fn status(&self) -> Status {
        return self.state().status;
    }

    pub fn len(&self) -> usize {
        return self.state().history.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.state().history.is_empty();
    }

    pub fn last_message(&self) -> Option<Message> {
        return self.state().history.last().cloned();
    }

    /// Registers an observer. Events are delivered in mutation order; a dropped
    /// receiver is forgotten on the next notification.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers().push(tx);
        return rx;
    }

    /// Returns false and leaves the history untouched for blank content.
    pub(crate) fn append_message(&self, message: Message) -> bool {
        if message.is_blank() {
            tracing::warn!(role = %message.role, "refusing to append blank message");
            return false;
        }

        let mut state = self.state();
        let index = state.history.len();
        state.history.push(message.clone());
        self.notify(SessionEvent::MessageAppended { index, message });

        return true;
    }

    pub(crate) fn set_status(&self, status: Status) {
        let mut state = self.state();
        state.status = status;
        self.notify(SessionEvent::StatusChanged(status));
    }

    pub(crate) fn clear(&self) {
        let mut state = self.state();
        state.history.clear();
        self.notify(SessionEvent::Reset);
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        return self.state.lock().unwrap_or_else(PoisonError::into_inner);
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<mpsc::UnboundedSender<SessionEvent>>> {
        return self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
    }

    // Called with the state lock held so observers see events in mutation order.
    fn notify(&self, event: SessionEvent) {
        self.subscribers()
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
