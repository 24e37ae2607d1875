use super::Message;
use super::Status;

/// Change notification published by the session store to its subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    MessageAppended { index: usize, message: Message },
    StatusChanged(Status),
    Reset,
}
