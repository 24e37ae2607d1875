//! Conversation session manager for the JiraBuddy chat client.
//!
//! This crate owns the ordered message history of a conversation with the Jira
//! agent backend, dispatches each user turn to a stateless chat endpoint, and
//! reconciles the reply (or a failure) back into the history. Rendering is left
//! to whichever front end subscribes to the session.

pub mod configuration;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    ChatTransport, ChatTransportBox, Message, Role, SessionEvent, Status,
};
pub use domain::services::{
    DispatchController, IgnoreReason, SessionStore, SubmitOutcome, TRANSPORT_FAILURE_TEXT,
};
pub use errors::TransportError;
pub use infrastructure::clients::{HttpChatTransport, ToolInfo, TransportFactory};
