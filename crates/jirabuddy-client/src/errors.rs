//! Failure taxonomy for the chat transport.
//!
//! None of these variants ever reach the conversation history verbatim; the
//! dispatch controller replaces every one of them with the same generic reply
//! and keeps the detail for the logs.

use thiserror::Error;

use crate::domain::models::Role;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Chat backend is unreachable: {0}")]
    Unreachable(String),
    #[error("Chat backend timed out")]
    Timeout,
    #[error("Chat backend responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Chat backend returned a malformed response: {0}")]
    MalformedResponse(String),
    #[error("Chat backend replied with unexpected role '{0}'")]
    UnexpectedRole(Role),
    #[error("Transport configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout;
        }

        if err.is_decode() {
            return TransportError::MalformedResponse(err.to_string());
        }

        TransportError::Unreachable(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::MalformedResponse(err.to_string())
    }
}
