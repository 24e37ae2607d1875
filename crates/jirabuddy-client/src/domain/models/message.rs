#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

use super::Role;
use crate::errors::TransportError;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            role,
            content: content.to_string(),
        };
    }

    pub fn user(content: &str) -> Message {
        return Message::new(Role::User, content);
    }

    pub fn assistant(content: &str) -> Message {
        return Message::new(Role::Assistant, content);
    }

    pub fn is_blank(&self) -> bool {
        return self.content.trim().is_empty();
    }

    /// Checks a message handed back by a transport before it may enter the
    /// history. Assistant and system replies pass through untouched.
    pub fn into_reply(self) -> Result<Message, TransportError> {
        if self.role == Role::User {
            return Err(TransportError::UnexpectedRole(self.role));
        }

        if self.is_blank() {
            return Err(TransportError::MalformedResponse(
                "reply content is empty".to_string(),
            ));
        }

        return Ok(self);
    }
}
