use async_trait::async_trait;

use crate::domain::models::Message;
use crate::errors::TransportError;

/// Request/response contract with the chat backend. Each call carries the full
/// conversation, oldest first, and yields exactly one reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn health_check(&self) -> Result<(), TransportError>;
    async fn send_messages(&self, messages: Vec<Message>) -> Result<Message, TransportError>;
}

pub type ChatTransportBox = Box<dyn ChatTransport>;
