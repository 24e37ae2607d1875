mod http_chat;

use anyhow::Result;

pub use http_chat::*;

use crate::domain::models::ChatTransportBox;

pub struct TransportFactory {}

impl TransportFactory {
    pub fn create_http_client(base_url: &str) -> ChatTransportBox {
        return Box::new(HttpChatTransport::new(base_url));
    }

    /// Builds the HTTP transport from the loaded configuration.
    pub fn from_config() -> Result<ChatTransportBox> {
        return Ok(Box::new(HttpChatTransport::from_config()?));
    }
}
