use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatTransport;
use crate::domain::models::Message;
use crate::errors::TransportError;

/// A tool advertised by the backend's MCP session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "inputSchema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_schema: Option<Value>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ToolList {
    tools: Vec<ToolInfo>,
}

/// Talks to the JiraBuddy backend over its JSON API:
/// `POST /api/chat`, `GET /health`, `GET /api/tools`, `POST /api/tools/{name}`.
#[derive(Clone)]
pub struct HttpChatTransport {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpChatTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config() -> Result<Self> {
        let transport = HttpChatTransport::new(&Config::get(ConfigKey::ServerUrl))
            .with_timeout(Config::request_timeout()?);
        Ok(transport)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>, TransportError> {
        let url = self.url("/api/tools")?;
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let list: ToolList = serde_json::from_str(&body)?;

        Ok(list.tools)
    }

    /// Invokes a backend tool directly, outside of any conversation.
    pub async fn call_tool(&self, tool_name: &str, arguments: Value) -> Result<Value, TransportError> {
        let url = self.url(&format!("/api/tools/{tool_name}"))?;
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&arguments)
            .send()
            .await?;

        let body = Self::success_body(response).await?;

        Ok(serde_json::from_str(&body)?)
    }

    fn url(&self, path: &str) -> Result<String, TransportError> {
        if self.base_url.is_empty() {
            return Err(TransportError::Configuration(
                "server URL is not defined".to_string(),
            ));
        }

        Ok(format!("{}{}", self.base_url, path))
    }

    async fn success_body(response: reqwest::Response) -> Result<String, TransportError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "chat backend request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn health_check(&self) -> Result<(), TransportError> {
        let url = self.url("/health")?;
        let res = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await;

        let response = match res {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = ?err, "chat backend is not reachable");
                return Err(err.into());
            }
        };

        Self::success_body(response).await?;

        Ok(())
    }

    async fn send_messages(&self, messages: Vec<Message>) -> Result<Message, TransportError> {
        let url = self.url("/api/chat")?;
        let res = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&ChatRequest {
                messages: &messages,
            })
            .send()
            .await;

        let response = match res {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = ?err, "chat request could not be delivered");
                return Err(err.into());
            }
        };

        let body = Self::success_body(response).await?;
        match serde_json::from_str::<Message>(&body) {
            Ok(message) => Ok(message),
            Err(err) => {
                tracing::error!(error = %err, body = %body, "chat backend returned an undecodable reply");
                Err(err.into())
            }
        }
    }
}
