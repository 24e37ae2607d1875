use std::time::Duration;

use serde_json::json;
use serde_json::Value;

/// One scripted answer to a `POST /api/chat` request.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with a `{role, content}` body.
    Message { role: String, content: String },
    /// Error status with a plain-text body.
    Status(u16, String),
    /// 200 with an arbitrary, usually undecodable, body.
    Raw(String),
    /// Waits before answering with the inner reply.
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    pub fn assistant(content: &str) -> Self {
        MockReply::Message {
            role: "assistant".to_string(),
            content: content.to_string(),
        }
    }

    pub fn system(content: &str) -> Self {
        MockReply::Message {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }
}

/// Reply used once the script runs out: acknowledges the latest user turn.
pub fn default_reply(messages: &[Value]) -> MockReply {
    let last_user = messages
        .iter()
        .rev()
        .find(|message| message["role"] == "user")
        .and_then(|message| message["content"].as_str())
        .unwrap_or("nothing");

    MockReply::assistant(&format!(
        "I looked into \"{last_user}\" and found 3 matching issues: TEST-1, TEST-2 and TEST-7."
    ))
}

pub const KNOWN_TOOLS: [&str; 4] = [
    "jira_search",
    "jira_get_issue",
    "jira_create_issue",
    "jira_transition_issue",
];

pub fn default_tools() -> Value {
    json!({
        "tools": [
            {
                "name": "jira_search",
                "description": "Search Jira issues using JQL",
                "inputSchema": {
                    "type": "object",
                    "properties": {"jql": {"type": "string"}},
                    "required": ["jql"]
                }
            },
            {
                "name": "jira_get_issue",
                "description": "Get the details of a Jira issue",
                "inputSchema": {
                    "type": "object",
                    "properties": {"issue_key": {"type": "string"}},
                    "required": ["issue_key"]
                }
            },
            {
                "name": "jira_create_issue",
                "description": "Create a new Jira issue",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "project_key": {"type": "string"},
                        "summary": {"type": "string"},
                        "issue_type": {"type": "string"}
                    },
                    "required": ["project_key", "summary", "issue_type"]
                }
            },
            {
                "name": "jira_transition_issue",
                "description": "Move a Jira issue to another status"
            }
        ]
    })
}
