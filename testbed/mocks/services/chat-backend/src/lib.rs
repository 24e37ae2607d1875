//! Mock JiraBuddy chat backend for tests and local runs
//!
//! Serves the same JSON API as the real backend (`/health`, `/api/chat`,
//! `/api/tools`, `/api/tools/{name}`) with scripted replies, so the client can
//! be exercised without an LLM, an MCP session or a Jira instance.

pub mod fixtures;
pub mod handlers;
pub mod server;

pub use fixtures::MockReply;
pub use server::MockChatBackend;
