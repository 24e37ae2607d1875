use std::env;

use chat_backend_mock::MockChatBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let addr = env::var("CHAT_MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());

    tracing::info!("Starting chat backend mock on {}", addr);
    MockChatBackend::serve(&addr, vec![]).await?;

    Ok(())
}
