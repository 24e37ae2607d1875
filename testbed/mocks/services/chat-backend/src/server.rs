use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use axum::routing::get;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::fixtures::MockReply;
use crate::handlers::call_tool;
use crate::handlers::chat;
use crate::handlers::health_check;
use crate::handlers::list_tools;

#[derive(Clone, Default)]
pub struct BackendState {
    pub replies: Arc<Mutex<VecDeque<MockReply>>>,
    pub requests: Arc<Mutex<Vec<Value>>>,
    pub tool_calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl BackendState {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Default::default()
        }
    }
}

pub fn router(state: BackendState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{tool_name}", post(call_tool))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A backend bound to an ephemeral local port for the lifetime of a test.
pub struct MockChatBackend {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    state: BackendState,
}

impl MockChatBackend {
    pub async fn start(replies: Vec<MockReply>) -> anyhow::Result<Self> {
        let state = BackendState::new(replies);
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tracing::info!("Mock chat backend listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            let res = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = res {
                tracing::error!("Mock chat backend error: {}", e);
            }
        });

        Ok(MockChatBackend {
            addr,
            shutdown_tx,
            state,
        })
    }

    /// Serves until the process is stopped.
    pub async fn serve(addr: &str, replies: Vec<MockReply>) -> anyhow::Result<()> {
        let app = router(BackendState::new(replies));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Mock chat backend listening on {}", listener.local_addr()?);
        axum::serve(listener, app).await?;
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn recorded_requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn recorded_tool_calls(&self) -> Vec<(String, Value)> {
        self.state.tool_calls.lock().unwrap().clone()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            tracing::warn!("Mock chat backend already stopped.");
        }
    }
}
