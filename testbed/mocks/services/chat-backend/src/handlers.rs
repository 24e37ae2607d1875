use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;

use crate::fixtures;
use crate::fixtures::MockReply;
use crate::server::BackendState;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "chat-backend-mock"
    }))
}

pub async fn chat(State(state): State<BackendState>, Json(payload): Json<Value>) -> Response {
    tracing::debug!(payload = %payload, "mock chat request");

    let messages = payload["messages"].as_array().cloned().unwrap_or_default();
    state.requests.lock().unwrap().push(payload);

    let scripted = state.replies.lock().unwrap().pop_front();
    let mut reply = scripted.unwrap_or_else(|| fixtures::default_reply(&messages));

    while let MockReply::Delayed(delay, inner) = reply {
        tokio::time::sleep(delay).await;
        reply = *inner;
    }

    match reply {
        MockReply::Message { role, content } => {
            Json(json!({"role": role, "content": content})).into_response()
        }
        MockReply::Status(code, body) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body).into_response()
        }
        MockReply::Raw(body) => (StatusCode::OK, body).into_response(),
        MockReply::Delayed(..) => unreachable!("delays are unwrapped above"),
    }
}

pub async fn list_tools() -> impl IntoResponse {
    Json(fixtures::default_tools())
}

pub async fn call_tool(
    Path(tool_name): Path<String>,
    State(state): State<BackendState>,
    Json(arguments): Json<Value>,
) -> Response {
    state
        .tool_calls
        .lock()
        .unwrap()
        .push((tool_name.clone(), arguments.clone()));

    if !fixtures::KNOWN_TOOLS.contains(&tool_name.as_str()) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": format!("Tool '{tool_name}' not found")})),
        )
            .into_response();
    }

    Json(json!({
        "content": [
            {"type": "text", "text": format!("{tool_name} called with {arguments}")}
        ]
    }))
    .into_response()
}
