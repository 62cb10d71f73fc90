//! Chat route: POST /api/chat.
//!
//! Accepts the message history as ordered {role, content} pairs and
//! returns the generated reply as plain text. Stateless: every request
//! carries its full history, and overlapping requests are not serialized
//! here -- ordering is the caller's concern.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use routinely_core::chat::{ChatHistory, ChatMessage};
use routinely_core::error::GatewayError;
use routinely_core::gateway::ModelGateway;
use routinely_core::PromptRouter;

/// Shared server state.
pub struct AppState {
    pub router: PromptRouter,
    pub gateway: Arc<dyn ModelGateway>,
}

/// Incoming request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<IncomingMessage>,
}

/// One wire message. Unrecognized roles are treated as assistant turns;
/// only user turns influence routing.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub role: String,
    pub content: String,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(state)
}

async fn chat(State(state): State<Arc<AppState>>, Json(request): Json<ChatRequest>) -> Response {
    match respond(&state, &request).await {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "chat turn failed");
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

/// Route the request's history and forward the prompt to the gateway.
pub async fn respond(state: &AppState, request: &ChatRequest) -> Result<String, GatewayError> {
    let history: ChatHistory = request
        .messages
        .iter()
        .map(|m| match m.role.as_str() {
            "user" => ChatMessage::user(m.content.clone()),
            _ => ChatMessage::assistant(m.content.clone()),
        })
        .collect();

    let routed = state.router.route(&history);
    tracing::debug!(intent = ?routed.intent, "routed chat request");
    state
        .gateway
        .generate(&routed.system_prompt, &routed.user_prompt)
        .await
}
