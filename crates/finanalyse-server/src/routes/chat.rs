//! Chat endpoint

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    session_id: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(chat))
}

/// `POST /api/chat` with `{ session_id, message }`.
///
/// Answers 503 when no Gemini key is configured. Session memory is
/// in-process and evicted on TTL/capacity; a session that expired simply
/// starts over.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let assistant = state.assistant()?;
    let reply = assistant.chat(&request.session_id, &request.message).await?;
    Ok(Json(ChatResponse { response: reply }))
}
