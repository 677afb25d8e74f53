//! Chat streaming endpoint.
//!
//! Relays the provider's incremental stream as `data: <json>` lines,
//! terminated by `data: [DONE]`. The payloads are the provider's own chunk
//! JSON, passed through untouched.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures::StreamExt;
use serde::Deserialize;

use carteira_ai::{AiError, ChatMessage, RelayEvent};

use crate::error::ApiError;
use crate::main_lib::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub messages: Option<Vec<ChatMessage>>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    let messages = payload
        .messages
        .filter(|messages| !messages.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Messages são obrigatórias".to_string()))?;

    let relay = state
        .chat_relay
        .as_ref()
        .ok_or_else(|| ApiError::Ai(AiError::MissingApiKey("groq".to_string())))?;

    let events = relay.stream_chat(messages).await?;
    let lines = events.map(|event| {
        Ok::<_, Infallible>(match event {
            RelayEvent::Delta(payload) => format!("data: {payload}\n"),
            RelayEvent::Done => "data: [DONE]\n".to_string(),
        })
    });

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(lines))
        .unwrap())
}
