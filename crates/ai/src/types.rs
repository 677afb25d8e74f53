//! Shared types for the chat relay: conversation messages, provider wire
//! types, and the normalized stream events handed to callers.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversation
// ============================================================================

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// One message of the caller-supplied conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

// ============================================================================
// Provider wire types (OpenAI-compatible)
// ============================================================================

/// Outbound completion request body.
#[derive(Debug, Serialize)]
pub(crate) struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// One parsed streaming chunk from the provider.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// The incremental text fragment of this chunk, when present.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
    }
}

/// Builds a provider-shaped chunk payload carrying `text`.
///
/// Used for the empty-stream fallback and for surfacing stream failures
/// inline, so clients have a single rendering path.
pub(crate) fn synthetic_chunk(text: &str) -> String {
    serde_json::json!({ "choices": [{ "delta": { "content": text } }] }).to_string()
}

// ============================================================================
// Relay events
// ============================================================================

/// Normalized event relayed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    /// One provider chunk, passed through as its raw JSON payload
    /// (not re-encoded).
    Delta(String),
    /// Terminal event; emitted exactly once per stream.
    Done,
}
