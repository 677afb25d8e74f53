//! The streaming relay to the completion provider.

use std::time::Duration;

use futures::stream::BoxStream;
use futures::StreamExt;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AiError;
use crate::prompt::{EMPTY_STREAM_FALLBACK, STREAM_FAILURE_NOTICE, SYSTEM_PROMPT};
use crate::sse::{data_payload, LineBuffer};
use crate::types::{
    synthetic_chunk, ChatCompletionChunk, ChatMessage, CompletionRequest, RelayEvent,
};

const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const DEFAULT_MODEL: &str = "llama3-8b-8192";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Terminal sentinel payload sent by the provider.
const DONE_PAYLOAD: &str = "[DONE]";

/// Relay to an OpenAI-compatible streaming completion endpoint.
///
/// Cheap to share behind an `Arc`; each `stream_chat` call is a fully
/// isolated pipeline with no state shared between in-flight requests.
#[derive(Debug, Clone)]
pub struct ChatRelay {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatRelay {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// Builds the relay from `GROQ_API_KEY`, `GROQ_BASE_URL`, `GROQ_MODEL`
    /// and `GROQ_TIMEOUT_SECS`. Returns `Ok(None)` when no API key is
    /// configured; callers must report that to clients instead of silently
    /// degrading.
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        let api_key = match std::env::var("GROQ_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Ok(None),
        };
        let base_url =
            std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = std::env::var("GROQ_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(api_key, base_url, model, Duration::from_secs(timeout_secs)).map(Some)
    }

    /// Forwards `messages` (with the system persona prepended) to the
    /// provider and returns the stream of relayed events.
    ///
    /// Dispatch failures (network errors, non-2xx responses) are returned
    /// as `Err` before any streaming begins. Once the stream is live,
    /// failures are surfaced inline as a synthetic chunk followed by
    /// `Done`. Dropping the returned stream cancels the upstream read
    /// promptly.
    pub async fn stream_chat(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<BoxStream<'static, RelayEvent>, AiError> {
        if messages.is_empty() {
            return Err(AiError::invalid_input("messages must not be empty"));
        }

        let mut outbound = Vec::with_capacity(messages.len() + 1);
        outbound.push(ChatMessage::system(SYSTEM_PROMPT));
        outbound.extend(messages);

        let url = format!(
            "{}/openai/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages: &outbound,
                stream: true,
                temperature: DEFAULT_TEMPERATURE,
                max_tokens: DEFAULT_MAX_TOKENS,
            })
            .send()
            .await
            .map_err(|e| AiError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Provider rejected completion request: status={status} body={detail}");
            return Err(AiError::Provider {
                status: Some(status.as_u16()),
                detail,
            });
        }

        debug!("Provider stream open, model={}", self.model);
        let (tx, rx) = mpsc::channel::<RelayEvent>(64);
        tokio::spawn(relay_stream(response, tx));
        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}

/// Reads the upstream byte stream, forwards chunk payloads in arrival
/// order, and finalizes with a fallback when nothing usable arrived.
async fn relay_stream(response: reqwest::Response, tx: mpsc::Sender<RelayEvent>) {
    let mut upstream = response.bytes_stream();
    let mut lines = LineBuffer::default();
    let mut accumulated = String::new();
    let mut failed = false;

    'read: while let Some(read) = upstream.next().await {
        let bytes = match read {
            Ok(bytes) => bytes,
            Err(e) => {
                // Terminal: the partial accumulator is discarded and the
                // caller is told inline, on the same rendering path as
                // real content. No automatic retry.
                error!("Upstream stream failed mid-read: {e}");
                failed = true;
                let notice = synthetic_chunk(STREAM_FAILURE_NOTICE);
                let _ = tx.send(RelayEvent::Delta(notice)).await;
                break 'read;
            }
        };

        lines.extend(&bytes);
        while let Some(line) = lines.next_line() {
            let Some(payload) = data_payload(&line) else {
                continue;
            };
            if payload == DONE_PAYLOAD {
                break 'read;
            }
            match serde_json::from_str::<ChatCompletionChunk>(payload) {
                Ok(chunk) => {
                    let Some(content) = chunk.content() else {
                        continue;
                    };
                    if content.is_empty() {
                        continue;
                    }
                    accumulated.push_str(content);
                    if tx
                        .send(RelayEvent::Delta(payload.to_string()))
                        .await
                        .is_err()
                    {
                        // Caller went away; stop reading so the upstream
                        // connection is released.
                        debug!("Client disconnected, closing upstream stream");
                        return;
                    }
                }
                Err(e) => {
                    // Keep-alives and partial lines are expected; skip.
                    warn!("Skipping malformed stream line: {e}");
                }
            }
        }
    }

    if accumulated.is_empty() && !failed {
        let _ = tx
            .send(RelayEvent::Delta(synthetic_chunk(EMPTY_STREAM_FALLBACK)))
            .await;
    }
    info!("Relay finished, {} chars accumulated", accumulated.len());
    let _ = tx.send(RelayEvent::Done).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatRole;

    fn relay() -> ChatRelay {
        ChatRelay {
            http: reqwest::Client::new(),
            api_key: "test-key".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_history_is_rejected_before_dispatch() {
        let err = relay().stream_chat(Vec::new()).await.err().unwrap();
        assert!(matches!(err, AiError::InvalidInput(_)));
    }

    #[test]
    fn completion_request_serializes_provider_shape() {
        let messages = vec![ChatMessage::user("Olá")];
        let body = serde_json::to_value(CompletionRequest {
            model: "llama3-8b-8192",
            messages: &messages,
            stream: true,
            temperature: 0.7,
            max_tokens: 2000,
        })
        .unwrap();
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Olá");
    }

    #[test]
    fn chunk_content_extraction() {
        let chunk: ChatCompletionChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":"Ol"}}]}"#).unwrap();
        assert_eq!(chunk.content(), Some("Ol"));

        // finish chunks carry no content
        let chunk: ChatCompletionChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#).unwrap();
        assert_eq!(chunk.content(), None);
    }

    #[test]
    fn synthetic_chunk_round_trips_through_the_provider_shape() {
        let payload = synthetic_chunk("aviso");
        let chunk: ChatCompletionChunk = serde_json::from_str(&payload).unwrap();
        assert_eq!(chunk.content(), Some("aviso"));
    }

    #[test]
    fn system_role_serializes_lowercase() {
        let msg = ChatMessage::system("persona");
        assert_eq!(msg.role, ChatRole::System);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
    }
}
