//! Streaming chat relay for Carteira.
//!
//! Forwards a caller-supplied conversation to an OpenAI-compatible
//! completion provider (Groq) and relays the provider's incremental token
//! stream back as discrete events, accumulating the full text along the way.
//! Each request is an isolated pipeline; the relay holds no conversation
//! state between calls.

pub mod error;
pub mod prompt;
pub mod relay;
mod sse;
pub mod types;

pub use error::AiError;
pub use relay::ChatRelay;
pub use types::{ChatMessage, ChatRole, RelayEvent};
