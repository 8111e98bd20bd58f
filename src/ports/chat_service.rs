//! Chat Service Port - Inbound interface for the chatbot gateway.
//!
//! The HTTP adapter hands a [`ChatRequest`] to an implementation of
//! [`ChatService`] and receives a [`ChatReply`] carrying the assistant's text,
//! the workflow identifier, and whether the fallback path produced it.
//!
//! # Error policy
//!
//! [`ChatError`] mirrors the gateway's dispatch policy: terminal errors
//! ([`ChatError::is_terminal`]) are surfaced to the caller directly, while any
//! other failure of the primary path triggers one fallback attempt. There is
//! no retry logic; every upstream call is attempted exactly once.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for forwarding a conversation to the upstream chat service.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Forward the conversation and return the assistant's reply.
    ///
    /// The primary ChatKit path is tried first; on a non-terminal failure the
    /// Chat Completions fallback is attempted once.
    async fn send(&self, request: ChatRequest) -> Result<ChatReply, ChatError>;
}

/// Inbound conversation payload.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Ordered message sequence. Must contain at least one message.
    pub messages: Vec<Message>,
    /// Opaque caller-supplied session token, reused across calls to continue
    /// a conversation.
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Creates a request without a session token.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            session_id: None,
        }
    }

    /// Sets the caller's session token.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// The trailing message, if any. The primary path submits only this one.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions (guides model behavior).
    System,
    /// User input.
    User,
    /// Assistant (model) response.
    Assistant,
}

impl MessageRole {
    /// Wire name used by the upstream APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Reply produced exactly once per inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Assistant response text.
    pub content: String,
    /// Workflow identifier the gateway is configured for.
    pub workflow_id: String,
    /// True when the fallback path served the answer.
    pub via_fallback: bool,
}

/// Chat gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// No API key configured. Reported immediately, no calls attempted.
    #[error("OpenAI API key not configured")]
    Unconfigured,

    /// Caller-side precondition violation, never recovered by fallback.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Non-success status from an upstream call.
    #[error("upstream returned status {status}: {detail}")]
    Protocol {
        /// HTTP status code from upstream.
        status: u16,
        /// Error body, truncated for logging.
        detail: String,
    },

    /// Upstream call exceeded its per-call timeout.
    #[error("upstream timed out after {timeout_secs}s")]
    UpstreamTimeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Expected field absent from an otherwise-successful response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Transport-level failure (connect error, broken stream).
    #[error("network error: {0}")]
    Network(String),

    /// Both primary and fallback paths failed. Terminal.
    #[error("fallback path failed: {0}")]
    FallbackFailed(String),
}

impl ChatError {
    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates a protocol error, truncating the upstream body.
    pub fn protocol(status: u16, detail: impl Into<String>) -> Self {
        let mut detail = detail.into();
        if detail.len() > 512 {
            detail.truncate(512);
        }
        Self::Protocol { status, detail }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a terminal fallback failure.
    pub fn fallback_failed(message: impl Into<String>) -> Self {
        Self::FallbackFailed(message.into())
    }

    /// Returns true if this error is terminal: surfaced to the caller
    /// directly instead of triggering the fallback path.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ChatError::Unconfigured | ChatError::InvalidRequest(_) | ChatError::FallbackFailed(_)
        )
    }
}
