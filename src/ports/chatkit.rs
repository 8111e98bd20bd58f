//! ChatKit Ports - Outbound interfaces for the three upstream calls.
//!
//! The orchestrator drives these in strict order: establish a session, then
//! dispatch the trailing message; on failure, complete against the fallback
//! endpoint. Keeping them as separate ports lets tests exercise the
//! orchestration policy without any network.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use super::chat_service::{ChatError, Message};

/// Short-lived bearer token scoping message calls to one remote session.
///
/// Lifetime is one request: a fresh credential is obtained on every
/// primary-path invocation and never cached.
pub struct ClientSecret(Secret<String>);

impl ClientSecret {
    /// Wraps a raw credential.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Secret::new(secret.into()))
    }

    /// Exposes the credential for the Authorization header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientSecret([REDACTED])")
    }
}

/// Port for the remote session-creation endpoint.
#[async_trait]
pub trait EstablishSession: Send + Sync {
    /// Obtains a session credential scoped to the configured workflow and a
    /// user identity derived from `session_id` (or freshly synthesized).
    async fn establish(&self, session_id: Option<&str>) -> Result<ClientSecret, ChatError>;
}

/// Port for the primary streaming messages endpoint.
#[async_trait]
pub trait DispatchMessage: Send + Sync {
    /// Submits the trailing user message and returns the reconstructed
    /// response text.
    async fn dispatch(
        &self,
        secret: &ClientSecret,
        messages: &[Message],
    ) -> Result<String, ChatError>;
}

/// Port for the non-streaming fallback completion endpoint.
#[async_trait]
pub trait CompleteFallback: Send + Sync {
    /// Repeats the full conversation against the completion endpoint and
    /// returns the assistant's text.
    async fn complete(&self, messages: &[Message]) -> Result<String, ChatError>;
}
