//! Dispatch orchestrator - threads the session, message and fallback calls
//! into one inbound operation.
//!
//! Control flow: establish session -> dispatch trailing message -> return; on
//! any non-terminal failure, one fallback completion attempt -> return, or a
//! terminal error. Every upstream call is attempted exactly once; failure
//! triggers fallback, never retry.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ChatKitConfig;
use crate::ports::{
    ChatError, ChatReply, ChatRequest, ChatService, CompleteFallback, DispatchMessage,
    EstablishSession,
};

use super::{ChatCompletionsClient, ChatKitMessageClient, ChatKitSessionClient};

/// Outcome of one dispatch sequence.
///
/// Makes the try/fallback flow explicit instead of relying on error
/// propagation alone: a reply is either served by the primary path, served by
/// the fallback path, or the request failed terminally.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The ChatKit workflow produced the reply.
    Primary(String),
    /// The primary path failed; the Chat Completions fallback served the
    /// reply.
    Fallback(String),
    /// No path produced a reply.
    Terminal(ChatError),
}

/// Orchestrator over the three upstream ports.
pub struct ChatbotService<S, D, F> {
    session: S,
    dispatcher: D,
    fallback: F,
    workflow_id: String,
}

/// Fully wired production service.
pub type ProductionChatbotService =
    ChatbotService<ChatKitSessionClient, ChatKitMessageClient, ChatCompletionsClient>;

impl ProductionChatbotService {
    /// Wires the production clients from configuration over one shared
    /// connection pool.
    ///
    /// Returns `None` when no API key is configured; the caller then reports
    /// every request as unconfigured without attempting any upstream call.
    pub fn from_config(config: &ChatKitConfig) -> Option<Self> {
        let client = Client::new();
        let session = ChatKitSessionClient::from_config(config, client.clone())?;
        let dispatcher = ChatKitMessageClient::from_config(config, client.clone());
        let fallback = ChatCompletionsClient::from_config(config, client)?;
        Some(Self::new(session, dispatcher, fallback, &config.workflow_id))
    }
}

impl<S, D, F> ChatbotService<S, D, F>
where
    S: EstablishSession,
    D: DispatchMessage,
    F: CompleteFallback,
{
    /// Creates an orchestrator over the given ports.
    pub fn new(session: S, dispatcher: D, fallback: F, workflow_id: impl Into<String>) -> Self {
        Self {
            session,
            dispatcher,
            fallback,
            workflow_id: workflow_id.into(),
        }
    }

    /// Runs the full dispatch sequence for one request.
    pub async fn dispatch(&self, request: &ChatRequest) -> DispatchOutcome {
        // Precondition shared by both paths; checked before any upstream call.
        if request.messages.is_empty() {
            return DispatchOutcome::Terminal(ChatError::invalid_request(
                "messages must not be empty",
            ));
        }

        match self.run_primary(request).await {
            Ok(content) => DispatchOutcome::Primary(content),
            Err(err) if err.is_terminal() => DispatchOutcome::Terminal(err),
            Err(err) => {
                tracing::warn!(error = %err, "primary path failed, invoking fallback");
                match self.fallback.complete(&request.messages).await {
                    Ok(content) => DispatchOutcome::Fallback(content),
                    Err(fallback_err) => {
                        tracing::error!(error = %fallback_err, "fallback also failed");
                        DispatchOutcome::Terminal(ChatError::fallback_failed(
                            fallback_err.to_string(),
                        ))
                    }
                }
            }
        }
    }

    /// Session establishment followed by message dispatch, strictly in order.
    async fn run_primary(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let secret = self.session.establish(request.session_id.as_deref()).await?;
        self.dispatcher.dispatch(&secret, &request.messages).await
    }
}

#[async_trait]
impl<S, D, F> ChatService for ChatbotService<S, D, F>
where
    S: EstablishSession,
    D: DispatchMessage,
    F: CompleteFallback,
{
    async fn send(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        match self.dispatch(&request).await {
            DispatchOutcome::Primary(content) => Ok(ChatReply {
                content,
                workflow_id: self.workflow_id.clone(),
                via_fallback: false,
            }),
            DispatchOutcome::Fallback(content) => Ok(ChatReply {
                content,
                workflow_id: self.workflow_id.clone(),
                via_fallback: true,
            }),
            DispatchOutcome::Terminal(err) => Err(err),
        }
    }
}
