//! Fallback Path - direct Chat Completions call used when the ChatKit
//! workflow fails.
//!
//! Repeats the full conversation, prefixed with the copilot persona, against
//! the non-streaming completion endpoint using the service API key. No
//! session is needed on this path.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ChatKitConfig;
use crate::ports::{ChatError, CompleteFallback, Message};

use super::map_transport_error;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Fixed persona instruction prepended to the caller's conversation.
const SYSTEM_PROMPT: &str = "You are an AI Financial Copilot for PropLync.ai, a real estate \
investment platform. You help users analyze properties across Europe, calculate ROI for \
different rental strategies (Short-Term, Long-Term, Rent-to-Buy), understand local regulations, \
and find the best investment opportunities. Provide clear, actionable financial advice and \
insights. Be professional yet friendly.";

/// Client for the Chat Completions fallback endpoint.
pub struct ChatCompletionsClient {
    api_key: Secret<String>,
    model: String,
    timeout: Duration,
    client: Client,
}

impl ChatCompletionsClient {
    /// Creates a fallback client from the upstream configuration.
    ///
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &ChatKitConfig, client: Client) -> Option<Self> {
        let api_key = config.openai_api_key.clone().filter(|k| !k.is_empty())?;
        Some(Self {
            api_key: Secret::new(api_key),
            model: config.fallback_model.clone(),
            timeout: config.fallback_timeout(),
            client,
        })
    }

    /// Persona plus the caller's entire message sequence, in order.
    fn build_messages(messages: &[Message]) -> Vec<WireMessage<'_>> {
        let mut wire = Vec::with_capacity(messages.len() + 1);
        wire.push(WireMessage {
            role: "system",
            content: SYSTEM_PROMPT,
        });
        for msg in messages {
            wire.push(WireMessage {
                role: msg.role.as_str(),
                content: &msg.content,
            });
        }
        wire
    }
}

#[async_trait]
impl CompleteFallback for ChatCompletionsClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, ChatError> {
        tracing::info!("using fallback Chat Completions API");

        let body = CompletionRequest {
            model: &self.model,
            messages: Self::build_messages(messages),
        };

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "fallback completion call failed");
            return Err(ChatError::protocol(status.as_u16(), detail));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::parse(format!("could not decode completion response: {e}")))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::parse("no choices in completion response"))?;

        Ok(choice.message.content)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}
