//! Message Dispatcher - submits the trailing user message over the ChatKit
//! messages endpoint and reconstructs the streamed reply.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::ChatKitConfig;
use crate::ports::{ChatError, ClientSecret, DispatchMessage, Message};

use super::{map_transport_error, stream, CHATKIT_BETA_HEADER};

/// Client for the ChatKit messages endpoint.
pub struct ChatKitMessageClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl ChatKitMessageClient {
    /// Creates a message client from the upstream configuration.
    pub fn from_config(config: &ChatKitConfig, client: Client) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.message_timeout(),
            client,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/chatkit/messages", self.base_url)
    }
}

#[async_trait]
impl DispatchMessage for ChatKitMessageClient {
    async fn dispatch(
        &self,
        secret: &ClientSecret,
        messages: &[Message],
    ) -> Result<String, ChatError> {
        // Same precondition as the fallback path; an empty sequence is a
        // caller error, not a reason to fail over.
        let last = messages
            .last()
            .ok_or_else(|| ChatError::invalid_request("messages must not be empty"))?;

        tracing::debug!("dispatching message via ChatKit");

        let body = MessageRequest {
            content: &last.content,
            role: "user",
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("Authorization", format!("Bearer {}", secret.expose()))
            .header(CHATKIT_BETA_HEADER.0, CHATKIT_BETA_HEADER.1)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "ChatKit message call failed");
            return Err(ChatError::protocol(status.as_u16(), detail));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::network(format!("failed reading stream body: {e}")))?;

        Ok(stream::reconstruct(&body))
    }
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    content: &'a str,
    role: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_joins_base() {
        let config = ChatKitConfig {
            base_url: "https://chatkit.example.com".to_string(),
            ..Default::default()
        };
        let client = ChatKitMessageClient::from_config(&config, Client::new());
        assert_eq!(
            client.messages_url(),
            "https://chatkit.example.com/v1/chatkit/messages"
        );
    }

    #[tokio::test]
    async fn empty_sequence_is_invalid_without_network_call() {
        // base_url points nowhere routable; the guard must fire first.
        let config = ChatKitConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let client = ChatKitMessageClient::from_config(&config, Client::new());

        let result = client.dispatch(&ClientSecret::new("cs_x"), &[]).await;
        assert!(matches!(result, Err(ChatError::InvalidRequest(_))));
    }

    #[test]
    fn message_request_serializes_wire_shape() {
        let body = MessageRequest {
            content: "What is the ROI on this flat?",
            role: "user",
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            "{\"content\":\"What is the ROI on this flat?\",\"role\":\"user\"}"
        );
    }
}
