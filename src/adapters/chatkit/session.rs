//! Session Establisher - obtains a short-lived ChatKit session credential.
//!
//! One request per primary-path invocation: the credential is scoped to the
//! configured workflow and a user identity, and is never cached.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::config::ChatKitConfig;
use crate::ports::{ChatError, ClientSecret, EstablishSession};

use super::{map_transport_error, CHATKIT_BETA_HEADER};

/// Client for the ChatKit session-creation endpoint.
pub struct ChatKitSessionClient {
    api_key: Secret<String>,
    workflow_id: String,
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl ChatKitSessionClient {
    /// Creates a session client from the upstream configuration.
    ///
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &ChatKitConfig, client: Client) -> Option<Self> {
        let api_key = config.openai_api_key.clone().filter(|k| !k.is_empty())?;
        Some(Self {
            api_key: Secret::new(api_key),
            workflow_id: config.workflow_id.clone(),
            base_url: config.base_url.clone(),
            timeout: config.session_timeout(),
            client,
        })
    }

    fn sessions_url(&self) -> String {
        format!("{}/v1/chatkit/sessions", self.base_url)
    }

    /// Builds the user identity: the caller's token if present, otherwise a
    /// freshly synthesized identifier unique per call.
    fn user_identity(session_id: Option<&str>) -> String {
        match session_id {
            Some(id) => id.to_string(),
            None => format!("user_{}", Uuid::new_v4().simple()),
        }
    }
}

#[async_trait]
impl EstablishSession for ChatKitSessionClient {
    async fn establish(&self, session_id: Option<&str>) -> Result<ClientSecret, ChatError> {
        let user = Self::user_identity(session_id);
        tracing::debug!(workflow_id = %self.workflow_id, "creating ChatKit session");

        let body = SessionRequest {
            workflow: WorkflowRef {
                id: &self.workflow_id,
            },
            user: &user,
        };

        let response = self
            .client
            .post(self.sessions_url())
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header(CHATKIT_BETA_HEADER.0, CHATKIT_BETA_HEADER.1)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "session creation failed");
            return Err(ChatError::protocol(status.as_u16(), detail));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::parse(format!("could not decode session response: {e}")))?;

        tracing::debug!("session created, client_secret obtained");
        Ok(ClientSecret::new(session.client_secret))
    }
}

#[derive(Debug, Serialize)]
struct SessionRequest<'a> {
    workflow: WorkflowRef<'a>,
    user: &'a str,
}

#[derive(Debug, Serialize)]
struct WorkflowRef<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    client_secret: String,
}
