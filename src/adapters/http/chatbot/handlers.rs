//! HTTP handlers for the chatbot endpoint.
//!
//! The handler hands the conversation to the [`ChatService`] port and maps
//! the outcome onto HTTP status codes. Requests are fully independent; the
//! only shared state is the wired service behind an `Arc`.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::ports::{ChatError, ChatService};

use super::dto::{ChatMessageRequest, ChatMessageResponse, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for chatbot handlers.
///
/// `service` is `None` when no API key is configured; every request is then
/// rejected as unconfigured without attempting any upstream call.
#[derive(Clone)]
pub struct ChatbotAppState {
    pub service: Option<Arc<dyn ChatService>>,
}

impl ChatbotAppState {
    /// Creates state around a wired service.
    pub fn new(service: Arc<dyn ChatService>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// Creates state for a gateway without an API key.
    pub fn unconfigured() -> Self {
        Self { service: None }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/chatbot/message
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chatbot/message - Forward a conversation to the assistant.
///
/// # Errors
/// - 400 Bad Request: empty message sequence
/// - 500 Internal Server Error: API key not configured
/// - 502 Bad Gateway: both primary and fallback paths failed
pub async fn post_message(
    State(state): State<ChatbotAppState>,
    Json(body): Json<ChatMessageRequest>,
) -> Result<impl IntoResponse, ChatbotApiError> {
    let service = state.service.as_ref().ok_or(ChatbotApiError::Unconfigured)?;

    tracing::info!(
        session_id = body.session_id.as_deref().unwrap_or("new session"),
        message_count = body.messages.len(),
        "processing chatbot message"
    );

    let reply = service.send(body.into()).await?;
    let response: ChatMessageResponse = reply.into();

    Ok((StatusCode::OK, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts gateway errors to HTTP responses.
#[derive(Debug)]
pub enum ChatbotApiError {
    Unconfigured,
    BadRequest(String),
    UpstreamFailed(String),
    Internal(String),
}

impl From<ChatError> for ChatbotApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Unconfigured => ChatbotApiError::Unconfigured,
            ChatError::InvalidRequest(msg) => ChatbotApiError::BadRequest(msg),
            ChatError::FallbackFailed(detail) => ChatbotApiError::UpstreamFailed(detail),
            // Non-terminal errors are handled by the fallback inside the
            // service; reaching here means a wiring bug.
            other => ChatbotApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ChatbotApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatbotApiError::Unconfigured => {
                tracing::error!("OPENAI_API_KEY is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::unconfigured(),
                )
            }
            ChatbotApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ChatbotApiError::UpstreamFailed(detail) => {
                tracing::error!(detail = %detail, "both primary and fallback paths failed");
                (StatusCode::BAD_GATEWAY, ErrorResponse::upstream_failed(detail))
            }
            ChatbotApiError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_returns_500() {
        let response = ChatbotApiError::Unconfigured.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_returns_400() {
        let response = ChatbotApiError::BadRequest("empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failed_returns_502() {
        let response = ChatbotApiError::UpstreamFailed("both down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_returns_500() {
        let response = ChatbotApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn chat_errors_map_to_api_errors() {
        assert!(matches!(
            ChatbotApiError::from(ChatError::Unconfigured),
            ChatbotApiError::Unconfigured
        ));
        assert!(matches!(
            ChatbotApiError::from(ChatError::invalid_request("empty")),
            ChatbotApiError::BadRequest(_)
        ));
        assert!(matches!(
            ChatbotApiError::from(ChatError::fallback_failed("detail")),
            ChatbotApiError::UpstreamFailed(_)
        ));
        assert!(matches!(
            ChatbotApiError::from(ChatError::protocol(500, "leaked")),
            ChatbotApiError::Internal(_)
        ));
    }

    #[test]
    fn fallback_failure_detail_is_preserved() {
        let err = ChatbotApiError::from(ChatError::fallback_failed("rate limited"));
        match err {
            ChatbotApiError::UpstreamFailed(detail) => assert_eq!(detail, "rate limited"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
