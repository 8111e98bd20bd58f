//! HTTP DTOs for the chatbot endpoint.
//!
//! These types decouple the wire format from the port types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::ports::{ChatReply, ChatRequest, Message, MessageRole};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Inbound body for `POST /api/chatbot/message`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    /// Ordered conversation; must contain at least one message.
    pub messages: Vec<MessageDto>,
    /// Opaque session token reused across calls to continue a conversation.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl From<ChatMessageRequest> for ChatRequest {
    fn from(dto: ChatMessageRequest) -> Self {
        let messages = dto
            .messages
            .into_iter()
            .map(|m| Message::new(m.role.into(), m.content))
            .collect();
        ChatRequest {
            messages,
            session_id: dto.session_id,
        }
    }
}

/// One message of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub role: MessageRoleDto,
    pub content: String,
}

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRoleDto {
    User,
    Assistant,
    System,
}

impl From<MessageRoleDto> for MessageRole {
    fn from(dto: MessageRoleDto) -> Self {
        match dto {
            MessageRoleDto::User => MessageRole::User,
            MessageRoleDto::Assistant => MessageRole::Assistant,
            MessageRoleDto::System => MessageRole::System,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Reply body for `POST /api/chatbot/message`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    /// Assistant response text.
    pub content: String,
    /// Workflow the gateway is configured for.
    pub workflow_id: String,
    /// Present (and true) only when the fallback path served the answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

impl From<ChatReply> for ChatMessageResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            content: reply.content,
            workflow_id: reply.workflow_id,
            fallback: reply.via_fallback.then_some(true),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn unconfigured() -> Self {
        Self {
            code: "UNCONFIGURED".to_string(),
            message: "OpenAI API key not configured".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn upstream_failed(message: impl Into<String>) -> Self {
        Self {
            code: "UPSTREAM_FAILED".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_deserializes_with_session_id() {
        let body = json!({
            "messages": [{"role": "user", "content": "Hi"}],
            "sessionId": "sess-1"
        });
        let dto: ChatMessageRequest = serde_json::from_value(body).unwrap();

        assert_eq!(dto.messages.len(), 1);
        assert_eq!(dto.messages[0].role, MessageRoleDto::User);
        assert_eq!(dto.session_id.as_deref(), Some("sess-1"));
    }

    #[test]
    fn request_deserializes_without_session_id() {
        let body = json!({"messages": [{"role": "assistant", "content": "Hello"}]});
        let dto: ChatMessageRequest = serde_json::from_value(body).unwrap();
        assert!(dto.session_id.is_none());
    }

    #[test]
    fn request_converts_to_port_type() {
        let dto = ChatMessageRequest {
            messages: vec![
                MessageDto {
                    role: MessageRoleDto::System,
                    content: "rules".to_string(),
                },
                MessageDto {
                    role: MessageRoleDto::User,
                    content: "Hi".to_string(),
                },
            ],
            session_id: Some("sess-9".to_string()),
        };

        let request: ChatRequest = dto.into();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.last_message().unwrap().content, "Hi");
        assert_eq!(request.session_id.as_deref(), Some("sess-9"));
    }

    #[test]
    fn primary_reply_omits_fallback_field() {
        let response: ChatMessageResponse = ChatReply {
            content: "Hello there".to_string(),
            workflow_id: "wf_1".to_string(),
            via_fallback: false,
        }
        .into();

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            "{\"content\":\"Hello there\",\"workflowId\":\"wf_1\"}"
        );
    }

    #[test]
    fn fallback_reply_carries_flag() {
        let response: ChatMessageResponse = ChatReply {
            content: "Answer".to_string(),
            workflow_id: "wf_1".to_string(),
            via_fallback: true,
        }
        .into();

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"fallback\":true"));
    }

    #[test]
    fn error_response_constructors() {
        assert_eq!(ErrorResponse::unconfigured().code, "UNCONFIGURED");
        assert_eq!(ErrorResponse::bad_request("x").code, "BAD_REQUEST");
        assert_eq!(ErrorResponse::upstream_failed("x").code, "UPSTREAM_FAILED");
        assert_eq!(ErrorResponse::internal("x").code, "INTERNAL");
    }
}
