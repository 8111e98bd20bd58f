//! Chatbot HTTP endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatMessageRequest, ChatMessageResponse, ErrorResponse, MessageDto, MessageRoleDto};
pub use handlers::{post_message, ChatbotApiError, ChatbotAppState};
pub use routes::{chatbot_router, chatbot_routes};
