//! Axum routes for the chatbot endpoint.

use axum::routing::post;
use axum::Router;

use super::handlers::{post_message, ChatbotAppState};

/// Creates routes for the chatbot endpoints.
///
/// REST Endpoints:
/// - POST /chatbot/message - Forward a conversation to the assistant
pub fn chatbot_routes() -> Router<ChatbotAppState> {
    Router::new().route("/chatbot/message", post(post_message))
}

/// Combined router with all chatbot routes under /api.
pub fn chatbot_router() -> Router<ChatbotAppState> {
    Router::new().nest("/api", chatbot_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chatbot_routes_creates_valid_router() {
        let _routes = chatbot_routes();
    }

    #[test]
    fn chatbot_router_creates_combined_router() {
        let _router = chatbot_router();
    }
}
