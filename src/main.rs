//! Chatbot gateway binary.
//!
//! Loads configuration, wires the upstream clients, and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use proplync_chatbot::adapters::chatkit::ProductionChatbotService;
use proplync_chatbot::adapters::http::chatbot::{chatbot_router, ChatbotAppState};
use proplync_chatbot::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let state = match ProductionChatbotService::from_config(&config.chatkit) {
        Some(service) => {
            tracing::info!(workflow_id = %config.chatkit.workflow_id, "chatbot service wired");
            ChatbotAppState::new(Arc::new(service))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY is not configured; chatbot requests will be rejected");
            ChatbotAppState::unconfigured()
        }
    };

    let app = chatbot_router()
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(build_cors(&config))
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "starting chatbot gateway");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// CORS from configured origins; permissive when none are set (development).
fn build_cors(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
