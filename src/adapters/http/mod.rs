//! HTTP adapters - axum routes, handlers and DTOs for the inbound API.

pub mod chatbot;
