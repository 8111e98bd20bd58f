//! Adapters - Implementations of the ports against concrete technology.
//!
//! - `chatkit`: reqwest-based upstream clients and the dispatch orchestrator
//! - `http`: axum routes, handlers and DTOs for the inbound API

pub mod chatkit;
pub mod http;
