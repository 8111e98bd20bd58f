//! PropLync Chatbot Gateway
//!
//! This crate fronts the PropLync AI Financial Copilot: it forwards a
//! conversation to OpenAI's ChatKit workflow API and falls back to the
//! plain Chat Completions API when the workflow path fails.

pub mod adapters;
pub mod config;
pub mod ports;
