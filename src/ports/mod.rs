//! Ports - Interfaces between the core orchestration and the outside world.
//!
//! Inbound: [`ChatService`], the operation the HTTP layer invokes.
//! Outbound: [`EstablishSession`], [`DispatchMessage`] and [`CompleteFallback`],
//! implemented by the ChatKit / Chat Completions adapters.

mod chat_service;
mod chatkit;

pub use chat_service::{ChatError, ChatReply, ChatRequest, ChatService, Message, MessageRole};
pub use chatkit::{ClientSecret, CompleteFallback, DispatchMessage, EstablishSession};
