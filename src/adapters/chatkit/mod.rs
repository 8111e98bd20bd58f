//! ChatKit adapters - reqwest clients for the three upstream calls plus the
//! dispatch orchestrator.
//!
//! Call order is strict: [`ChatKitSessionClient`] obtains a one-request
//! credential, [`ChatKitMessageClient`] submits the trailing user message and
//! reconstructs the streamed reply, and [`ChatCompletionsClient`] serves the
//! non-streaming fallback. [`ChatbotService`] threads them together.

mod dispatch;
mod escape;
mod fallback;
mod service;
mod session;
mod stream;

pub use dispatch::ChatKitMessageClient;
pub use escape::{escape, unescape};
pub use fallback::ChatCompletionsClient;
pub use service::{ChatbotService, DispatchOutcome, ProductionChatbotService};
pub use session::ChatKitSessionClient;
pub use stream::{reconstruct, EMPTY_STREAM_PLACEHOLDER};

use std::time::Duration;

use crate::ports::ChatError;

/// Beta opt-in header required by the ChatKit endpoints.
pub(crate) const CHATKIT_BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "chatkit_beta=v1");

/// Maps a reqwest transport failure to the gateway error taxonomy.
pub(crate) fn map_transport_error(err: reqwest::Error, timeout: Duration) -> ChatError {
    if err.is_timeout() {
        ChatError::UpstreamTimeout {
            timeout_secs: timeout.as_secs(),
        }
    } else if err.is_connect() {
        ChatError::network(format!("connection failed: {err}"))
    } else {
        ChatError::network(err.to_string())
    }
}
