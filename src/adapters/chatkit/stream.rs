//! Reconstruction of response text from ChatKit's line-delimited event stream.
//!
//! The streamed body is a sequence of SSE-style frames. Each content frame
//! looks like `data: {"delta":{"content":"..."}}`; the stream ends with the
//! `data: [DONE]` sentinel. Frames are single-line flat fragments, so the
//! `content` value is located by substring search beneath the `delta` object
//! and unescaped; robustness against nested braces or escaped quotes inside
//! the field is explicitly not guaranteed.

use super::escape::unescape;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";
const DELTA_KEY: &str = "\"delta\":";
const CONTENT_KEY: &str = "\"content\":\"";

/// Placeholder returned when the upstream stream carried no content frames.
/// Soft degradation: the upstream call itself succeeded.
pub const EMPTY_STREAM_PLACEHOLDER: &str =
    "I received your message but couldn't generate a response.";

/// Reconstructs the full response text from a streamed body.
///
/// Content fragments are appended strictly in frame arrival order. Malformed
/// frames are logged and skipped; a single corrupt frame never aborts the
/// reconstruction. Returns [`EMPTY_STREAM_PLACEHOLDER`] when no content frame
/// was found.
pub fn reconstruct(body: &str) -> String {
    let mut full_content = String::new();

    for line in body.lines() {
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            continue;
        };
        let payload = payload.trim();
        if payload == DONE_SENTINEL {
            continue;
        }

        match extract_delta_content(payload) {
            Some(fragment) => full_content.push_str(&fragment),
            None => tracing::debug!(frame = payload, "skipping frame without delta content"),
        }
    }

    if full_content.is_empty() {
        return EMPTY_STREAM_PLACEHOLDER.to_string();
    }
    full_content
}

/// Extracts and unescapes the `content` field beneath a `delta` object.
///
/// Returns `None` when the frame carries no such field. An empty content
/// string yields `Some("")`, which contributes nothing to the accumulator.
fn extract_delta_content(payload: &str) -> Option<String> {
    let delta_at = payload.find(DELTA_KEY)?;
    let content_at = payload[delta_at..].find(CONTENT_KEY)? + delta_at;

    let start = content_at + CONTENT_KEY.len();
    let end = payload[start..].find('"')? + start;
    Some(unescape(&payload[start..end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstructs_fragments_in_arrival_order() {
        let body = "data: {\"delta\":{\"content\":\"Hello\"}}\n\
                    data: {\"delta\":{\"content\":\" there\"}}\n\
                    data: [DONE]\n";
        assert_eq!(reconstruct(body), "Hello there");
    }

    #[test]
    fn empty_stream_yields_placeholder() {
        assert_eq!(reconstruct(""), EMPTY_STREAM_PLACEHOLDER);
        assert_eq!(reconstruct("data: [DONE]\n"), EMPTY_STREAM_PLACEHOLDER);
    }

    #[test]
    fn frames_without_content_yield_placeholder() {
        let body = "data: {\"type\":\"response.started\"}\n\
                    data: {\"delta\":{}}\n\
                    data: [DONE]\n";
        assert_eq!(reconstruct(body), EMPTY_STREAM_PLACEHOLDER);
    }

    #[test]
    fn malformed_frame_is_skipped_not_fatal() {
        let body = "data: {\"delta\":{\"content\":\"Hello\"}}\n\
                    data: {garbage\n\
                    data: {\"delta\":{\"content\":\" world\"}}\n";
        assert_eq!(reconstruct(body), "Hello world");
    }

    #[test]
    fn non_data_lines_are_ignored() {
        let body = "event: message\n\
                    : keep-alive comment\n\
                    data: {\"delta\":{\"content\":\"Hi\"}}\n";
        assert_eq!(reconstruct(body), "Hi");
    }

    #[test]
    fn escaped_content_is_unescaped() {
        let body = "data: {\"delta\":{\"content\":\"line one\\nline two\\t!\"}}\n";
        assert_eq!(reconstruct(body), "line one\nline two\t!");
    }

    #[test]
    fn content_outside_delta_is_ignored() {
        let body = "data: {\"message\":{\"content\":\"not a delta\"}}\n";
        assert_eq!(reconstruct(body), EMPTY_STREAM_PLACEHOLDER);
    }

    #[test]
    fn payload_whitespace_is_trimmed_before_sentinel_check() {
        let body = "data:  [DONE] \n";
        assert_eq!(reconstruct(body), EMPTY_STREAM_PLACEHOLDER);
    }

    #[test]
    fn extract_handles_empty_content() {
        assert_eq!(
            extract_delta_content("{\"delta\":{\"content\":\"\"}}"),
            Some(String::new())
        );
    }

    #[test]
    fn extract_returns_none_without_delta() {
        assert_eq!(extract_delta_content("{\"content\":\"x\"}"), None);
        assert_eq!(extract_delta_content("{}"), None);
    }
}
