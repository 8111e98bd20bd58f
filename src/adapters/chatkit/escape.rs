//! Ad-hoc text escaping for the streamed frame payloads.
//!
//! Covers exactly five character classes: backslash, double quote, newline,
//! carriage return and tab. `unescape(escape(s)) == s` holds for any input
//! restricted to those characters. Behavior for already-malformed escape
//! sequences in upstream input is unspecified; callers treat the output as
//! best-effort text reconstruction.

/// Escapes the five covered special characters.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Reverses [`escape`]. Unrecognized escape sequences are passed through
/// verbatim; a trailing lone backslash is kept.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn escapes_each_covered_character() {
        assert_eq!(escape("\\"), "\\\\");
        assert_eq!(escape("\""), "\\\"");
        assert_eq!(escape("\n"), "\\n");
        assert_eq!(escape("\r"), "\\r");
        assert_eq!(escape("\t"), "\\t");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape("Hello there"), "Hello there");
        assert_eq!(unescape("Hello there"), "Hello there");
    }

    #[test]
    fn round_trips_mixed_text() {
        let s = "line one\n\t\"quoted\" with \\ backslash\r";
        assert_eq!(unescape(&escape(s)), s);
    }

    #[test]
    fn unescape_keeps_unknown_sequences() {
        assert_eq!(unescape("\\u0041"), "\\u0041");
    }

    #[test]
    fn unescape_keeps_trailing_backslash() {
        assert_eq!(unescape("abc\\"), "abc\\");
    }

    proptest! {
        #[test]
        fn round_trip_over_covered_characters(s in r#"[\\"\n\r\t]{0,64}"#) {
            prop_assert_eq!(unescape(&escape(&s)), s);
        }

        #[test]
        fn round_trip_over_arbitrary_text(s in ".*") {
            prop_assert_eq!(unescape(&escape(&s)), s);
        }
    }
}
