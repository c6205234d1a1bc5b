//! `Location` header encoding for redirect targets.
//!
//! Stored long URLs are opaque and may contain bytes a header cannot carry.
//! They are percent-encoded on the way out; the stored value never changes.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Bytes escaped in a redirect target, besides controls and non-ASCII.
///
/// Reserved characters (`:/?#[]@!$&'()*+,;=`) pass through, so an already
/// well-formed URL is left untouched.
const LOCATION: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes `url` so it is always a valid header value.
///
/// Existing `%XX` escapes are kept; a `%` not followed by two hex digits
/// becomes `%25`.
///
/// ```ignore
/// assert_eq!(encode_location("https://a.com/x y"), "https://a.com/x%20y");
/// ```
pub fn encode_location(url: &str) -> String {
    let mut parts = url.split('%');
    let mut encoded = String::with_capacity(url.len());

    if let Some(first) = parts.next() {
        encoded.extend(utf8_percent_encode(first, LOCATION));
    }

    for part in parts {
        let escaped = part.len() >= 2 && part.as_bytes()[..2].iter().all(u8::is_ascii_hexdigit);
        encoded.push_str(if escaped { "%" } else { "%25" });
        encoded.extend(utf8_percent_encode(part, LOCATION));
    }

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_well_formed_url_unchanged() {
        let url = "https://example.com/path?q=1&r=a,b#frag";
        assert_eq!(encode_location(url), url);
    }

    #[test]
    fn test_encodes_whitespace_and_controls() {
        assert_eq!(
            encode_location("https://example.com/a b\nc\td"),
            "https://example.com/a%20b%0Ac%09d"
        );
    }

    #[test]
    fn test_encodes_non_ascii_as_utf8() {
        assert_eq!(
            encode_location("https://example.com/café"),
            "https://example.com/caf%C3%A9"
        );
    }

    #[test]
    fn test_keeps_existing_escapes() {
        assert_eq!(
            encode_location("https://example.com/a%20b%zz%"),
            "https://example.com/a%20b%25zz%25"
        );
    }

    #[test]
    fn test_encodes_unsafe_ascii() {
        assert_eq!(
            encode_location("https://example.com/{x}|\"<y>\"^`\\"),
            "https://example.com/%7Bx%7D%7C%22%3Cy%3E%22%5E%60%5C"
        );
    }

    #[test]
    fn test_result_is_always_a_header_value() {
        for url in ["\u{0}\u{7f}", "a\r\nSet-Cookie: x=1", "plain text", "日本語"] {
            assert!(HeaderValue::from_str(&encode_location(url)).is_ok(), "{url:?}");
        }
    }
}
