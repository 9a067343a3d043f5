//! Shared string patterns used by both schemas.
//!
//! Every pattern is anchored and compiled once on first use.

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidateEmail;

/// Slot keys: `c.<n>-m<mem>` or `c.<n>-t<threads>-w-m<mem>`, optionally prefixed `staging-`.
///
/// Capture groups: 1 = `staging-` prefix, 2 = compute class, 3 = worker threads, 4 = memory.
pub static SLOT_KEY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(staging-)?c\.([0-9]+)-(?:t([0-9]+)-w-)?m([0-9]+)$"));

/// Usernames: lowercase first letter, then lowercase alphanumerics and hyphens.
pub static USERNAME: LazyLock<Regex> = LazyLock::new(|| compile("^[a-z][a-z0-9-]*$"));

/// Lowercase hex digests.
pub static HEX_DIGEST: LazyLock<Regex> = LazyLock::new(|| compile("^[0-9a-f]+$"));

/// HTTP header names (RFC 9110 `token`). Pseudo-headers such as `:alternate-protocol` never match.
pub static HEADER_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[A-Za-z0-9!#$%&'*+.^_`|~-]+$"));

/// Length of a hex-encoded SHA-1 content hash.
pub const HEX_DIGEST_LEN: usize = 40;

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// Returns true if `value` carries a byte usable for header injection.
///
/// Horizontal tab is the only C0 control permitted.
#[must_use]
pub fn contains_control_chars(value: &str) -> bool {
    value
        .chars()
        .any(|c| (c.is_ascii_control() && c != '\t') || ('\u{80}'..='\u{9f}').contains(&c))
}

/// Returns true if `value` is a syntactically valid email address.
#[must_use]
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_key_accepts_both_forms() {
        assert!(SLOT_KEY.is_match("c.125-m512"));
        assert!(SLOT_KEY.is_match("staging-c.5-t1-w-m1024"));
        assert!(SLOT_KEY.is_match("c.1-t4-w-m128"));
        assert!(SLOT_KEY.is_match("staging-c.2-m256"));
    }

    #[test]
    fn test_slot_key_is_anchored() {
        assert!(!SLOT_KEY.is_match("invalid-key"));
        assert!(!SLOT_KEY.is_match("xc.125-m512"));
        assert!(!SLOT_KEY.is_match("c.125-m512x"));
        assert!(!SLOT_KEY.is_match("prod-c.125-m512"));
        assert!(!SLOT_KEY.is_match("c.125-t1-m512"));
        assert!(!SLOT_KEY.is_match("c.-m512"));
        assert!(!SLOT_KEY.is_match(""));
    }

    #[test]
    fn test_username() {
        assert!(USERNAME.is_match("n8"));
        assert!(USERNAME.is_match("rauchg"));
        assert!(USERNAME.is_match("a-b-"));
        assert!(!USERNAME.is_match(""));
        assert!(!USERNAME.is_match("8n"));
        assert!(!USERNAME.is_match("Nate"));
        assert!(!USERNAME.is_match("!!!"));
    }

    #[test]
    fn test_hex_digest() {
        assert!(HEX_DIGEST.is_match(&"a".repeat(HEX_DIGEST_LEN)));
        assert!(HEX_DIGEST.is_match("0123456789abcdef"));
        assert!(!HEX_DIGEST.is_match("ABCDEF"));
        assert!(!HEX_DIGEST.is_match(&"n".repeat(HEX_DIGEST_LEN)));
    }

    #[test]
    fn test_header_name() {
        assert!(HEADER_NAME.is_match("Cache-Control"));
        assert!(HEADER_NAME.is_match("x-powered-by"));
        assert!(!HEADER_NAME.is_match(":alternate-protocol"));
        assert!(!HEADER_NAME.is_match("bad header"));
        assert!(!HEADER_NAME.is_match(""));
    }

    #[test]
    fn test_control_chars() {
        assert!(contains_control_chars("foo\x00bar"));
        assert!(contains_control_chars("a\r\nSet-Cookie: x"));
        assert!(contains_control_chars("del\x7f"));
        assert!(!contains_control_chars("public, max-age=31536000, immutable"));
        assert!(!contains_control_chars("tab\tseparated"));
    }

    #[test]
    fn test_email() {
        assert!(is_email("nate@zeit.co"));
        assert!(!is_email("nate"));
        assert!(!is_email(&format!("{}@zeit.co", "n".repeat(256))));
    }
}
