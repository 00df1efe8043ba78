//! Documentation anchor normalization and validation.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Maximum accepted length of a normalized fragment, in bytes.
pub const MAX_FRAGMENT_LENGTH: usize = 50;

/// Characters allowed in an anchor on the diagnostics reference page.
static FRAGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("fragment pattern is valid"));

/// Reason a fragment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FragmentError {
    #[error("fragment cannot be empty")]
    Empty,

    #[error("fragment exceeds maximum length of {MAX_FRAGMENT_LENGTH} characters")]
    TooLong,

    #[error(
        "fragment contains invalid characters - only alphanumeric, hyphens, and underscores are allowed"
    )]
    InvalidCharacters,
}

/// Rewrites a compiler flag spelling into the anchor spelling upstream uses.
///
/// Every `+` becomes `-`, then each `--` is collapsed to `-` in a single
/// left-to-right pass. The flag `-Wc++98-c++11-compat-binary-literal` has the
/// anchor `wc-98-c-11-compat-binary-literal`, so the path
/// `wc++98-c++11-compat-binary-literal` normalizes to it.
pub fn normalize_fragment(raw: &str) -> String {
    raw.replace('+', "-").replace("--", "-")
}

/// A normalized, validated anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Normalizes `raw` and validates the result.
    ///
    /// On failure the normalized text is returned alongside the reason, so
    /// callers can echo what was actually checked.
    pub fn parse(raw: &str) -> Result<Self, (FragmentError, String)> {
        let normalized = normalize_fragment(raw);

        match validate(&normalized) {
            Ok(()) => Ok(Self(normalized)),
            Err(e) => Err((e, normalized)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate(fragment: &str) -> Result<(), FragmentError> {
    if fragment.is_empty() {
        return Err(FragmentError::Empty);
    }

    if fragment.len() > MAX_FRAGMENT_LENGTH {
        return Err(FragmentError::TooLong);
    }

    if !FRAGMENT_REGEX.is_match(fragment) {
        return Err(FragmentError::InvalidCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plus_signs() {
        assert_eq!(
            normalize_fragment("wc++98-c++11-compat-binary-literal"),
            "wc-98-c-11-compat-binary-literal"
        );
    }

    #[test]
    fn test_normalize_plain_fragment_unchanged() {
        assert_eq!(normalize_fragment("wall"), "wall");
        assert_eq!(normalize_fragment("some_flag-name"), "some_flag-name");
    }

    #[test]
    fn test_normalize_single_pass_collapse() {
        // "+++" -> "---" -> "--" (non-overlapping replacement)
        assert_eq!(normalize_fragment("a+++b"), "a--b");
        assert_eq!(normalize_fragment("a----b"), "a--b");
    }

    #[test]
    fn test_parse_valid() {
        let fragment = Fragment::parse("Wunused-variable").unwrap();
        assert_eq!(fragment.as_str(), "Wunused-variable");
        assert_eq!(fragment.to_string(), "Wunused-variable");
    }

    #[test]
    fn test_parse_normalizes() {
        let fragment = Fragment::parse("wc++11-extensions").unwrap();
        assert_eq!(fragment.as_str(), "wc-11-extensions");
    }

    #[test]
    fn test_parse_empty() {
        let (err, normalized) = Fragment::parse("").unwrap_err();
        assert_eq!(err, FragmentError::Empty);
        assert_eq!(normalized, "");
    }

    #[test]
    fn test_parse_length_limit() {
        let exact = "a".repeat(MAX_FRAGMENT_LENGTH);
        assert!(Fragment::parse(&exact).is_ok());

        let too_long = "a".repeat(MAX_FRAGMENT_LENGTH + 1);
        let (err, _) = Fragment::parse(&too_long).unwrap_err();
        assert_eq!(err, FragmentError::TooLong);
    }

    #[test]
    fn test_parse_invalid_characters() {
        for raw in ["bad frag!", "a/b", "<script>", "caf\u{e9}", "a.b"] {
            let (err, _) = Fragment::parse(raw).unwrap_err();
            assert_eq!(err, FragmentError::InvalidCharacters, "input: {raw}");
        }
    }

    #[test]
    fn test_parse_returns_normalized_on_error() {
        let (_, normalized) = Fragment::parse("c++ bad").unwrap_err();
        assert_eq!(normalized, "c- bad");
    }
}
