//! Motion commands derived from reference footage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A natural-language description of camera motion, used verbatim as the
/// generation prompt.
///
/// The text is opaque: it is never parsed beyond trimming whitespace and
/// stripping one pair of surrounding quote characters that analysis
/// models tend to wrap their answer in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotionCommand(String);

impl MotionCommand {
    /// Normalize raw model output into a command.
    ///
    /// Trims surrounding whitespace, then strips exactly one matching
    /// pair of surrounding quote characters if present. Normalizing
    /// already-normalized text is a no-op.
    pub fn from_raw(raw: &str) -> Self {
        Self(strip_quote_pair(raw.trim()).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strip one matching pair of surrounding quote characters.
fn strip_quote_pair(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted_text_unchanged() {
        let command = MotionCommand::from_raw("A slow linear pan left to right.");
        assert_eq!(command.as_str(), "A slow linear pan left to right.");
    }

    #[test]
    fn test_strips_exactly_one_quote_pair() {
        let command = MotionCommand::from_raw("\"A rapid dolly zoom-in.\"");
        assert_eq!(command.as_str(), "A rapid dolly zoom-in.");

        let nested = MotionCommand::from_raw("\"\"doubly quoted\"\"");
        assert_eq!(nested.as_str(), "\"doubly quoted\"");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = MotionCommand::from_raw("  'a smooth pan'  ");
        let twice = MotionCommand::from_raw(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mismatched_quotes_untouched() {
        let command = MotionCommand::from_raw("\"a sharp ease-out'");
        assert_eq!(command.as_str(), "\"a sharp ease-out'");
    }

    #[test]
    fn test_lone_quote_untouched() {
        assert_eq!(MotionCommand::from_raw("\"").as_str(), "\"");
    }

    #[test]
    fn test_empty_after_trim() {
        assert!(MotionCommand::from_raw("   ").is_empty());
    }
}
