//! User-facing failure classification.

/// Marker substring the API returns when a key is invalid or expired.
const INVALID_KEY_MARKER: &str = "Requested entity was not found";

/// How a failed run should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The selected key no longer works; the user must pick a new one.
    InvalidCredential,
    /// Any other failure; surface the message as-is.
    Other,
}

/// Classify a failure by its rendered message.
///
/// The service reports an invalid key as a missing entity, so the only
/// available signal is message text. Kept in one function so the
/// matching rule can change without touching control flow.
pub fn classify_failure(message: &str) -> FailureKind {
    if message.contains(INVALID_KEY_MARKER) {
        FailureKind::InvalidCredential
    } else {
        FailureKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_detected() {
        assert_eq!(
            classify_failure("API returned 404: Requested entity was not found."),
            FailureKind::InvalidCredential
        );
    }

    #[test]
    fn test_other_failures_pass_through() {
        assert_eq!(
            classify_failure("Failed to get video generation status"),
            FailureKind::Other
        );
        assert_eq!(classify_failure(""), FailureKind::Other);
    }
}
