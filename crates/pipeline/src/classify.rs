//! Failure classification for remote-call errors.
//!
//! Every remote failure ends up as text in the step's output field. The
//! classifier decides which of two renderings is used: a quota warning when
//! the provider's message indicates a usage limit, or a generic error line
//! otherwise. New provider error shapes are added as extra patterns in
//! [`QUOTA_PATTERNS`] or [`QUOTA_PATTERNS_CASE_INSENSITIVE`].

use serde::{Deserialize, Serialize};

/// Prefix of every quota placeholder.
pub const QUOTA_MARKER: &str = "⚠️ Quota exceeded";

/// Prefix of every generic failure placeholder.
pub const ERROR_MARKER: &str = "Error";

/// Maximum number of characters of the raw error quoted in a quota warning.
pub const QUOTA_EXCERPT_CHARS: usize = 200;

/// Substrings matched exactly.
const QUOTA_PATTERNS: &[&str] = &["429", "RESOURCE_EXHAUSTED"];

/// Substrings matched against the lower-cased message.
const QUOTA_PATTERNS_CASE_INSENSITIVE: &[&str] = &["quota"];

/// Category of a remote-call failure, used only for user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The provider rejected the call because a rate limit or quota was hit.
    Quota,
    /// Any other transport, validation, or provider failure.
    Other,
}

/// Classifies a raw error message.
pub fn classify_failure(message: &str) -> FailureKind {
    let lowered = message.to_lowercase();
    let is_quota = QUOTA_PATTERNS.iter().any(|p| message.contains(p))
        || QUOTA_PATTERNS_CASE_INSENSITIVE
            .iter()
            .any(|p| lowered.contains(p));

    if is_quota {
        FailureKind::Quota
    } else {
        FailureKind::Other
    }
}

/// Renders the placeholder text a failed step writes into its output field.
///
/// `subject` names what was being called (e.g. the model) for the quota
/// warning; `activity` completes the generic line (`"Error <activity>: ..."`).
pub fn failure_placeholder(message: &str, subject: &str, activity: &str) -> String {
    match classify_failure(message) {
        FailureKind::Quota => {
            let excerpt: String = message.chars().take(QUOTA_EXCERPT_CHARS).collect();
            format!(
                "{QUOTA_MARKER} for {subject}. Please wait a moment and try again, \
                 or check your API quota limits.\n\nError: {excerpt}"
            )
        }
        FailureKind::Other => format!("{ERROR_MARKER} {activity}: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_429_is_quota() {
        assert_eq!(
            classify_failure("Error 429: too many requests"),
            FailureKind::Quota
        );
    }

    #[test]
    fn resource_exhausted_is_quota() {
        assert_eq!(
            classify_failure("status RESOURCE_EXHAUSTED for model"),
            FailureKind::Quota
        );
    }

    #[test]
    fn quota_matches_any_case() {
        assert_eq!(classify_failure("Daily QUOTA reached"), FailureKind::Quota);
        assert_eq!(classify_failure("Quota exceeded"), FailureKind::Quota);
    }

    #[test]
    fn other_errors_are_generic() {
        assert_eq!(classify_failure("ConnectionResetError"), FailureKind::Other);
        assert_eq!(
            classify_failure("resource_exhausted in lower case"),
            FailureKind::Other
        );
    }

    #[test]
    fn quota_placeholder_truncates_excerpt() {
        let message = format!("429 {}", "x".repeat(500));
        let text = failure_placeholder(&message, "gemini-pro", "generating explanation");

        assert!(text.starts_with(QUOTA_MARKER));
        assert!(text.contains("gemini-pro"));
        let excerpt = text.split("Error: ").nth(1).unwrap();
        assert_eq!(excerpt.chars().count(), QUOTA_EXCERPT_CHARS);
    }

    #[test]
    fn generic_placeholder_keeps_full_message() {
        let text = failure_placeholder("ConnectionResetError", "gemini-flash", "generating quiz");
        assert_eq!(text, "Error generating quiz: ConnectionResetError");
    }
}
