//! Newtype domain identifiers.
//!
//! Every named concept in a pipeline run is a distinct newtype wrapping a
//! primitive, so a [`ModelName`] can never be passed where a [`DocumentType`]
//! is expected even though both are strings under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or only whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single pipeline execution run.
///
/// Generated fresh for every invocation; recorded on the `pipeline_run` span so
/// all step activity from one run can be correlated in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineRunId(Uuid);

impl PipelineRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PipelineRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// A remote model identifier as understood by the provider
    /// (e.g. `"gemini-3-flash-preview"`).
    ModelName
}

string_id! {
    /// Free-form label describing the kind of document being audited
    /// (e.g. `"Rental Agreement"`). Interpolated into the audit prompt.
    DocumentType
}

impl DocumentType {
    /// Label used when the caller supplies none.
    pub const FALLBACK: &'static str = "legal document";

    /// Creates a label, falling back to [`DocumentType::FALLBACK`] when `value`
    /// is blank.
    pub fn or_fallback(value: impl Into<String>) -> Self {
        Self::new(value).unwrap_or_else(|| Self(Self::FALLBACK.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(ModelName::new("").is_none());
        assert!(ModelName::new("   ").is_none());
        assert_eq!(ModelName::new("gemini-pro").unwrap().as_str(), "gemini-pro");
    }

    #[test]
    fn document_type_falls_back_for_blank_labels() {
        assert_eq!(DocumentType::or_fallback("").as_str(), "legal document");
        assert_eq!(
            DocumentType::or_fallback("Privacy Policy").to_string(),
            "Privacy Policy"
        );
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(PipelineRunId::new_random(), PipelineRunId::new_random());
    }
}
