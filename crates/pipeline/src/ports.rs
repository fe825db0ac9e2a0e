//! Port traits implemented by infrastructure crates.
//!
//! | Trait | Implemented by |
//! |-------|----------------|
//! | [`LlmProvider`] | `llm::GeminiProvider` |
//! | [`PagedDocumentDecoder`] | `pdf::PdfDecoder` |
//!
//! Both are object-safe so the composition root can hand out
//! `Arc<dyn ...>` handles and tests can substitute in-memory doubles.

use async_trait::async_trait;
use thiserror::Error;

use crate::{ApiKey, ImagePayload, ModelName, ResponsePayload, Temperature};

// ---------------------------------------------------------------------------
// Remote reasoning endpoint
// ---------------------------------------------------------------------------

/// Everything a provider needs for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub model: &'a ModelName,
    pub temperature: Temperature,
    pub prompt: &'a str,
    pub image: Option<&'a ImagePayload>,
    pub credential: &'a ApiKey,
}

/// Failure of a remote completion call.
///
/// The `Display` form keeps the provider's status code and status string so
/// that [`crate::classify_failure`] can recognise quota errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("{status} {}: {message}", .code.as_deref().unwrap_or("UNKNOWN"))]
    Api {
        status: u16,
        /// Provider status string, e.g. `RESOURCE_EXHAUSTED`.
        code: Option<String>,
        message: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The provider answered but returned no candidate content.
    #[error("empty response: {0}")]
    EmptyResponse(String),
}

/// A hosted text/vision completion endpoint.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends one prompt (optionally with one image) and returns the payload.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<ResponsePayload, LlmError>;
}

// ---------------------------------------------------------------------------
// Paged-document decoder
// ---------------------------------------------------------------------------

/// The document as a whole could not be opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DocumentDecodeError(pub String);

/// A single page could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page {page}: {reason}")]
pub struct PageDecodeError {
    /// 1-based page number.
    pub page: u32,
    pub reason: String,
}

/// Splits raw document bytes into per-page text.
///
/// Page failures are reported per page so a caller can keep the text of the
/// pages that did decode.
pub trait PagedDocumentDecoder: Send + Sync {
    fn decode_pages(
        &self,
        bytes: &[u8],
    ) -> Result<Vec<Result<String, PageDecodeError>>, DocumentDecodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify_failure, FailureKind};

    #[test]
    fn api_error_display_carries_status_and_code() {
        let err = LlmError::Api {
            status: 429,
            code: Some("RESOURCE_EXHAUSTED".to_string()),
            message: "Resource has been exhausted".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "429 RESOURCE_EXHAUSTED: Resource has been exhausted"
        );
        assert_eq!(classify_failure(&err.to_string()), FailureKind::Quota);
    }

    #[test]
    fn api_error_without_code_is_still_readable() {
        let err = LlmError::Api {
            status: 400,
            code: None,
            message: "bad request".to_string(),
        };
        assert_eq!(err.to_string(), "400 UNKNOWN: bad request");
        assert_eq!(classify_failure(&err.to_string()), FailureKind::Other);
    }

    #[test]
    fn page_error_names_the_page() {
        let err = PageDecodeError {
            page: 2,
            reason: "missing content stream".to_string(),
        };
        assert_eq!(err.to_string(), "page 2: missing content stream");
    }
}
