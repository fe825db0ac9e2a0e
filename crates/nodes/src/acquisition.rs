//! Document text acquisition, ahead of the audit pipeline.
//!
//! Exactly one of pasted text, a document photo, or paged-document bytes is
//! turned into the `document_text` the audit reads. Size ceilings are checked
//! first so an oversized upload never reaches the decoder or the model.

use std::sync::Arc;

use pipeline::{
    ByteSize, ImagePayload, InputError, ModelTier, PageDecodeError, PagedDocumentDecoder,
    UploadLimits,
};

use crate::gateway::{GatewayCall, ReasoningGateway};
use crate::prompts;

/// Raw form of the document inputs. Any subset may be present.
#[derive(Debug, Clone, Default)]
pub struct DocumentInput {
    pub text: Option<String>,
    pub image: Option<ImagePayload>,
    pub paged: Option<Vec<u8>>,
}

/// The single input selected from a [`DocumentInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Text(String),
    Image(ImagePayload),
    Paged(Vec<u8>),
}

impl DocumentInput {
    /// Picks text, then image, then paged bytes. Whitespace-only text counts
    /// as absent.
    ///
    /// # Errors
    ///
    /// [`InputError::NoInput`] when nothing usable was provided.
    pub fn into_source(self) -> Result<DocumentSource, InputError> {
        if let Some(text) = self.text.filter(|t| !t.trim().is_empty()) {
            return Ok(DocumentSource::Text(text));
        }
        if let Some(image) = self.image {
            return Ok(DocumentSource::Image(image));
        }
        if let Some(bytes) = self.paged {
            return Ok(DocumentSource::Paged(bytes));
        }
        Err(InputError::NoInput)
    }
}

/// Resolves `input` to document text.
///
/// # Errors
///
/// [`InputError::NoInput`] or [`InputError::TooLarge`]. Decoder and model
/// failures are not errors: they come back as text.
pub async fn acquire_document_text(
    input: DocumentInput,
    limits: &UploadLimits,
    gateway: &ReasoningGateway,
    decoder: Arc<dyn PagedDocumentDecoder>,
) -> Result<String, InputError> {
    match input.into_source()? {
        DocumentSource::Text(text) => {
            tracing::debug!(chars = text.len(), "Using pasted document text");
            Ok(text)
        }
        DocumentSource::Image(image) => {
            limits.check_image(image.size())?;
            tracing::info!(mime = image.mime().as_str(), size = %image.size(), "Extracting text from document image");
            Ok(gateway
                .complete(GatewayCall {
                    tier: ModelTier::Fast,
                    prompt: prompts::EXTRACT_DOCUMENT_TEXT,
                    image: Some(&image),
                    activity: "extracting text",
                })
                .await)
        }
        DocumentSource::Paged(bytes) => {
            limits.check_document(ByteSize::new(bytes.len() as u64))?;
            Ok(extract_paged_text(bytes, decoder).await)
        }
    }
}

async fn extract_paged_text(bytes: Vec<u8>, decoder: Arc<dyn PagedDocumentDecoder>) -> String {
    let size = bytes.len();
    let decoded = tokio::task::spawn_blocking(move || decoder.decode_pages(&bytes)).await;

    match decoded {
        Ok(Ok(pages)) => {
            tracing::info!(pages = pages.len(), size, "Decoded paged document");
            join_pages(pages)
        }
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Paged document could not be opened");
            format!("Error extracting text from PDF: {err}")
        }
        Err(join) => {
            tracing::error!(error = %join, "Paged document decoder task failed");
            format!("Error extracting text from PDF: {join}")
        }
    }
}

/// Concatenates page texts in order, each followed by a newline. Failed pages
/// contribute nothing and are logged.
pub fn join_pages(pages: Vec<Result<String, PageDecodeError>>) -> String {
    let mut text = String::new();
    for page in pages {
        match page {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(err) => {
                tracing::warn!(page = err.page, reason = %err.reason, "Skipping page that failed to decode");
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImagePayload {
        ImagePayload::from_bytes(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap()
    }

    #[test]
    fn text_wins_over_other_inputs() {
        let input = DocumentInput {
            text: Some("terms".into()),
            image: Some(png()),
            paged: Some(b"%PDF".to_vec()),
        };
        assert_eq!(input.into_source().unwrap(), DocumentSource::Text("terms".into()));
    }

    #[test]
    fn blank_text_falls_through_to_image() {
        let input = DocumentInput {
            text: Some("  \n ".into()),
            image: Some(png()),
            paged: Some(b"%PDF".to_vec()),
        };
        assert_eq!(input.into_source().unwrap(), DocumentSource::Image(png()));
    }

    #[test]
    fn paged_bytes_are_the_last_resort() {
        let input = DocumentInput {
            paged: Some(b"%PDF".to_vec()),
            ..Default::default()
        };
        assert_eq!(input.into_source().unwrap(), DocumentSource::Paged(b"%PDF".to_vec()));
    }

    #[test]
    fn nothing_is_no_input() {
        assert_eq!(
            DocumentInput::default().into_source(),
            Err(InputError::NoInput)
        );
    }

    #[test]
    fn failed_pages_contribute_nothing() {
        let text = join_pages(vec![
            Ok("first".into()),
            Err(PageDecodeError {
                page: 2,
                reason: "bad stream".into(),
            }),
            Ok("third".into()),
        ]);
        assert_eq!(text, "first\nthird\n");
    }
}
