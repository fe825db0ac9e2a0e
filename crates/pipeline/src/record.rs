//! Pipeline records: the accumulating set of named text fields a pipeline's
//! steps read from and write to.
//!
//! Records are passed by value from step to step. Each step consumes the
//! record it receives and returns it with exactly its own output field set,
//! using the `with_*` methods below. Nothing is ever removed, so a field read
//! by a later step is always the value an earlier step (or the caller) wrote.
//! Output fields start as empty strings.

use serde::{Deserialize, Serialize};

use crate::{DocumentType, ImagePayload};

// ---------------------------------------------------------------------------
// Diagram record
// ---------------------------------------------------------------------------

/// Record threaded through `describe → explain → quiz`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramRecord {
    image: ImagePayload,
    image_description: String,
    logical_explanation: String,
    quiz_questions: String,
}

impl DiagramRecord {
    /// Creates a fresh record for one run with all outputs empty.
    pub fn new(image: ImagePayload) -> Self {
        Self {
            image,
            image_description: String::new(),
            logical_explanation: String::new(),
            quiz_questions: String::new(),
        }
    }

    pub fn image(&self) -> &ImagePayload {
        &self.image
    }

    pub fn image_description(&self) -> &str {
        &self.image_description
    }

    pub fn logical_explanation(&self) -> &str {
        &self.logical_explanation
    }

    pub fn quiz_questions(&self) -> &str {
        &self.quiz_questions
    }

    #[must_use]
    pub fn with_image_description(self, text: impl Into<String>) -> Self {
        Self {
            image_description: text.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_logical_explanation(self, text: impl Into<String>) -> Self {
        Self {
            logical_explanation: text.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_quiz_questions(self, text: impl Into<String>) -> Self {
        Self {
            quiz_questions: text.into(),
            ..self
        }
    }

    /// Drops the image and returns the three text outputs.
    pub fn into_outputs(self) -> DiagramOutputs {
        DiagramOutputs {
            image_description: self.image_description,
            logical_explanation: self.logical_explanation,
            quiz_questions: self.quiz_questions,
        }
    }
}

/// The text fields of a finished [`DiagramRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramOutputs {
    pub image_description: String,
    pub logical_explanation: String,
    pub quiz_questions: String,
}

// ---------------------------------------------------------------------------
// Document record
// ---------------------------------------------------------------------------

/// Record threaded through `audit → summarize` once the document text has
/// been acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    document_text: String,
    document_type: DocumentType,
    risk_audit: String,
    risk_summary: String,
}

impl DocumentRecord {
    /// Creates a fresh record for one run with both outputs empty.
    pub fn new(document_text: impl Into<String>, document_type: DocumentType) -> Self {
        Self {
            document_text: document_text.into(),
            document_type,
            risk_audit: String::new(),
            risk_summary: String::new(),
        }
    }

    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    pub fn document_type(&self) -> &DocumentType {
        &self.document_type
    }

    pub fn risk_audit(&self) -> &str {
        &self.risk_audit
    }

    pub fn risk_summary(&self) -> &str {
        &self.risk_summary
    }

    #[must_use]
    pub fn with_risk_audit(self, text: impl Into<String>) -> Self {
        Self {
            risk_audit: text.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_risk_summary(self, text: impl Into<String>) -> Self {
        Self {
            risk_summary: text.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImagePayload {
        ImagePayload::from_bytes(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap()
    }

    #[test]
    fn diagram_outputs_start_empty() {
        let record = DiagramRecord::new(png());
        assert_eq!(record.image_description(), "");
        assert_eq!(record.logical_explanation(), "");
        assert_eq!(record.quiz_questions(), "");
    }

    #[test]
    fn writing_one_field_keeps_the_others() {
        let record = DiagramRecord::new(png())
            .with_image_description("desc")
            .with_logical_explanation("expl");

        assert_eq!(record.image_description(), "desc");
        assert_eq!(record.logical_explanation(), "expl");
        assert_eq!(record.quiz_questions(), "");
        assert_eq!(record.image(), &png());
    }

    #[test]
    fn document_record_keeps_inputs_while_accumulating() {
        let record = DocumentRecord::new("clause 1", DocumentType::or_fallback("Lease"))
            .with_risk_audit("audit")
            .with_risk_summary("summary");

        assert_eq!(record.document_text(), "clause 1");
        assert_eq!(record.document_type().as_str(), "Lease");
        assert_eq!(record.risk_audit(), "audit");
        assert_eq!(record.risk_summary(), "summary");
    }
}
