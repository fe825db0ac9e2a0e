//! Fine-print translator: acquire text, then audit → summary.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{
    DocumentRecord, DocumentType, InputError, ModelTier, PagedDocumentDecoder, Pipeline,
    PipelineRunId, Step, Timestamp, UploadLimits,
};
use serde::Serialize;

use crate::acquisition::{acquire_document_text, DocumentInput};
use crate::gateway::{GatewayCall, ReasoningGateway};
use crate::prompts;

/// Characters of document text echoed back in the report.
pub const PREVIEW_CHARS: usize = 500;

/// Labelled outputs of one fine-print run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub run_id: PipelineRunId,
    pub started_at: Timestamp,
    pub document_type: DocumentType,
    pub document_preview: String,
    pub risk_audit: String,
    pub risk_summary: String,
}

/// Writes `risk_audit` from the document text and type.
pub struct AuditRisks {
    gateway: Arc<ReasoningGateway>,
}

#[async_trait]
impl Step<DocumentRecord> for AuditRisks {
    fn name(&self) -> &'static str {
        "audit"
    }

    async fn apply(&self, record: DocumentRecord) -> DocumentRecord {
        let prompt = prompts::audit(record.document_text(), record.document_type().as_str());
        let text = self
            .gateway
            .complete(GatewayCall {
                tier: ModelTier::Reasoning,
                prompt: &prompt,
                image: None,
                activity: "performing audit",
            })
            .await;
        record.with_risk_audit(text)
    }
}

/// Writes `risk_summary` from the audit.
pub struct SummarizeRisks {
    gateway: Arc<ReasoningGateway>,
}

#[async_trait]
impl Step<DocumentRecord> for SummarizeRisks {
    fn name(&self) -> &'static str {
        "summary"
    }

    async fn apply(&self, record: DocumentRecord) -> DocumentRecord {
        let prompt = prompts::risk_summary(record.risk_audit());
        let text = self
            .gateway
            .complete(GatewayCall {
                tier: ModelTier::Fast,
                prompt: &prompt,
                image: None,
                activity: "generating summary",
            })
            .await;
        record.with_risk_summary(text)
    }
}

pub fn document_pipeline(gateway: Arc<ReasoningGateway>) -> Pipeline<DocumentRecord> {
    Pipeline::new("fine_print_translator")
        .then(AuditRisks {
            gateway: Arc::clone(&gateway),
        })
        .then(SummarizeRisks { gateway })
}

/// Acquires the document text and runs the audit pipeline over it.
///
/// # Errors
///
/// Any [`InputError`] from acquisition. Nothing reaches the model when one
/// is returned.
pub async fn process_document(
    gateway: Arc<ReasoningGateway>,
    decoder: Arc<dyn PagedDocumentDecoder>,
    input: DocumentInput,
    document_type: DocumentType,
    limits: &UploadLimits,
) -> Result<DocumentReport, InputError> {
    let text = acquire_document_text(input, limits, &gateway, decoder).await?;

    let run = document_pipeline(gateway)
        .run(DocumentRecord::new(text, document_type))
        .await;
    Ok(DocumentReport {
        run_id: run.id,
        started_at: run.started_at,
        document_preview: preview(run.record.document_text()),
        document_type: run.record.document_type().clone(),
        risk_audit: run.record.risk_audit().to_string(),
        risk_summary: run.record.risk_summary().to_string(),
    })
}

/// First [`PREVIEW_CHARS`] characters, with `...` appended when cut.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_previewed_whole() {
        assert_eq!(preview("short"), "short");
        let exact = "x".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn long_text_is_cut_on_a_char_boundary() {
        let long = "é".repeat(PREVIEW_CHARS + 10);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
    }
}
