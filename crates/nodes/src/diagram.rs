//! Diagram decoder: describe → explain → quiz.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{
    DiagramRecord, ImagePayload, InputError, ModelTier, Pipeline, PipelineRunId, Step, Timestamp,
    UploadLimits,
};
use serde::Serialize;

use crate::gateway::{GatewayCall, ReasoningGateway};
use crate::prompts;

/// Labelled outputs of one diagram run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramReport {
    pub run_id: PipelineRunId,
    pub started_at: Timestamp,
    pub image_description: String,
    pub logical_explanation: String,
    pub quiz_questions: String,
}

/// Writes `image_description` from the image alone.
pub struct DescribeDiagram {
    gateway: Arc<ReasoningGateway>,
}

#[async_trait]
impl Step<DiagramRecord> for DescribeDiagram {
    fn name(&self) -> &'static str {
        "vision_identification"
    }

    async fn apply(&self, record: DiagramRecord) -> DiagramRecord {
        let text = self
            .gateway
            .complete(GatewayCall {
                tier: ModelTier::Fast,
                prompt: prompts::DESCRIBE_DIAGRAM,
                image: Some(record.image()),
                activity: "analyzing image",
            })
            .await;
        record.with_image_description(text)
    }
}

/// Writes `logical_explanation` from the description.
pub struct ExplainDiagram {
    gateway: Arc<ReasoningGateway>,
}

#[async_trait]
impl Step<DiagramRecord> for ExplainDiagram {
    fn name(&self) -> &'static str {
        "logic_explanation"
    }

    async fn apply(&self, record: DiagramRecord) -> DiagramRecord {
        let prompt = prompts::explain_diagram(record.image_description());
        let text = self
            .gateway
            .complete(GatewayCall {
                tier: ModelTier::Reasoning,
                prompt: &prompt,
                image: None,
                activity: "generating explanation",
            })
            .await;
        record.with_logical_explanation(text)
    }
}

/// Writes `quiz_questions` from the description and explanation.
pub struct GenerateQuiz {
    gateway: Arc<ReasoningGateway>,
}

#[async_trait]
impl Step<DiagramRecord> for GenerateQuiz {
    fn name(&self) -> &'static str {
        "quiz_generation"
    }

    async fn apply(&self, record: DiagramRecord) -> DiagramRecord {
        let prompt = prompts::quiz(record.image_description(), record.logical_explanation());
        let text = self
            .gateway
            .complete(GatewayCall {
                tier: ModelTier::Fast,
                prompt: &prompt,
                image: None,
                activity: "generating quiz",
            })
            .await;
        record.with_quiz_questions(text)
    }
}

/// The three diagram steps in their fixed order.
pub fn diagram_pipeline(gateway: Arc<ReasoningGateway>) -> Pipeline<DiagramRecord> {
    Pipeline::new("diagram_decoder")
        .then(DescribeDiagram {
            gateway: Arc::clone(&gateway),
        })
        .then(ExplainDiagram {
            gateway: Arc::clone(&gateway),
        })
        .then(GenerateQuiz { gateway })
}

/// Checks the image against the upload ceiling and runs the diagram pipeline.
///
/// # Errors
///
/// [`InputError::TooLarge`] when the image exceeds `limits.max_image`; no
/// remote call is made in that case.
pub async fn process_diagram(
    gateway: Arc<ReasoningGateway>,
    image: ImagePayload,
    limits: &UploadLimits,
) -> Result<DiagramReport, InputError> {
    limits.check_image(image.size())?;

    let run = diagram_pipeline(gateway).run(DiagramRecord::new(image)).await;
    let outputs = run.record.into_outputs();
    Ok(DiagramReport {
        run_id: run.id,
        started_at: run.started_at,
        image_description: outputs.image_description,
        logical_explanation: outputs.logical_explanation,
        quiz_questions: outputs.quiz_questions,
    })
}
