//! Straight-line pipeline runner.
//!
//! A [`Pipeline`] is an ordered list of [`Step`]s over one record type. Running
//! it folds the record through every step in order: step *n + 1* starts only
//! after step *n* has returned, and receives exactly the record step *n*
//! produced. There is no branching, skipping, retrying or fan-out; steps turn
//! their own failures into text, so a run always reaches the last step.

use std::time::Instant;

use async_trait::async_trait;
use tracing::Instrument;

use crate::{PipelineRunId, Timestamp};

/// One prompt-build-and-call unit of a pipeline.
///
/// Implementations read whichever fields they depend on and return the record
/// with their own output field written. They must not fail: any error is
/// rendered into the output field instead.
#[async_trait]
pub trait Step<R>: Send + Sync
where
    R: Send + 'static,
{
    /// Name used in logs and spans.
    fn name(&self) -> &'static str;

    /// Consumes the record as it stands after all earlier steps and returns
    /// it with this step's field populated.
    async fn apply(&self, record: R) -> R;
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun<R> {
    pub id: PipelineRunId,
    pub started_at: Timestamp,
    pub record: R,
}

/// An ordered sequence of steps over record type `R`.
pub struct Pipeline<R> {
    name: &'static str,
    steps: Vec<Box<dyn Step<R>>>,
}

impl<R> Pipeline<R>
where
    R: Send + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Appends a step; steps run in the order they were added.
    #[must_use]
    pub fn then(mut self, step: impl Step<R> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the steps in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Runs every step in order against `initial` and returns the final record.
    pub async fn run(&self, initial: R) -> PipelineRun<R> {
        let id = PipelineRunId::new_random();
        let started_at = Timestamp::now();
        let run_span = tracing::info_span!(
            "pipeline_run",
            pipeline = self.name,
            run_id = %id,
        );

        let record = async {
            tracing::info!(steps = self.steps.len(), "Pipeline run started");
            let run_start = Instant::now();

            let mut record = initial;
            for (index, step) in self.steps.iter().enumerate() {
                let step_span = tracing::info_span!(
                    "pipeline_step",
                    step = step.name(),
                    position = index + 1,
                );
                let step_start = Instant::now();
                record = step.apply(record).instrument(step_span).await;
                tracing::debug!(
                    step = step.name(),
                    elapsed_ms = %step_start.elapsed().as_millis(),
                    "Step finished"
                );
            }

            tracing::info!(
                elapsed_ms = %run_start.elapsed().as_millis(),
                "Pipeline run finished"
            );
            record
        }
        .instrument(run_span)
        .await;

        PipelineRun {
            id,
            started_at,
            record,
        }
    }
}
