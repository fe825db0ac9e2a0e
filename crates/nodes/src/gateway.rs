//! Reasoning gateway: the one boundary where remote-call specifics live.
//!
//! Every step calls the model through [`ReasoningGateway::complete`], which
//! always returns text. A successful payload is flattened with
//! [`ResponsePayload::extract_text`](pipeline::ResponsePayload::extract_text);
//! a failure is classified and rendered as a placeholder so the pipeline can
//! carry on with it as if it were real content.

use std::sync::Arc;
use std::time::Instant;

use pipeline::{
    classify_failure, failure_placeholder, ApiKey, CompletionRequest, ImagePayload, LlmProvider,
    ModelSettings, ModelTier,
};

/// One call through the gateway.
#[derive(Debug, Clone, Copy)]
pub struct GatewayCall<'a> {
    pub tier: ModelTier,
    pub prompt: &'a str,
    pub image: Option<&'a ImagePayload>,
    /// Completes the generic failure line, e.g. `"generating quiz"`.
    pub activity: &'static str,
}

/// Provider handle plus the tier settings and credential for one run.
pub struct ReasoningGateway {
    provider: Arc<dyn LlmProvider>,
    models: ModelSettings,
    credential: ApiKey,
}

impl ReasoningGateway {
    pub fn new(provider: Arc<dyn LlmProvider>, models: ModelSettings, credential: ApiKey) -> Self {
        Self {
            provider,
            models,
            credential,
        }
    }

    /// Sends `call` to the provider and returns plain text. Never fails.
    pub async fn complete(&self, call: GatewayCall<'_>) -> String {
        let settings = self.models.tier(call.tier);
        let request = CompletionRequest {
            model: &settings.model,
            temperature: settings.temperature,
            prompt: call.prompt,
            image: call.image,
            credential: &self.credential,
        };

        let start = Instant::now();
        match self.provider.complete(request).await {
            Ok(payload) => {
                let text = payload.extract_text();
                tracing::info!(
                    tier = %call.tier,
                    model = %settings.model,
                    elapsed_ms = %start.elapsed().as_millis(),
                    prompt_chars = call.prompt.len(),
                    output_chars = text.len(),
                    "Model call complete"
                );
                text
            }
            Err(err) => {
                let message = err.to_string();
                let kind = classify_failure(&message);
                tracing::warn!(
                    tier = %call.tier,
                    model = %settings.model,
                    failure = ?kind,
                    error = %message,
                    "Model call failed; writing placeholder"
                );
                failure_placeholder(&message, settings.model.as_str(), call.activity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pipeline::{AppConfig, ContentBlock, LlmError, ResponsePayload, QUOTA_MARKER};

    use super::*;
    use crate::testing::ScriptedProvider;

    fn gateway(provider: ScriptedProvider) -> (Arc<ScriptedProvider>, ReasoningGateway) {
        let provider = Arc::new(provider);
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let gateway = ReasoningGateway::new(
            provider.clone(),
            config.diagram_models(),
            ApiKey::new("test-key-0123456789abcdef").unwrap(),
        );
        (provider, gateway)
    }

    fn call(tier: ModelTier) -> GatewayCall<'static> {
        GatewayCall {
            tier,
            prompt: "prompt",
            image: None,
            activity: "testing",
        }
    }

    #[tokio::test]
    async fn block_payloads_are_flattened() {
        let (_, gateway) = gateway(ScriptedProvider::new(vec![Ok(ResponsePayload::Blocks(
            vec![ContentBlock::text("one"), ContentBlock::Plain("two".into())],
        ))]));

        assert_eq!(gateway.complete(call(ModelTier::Fast)).await, "one\ntwo");
    }

    #[tokio::test]
    async fn tier_selects_model_and_temperature() {
        let (provider, gateway) = gateway(ScriptedProvider::replying(&["a", "b"]));

        gateway.complete(call(ModelTier::Fast)).await;
        gateway.complete(call(ModelTier::Reasoning)).await;

        let calls = provider.calls();
        assert_eq!(calls[0].model, "gemini-3-flash-preview");
        assert_eq!(calls[0].temperature, 0.3);
        assert_eq!(calls[1].model, "gemini-3-pro-preview");
        assert_eq!(calls[1].temperature, 0.2);
    }

    #[tokio::test]
    async fn quota_failures_become_warnings() {
        let (_, gateway) = gateway(ScriptedProvider::new(vec![Err(LlmError::Api {
            status: 429,
            code: Some("RESOURCE_EXHAUSTED".into()),
            message: "Quota exceeded for metric".into(),
        })]));

        let text = gateway.complete(call(ModelTier::Reasoning)).await;
        assert!(text.starts_with(QUOTA_MARKER), "got: {text}");
        assert!(text.contains("gemini-3-pro-preview"));
        assert!(text.ends_with("Error: 429 RESOURCE_EXHAUSTED: Quota exceeded for metric"));
    }

    #[tokio::test]
    async fn other_failures_become_error_lines() {
        let (_, gateway) = gateway(ScriptedProvider::new(vec![Err(LlmError::Transport(
            "connection reset by peer".into(),
        ))]));

        assert_eq!(
            gateway.complete(call(ModelTier::Fast)).await,
            "Error testing: transport error: connection reset by peer"
        );
    }
}
