//! [`LlmProvider`] for the Gemini `generateContent` endpoint.

use std::time::Instant;

use async_trait::async_trait;
use pipeline::{ApiKey, CompletionRequest, LlmError, LlmProvider, ResponsePayload};
use serde::Serialize;

use crate::wire::{api_error, GenerateContentRequest, GenerateContentResponse, ListModelsResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";
const GENERATE_METHOD: &str = "generateContent";

/// A model reported by `models.list` that supports `generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Identifier usable as a [`pipeline::ModelName`], without the `models/` prefix.
    pub name: String,
    pub display_name: Option<String>,
}

/// HTTP client for one Gemini API base URL.
///
/// No request timeout is configured: a call blocks until the service answers
/// or the connection fails.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Lists every model the credential can call with `generateContent`.
    ///
    /// # Errors
    ///
    /// Any transport, HTTP or decoding failure from the listing endpoint.
    pub async fn list_models(&self, credential: &ApiKey) -> Result<Vec<ModelInfo>, LlmError> {
        let url = format!("{}/v1beta/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .header(API_KEY_HEADER, credential.expose());
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListModelsResponse = decode(request.send().await).await?;
            models.extend(
                page.models
                    .into_iter()
                    .filter(|m| m.supported_generation_methods.iter().any(|g| g == GENERATE_METHOD))
                    .map(|m| ModelInfo {
                        name: m.name.trim_start_matches("models/").to_string(),
                        display_name: m.display_name,
                    }),
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(count = models.len(), "Listed generateContent models");
        Ok(models)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<ResponsePayload, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:{GENERATE_METHOD}",
            self.base_url, request.model
        );
        let body = GenerateContentRequest::new(request.prompt, request.image, request.temperature);

        tracing::debug!(
            model = %request.model,
            temperature = %request.temperature,
            with_image = request.image.is_some(),
            "Sending generateContent request"
        );
        let start = Instant::now();

        let response: GenerateContentResponse = decode(
            self.client
                .post(&url)
                .header(API_KEY_HEADER, request.credential.expose())
                .json(&body)
                .send()
                .await,
        )
        .await?;

        tracing::debug!(
            model = %request.model,
            elapsed_ms = %start.elapsed().as_millis(),
            candidates = response.candidates.len(),
            "generateContent responded"
        );
        response.into_payload()
    }
}

/// Reads the body and decodes it as `T`, or as an API error for non-2xx.
async fn decode<T>(sent: Result<reqwest::Response, reqwest::Error>) -> Result<T, LlmError>
where
    T: serde::de::DeserializeOwned,
{
    let response = sent.map_err(|e| LlmError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| LlmError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }
    serde_json::from_str(&body).map_err(|e| LlmError::Decode(e.to_string()))
}

/// Picks a fast model (`flash`) and a reasoning model (`pro` or `thinking`)
/// from a listing, preferring the first match of each.
pub fn suggest_tiers(models: &[ModelInfo]) -> (Option<&str>, Option<&str>) {
    let fast = models
        .iter()
        .map(|m| m.name.as_str())
        .find(|n| n.contains("flash"));
    let reasoning = models
        .iter()
        .map(|m| m.name.as_str())
        .find(|n| n.contains("pro") || n.contains("thinking"));
    (fast, reasoning)
}
