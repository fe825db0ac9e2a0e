//! Request and response bodies of the Gemini REST API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pipeline::{ContentBlock, ImagePayload, LlmError, ResponsePayload, Temperature};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// generateContent request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineData {
    pub mime_type: &'static str,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
}

impl GenerateContentRequest {
    /// One user turn: the prompt, then the image if there is one.
    pub fn new(prompt: &str, image: Option<&ImagePayload>, temperature: Temperature) -> Self {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime().as_str(),
                    data: STANDARD.encode(image.bytes()),
                },
            });
        }

        Self {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: temperature.as_f32(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// generateContent response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Turns the first candidate's parts into content blocks.
    ///
    /// Parts flagged as model thoughts are dropped; everything else is kept
    /// in order so text extraction sees exactly what the model answered. A
    /// candidate left with no parts is an [`LlmError::EmptyResponse`]
    /// carrying its finish reason.
    pub fn into_payload(self) -> Result<ResponsePayload, LlmError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(LlmError::EmptyResponse(reason));
        };

        let blocks: Vec<ContentBlock> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|part| part.get("thought").and_then(Value::as_bool) != Some(true))
            .map(ContentBlock::Structured)
            .collect();

        if blocks.is_empty() {
            return Err(LlmError::EmptyResponse(
                candidate
                    .finish_reason
                    .unwrap_or_else(|| "no content".to_string()),
            ));
        }
        Ok(ResponsePayload::Blocks(blocks))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    pub status: Option<String>,
}

/// Builds an [`LlmError::Api`] from a non-2xx response body.
pub(crate) fn api_error(status: u16, body: &str) -> LlmError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => LlmError::Api {
            status,
            code: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => LlmError::Api {
            status,
            code: None,
            message: body.trim().to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// models.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModelEntry {
    pub name: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_puts_prompt_before_image() {
        let image = ImagePayload::from_bytes(b"GIF89a\x01\x00".to_vec()).unwrap();
        let request =
            GenerateContentRequest::new("describe", Some(&image), Temperature::clamped(0.3));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["contents"],
            json!([{
                "role": "user",
                "parts": [
                    { "text": "describe" },
                    { "inline_data": { "mime_type": "image/gif", "data": "R0lGODlhAQA=" } }
                ]
            }])
        );
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.3).abs() < 1e-6);
    }

    #[test]
    fn text_only_request_has_one_part() {
        let request = GenerateContentRequest::new("audit", None, Temperature::clamped(0.1));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn first_candidate_parts_become_blocks() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "A" },
                    { "functionCall": { "name": "noop" } },
                    { "text": "B" }
                ] }, "finishReason": "STOP" },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }))
        .unwrap();

        assert_eq!(response.into_payload().unwrap().extract_text(), "A\nB");
    }

    #[test]
    fn blocked_prompt_is_an_empty_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        assert_eq!(
            response.into_payload(),
            Err(LlmError::EmptyResponse("SAFETY".into()))
        );
    }

    #[test]
    fn candidate_without_parts_reports_finish_reason() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [ { "finishReason": "SAFETY" } ]
        }))
        .unwrap();

        let err = response.into_payload().unwrap_err();
        assert_eq!(err, LlmError::EmptyResponse("SAFETY".into()));
        assert_eq!(err.to_string(), "empty response: SAFETY");
    }

    #[test]
    fn thoughts_alone_are_an_empty_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "hmm", "thought": true } ] } }
            ]
        }))
        .unwrap();

        assert_eq!(
            response.into_payload(),
            Err(LlmError::EmptyResponse("no content".into()))
        );
    }

    #[test]
    fn error_envelope_is_decoded() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = api_error(429, body);
        assert_eq!(
            err.to_string(),
            "429 RESOURCE_EXHAUSTED: Resource has been exhausted"
        );
    }

    #[test]
    fn unparseable_error_body_is_kept_raw() {
        let err = api_error(502, "<html>Bad Gateway</html>\n");
        assert_eq!(err.to_string(), "502 UNKNOWN: <html>Bad Gateway</html>");
    }
}
