//! In-memory doubles for the pipeline ports.
//!
//! [`ScriptedProvider`] replays a fixed list of responses and records every
//! request it receives; [`StaticPages`] returns canned page results. Both are
//! used by this crate's tests and by the `web` crate's router tests, behind
//! the `testing` feature.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pipeline::{
    CompletionRequest, DocumentDecodeError, LlmError, LlmProvider, PageDecodeError,
    PagedDocumentDecoder, ResponsePayload,
};

/// What a [`ScriptedProvider`] saw for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub model: String,
    pub temperature: f32,
    pub prompt: String,
    pub had_image: bool,
}

/// Replays scripted responses in order; once the script runs out every call
/// returns an empty text payload.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<ResponsePayload, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<ResponsePayload, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider answering each call with the next plain-text reply.
    pub fn replying(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|t| Ok(ResponsePayload::Text((*t).to_string())))
                .collect(),
        )
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<ResponsePayload, LlmError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model: request.model.to_string(),
                temperature: request.temperature.as_f32(),
                prompt: request.prompt.to_string(),
                had_image: request.image.is_some(),
            });
        }

        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| Ok(ResponsePayload::Text(String::new())))
    }
}

/// Decoder returning a fixed page list regardless of input, counting how
/// often it was asked to decode.
#[derive(Debug)]
pub struct StaticPages {
    result: Result<Vec<Result<String, PageDecodeError>>, DocumentDecodeError>,
    decodes: AtomicUsize,
}

impl StaticPages {
    pub fn new(pages: Vec<Result<String, PageDecodeError>>) -> Self {
        Self {
            result: Ok(pages),
            decodes: AtomicUsize::new(0),
        }
    }

    /// A decoder that fails to open any document.
    pub fn unreadable(reason: &str) -> Self {
        Self {
            result: Err(DocumentDecodeError(reason.to_string())),
            decodes: AtomicUsize::new(0),
        }
    }

    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }
}

impl PagedDocumentDecoder for StaticPages {
    fn decode_pages(
        &self,
        _bytes: &[u8],
    ) -> Result<Vec<Result<String, PageDecodeError>>, DocumentDecodeError> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
