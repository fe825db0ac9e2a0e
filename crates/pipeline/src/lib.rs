//! Core domain for Lumen.
//!
//! Lumen runs two fixed three-step "agent" pipelines against a hosted
//! multimodal model: a diagram decoder (describe → explain → quiz) and a
//! fine-print translator (extract → audit → summarize). This crate holds every
//! domain concept those pipelines share. Infrastructure crates implement the
//! traits defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ModelName`, `DocumentType`, `PipelineRunId`) |
//! | [`types`] | Value types (`ModelTier`, `Temperature`, `ImagePayload`, `ApiKey`, etc.) |
//! | [`record`] | Pipeline records threaded through the steps |
//! | [`runner`] | `Step` trait and the straight-line `Pipeline` runner |
//! | [`response`] | Plain-text extraction from provider response envelopes |
//! | [`classify`] | Quota vs. generic failure classification and placeholders |
//! | [`config`] | `AppConfig` value object and upload ceilings |
//! | [`ports`] | `LlmProvider` and `PagedDocumentDecoder` traits |
//! | [`errors`] | Input and configuration errors |

pub mod classify;
pub mod config;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod record;
pub mod response;
pub mod runner;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use classify::{classify_failure, failure_placeholder, FailureKind, ERROR_MARKER, QUOTA_MARKER};
pub use config::{AppConfig, UploadLimits};
pub use errors::{InputError, InputKind, LumenError};
pub use identifiers::{DocumentType, ModelName, PipelineRunId};
pub use ports::{
    CompletionRequest, DocumentDecodeError, LlmError, LlmProvider, PageDecodeError,
    PagedDocumentDecoder,
};
pub use record::{DiagramOutputs, DiagramRecord, DocumentRecord};
pub use response::{ContentBlock, ResponsePayload};
pub use runner::{Pipeline, PipelineRun, Step};
pub use types::{
    ApiKey, ByteSize, ImageMime, ImagePayload, ModelSettings, ModelTier, Temperature,
    TierSettings, Timestamp,
};
