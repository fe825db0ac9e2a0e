//! Lumen pipeline steps, prompt builders, and the reasoning gateway.
//!
//! This crate assembles the two fixed pipelines from the [`pipeline`] crate's
//! `Step` trait: the diagram decoder (describe → explain → quiz) and the
//! fine-print translator (audit → summary, after text acquisition).
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Steps build prompts from record fields and call the
//! model through [`gateway::ReasoningGateway`], which depends only on the
//! `LlmProvider` port. Concrete providers and decoders are injected by the
//! caller.

pub mod acquisition;
pub mod diagram;
pub mod document;
pub mod gateway;
pub mod prompts;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use acquisition::{acquire_document_text, DocumentInput, DocumentSource};
pub use diagram::{diagram_pipeline, process_diagram, DiagramReport};
pub use document::{document_pipeline, process_document, DocumentReport};
pub use gateway::{GatewayCall, ReasoningGateway};
