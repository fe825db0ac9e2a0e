//! Lumen LLM provider infrastructure adapter.
//!
//! Implements the [`pipeline::LlmProvider`] trait for Google's Gemini REST API
//! and exposes the model listing used by `lumen models`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting and response
//! parsing live here. The [`pipeline`] crate sees only
//! [`pipeline::LlmProvider`] and the [`pipeline::LlmError`] it returns.

mod gemini;
mod wire;

pub use gemini::{suggest_tiers, GeminiProvider, ModelInfo};
