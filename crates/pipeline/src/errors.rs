//! Top-level error types for the Lumen pipeline domain.
//!
//! [`InputError`] covers every condition that rejects a request before any
//! remote call is made. [`LumenError`] wraps it together with configuration
//! problems detected at start-up.
//!
//! Remote-call failures are *not* errors at this level: the reasoning gateway
//! converts them into placeholder text that flows through the record like any
//! other step output. See [`crate::classify`].

use thiserror::Error;

use crate::ByteSize;

/// Which upload ceiling an input was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Image,
    PagedDocument,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::PagedDocument => write!(f, "PDF"),
        }
    }
}

/// Input rejected before any pipeline step runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// None of text, image, or paged-document bytes was provided.
    #[error("No document input provided. Please provide text, image, or PDF.")]
    NoInput,

    /// The diagram flow was submitted without an image.
    #[error("No diagram image provided. Please upload a PNG, JPEG, WebP or GIF file.")]
    NoImage,

    /// An upload exceeded its configured ceiling.
    #[error("File too large! Maximum {kind} size is {limit} (got {actual})")]
    TooLarge {
        kind: InputKind,
        actual: ByteSize,
        limit: ByteSize,
    },

    /// The uploaded bytes are not an image format the endpoint accepts.
    #[error("Unsupported image format. Please upload a PNG, JPEG, WebP or GIF file.")]
    UnsupportedImage,
}

/// Errors that stop Lumen before or outside a pipeline run.
#[derive(Debug, Error)]
pub enum LumenError {
    /// The configuration is invalid; the process never starts with it.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    #[error(transparent)]
    Input(#[from] InputError),
}

impl LumenError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_message_names_the_ceiling() {
        let err = InputError::TooLarge {
            kind: InputKind::Image,
            actual: ByteSize::from_mib(11),
            limit: ByteSize::from_mib(10),
        };
        assert_eq!(
            err.to_string(),
            "File too large! Maximum image size is 10.0MB (got 11.0MB)"
        );
    }

    #[test]
    fn input_errors_convert_into_lumen_error() {
        let err: LumenError = InputError::NoInput.into();
        assert!(err.to_string().starts_with("No document input provided"));
    }
}
