use std::net::SocketAddr;

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use pipeline::InputError;
use thiserror::Error;

/// Failures of the web front end.
///
/// Request-level variants are rendered inline in the form page; the
/// listener variants end [`crate::serve`].
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Please enter your Gemini API key, or set GEMINI_API_KEY on the server.")]
    MissingApiKey,

    #[error("That API key seems too short to be valid. Please check it and try again.")]
    InvalidApiKey,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Could not read the submitted form: {0}")]
    Form(#[from] MultipartError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingApiKey | Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
            Self::Input(InputError::NoInput | InputError::NoImage) => StatusCode::BAD_REQUEST,
            Self::Input(InputError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Input(InputError::UnsupportedImage) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Form(err) => err.status(),
            Self::Bind { .. } | Self::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
