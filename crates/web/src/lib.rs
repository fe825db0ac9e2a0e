//! Lumen HTML form front end.
//!
//! Serves one form per pipeline, runs the pipeline synchronously for each
//! submission and renders its outputs as labelled, collapsible panels.
//!
//! ## Architectural Layer
//!
//! **Presentation.** Handlers translate form fields into pipeline inputs and
//! render reports. Every failure, whether a rejected input or a missing key,
//! is shown inline with a 4xx status; model failures already arrive as text.

mod error;
mod html;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use pipeline::{AppConfig, ByteSize, LlmProvider, PagedDocumentDecoder};
use tower_http::trace::TraceLayer;

pub use error::WebError;
pub use html::{escape, DOCUMENT_TYPES};

/// Room left for multipart framing and the other form fields.
const FORM_OVERHEAD: u64 = 5 * ByteSize::MIB;

/// Collaborators shared by every request. Read-only after start-up.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn LlmProvider>,
    pub decoder: Arc<dyn PagedDocumentDecoder>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        decoder: Arc<dyn PagedDocumentDecoder>,
        config: AppConfig,
    ) -> Self {
        Self {
            provider,
            decoder,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state
        .config
        .limits
        .max_document
        .max(state.config.limits.max_image)
        .as_u64()
        .saturating_add(FORM_OVERHEAD);

    Router::new()
        .route("/", get(routes::landing))
        .route("/health", get(routes::health))
        .route(
            "/diagram",
            get(routes::diagram_form).post(routes::diagram_submit),
        )
        .route(
            "/fine-print",
            get(routes::fine_print_form).post(routes::fine_print_submit),
        )
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(
            usize::try_from(body_limit).unwrap_or(usize::MAX),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped.
///
/// # Errors
///
/// [`WebError::Bind`] if the address cannot be bound, [`WebError::Serve`] if
/// the listener fails afterwards.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), WebError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| WebError::Bind { addr, source })?;
    let local = listener.local_addr().map_err(WebError::Serve)?;

    tracing::info!(addr = %local, "Lumen web UI listening");
    axum::serve(listener, router(state))
        .await
        .map_err(WebError::Serve)
}
