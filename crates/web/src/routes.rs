//! Form handlers.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use nodes::{process_diagram, process_document, DocumentInput, ReasoningGateway};
use pipeline::{
    ApiKey, ByteSize, DocumentType, ImagePayload, InputError, ModelSettings, UploadLimits,
};
use serde::Serialize;

use crate::error::WebError;
use crate::html;
use crate::AppState;

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

/// Every field either form can submit. Empty values count as absent.
#[derive(Debug, Default)]
struct FormFields {
    api_key: Option<String>,
    document_type: Option<String>,
    text: Option<String>,
    image: Option<Vec<u8>>,
    pdf: Option<Vec<u8>>,
}

impl FormFields {
    async fn read(mut multipart: Multipart) -> Result<Self, WebError> {
        let mut fields = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "api_key" => fields.api_key = non_blank(field.text().await?),
                "document_type" => fields.document_type = non_blank(field.text().await?),
                "text" => fields.text = non_blank(field.text().await?),
                "image" => fields.image = non_empty(field.bytes().await?.to_vec()),
                "pdf" => fields.pdf = non_empty(field.bytes().await?.to_vec()),
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }
        Ok(fields)
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

fn non_empty(bytes: Vec<u8>) -> Option<Vec<u8>> {
    (!bytes.is_empty()).then_some(bytes)
}

/// Size-checks then sniffs uploaded image bytes.
fn image_payload(bytes: Vec<u8>, limits: &UploadLimits) -> Result<ImagePayload, InputError> {
    limits.check_image(ByteSize::new(bytes.len() as u64))?;
    ImagePayload::from_bytes(bytes).ok_or(InputError::UnsupportedImage)
}

impl AppState {
    fn has_server_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// A gateway keyed with the form's key, or the server's when the form left it blank.
    fn gateway(
        &self,
        form_key: Option<String>,
        models: ModelSettings,
    ) -> Result<Arc<ReasoningGateway>, WebError> {
        let credential = form_key
            .and_then(ApiKey::new)
            .or_else(|| self.config.api_key.clone())
            .ok_or(WebError::MissingApiKey)?;
        if !credential.looks_valid() {
            return Err(WebError::InvalidApiKey);
        }
        Ok(Arc::new(ReasoningGateway::new(
            Arc::clone(&self.provider),
            models,
            credential,
        )))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(crate) async fn landing() -> Html<String> {
    Html(html::landing_page())
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    server_key_configured: bool,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        server_key_configured: state.has_server_key(),
    })
}

pub(crate) async fn diagram_form(State(state): State<AppState>) -> Html<String> {
    Html(html::diagram_page(state.has_server_key(), None, None))
}

pub(crate) async fn diagram_submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    let result = async {
        let fields = FormFields::read(multipart).await?;
        let bytes = fields.image.ok_or(InputError::NoImage)?;
        let image = image_payload(bytes, &state.config.limits)?;
        let gateway = state.gateway(fields.api_key, state.config.diagram_models())?;
        Ok::<_, WebError>(process_diagram(gateway, image, &state.config.limits).await?)
    }
    .await;

    match result {
        Ok(report) => {
            tracing::info!(run_id = %report.run_id, "Diagram decoded");
            Html(html::diagram_page(state.has_server_key(), None, Some(&report))).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Diagram request rejected");
            let page = html::diagram_page(state.has_server_key(), Some(&err.to_string()), None);
            (err.status(), Html(page)).into_response()
        }
    }
}

pub(crate) async fn fine_print_form(State(state): State<AppState>) -> Html<String> {
    Html(html::fine_print_page(
        state.has_server_key(),
        html::DOCUMENT_TYPES[0],
        None,
        None,
    ))
}

pub(crate) async fn fine_print_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let mut selected = html::DOCUMENT_TYPES[0].to_string();

    let result = async {
        let fields = FormFields::read(multipart).await?;
        if let Some(label) = &fields.document_type {
            selected.clone_from(label);
        }
        let document_type = DocumentType::or_fallback(fields.document_type.unwrap_or_default());

        // Text outranks the image, so a stray image upload is only checked when it will be used.
        let image = match (&fields.text, fields.image) {
            (None, Some(bytes)) => Some(image_payload(bytes, &state.config.limits)?),
            _ => None,
        };
        let input = DocumentInput {
            text: fields.text,
            image,
            paged: fields.pdf,
        };
        if input.text.is_none() && input.image.is_none() && input.paged.is_none() {
            return Err(WebError::Input(InputError::NoInput));
        }

        let gateway = state.gateway(fields.api_key, state.config.document_models())?;
        Ok::<_, WebError>(process_document(
            gateway,
            Arc::clone(&state.decoder),
            input,
            document_type,
            &state.config.limits,
        )
        .await?)
    }
    .await;

    match result {
        Ok(report) => {
            tracing::info!(run_id = %report.run_id, "Document analysed");
            let page = html::fine_print_page(state.has_server_key(), &selected, None, Some(&report));
            Html(page).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Fine-print request rejected");
            let page = html::fine_print_page(
                state.has_server_key(),
                &selected,
                Some(&err.to_string()),
                None,
            );
            (err.status(), Html(page)).into_response()
        }
    }
}

pub(crate) async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(html::landing_page()))
}
