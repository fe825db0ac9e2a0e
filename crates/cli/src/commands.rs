//! Subcommand bodies.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use llm::{suggest_tiers, GeminiProvider};
use nodes::{process_diagram, process_document, DiagramReport, DocumentInput, DocumentReport, ReasoningGateway};
use pdf::PdfDecoder;
use pipeline::{ApiKey, AppConfig, DocumentType, ImagePayload, ModelSettings};
use serde::Serialize;
use web::AppState;

use crate::FinePrintSource;

fn provider(config: &AppConfig) -> Arc<GeminiProvider> {
    Arc::new(GeminiProvider::new(config.api_base_url.clone()))
}

fn require_key(config: &AppConfig) -> anyhow::Result<ApiKey> {
    let key = config
        .api_key
        .clone()
        .ok_or_else(|| anyhow!("no API key: pass --api-key or set GEMINI_API_KEY (a .env file works too)"))?;
    if !key.looks_valid() {
        tracing::warn!("API key seems too short, it might be invalid");
    }
    Ok(key)
}

fn gateway(config: &AppConfig, models: ModelSettings) -> anyhow::Result<Arc<ReasoningGateway>> {
    Ok(Arc::new(ReasoningGateway::new(
        provider(config),
        models,
        require_key(config)?,
    )))
}

async fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

async fn read_image(path: &Path) -> anyhow::Result<ImagePayload> {
    let bytes = read_file(path).await?;
    ImagePayload::from_bytes(bytes)
        .ok_or_else(|| anyhow!("{}: not a PNG, JPEG, WebP or GIF image", path.display()))
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_section(title: &str, body: &str) {
    println!("== {title} ==\n{}\n", body.trim_end());
}

pub async fn serve(config: AppConfig, addr: SocketAddr) -> anyhow::Result<()> {
    if config.api_key.is_none() {
        tracing::warn!("No server API key configured; every form submission must supply one");
    }
    let state = AppState::new(provider(&config), Arc::new(PdfDecoder), config);
    web::serve(addr, state).await?;
    Ok(())
}

pub async fn diagram(config: AppConfig, image: &Path, json: bool) -> anyhow::Result<()> {
    let image = read_image(image).await?;
    let gateway = gateway(&config, config.diagram_models())?;

    let report: DiagramReport = process_diagram(gateway, image, &config.limits).await?;

    if json {
        return print_json(&report);
    }
    print_section("Image Description", &report.image_description);
    print_section("Step-by-Step Explanation", &report.logical_explanation);
    print_section("Quiz Questions", &report.quiz_questions);
    Ok(())
}

pub async fn fine_print(
    config: AppConfig,
    source: FinePrintSource,
    document_type: String,
    json: bool,
) -> anyhow::Result<()> {
    let mut input = DocumentInput::default();
    if let Some(text) = source.text {
        input.text = Some(text);
    } else if let Some(path) = source.text_file {
        input.text = Some(
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?,
        );
    } else if let Some(path) = source.image {
        input.image = Some(read_image(&path).await?);
    } else if let Some(path) = source.pdf {
        input.paged = Some(read_file(&path).await?);
    }

    let gateway = gateway(&config, config.document_models())?;
    let report: DocumentReport = process_document(
        gateway,
        Arc::new(PdfDecoder),
        input,
        DocumentType::or_fallback(document_type),
        &config.limits,
    )
    .await?;

    if json {
        return print_json(&report);
    }
    print_section("Risk Summary", &report.risk_summary);
    print_section("Detailed Risk Audit", &report.risk_audit);
    print_section("Document Preview", &report.document_preview);
    Ok(())
}

pub async fn models(config: AppConfig) -> anyhow::Result<()> {
    let key = require_key(&config)?;
    let models = provider(&config)
        .list_models(&key)
        .await
        .context("failed to list models")?;

    if models.is_empty() {
        bail!("no models with generateContent support are available to this key");
    }

    println!("Models supporting generateContent:");
    for model in &models {
        match &model.display_name {
            Some(display) => println!("  {}  ({display})", model.name),
            None => println!("  {}", model.name),
        }
    }

    let (fast, reasoning) = suggest_tiers(&models);
    println!();
    if let Some(fast) = fast {
        println!("Suggested GEMINI_FLASH_MODEL={fast}");
    }
    if let Some(reasoning) = reasoning {
        println!("Suggested GEMINI_PRO_MODEL={reasoning}");
    }
    Ok(())
}

/// Prints the effective configuration. Fails when no key is set.
pub fn check(config: &AppConfig) -> anyhow::Result<()> {
    println!("API base URL:    {}", config.api_base_url);
    println!("Fast model:      {}", config.flash_model);
    println!("Reasoning model: {}", config.pro_model);
    println!("Max image size:  {}", config.limits.max_image);
    println!("Max PDF size:    {}", config.limits.max_document);

    match &config.api_key {
        Some(key) if key.looks_valid() => {
            println!("API key:         ✅ found (length: {})", key.expose().len());
            Ok(())
        }
        Some(key) => {
            println!(
                "API key:         ⚠️ found but seems too short (length: {})",
                key.expose().len()
            );
            Ok(())
        }
        None => bail!("API key not found: set GEMINI_API_KEY or create a .env file with GEMINI_API_KEY=your_key_here"),
    }
}
