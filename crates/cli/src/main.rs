//! Lumen CLI entry point.
//!
//! This binary is the composition root for the whole system:
//!
//! 1. **Load configuration**: read `.env` (if present) and the process
//!    environment into a [`pipeline::AppConfig`], with `--api-key` taking
//!    precedence over `GEMINI_API_KEY`.
//! 2. **Wire observability**: install a `tracing-subscriber` pipeline with a
//!    pretty or JSON formatter and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set,
//!    an OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: create the `GeminiProvider` and
//!    `PdfDecoder` and inject them into the pipelines or the web UI.
//! 4. **Dispatch**: `serve`, `diagram`, `fine-print`, `models` or `check`.

mod commands;
mod telemetry;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pipeline::{ApiKey, AppConfig, DocumentType};

use crate::telemetry::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "lumen", version, about = "Diagram decoder and fine-print translator on Gemini")]
struct Cli {
    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "LUMEN_LOG_FORMAT", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the web form UI.
    Serve {
        #[arg(long, env = "LUMEN_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
        host: IpAddr,
        #[arg(long, env = "LUMEN_PORT", default_value_t = 8501)]
        port: u16,
    },

    /// Describe, explain and quiz a diagram image.
    Diagram {
        image: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Audit a contract or policy for risky clauses.
    FinePrint {
        #[command(flatten)]
        source: FinePrintSource,
        #[arg(long, default_value = DocumentType::FALLBACK)]
        document_type: String,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List models available to the API key.
    Models,

    /// Print the effective configuration and validate the API key.
    Check,
}

/// Exactly one document source.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct FinePrintSource {
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub text_file: Option<PathBuf>,
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long)]
    pub pdf: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Loaded before parsing so clap's `env` fallbacks see `.env` values.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let _telemetry = match telemetry::init(cli.log_format) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("failed to initialise logging: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    match &dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable .env"),
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{err:#}");
            tracing::error!(error = %message, "Command failed");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_lookup(|key| std::env::var(key).ok())?;
    if let Some(key) = cli.api_key.and_then(ApiKey::new) {
        config.api_key = Some(key);
    }

    match cli.command {
        Command::Serve { host, port } => commands::serve(config, SocketAddr::new(host, port)).await,
        Command::Diagram { image, json } => commands::diagram(config, &image, json).await,
        Command::FinePrint {
            source,
            document_type,
            json,
        } => commands::fine_print(config, source, document_type, json).await,
        Command::Models => commands::models(config).await,
        Command::Check => commands::check(&config),
    }
}
