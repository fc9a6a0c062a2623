//! Clinscribe: LLM-backed medical report generation.
//!
//! Clinical input (intake images and/or notes) goes to a local model, the
//! structured JSON it returns is validated, and the validated report is
//! rendered to a PDF/DOCX document pair. A batch workflow extracts patient
//! identities from intake images and generates one document pair per patient
//! into a dated output folder.

pub mod api;
pub mod batch;
pub mod config;
pub mod llm;
pub mod render;
pub mod report;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{api_router, ApiContext};
use crate::llm::OllamaClient;

/// Initialize tracing and serve the API until shutdown.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let client = Arc::new(OllamaClient::from_env()?);
    let ctx = ApiContext::new(
        client,
        config::model_name(),
        config::batch_output_base(),
        config::single_report_dir(),
    );

    let addr = config::listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, model = %config::model_name(), "listening");

    axum::serve(listener, api_router(ctx)).await?;
    Ok(())
}
