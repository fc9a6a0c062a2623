//! Single-report path: multipart form with one or more `image` parts plus an
//! optional `clinical_notes` text part.

use axum::extract::{Multipart, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::batch::runner::structured_report;
use crate::batch::storage::{artifact_stem, run_stamp, write_artifacts};
use crate::llm::prompt::{report_prompt, PromptOptions};
use crate::report::Report;

#[derive(Serialize)]
pub struct ReportResponse {
    pub report: Report,
    pub pdf_file: String,
    pub docx_file: String,
}

pub async fn generate(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<ReportResponse>, ApiError> {
    let mut images = Vec::new();
    let mut clinical_notes = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::MissingInput(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::MissingInput(format!("unreadable image part: {e}")))?;
                images.push(BASE64.encode(&bytes));
            }
            Some("clinical_notes") => {
                clinical_notes = field
                    .text()
                    .await
                    .map_err(|e| ApiError::MissingInput(format!("unreadable notes part: {e}")))?;
            }
            _ => {}
        }
    }

    if images.is_empty() {
        return Err(ApiError::MissingInput(
            "at least one 'image' part is required".to_string(),
        ));
    }

    tracing::info!(images = images.len(), "single report requested");

    let prompt = report_prompt(
        None,
        &clinical_notes,
        &PromptOptions {
            contraindication_note: true,
        },
    );
    let report = structured_report(ctx.client.as_ref(), &ctx.model, prompt, images).await?;

    let pdf = crate::render::render_pdf(&report)?;
    let docx = crate::render::render_docx(&report)?;

    std::fs::create_dir_all(&ctx.single_output_dir)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let stem = artifact_stem(&report.patient.name, &run_stamp());
    let (pdf_file, docx_file) = write_artifacts(&ctx.single_output_dir, &stem, &pdf, &docx)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(patient = %report.patient.name, pdf = %pdf_file, "single report generated");

    Ok(Json(ReportResponse {
        report,
        pdf_file,
        docx_file,
    }))
}
