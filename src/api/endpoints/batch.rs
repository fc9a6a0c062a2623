//! Batch path: identity extraction from intake images, then chunked report
//! generation into a dated output folder.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::batch::{extract_patients, generate_reports, BatchGenerateRecord, BatchItemResult};
use crate::report::PatientInfo;

#[derive(Deserialize)]
pub struct ExtractRequest {
    pub patients: Vec<ExtractRecord>,
}

/// One patient's base64-encoded intake images.
#[derive(Deserialize)]
pub struct ExtractRecord {
    pub images: Vec<String>,
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub patients: Vec<PatientInfo>,
}

pub async fn extract(
    State(ctx): State<ApiContext>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    if request.patients.is_empty() {
        return Err(ApiError::EmptyBatch);
    }

    tracing::info!(records = request.patients.len(), "batch extraction requested");
    let image_sets: Vec<Vec<String>> =
        request.patients.into_iter().map(|r| r.images).collect();
    let patients = extract_patients(ctx.client.as_ref(), &ctx.model, &image_sets).await;
    Ok(Json(ExtractResponse { patients }))
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub records: Vec<BatchGenerateRecord>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub output_dir: String,
    pub results: Vec<BatchItemResult>,
}

pub async fn generate(
    State(ctx): State<ApiContext>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.records.is_empty() {
        return Err(ApiError::EmptyBatch);
    }

    let (output_dir, results) = generate_reports(
        ctx.client.as_ref(),
        &ctx.model,
        &request.records,
        &ctx.batch_output_base,
    )
    .await?;

    Ok(Json(GenerateResponse {
        output_dir: output_dir.display().to_string(),
        results,
    }))
}
