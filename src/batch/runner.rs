//! Batch orchestration: identity extraction and chunked report generation.
//!
//! Generation runs `CHUNK_SIZE` records concurrently and awaits the whole
//! chunk before starting the next one. Results keep the input order, and a
//! failed record is reported in place instead of aborting the batch.

use std::path::{Path, PathBuf};

use futures_util::future::join_all;

use crate::llm::prompt::{extraction_prompt, report_prompt, PromptOptions, EXTRACTION_SYSTEM, GENERATION_SYSTEM};
use crate::llm::schema::{extraction_schema, report_schema};
use crate::llm::{parser, CompletionClient, CompletionRequest};
use crate::render::{render_docx, render_pdf};
use crate::report::{validate_report, PatientInfo, Report};

use super::storage::{dated_output_dir, run_stamp, unique_stems, write_artifacts};
use super::types::{BatchError, BatchGenerateRecord, BatchItemResult, BatchOutcome, CHUNK_SIZE};

/// Extract patient identity fields, one extraction call per image set.
///
/// Calls run in chunks of `CHUNK_SIZE` like generation. Always returns
/// exactly one record per set: a failed call yields an "Unknown" placeholder
/// carrying the failure note, so the caller can still collect clinical input
/// for every slot.
pub async fn extract_patients(
    client: &dyn CompletionClient,
    model: &str,
    image_sets: &[Vec<String>],
) -> Vec<PatientInfo> {
    let mut patients = Vec::with_capacity(image_sets.len());
    for chunk in image_sets.chunks(CHUNK_SIZE) {
        let extracted = join_all(chunk.iter().map(|images| extract_one(client, model, images)));
        patients.extend(extracted.await);
    }
    patients
}

async fn extract_one(
    client: &dyn CompletionClient,
    model: &str,
    images: &[String],
) -> PatientInfo {
    if images.is_empty() {
        return PatientInfo::unknown("no intake images provided");
    }

    let request = CompletionRequest {
        model: model.to_string(),
        system: EXTRACTION_SYSTEM.to_string(),
        prompt: extraction_prompt(images.len()),
        images: images.to_vec(),
        schema: Some(extraction_schema()),
    };

    let value = match client.complete(&request).await {
        Ok(response) => match parser::extract_json(&response) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "identity extraction returned unparseable JSON");
                return PatientInfo::unknown(format!("identity extraction failed: {e}"));
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "identity extraction call failed");
            return PatientInfo::unknown(format!("identity extraction failed: {e}"));
        }
    };

    patient_from_value(&value)
}

fn patient_from_value(value: &serde_json::Value) -> PatientInfo {
    let field = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Unknown")
            .to_string()
    };
    PatientInfo {
        id: uuid::Uuid::new_v4().to_string(),
        name: field("name"),
        date_of_birth: field("date_of_birth"),
        gender: field("gender"),
        medical_record_number: field("medical_record_number"),
        report_date: field("report_date"),
        hospital: field("hospital"),
        extraction_note: None,
    }
}

/// Run one schema-constrained completion and validate the result.
pub async fn structured_report(
    client: &dyn CompletionClient,
    model: &str,
    prompt: String,
    images: Vec<String>,
) -> Result<Report, BatchError> {
    let request = CompletionRequest {
        model: model.to_string(),
        system: GENERATION_SYSTEM.to_string(),
        prompt,
        images,
        schema: Some(report_schema()),
    };
    let response = client.complete(&request).await?;
    let value = parser::extract_json(&response)?;
    validate_report(&value).map_err(BatchError::Validation)
}

/// Generate one document pair per record into a dated folder under `base`.
///
/// Returns the directory the artifacts were written to along with one result
/// per record. File stems are fixed up front so two records with the same
/// patient name never write to the same files.
pub async fn generate_reports(
    client: &dyn CompletionClient,
    model: &str,
    records: &[BatchGenerateRecord],
    base: &Path,
) -> Result<(PathBuf, Vec<BatchItemResult>), BatchError> {
    let dir = dated_output_dir(base)?;
    let stamp = run_stamp();
    let names: Vec<&str> = records.iter().map(|r| r.patient.name.as_str()).collect();
    let stems = unique_stems(&names, &stamp);

    tracing::info!(
        records = records.len(),
        output_dir = %dir.display(),
        "starting batch generation"
    );

    let mut results = Vec::with_capacity(records.len());
    for (chunk, stem_chunk) in records.chunks(CHUNK_SIZE).zip(stems.chunks(CHUNK_SIZE)) {
        let outcomes = join_all(
            chunk
                .iter()
                .zip(stem_chunk)
                .map(|(record, stem)| generate_one(client, model, record, &dir, stem)),
        )
        .await;

        for (record, outcome) in chunk.iter().zip(outcomes) {
            let outcome = match outcome {
                Ok((pdf_file, docx_file)) => BatchOutcome::Success {
                    pdf_file,
                    docx_file,
                },
                Err(e) => {
                    tracing::warn!(
                        patient = %record.patient.name,
                        error = %e,
                        "report generation failed for record"
                    );
                    BatchOutcome::Error {
                        message: e.to_string(),
                    }
                }
            };
            results.push(BatchItemResult {
                patient_id: record.patient.id.clone(),
                patient_name: record.patient.name.clone(),
                outcome,
            });
        }
    }

    Ok((dir, results))
}

async fn generate_one(
    client: &dyn CompletionClient,
    model: &str,
    record: &BatchGenerateRecord,
    dir: &Path,
    stem: &str,
) -> Result<(String, String), BatchError> {
    let prompt = report_prompt(
        Some(&record.patient),
        &record.clinical_input,
        &PromptOptions::default(),
    );
    let report = structured_report(client, model, prompt, Vec::new()).await?;

    let pdf = render_pdf(&report)?;
    let docx = render_docx(&report)?;
    let (pdf_file, docx_file) = write_artifacts(dir, stem, &pdf, &docx)?;

    tracing::info!(patient = %record.patient.name, pdf = %pdf_file, "report generated");
    Ok((pdf_file, docx_file))
}
