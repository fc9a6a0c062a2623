use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::CompletionError;
use crate::render::RenderError;
use crate::report::{FieldViolation, PatientInfo};

/// Records generated concurrently per chunk. Local inference saturates with
/// two in-flight requests.
pub const CHUNK_SIZE: usize = 2;

/// One batch generation input: an extracted (or hand-entered) patient plus
/// the clinical findings collected for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchGenerateRecord {
    pub patient: PatientInfo,
    pub clinical_input: String,
}

/// Per-patient outcome. A failed record never aborts the batch; it is
/// reported in place so the output order matches the input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchOutcome {
    Success { pdf_file: String, docx_file: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub patient_id: String,
    pub patient_name: String,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("report validation failed: {}", format_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_status_tag() {
        let success = BatchOutcome::Success {
            pdf_file: "a.pdf".into(),
            docx_file: "a.docx".into(),
        };
        let json = serde_json::to_value(&success).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["pdf_file"], "a.pdf");

        let error = BatchOutcome::Error {
            message: "upstream failure".into(),
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["status"], "error");
    }

    #[test]
    fn item_result_flattens_outcome() {
        let item = BatchItemResult {
            patient_id: "p-1".into(),
            patient_name: "Jane Doe".into(),
            outcome: BatchOutcome::Error {
                message: "boom".into(),
            },
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["patient_name"], "Jane Doe");
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn validation_error_lists_paths() {
        let err = BatchError::Validation(vec![
            FieldViolation {
                path: "patient.name".into(),
                message: "required field is missing".into(),
            },
            FieldViolation {
                path: "prognosis".into(),
                message: "required array is missing".into(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("patient.name"));
        assert!(text.contains("prognosis"));
    }
}
