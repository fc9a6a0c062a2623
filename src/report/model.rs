//! Report data model: the validated structured document for one patient.
//!
//! A `Report` is constructed once from a validated JSON payload returned by
//! the LLM (see `report::validate`), is immutable thereafter, and is consumed
//! by the renderers. Every array field preserves insertion order; all string
//! fields are plain text with no embedded markup.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Signature constants ──────────────────────────────────────────────────────

/// Fixed fields of the signature block. The generated `Report` carries only
/// the date; these literals are emitted verbatim by both renderers.
pub const SIGNATURE_PHYSICIAN: &str = "Dr. Emily Carter, MD";
pub const SIGNATURE_CREDENTIALS: &str = "Board Certified, Physical Medicine & Rehabilitation";
pub const SIGNATURE_LICENSE: &str = "License No. MD-482913";
pub const SIGNATURE_DEPARTMENT: &str = "Department of Rehabilitation Medicine";
pub const SIGNATURE_HOSPITAL: &str = "City General Hospital";

// ─── Types ────────────────────────────────────────────────────────────────────

/// A single patient's generated report content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub patient: ReportPatient,
    pub clinical_history: String,
    pub past_medical_history: Vec<String>,
    pub vital_signs: Vec<String>,
    pub clinical_notes: String,
    pub diagnoses: Vec<Diagnosis>,
    pub treatment_plan: TreatmentPlan,
    pub prognosis: Vec<String>,
    pub conclusion: String,
    pub signature: Signature,
}

/// Patient identity block inside a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPatient {
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub medical_record_number: String,
    pub report_date: String,
    pub hospital: String,
}

/// One diagnosis record. Rendered as `"<label> (<code>): <description>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub label: String,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub medications: Vec<String>,
    pub home_physio: HomePhysio,
    pub short_term_goals: Vec<String>,
    pub long_term_goals: Vec<String>,
}

/// Fixed-frequency/fixed-duration home-therapy pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomePhysio {
    pub frequency: String,
    pub duration: String,
}

/// Signature block. The fixed fields are constants; only the date varies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub date: String,
}

impl Signature {
    /// The seven fixed-order lines of the signature block.
    pub fn lines(&self) -> Vec<String> {
        vec![
            "_________________________".to_string(),
            SIGNATURE_PHYSICIAN.to_string(),
            SIGNATURE_CREDENTIALS.to_string(),
            SIGNATURE_LICENSE.to_string(),
            SIGNATURE_DEPARTMENT.to_string(),
            SIGNATURE_HOSPITAL.to_string(),
            format!("Date: {}", self.date),
        ]
    }
}

/// Patient identity as extracted from images, prior to report generation.
///
/// Carries a generated correlation id and, when the extraction call failed,
/// a note explaining why. May be edited by a reviewer before generation and
/// is discarded once a `Report` exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub medical_record_number: String,
    pub report_date: String,
    pub hospital: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_note: Option<String>,
}

impl PatientInfo {
    /// Placeholder identity substituted when extraction fails, so a batch
    /// always returns exactly N results.
    pub fn unknown(note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Unknown".to_string(),
            date_of_birth: "Unknown".to_string(),
            gender: "Unknown".to_string(),
            medical_record_number: "Unknown".to_string(),
            report_date: "Unknown".to_string(),
            hospital: "Unknown".to_string(),
            extraction_note: Some(note.into()),
        }
    }
}
