//! Prompt templates.
//!
//! Single-report and batch generation share one template; the only knob is
//! whether the medication instructions carry the contraindication clause.

use crate::report::PatientInfo;

/// System prompt for report generation.
pub const GENERATION_SYSTEM: &str = "You are a clinical documentation assistant \
for a rehabilitation medicine department. You write structured medical reports \
from clinical findings. Respond with a single JSON document matching the \
requested schema. Do not include any text outside the JSON.";

/// System prompt for patient identity extraction.
pub const EXTRACTION_SYSTEM: &str = "You are a medical records assistant. You \
read patient intake documents and extract identity fields exactly as written. \
Respond with a single JSON document matching the requested schema. Do not \
include any text outside the JSON.";

/// Generation knobs that differ between call sites.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptOptions {
    /// Append a contraindication check to the medication instructions.
    pub contraindication_note: bool,
}

/// Build the user prompt for one report.
///
/// With a known patient the identity fields are pinned and must be copied
/// verbatim; without one (single-report path, identity is on the attached
/// images) the model is told to read them from the input.
pub fn report_prompt(
    patient: Option<&PatientInfo>,
    clinical_input: &str,
    options: &PromptOptions,
) -> String {
    let identity = match patient {
        Some(patient) => format!(
            "Patient identity (copy these fields verbatim into the report):\n\
             - Name: {name}\n\
             - Date of birth: {dob}\n\
             - Gender: {gender}\n\
             - Medical record number: {mrn}\n\
             - Report date: {report_date}\n\
             - Hospital: {hospital}\n",
            name = patient.name,
            dob = patient.date_of_birth,
            gender = patient.gender,
            mrn = patient.medical_record_number,
            report_date = patient.report_date,
            hospital = patient.hospital,
        ),
        None => "Read the patient identity fields from the attached input. Use \
                 the string \"Unknown\" for any field that is not present.\n"
            .to_string(),
    };

    let mut prompt = format!(
        "Write a complete medical report for the following patient.\n\
         \n\
         {identity}\
         \n\
         Clinical input:\n\
         {clinical_input}\n\
         \n\
         Requirements:\n\
         - Preserve quantitative findings exactly as stated, including pain scores.\n\
         - List each diagnosis with its ICD-10 code and a one-line description.\n\
         - Prescribe a home exercise program performed 3 times per week with a \
           duration of 6 months.\n",
    );

    if options.contraindication_note {
        prompt.push_str(
            "- For each medication, note any contraindication relevant to the \
             patient's history.\n",
        );
    }

    prompt
}

/// Build the user prompt for identity extraction from one patient's images.
pub fn extraction_prompt(image_count: usize) -> String {
    format!(
        "The {image_count} attached image(s) are intake documents for a single \
         patient. Extract the patient's identity fields. Use the string \
         \"Unknown\" for any field that cannot be read."
    )
}
