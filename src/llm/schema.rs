//! JSON schema constraints sent with each completion request.
//!
//! Ollama's `format` field accepts a JSON schema and constrains decoding to
//! it. These schemas mirror the shapes the validator enforces afterwards.

use serde_json::{json, Value};

fn string() -> Value {
    json!({"type": "string"})
}

fn string_array() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}

/// Schema for a full report document.
pub fn report_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "patient": {
                "type": "object",
                "properties": {
                    "name": string(),
                    "date_of_birth": string(),
                    "gender": string(),
                    "medical_record_number": string(),
                    "report_date": string(),
                    "hospital": string(),
                },
                "required": [
                    "name", "date_of_birth", "gender",
                    "medical_record_number", "report_date", "hospital"
                ],
            },
            "clinical_history": string(),
            "past_medical_history": string_array(),
            "vital_signs": string_array(),
            "clinical_notes": string(),
            "diagnoses": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "label": string(),
                        "code": string(),
                        "description": string(),
                    },
                    "required": ["label", "code", "description"],
                },
            },
            "treatment_plan": {
                "type": "object",
                "properties": {
                    "medications": string_array(),
                    "home_physio": {
                        "type": "object",
                        "properties": {
                            "frequency": string(),
                            "duration": string(),
                        },
                        "required": ["frequency", "duration"],
                    },
                    "short_term_goals": string_array(),
                    "long_term_goals": string_array(),
                },
                "required": [
                    "medications", "home_physio",
                    "short_term_goals", "long_term_goals"
                ],
            },
            "prognosis": string_array(),
            "conclusion": string(),
            "signature": {
                "type": "object",
                "properties": {"date": string()},
                "required": ["date"],
            },
        },
        "required": [
            "patient", "clinical_history", "past_medical_history", "vital_signs",
            "clinical_notes", "diagnoses", "treatment_plan", "prognosis",
            "conclusion", "signature"
        ],
    })
}

/// Schema for one patient's identity extraction response.
pub fn extraction_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": string(),
            "date_of_birth": string(),
            "gender": string(),
            "medical_record_number": string(),
            "report_date": string(),
            "hospital": string(),
        },
        "required": [
            "name", "date_of_birth", "gender",
            "medical_record_number", "report_date", "hospital"
        ],
    })
}
