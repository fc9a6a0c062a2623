//! Structural validation of LLM-generated report JSON.
//!
//! The shape is described declaratively (required string paths, required
//! string-array paths, plus the diagnosis record shape). Validation collects
//! EVERY violated field path before failing, so a caller can surface the full
//! list in one response. Rendering never starts on a report that failed here.

use serde_json::Value;

use super::model::Report;

/// One violated field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Required non-empty string fields, as dotted paths.
const REQUIRED_STRINGS: &[&str] = &[
    "patient.name",
    "patient.date_of_birth",
    "patient.gender",
    "patient.medical_record_number",
    "patient.report_date",
    "patient.hospital",
    "clinical_history",
    "clinical_notes",
    "conclusion",
    "treatment_plan.home_physio.frequency",
    "treatment_plan.home_physio.duration",
    "signature.date",
];

/// Required arrays whose elements must all be strings.
const REQUIRED_STRING_ARRAYS: &[&str] = &[
    "past_medical_history",
    "vital_signs",
    "treatment_plan.medications",
    "treatment_plan.short_term_goals",
    "treatment_plan.long_term_goals",
    "prognosis",
];

/// Required string fields of each diagnosis record.
const DIAGNOSIS_FIELDS: &[&str] = &["label", "code", "description"];

/// Validate a JSON payload against the report shape.
///
/// Returns the deserialized `Report` on success, or the complete list of
/// violated field paths on failure.
pub fn validate_report(value: &Value) -> Result<Report, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    for path in REQUIRED_STRINGS {
        check_string(value, path, &mut violations);
    }

    for path in REQUIRED_STRING_ARRAYS {
        check_string_array(value, path, &mut violations);
    }

    check_diagnoses(value, &mut violations);

    if !violations.is_empty() {
        return Err(violations);
    }

    // Shape holds; any residual serde failure is reported as a violation too.
    serde_json::from_value(value.clone()).map_err(|e| {
        vec![FieldViolation {
            path: "$".to_string(),
            message: format!("deserialization failed: {e}"),
        }]
    })
}

/// Resolve a dotted path against a JSON value.
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

fn check_string(value: &Value, path: &str, violations: &mut Vec<FieldViolation>) {
    match lookup(value, path) {
        None | Some(Value::Null) => violations.push(FieldViolation {
            path: path.to_string(),
            message: "required field is missing".to_string(),
        }),
        Some(Value::String(s)) if s.trim().is_empty() => violations.push(FieldViolation {
            path: path.to_string(),
            message: "must be a non-empty string".to_string(),
        }),
        Some(Value::String(_)) => {}
        Some(other) => violations.push(FieldViolation {
            path: path.to_string(),
            message: format!("expected string, found {}", type_name(other)),
        }),
    }
}

fn check_string_array(value: &Value, path: &str, violations: &mut Vec<FieldViolation>) {
    match lookup(value, path) {
        None | Some(Value::Null) => violations.push(FieldViolation {
            path: path.to_string(),
            message: "required array is missing".to_string(),
        }),
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    violations.push(FieldViolation {
                        path: format!("{path}[{i}]"),
                        message: format!("expected string, found {}", type_name(item)),
                    });
                }
            }
        }
        Some(other) => violations.push(FieldViolation {
            path: path.to_string(),
            message: format!("expected array, found {}", type_name(other)),
        }),
    }
}

fn check_diagnoses(value: &Value, violations: &mut Vec<FieldViolation>) {
    match lookup(value, "diagnoses") {
        None | Some(Value::Null) => violations.push(FieldViolation {
            path: "diagnoses".to_string(),
            message: "required array is missing".to_string(),
        }),
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                for field in DIAGNOSIS_FIELDS {
                    match item.get(field) {
                        Some(Value::String(s)) if !s.trim().is_empty() => {}
                        Some(Value::String(_)) => violations.push(FieldViolation {
                            path: format!("diagnoses[{i}].{field}"),
                            message: "must be a non-empty string".to_string(),
                        }),
                        Some(other) => violations.push(FieldViolation {
                            path: format!("diagnoses[{i}].{field}"),
                            message: format!("expected string, found {}", type_name(other)),
                        }),
                        None => violations.push(FieldViolation {
                            path: format!("diagnoses[{i}].{field}"),
                            message: "required field is missing".to_string(),
                        }),
                    }
                }
            }
        }
        Some(other) => violations.push(FieldViolation {
            path: "diagnoses".to_string(),
            message: format!("expected array, found {}", type_name(other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_fixtures::sample_report;

    fn valid_payload() -> Value {
        serde_json::to_value(sample_report()).unwrap()
    }

    #[test]
    fn valid_payload_passes() {
        let report = validate_report(&valid_payload()).unwrap();
        assert_eq!(report.patient.name, "Jane Doe");
        assert_eq!(report.treatment_plan.home_physio.frequency, "3 times per week");
    }

    #[test]
    fn missing_field_reported_with_path() {
        let mut payload = valid_payload();
        payload["patient"].as_object_mut().unwrap().remove("name");

        let violations = validate_report(&payload).unwrap_err();
        assert!(violations.iter().any(|v| v.path == "patient.name"));
    }

    #[test]
    fn all_violations_collected_in_one_pass() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("clinical_history");
        payload.as_object_mut().unwrap().remove("prognosis");
        payload["signature"].as_object_mut().unwrap().remove("date");

        let violations = validate_report(&payload).unwrap_err();
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"clinical_history"));
        assert!(paths.contains(&"prognosis"));
        assert!(paths.contains(&"signature.date"));
        assert!(violations.len() >= 3);
    }

    #[test]
    fn wrong_type_reported() {
        let mut payload = valid_payload();
        payload["conclusion"] = serde_json::json!(42);

        let violations = validate_report(&payload).unwrap_err();
        let v = violations.iter().find(|v| v.path == "conclusion").unwrap();
        assert!(v.message.contains("number"));
    }

    #[test]
    fn empty_string_rejected() {
        let mut payload = valid_payload();
        payload["clinical_notes"] = serde_json::json!("   ");

        let violations = validate_report(&payload).unwrap_err();
        assert!(violations.iter().any(|v| v.path == "clinical_notes"));
    }

    #[test]
    fn non_string_array_element_indexed() {
        let mut payload = valid_payload();
        payload["vital_signs"] = serde_json::json!(["BP 120/80", 37.2]);

        let violations = validate_report(&payload).unwrap_err();
        assert!(violations.iter().any(|v| v.path == "vital_signs[1]"));
    }

    #[test]
    fn diagnosis_record_fields_checked() {
        let mut payload = valid_payload();
        payload["diagnoses"] = serde_json::json!([
            {"label": "Lumbar strain", "code": "S39.012", "description": "Acute strain"},
            {"label": "Sciatica", "description": "Radiating pain"}
        ]);

        let violations = validate_report(&payload).unwrap_err();
        assert!(violations.iter().any(|v| v.path == "diagnoses[1].code"));
    }

    #[test]
    fn null_treated_as_missing() {
        let mut payload = valid_payload();
        payload["clinical_history"] = Value::Null;

        let violations = validate_report(&payload).unwrap_err();
        let v = violations
            .iter()
            .find(|v| v.path == "clinical_history")
            .unwrap();
        assert!(v.message.contains("missing"));
    }

    #[test]
    fn violation_display_includes_path() {
        let v = FieldViolation {
            path: "patient.name".into(),
            message: "required field is missing".into(),
        };
        assert_eq!(v.to_string(), "patient.name: required field is missing");
    }
}
