//! Shared document plan: the section traversal both backends interpret.
//!
//! The fixed section order lives here exactly once. The PDF backend walks the
//! commands through the page flow controller; the DOCX backend walks the same
//! commands and lets the host format reflow.

use crate::report::Report;

/// One renderable section command.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionCommand {
    /// Document title.
    Title(String),
    /// Section header.
    Header(String),
    /// Subordinate bold label inside a section, body-sized.
    Label(String),
    /// Free-text paragraph, wrapped by the backend.
    Paragraph(String),
    /// Bulleted list, one bullet per item.
    Bullets(Vec<String>),
    /// Fixed block of plain lines, kept together as one atomic unit.
    Lines(Vec<String>),
}

/// Report title emitted at the top of every document.
pub const REPORT_TITLE: &str = "MEDICAL REPORT";

/// Build the ordered command list for a validated report.
///
/// Deterministic: the same report always yields an identical plan.
pub fn build_plan(report: &Report) -> Vec<SectionCommand> {
    let mut plan = Vec::new();

    plan.push(SectionCommand::Title(REPORT_TITLE.to_string()));

    plan.push(SectionCommand::Header("Patient Information".to_string()));
    plan.push(SectionCommand::Lines(vec![
        format!("Name: {}", report.patient.name),
        format!("Date of Birth: {}", report.patient.date_of_birth),
        format!("Gender: {}", report.patient.gender),
        format!("Medical Record Number: {}", report.patient.medical_record_number),
        format!("Report Date: {}", report.patient.report_date),
        format!("Hospital: {}", report.patient.hospital),
    ]));

    plan.push(SectionCommand::Header("Clinical History".to_string()));
    plan.push(SectionCommand::Paragraph(report.clinical_history.clone()));

    plan.push(SectionCommand::Header("Past Medical History".to_string()));
    plan.push(SectionCommand::Bullets(report.past_medical_history.clone()));

    plan.push(SectionCommand::Header("Vital Signs".to_string()));
    plan.push(SectionCommand::Bullets(report.vital_signs.clone()));

    plan.push(SectionCommand::Header("Clinical Notes".to_string()));
    plan.push(SectionCommand::Paragraph(report.clinical_notes.clone()));

    plan.push(SectionCommand::Header("Diagnoses".to_string()));
    plan.push(SectionCommand::Bullets(
        report
            .diagnoses
            .iter()
            .map(|d| format!("{} ({}): {}", d.label, d.code, d.description))
            .collect(),
    ));

    plan.push(SectionCommand::Header("Treatment Plan".to_string()));
    plan.push(SectionCommand::Bullets(report.treatment_plan.medications.clone()));
    plan.push(SectionCommand::Lines(vec![
        format!(
            "Home exercise program: {}",
            report.treatment_plan.home_physio.frequency
        ),
        format!("Duration: {}", report.treatment_plan.home_physio.duration),
    ]));

    plan.push(SectionCommand::Label("Short-Term Goals".to_string()));
    plan.push(SectionCommand::Bullets(
        report.treatment_plan.short_term_goals.clone(),
    ));

    plan.push(SectionCommand::Label("Long-Term Goals".to_string()));
    plan.push(SectionCommand::Bullets(
        report.treatment_plan.long_term_goals.clone(),
    ));

    plan.push(SectionCommand::Header("Prognosis".to_string()));
    plan.push(SectionCommand::Bullets(report.prognosis.clone()));

    plan.push(SectionCommand::Header("Conclusion".to_string()));
    plan.push(SectionCommand::Paragraph(report.conclusion.clone()));

    plan.push(SectionCommand::Lines(report.signature.lines()));

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_fixtures::sample_report;

    fn headers(plan: &[SectionCommand]) -> Vec<&str> {
        plan.iter()
            .filter_map(|c| match c {
                SectionCommand::Header(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn section_order_is_fixed() {
        let plan = build_plan(&sample_report());
        assert_eq!(
            headers(&plan),
            vec![
                "Patient Information",
                "Clinical History",
                "Past Medical History",
                "Vital Signs",
                "Clinical Notes",
                "Diagnoses",
                "Treatment Plan",
                "Prognosis",
                "Conclusion",
            ]
        );
        assert!(matches!(plan[0], SectionCommand::Title(_)));
    }

    #[test]
    fn goal_lists_stay_inside_the_treatment_plan_section() {
        let plan = build_plan(&sample_report());
        let treatment_at = plan
            .iter()
            .position(|c| matches!(c, SectionCommand::Header(h) if h == "Treatment Plan"))
            .unwrap();
        let prognosis_at = plan
            .iter()
            .position(|c| matches!(c, SectionCommand::Header(h) if h == "Prognosis"))
            .unwrap();

        // Medications, home program, then both goal lists under one header.
        let section = &plan[treatment_at + 1..prognosis_at];
        let labels: Vec<&str> = section
            .iter()
            .filter_map(|c| match c {
                SectionCommand::Label(l) => Some(l.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Short-Term Goals", "Long-Term Goals"]);
        assert!(!section
            .iter()
            .any(|c| matches!(c, SectionCommand::Header(_))));
    }

    #[test]
    fn plan_is_deterministic() {
        let report = sample_report();
        assert_eq!(build_plan(&report), build_plan(&report));
    }

    #[test]
    fn diagnoses_formatted_with_label_code_description() {
        let plan = build_plan(&sample_report());
        let diag_bullets = plan
            .iter()
            .zip(plan.iter().skip(1))
            .find_map(|(a, b)| match (a, b) {
                (SectionCommand::Header(h), SectionCommand::Bullets(items))
                    if h == "Diagnoses" =>
                {
                    Some(items.clone())
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(
            diag_bullets[0],
            "Lumbar strain (S39.012): Acute strain of muscle and tendon of lower back"
        );
    }

    #[test]
    fn signature_block_is_last_and_atomic() {
        let plan = build_plan(&sample_report());
        match plan.last().unwrap() {
            SectionCommand::Lines(lines) => {
                assert_eq!(lines.len(), 7);
                assert_eq!(lines[1], crate::report::SIGNATURE_PHYSICIAN);
            }
            other => panic!("expected signature Lines block, got {other:?}"),
        }
    }

    #[test]
    fn home_physio_rendered_as_two_plain_lines() {
        let plan = build_plan(&sample_report());
        let lines_block = plan
            .iter()
            .filter_map(|c| match c {
                SectionCommand::Lines(lines) if lines[0].starts_with("Home exercise") => {
                    Some(lines)
                }
                _ => None,
            })
            .next()
            .unwrap();
        assert_eq!(lines_block.len(), 2);
        assert_eq!(lines_block[0], "Home exercise program: 3 times per week");
        assert_eq!(lines_block[1], "Duration: 6 months");
    }
}
