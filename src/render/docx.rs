//! DOCX backend: interprets the section plan with `docx-rs`.
//!
//! No page flow here. Word reflows paragraphs itself, so the interpreter maps
//! each command straight to styled paragraphs and lets the host paginate.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use crate::report::Report;

use super::plan::{build_plan, SectionCommand};
use super::RenderError;

// Run sizes are half-points.
const TITLE_SIZE: usize = 28;
const HEADER_SIZE: usize = 22;
const BODY_SIZE: usize = 18;

/// Render a validated report to DOCX bytes.
pub fn render_docx(report: &Report) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new();

    for command in build_plan(report) {
        match command {
            SectionCommand::Title(title) => {
                docx = docx
                    .add_paragraph(styled(&title, TITLE_SIZE, true))
                    .add_paragraph(Paragraph::new());
            }
            SectionCommand::Header(header) => {
                docx = docx.add_paragraph(styled(&header, HEADER_SIZE, true));
            }
            SectionCommand::Label(label) => {
                docx = docx.add_paragraph(styled(&label, BODY_SIZE, true));
            }
            SectionCommand::Paragraph(text) => {
                docx = docx
                    .add_paragraph(styled(&text, BODY_SIZE, false))
                    .add_paragraph(Paragraph::new());
            }
            SectionCommand::Bullets(items) => {
                for item in &items {
                    docx = docx.add_paragraph(styled(&format!("· {item}"), BODY_SIZE, false));
                }
                docx = docx.add_paragraph(Paragraph::new());
            }
            SectionCommand::Lines(lines) => {
                for line in &lines {
                    docx = docx.add_paragraph(styled(line, BODY_SIZE, false));
                }
                docx = docx.add_paragraph(Paragraph::new());
            }
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Docx(format!("pack error: {e}")))?;
    Ok(buf.into_inner())
}

fn styled(text: &str, size: usize, bold: bool) -> Paragraph {
    let mut run = Run::new().add_text(text).size(size);
    if bold {
        run = run.bold();
    }
    Paragraph::new().add_run(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_fixtures::sample_report;

    #[test]
    fn produces_zip_container() {
        let bytes = render_docx(&sample_report()).unwrap();
        // DOCX is a ZIP archive
        assert!(bytes.starts_with(b"PK\x03\x04"));
        assert!(bytes.len() > 1_000);
    }

    #[test]
    fn archive_lists_main_document_part() {
        let bytes = render_docx(&sample_report()).unwrap();
        // ZIP entry names are stored verbatim in the central directory
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("word/document.xml"));
    }
}
