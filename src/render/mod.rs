//! Document rendering: one shared section plan, two backends.
//!
//! `plan` builds the ordered section commands from a validated report.
//! `pdf` interprets them through the page flow controller with printpdf;
//! `docx` interprets the same commands and lets Word reflow pagination.

pub mod docx;
pub mod page_flow;
pub mod pdf;
pub mod plan;
pub mod text_flow;

pub use docx::render_docx;
pub use page_flow::{PageCursor, PageGeometry};
pub use pdf::render_pdf;
pub use plan::{build_plan, SectionCommand};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),
}
