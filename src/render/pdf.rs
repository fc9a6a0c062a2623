//! PDF backend: interprets the section plan with `printpdf` builtin fonts,
//! threading the page flow cursor through every emission.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::report::Report;

use super::page_flow::{advance_line, advance_spacing, ensure_space, PageCursor, PageGeometry};
use super::plan::{build_plan, SectionCommand};
use super::text_flow::{approx_glyph_width, wrap};
use super::RenderError;

const TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 9.0;

const LINE_HEIGHT: f32 = 4.5;
const HEADER_LINE_HEIGHT: f32 = 6.0;
const TITLE_SPACING: f32 = 10.0;
const SECTION_SPACING: f32 = 4.0;
const BULLET_INDENT: f32 = 5.0;

/// Minimum content lines that must fit under a header on the same page.
const MIN_LINES_AFTER_HEADER: f32 = 2.0;

/// Render a validated report to PDF bytes.
pub fn render_pdf(report: &Report) -> Result<Vec<u8>, RenderError> {
    let plan = build_plan(report);
    let geo = PageGeometry::A4;

    let (doc, page1, layer1) = PdfDocument::new(
        "Medical Report",
        Mm(geo.page_width),
        Mm(geo.page_height),
        "Layer 1",
    );
    let first_layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;

    let mut flow = PdfFlow {
        doc: &doc,
        layers: vec![first_layer],
        geo,
        cursor: PageCursor::start(&geo),
        font,
        bold,
    };

    for command in &plan {
        flow.emit(command);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| RenderError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| RenderError::Pdf(format!("buffer error: {e}")))
}

/// Cursor-synchronized emitter. Pages are allocated lazily: whenever the
/// cursor's page index runs ahead of the allocated layers, a fresh page is
/// added before the next line is drawn.
struct PdfFlow<'a> {
    doc: &'a PdfDocumentReference,
    layers: Vec<PdfLayerReference>,
    geo: PageGeometry,
    cursor: PageCursor,
    font: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfFlow<'_> {
    fn emit(&mut self, command: &SectionCommand) {
        match command {
            SectionCommand::Title(title) => {
                self.draw(title, TITLE_SIZE, self.geo.left_margin, true);
                self.cursor = advance_line(&self.geo, self.cursor, TITLE_SPACING);
            }
            SectionCommand::Header(header) => {
                let needed = HEADER_LINE_HEIGHT + MIN_LINES_AFTER_HEADER * LINE_HEIGHT;
                self.cursor = ensure_space(&self.geo, self.cursor, needed);
                self.draw(header, HEADER_SIZE, self.geo.left_margin, true);
                self.cursor = advance_line(&self.geo, self.cursor, HEADER_LINE_HEIGHT);
            }
            SectionCommand::Label(label) => {
                // Same orphan rule as headers, at body size.
                let needed = LINE_HEIGHT + MIN_LINES_AFTER_HEADER * LINE_HEIGHT;
                self.cursor = ensure_space(&self.geo, self.cursor, needed);
                self.draw(label, BODY_SIZE, self.geo.left_margin, true);
                self.cursor = advance_line(&self.geo, self.cursor, LINE_HEIGHT);
            }
            SectionCommand::Paragraph(text) => {
                for line in wrap(text, self.geo.content_width, BODY_SIZE, approx_glyph_width) {
                    self.draw(&line, BODY_SIZE, self.geo.left_margin, false);
                    self.cursor = advance_line(&self.geo, self.cursor, LINE_HEIGHT);
                }
                self.cursor = advance_spacing(&self.geo, self.cursor, SECTION_SPACING);
            }
            SectionCommand::Bullets(items) => {
                let width = self.geo.content_width - BULLET_INDENT;
                let x = self.geo.left_margin + BULLET_INDENT;
                for item in items {
                    let text = format!("· {item}");
                    for line in wrap(&text, width, BODY_SIZE, approx_glyph_width) {
                        self.draw(&line, BODY_SIZE, x, false);
                        self.cursor = advance_line(&self.geo, self.cursor, LINE_HEIGHT);
                    }
                }
                self.cursor = advance_spacing(&self.geo, self.cursor, SECTION_SPACING);
            }
            SectionCommand::Lines(lines) => {
                // The whole block moves to the next page rather than splitting.
                let needed = lines.len() as f32 * LINE_HEIGHT;
                self.cursor = ensure_space(&self.geo, self.cursor, needed);
                for line in lines {
                    self.draw(line, BODY_SIZE, self.geo.left_margin, false);
                    self.cursor = advance_line(&self.geo, self.cursor, LINE_HEIGHT);
                }
                self.cursor = advance_spacing(&self.geo, self.cursor, SECTION_SPACING);
            }
        }
    }

    fn draw(&mut self, text: &str, size: f32, x: f32, bold: bool) {
        while self.layers.len() <= self.cursor.page {
            let (page, layer) = self.doc.add_page(
                Mm(self.geo.page_width),
                Mm(self.geo.page_height),
                "Layer 1",
            );
            self.layers.push(self.doc.get_page(page).get_layer(layer));
        }
        let font = if bold { &self.bold } else { &self.font };
        self.layers[self.cursor.page].use_text(text, size, Mm(x), Mm(self.cursor.offset), font);
    }
}
