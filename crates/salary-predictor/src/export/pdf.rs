//! Prediction report rendered with `pdf-writer`.
//!
//! The body uses the standard Courier faces, which are never embedded and
//! advance every glyph by the same width, so line wrapping is a character
//! count. No creation date or document ID is written; identical history
//! produces identical bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::report::{format_thousands, HistoryRow};

pub const PDF_TITLE: &str = "Employee Salary Predictions";

// A4 in points.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 28.35;
const BOTTOM_MARGIN: f32 = 56.69;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 16.0;
const TITLE_CELL_HEIGHT: f32 = 28.35;
const TITLE_GAP: f32 = 28.35;
const BODY_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 18.0;
const PARAGRAPH_GAP: f32 = 2.83;
const TEXT_GRAY: f32 = 30.0 / 255.0;

// Courier advance width, in em.
const GLYPH_ADVANCE: f32 = 0.6;

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

/// Renders the title followed by one line per prediction, flowing onto
/// further pages when the body outgrows the first.
pub fn render_pdf(rows: &[HistoryRow]) -> Vec<u8> {
    let mut layout = PageLayout::new();
    layout.title(PDF_TITLE);
    for row in rows {
        layout.paragraph(&body_line(row));
    }
    assemble(layout.finish())
}

fn body_line(row: &HistoryRow) -> String {
    let profile = row.record.profile();
    format!(
        "{}. {} | Exp: {} | Age: {} | City: {} | Predicted Salary: Rs. {}",
        row.ordinal,
        profile.job_title(),
        profile.experience(),
        profile.age(),
        profile.city(),
        format_thousands(row.record.predicted_salary())
    )
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * GLYPH_ADVANCE * size
}

fn columns(size: f32) -> usize {
    (TEXT_WIDTH / (GLYPH_ADVANCE * size)).floor() as usize
}

struct PageLayout {
    pages: Vec<Content>,
    // Distance of the next free line's top edge from the page bottom.
    cursor: f32,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: vec![Content::new()],
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn title(&mut self, text: &str) {
        let x = MARGIN + (TEXT_WIDTH - text_width(text, TITLE_SIZE)).max(0.0) / 2.0;
        let baseline = self.cursor - baseline_offset(TITLE_CELL_HEIGHT, TITLE_SIZE);
        self.show(BOLD_FONT, TITLE_SIZE, x, baseline, text);
        self.cursor -= TITLE_CELL_HEIGHT + TITLE_GAP;
    }

    fn paragraph(&mut self, text: &str) {
        let options = textwrap::Options::new(columns(BODY_SIZE)).break_words(true);
        for line in textwrap::wrap(text, options) {
            if self.cursor - LINE_HEIGHT < BOTTOM_MARGIN {
                self.pages.push(Content::new());
                self.cursor = PAGE_HEIGHT - MARGIN;
            }
            let baseline = self.cursor - baseline_offset(LINE_HEIGHT, BODY_SIZE);
            self.show(REGULAR_FONT, BODY_SIZE, MARGIN, baseline, &line);
            self.cursor -= LINE_HEIGHT;
        }
        self.cursor -= PARAGRAPH_GAP;
    }

    fn show(&mut self, font: Name<'static>, size: f32, x: f32, y: f32, text: &str) {
        // Base-14 fonts only cover single-byte encodings.
        let ascii: String = text
            .chars()
            .map(|ch| if ch.is_ascii() { ch } else { '?' })
            .collect();

        if let Some(page) = self.pages.last_mut() {
            page.begin_text()
                .set_font(font, size)
                .set_fill_gray(TEXT_GRAY)
                .next_line(x, y)
                .show(Str(ascii.as_bytes()))
                .end_text();
        }
    }

    fn finish(self) -> Vec<Vec<u8>> {
        self.pages.into_iter().map(Content::finish).collect()
    }
}

// Vertically centers a line of `size` inside a cell of `height`.
fn baseline_offset(height: f32, size: f32) -> f32 {
    height / 2.0 + 0.3 * size
}

fn assemble(pages: Vec<Vec<u8>>) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let info_id = Ref::new(5);
    // Each page takes two objects: the page dictionary and its content stream.
    let page_ids: Vec<(Ref, Ref)> = (0..pages.len() as i32)
        .map(|index| (Ref::new(6 + index * 2), Ref::new(7 + index * 2)))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);
    pdf.type1_font(regular_id).base_font(Name(b"Courier"));
    pdf.type1_font(bold_id).base_font(Name(b"Courier-Bold"));
    pdf.document_info(info_id)
        .title(TextStr(PDF_TITLE))
        .producer(TextStr("salary-predictor"));

    for ((page_id, content_id), content) in page_ids.iter().zip(&pages) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(page_tree_id)
            .contents(*content_id);
        let mut resources = page.resources();
        resources
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        resources.finish();
        page.finish();

        pdf.stream(*content_id, content);
    }

    pdf.finish()
}
