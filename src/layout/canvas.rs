use super::table::{layout_table, Table, TableOutcome};
use super::text::wrap_text;
use super::{Document, DrawOp, TextStyle};
use crate::config::ReportLayoutConfig;
use crate::format::Align;

/// Clear space between side-by-side blocks.
const COLUMN_GUTTER: f32 = 4.0;

/// Vertical write position on the current page, in millimetres from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentCursor {
    y: f32,
    top: f32,
    bottom: f32,
}

impl DocumentCursor {
    pub fn new(layout: &ReportLayoutConfig) -> Self {
        Self {
            y: layout.margin_top,
            top: layout.margin_top,
            bottom: layout.content_bottom(),
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.bottom
    }

    pub fn at_top(&self) -> bool {
        self.y <= self.top
    }

    fn reset(&mut self) {
        self.y = self.top;
    }

    fn move_to(&mut self, y: f32) {
        self.y = y;
    }
}

/// A document plus the cursor that section builders draw through.
///
/// Every write checks the remaining space first and starts a new page rather
/// than letting content cross the bottom margin.
#[derive(Debug, Clone)]
pub struct Canvas {
    doc: Document,
    cursor: DocumentCursor,
}

impl Canvas {
    pub fn new(title: &str, layout: ReportLayoutConfig) -> Self {
        let cursor = DocumentCursor::new(&layout);
        Self {
            doc: Document::new(title, layout),
            cursor,
        }
    }

    pub fn layout(&self) -> &ReportLayoutConfig {
        self.doc.layout()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn cursor(&self) -> &DocumentCursor {
        &self.cursor
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor.advance(dy);
    }

    /// Start a fresh page and put the cursor at the top margin.
    pub fn new_page(&mut self) {
        self.doc.add_page();
        self.cursor.reset();
    }

    /// Start a new page unless the current one is still empty.
    pub fn fresh_page(&mut self) {
        let blank = self.doc.pages()[self.doc.current_page()].is_blank();
        if blank {
            self.cursor.reset();
        } else {
            self.new_page();
        }
    }

    /// Break the page if `height` more millimetres would overflow it.
    pub fn ensure_space(&mut self, height: f32) {
        if !self.cursor.fits(height) && !self.cursor.at_top() {
            self.new_page();
        }
    }

    /// Record a table-of-contents anchor on the current page.
    pub fn bookmark(&mut self, title: &str) {
        self.doc.bookmark(title);
    }

    /// One line of text across the content width.
    pub fn line(&mut self, text: &str, style: TextStyle, align: Align) {
        let layout = self.doc.layout().clone();
        let height = layout.line_height(style.size);
        self.ensure_space(height);
        if !text.is_empty() {
            self.doc.push(DrawOp::text_in(
                layout.margin_left,
                layout.content_width(),
                self.cursor.y() + style.ascent(),
                text,
                style,
                align,
            ));
        }
        self.cursor.advance(height);
    }

    /// Word-wrapped prose; the page-break check runs per line.
    pub fn paragraph(&mut self, text: &str, style: TextStyle) {
        let width = self.doc.layout().content_width();
        for line in wrap_text(text, width, style) {
            self.line(&line, style, Align::Left);
        }
    }

    /// Word-wrapped, centred text.
    pub fn centered(&mut self, text: &str, style: TextStyle) {
        let width = self.doc.layout().content_width();
        for line in wrap_text(text, width, style) {
            self.line(&line, style, Align::Center);
        }
    }

    pub fn title(&mut self, text: &str) {
        let style = TextStyle::bold(self.doc.layout().title_size);
        self.centered(text, style);
        self.advance(2.0);
    }

    /// Section heading, kept together with at least `keep_with` mm of what follows.
    pub fn heading(&mut self, text: &str, keep_with: f32) {
        let layout = self.doc.layout().clone();
        let style = TextStyle::bold(layout.heading_size);
        self.ensure_space(layout.line_height(style.size) + keep_with);
        self.centered(text, style);
        self.advance(1.5);
    }

    pub fn subheading(&mut self, text: &str) {
        let layout = self.doc.layout().clone();
        let style = TextStyle::bold(layout.body_size);
        self.ensure_space(layout.line_height(style.size) * 3.0);
        self.line(text, style, Align::Left);
    }

    pub fn rule(&mut self) {
        let layout = self.doc.layout().clone();
        self.ensure_space(1.0);
        self.doc.push(DrawOp::Rule {
            x1: layout.margin_left,
            x2: layout.content_right(),
            y: self.cursor.y(),
            thickness: 0.3,
        });
        self.cursor.advance(1.0);
    }

    /// Draw a table at the cursor. The cursor is moved to the position the
    /// table layout reports, on whichever page the table ended.
    pub fn table(&mut self, table: &Table) -> TableOutcome {
        let outcome = layout_table(&mut self.doc, self.cursor.y(), table);
        self.cursor.move_to(outcome.final_y);
        outcome
    }

    /// Two blocks of lines side by side (left-aligned at the left margin,
    /// right block right-aligned at the right margin), kept on one page.
    /// Lines wider than half the content width are wrapped.
    pub fn columns(&mut self, left: &[String], right: &[String], style: TextStyle) {
        let layout = self.doc.layout().clone();
        let height = layout.line_height(style.size);
        let half = layout.content_width() / 2.0;
        let wrap = |lines: &[String]| -> Vec<String> {
            lines
                .iter()
                .flat_map(|line| wrap_text(line, half - COLUMN_GUTTER, style))
                .collect()
        };
        let (left, right) = (wrap(left), wrap(right));
        let rows = left.len().max(right.len());
        self.ensure_space(height * rows as f32);

        for i in 0..rows {
            let baseline = self.cursor.y() + style.ascent();
            if let Some(text) = left.get(i) {
                self.doc.push(DrawOp::text_in(
                    layout.margin_left,
                    half,
                    baseline,
                    text,
                    style,
                    Align::Left,
                ));
            }
            if let Some(text) = right.get(i) {
                self.doc.push(DrawOp::text_in(
                    layout.margin_left + half,
                    half,
                    baseline,
                    text,
                    style,
                    Align::Right,
                ));
            }
            self.cursor.advance(height);
        }
    }
}
