//! Paginated display-list documents.
//!
//! Drawing happens against an in-memory [`Document`] made of pages of
//! [`DrawOp`]s measured in millimetres from the top-left corner. Nothing is
//! serialized until [`Document::to_pdf_bytes`], which keeps layout
//! inspectable and the PDF writer at the edge.

mod canvas;
mod render;
mod table;
mod text;

pub use canvas::{Canvas, DocumentCursor};
pub use table::{layout_table, Row, Table, TableOutcome, TableStyle};
pub use text::{text_width, wrap_text};

use crate::config::ReportLayoutConfig;
use crate::format::{Align, PT_TO_MM};

/// PDF files start with this marker.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }

    /// Distance from the top of a line box to its baseline.
    pub fn ascent(&self) -> f32 {
        self.size * PT_TO_MM * 0.8
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `y` is the baseline, `x` the left edge of the run.
    Text {
        x: f32,
        y: f32,
        style: TextStyle,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
    },
}

impl DrawOp {
    /// Text op positioned inside `[left, left + width]` according to `align`.
    pub fn text_in(left: f32, width: f32, baseline: f32, text: &str, style: TextStyle, align: Align) -> Self {
        let measured = text_width(text, style);
        let x = match align {
            Align::Left => left,
            Align::Right => left + width - measured,
            Align::Center => left + (width - measured) / 2.0,
        };
        DrawOp::Text {
            x,
            y: baseline,
            style,
            text: text.to_string(),
        }
    }

    /// Lowest point the op touches, measured from the page top.
    pub fn bottom(&self) -> f32 {
        match self {
            DrawOp::Text { y, .. } => *y,
            DrawOp::Rule { y, thickness, .. } => y + thickness / 2.0,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            DrawOp::Rule { .. } => None,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, DrawOp::Text { style, .. } if style.bold)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Body content, confined between the top and bottom margins.
    pub content: Vec<DrawOp>,
    /// Footer band stamped after composition.
    pub footer: Vec<DrawOp>,
}

impl Page {
    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(DrawOp::text)
    }
}

/// A named position in the document, used for the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub title: String,
    /// Zero-based page index.
    pub page: usize,
}

#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    layout: ReportLayoutConfig,
    pages: Vec<Page>,
    current: usize,
    bookmarks: Vec<Bookmark>,
}

impl Document {
    /// A document with a single blank page.
    pub fn new(title: &str, layout: ReportLayoutConfig) -> Self {
        Self {
            title: title.to_string(),
            layout,
            pages: vec![Page::default()],
            current: 0,
            bookmarks: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn layout(&self) -> &ReportLayoutConfig {
        &self.layout
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Append a page and make it current.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
        self.current
    }

    pub fn set_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current = index;
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.pages[self.current].content.push(op);
    }

    pub fn push_footer(&mut self, op: DrawOp) {
        self.pages[self.current].footer.push(op);
    }

    pub fn bookmark(&mut self, title: &str) {
        self.bookmarks.push(Bookmark {
            title: title.to_string(),
            page: self.current,
        });
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Run `stamp(page_index, page_count)` on every page and append the ops
    /// it returns to that page's footer band. The current page is restored
    /// afterwards.
    pub fn stamp_footer<F>(&mut self, mut stamp: F)
    where
        F: FnMut(usize, usize) -> Vec<DrawOp>,
    {
        let restore = self.current;
        let count = self.pages.len();
        for index in 0..count {
            self.set_page(index);
            for op in stamp(index, count) {
                self.push_footer(op);
            }
        }
        self.set_page(restore);
    }

    /// Serialize to PDF bytes.
    pub fn to_pdf_bytes(&self) -> crate::error::Result<Vec<u8>> {
        render::render_pdf(self)
    }
}
