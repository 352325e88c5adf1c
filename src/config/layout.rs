use serde::{Deserialize, Serialize};

/// Page geometry and typography for the whole report, in millimetres and points.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportLayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Space reserved below the bottom margin for the signature footer.
    pub footer_height: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub table_size: f32,
    pub footer_size: f32,
    /// Line advance as a multiple of the font size.
    pub line_spacing: f32,
}

impl Default for ReportLayoutConfig {
    fn default() -> Self {
        // A4 portrait
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_top: 20.0,
            margin_bottom: 45.0,
            margin_left: 18.0,
            margin_right: 18.0,
            footer_height: 30.0,
            title_size: 18.0,
            heading_size: 13.0,
            body_size: 10.0,
            table_size: 9.0,
            footer_size: 7.5,
            line_spacing: 1.45,
        }
    }
}

impl ReportLayoutConfig {
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn content_right(&self) -> f32 {
        self.page_width - self.margin_right
    }

    /// Lowest y (from page top) that content may reach.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    /// Top of the footer band.
    pub fn footer_top(&self) -> f32 {
        self.page_height - self.footer_height - 5.0
    }

    pub fn center_x(&self) -> f32 {
        self.margin_left + self.content_width() / 2.0
    }

    /// Vertical advance for one line of text at `size` points.
    pub fn line_height(&self, size: f32) -> f32 {
        size * crate::format::PT_TO_MM * self.line_spacing
    }
}
