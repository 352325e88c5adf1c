use tracing::debug;

use super::ReportInput;
use crate::config::ReportLayoutConfig;
use crate::error::{ReportError, Result};
use crate::format::Align;
use crate::layout::{text_width, wrap_text, Document, DrawOp, TextStyle};

/// Clear space between the two signature blocks.
const GUTTER: f32 = 4.0;

/// Auditor block, left-aligned in the footer band.
pub(super) fn auditor_block(input: &ReportInput<'_>) -> Vec<String> {
    let auditor = input.auditor;
    let mut lines = vec![
        format!("For {}", auditor.firm_name),
        "Chartered Accountants".to_string(),
    ];
    if let Some(frn) = non_blank(&auditor.firm_registration_number) {
        lines.push(format!("FRN: {frn}"));
    }
    match (
        non_blank(&auditor.partner_name),
        non_blank(&auditor.membership_number),
    ) {
        (Some(partner), Some(number)) => lines.push(format!("{partner} (M.No. {number})")),
        (Some(partner), None) => lines.push(partner.to_string()),
        (None, Some(number)) => lines.push(format!("M.No. {number}")),
        (None, None) => {}
    }
    lines
}

/// Company block, right-aligned in the footer band.
pub(super) fn company_block(input: &ReportInput<'_>) -> Vec<String> {
    let mut lines = vec![format!("For {}", input.company.name)];
    lines.extend(input.company.directors.iter().map(|d| d.signature_line()));
    lines
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

struct FooterLine {
    text: String,
    style: TextStyle,
}

/// Wrap a signature block to one half of the content width.
fn wrap_block(lines: &[String], layout: &ReportLayoutConfig) -> Vec<FooterLine> {
    let width = layout.content_width() / 2.0 - GUTTER;
    let regular = TextStyle::regular(layout.footer_size);
    let bold = TextStyle::bold(layout.footer_size);

    lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| {
            // first line of each block names the signatory
            let style = if i == 0 { bold } else { regular };
            wrap_text(line, width, style)
                .into_iter()
                .map(move |text| FooterLine { text, style })
        })
        .collect()
}

fn footer_rows(input: &ReportInput<'_>, layout: &ReportLayoutConfig) -> usize {
    let left = wrap_block(&auditor_block(input), layout);
    let right = wrap_block(&company_block(input), layout);
    left.len().max(right.len())
}

fn counter_baseline(layout: &ReportLayoutConfig) -> f32 {
    layout.page_height - 6.0
}

/// Baselines available to the signature blocks on one page.
struct Band {
    first_baseline: f32,
    /// Last baseline that still leaves a clear line above the page counter.
    limit: f32,
    line_height: f32,
}

impl Band {
    fn new(layout: &ReportLayoutConfig) -> Self {
        let style = TextStyle::regular(layout.footer_size);
        let line_height = layout.line_height(style.size);
        Self {
            first_baseline: layout.footer_top() + 1.5 + style.ascent(),
            limit: counter_baseline(layout) - line_height,
            line_height,
        }
    }

    fn baseline(&self, row: usize) -> f32 {
        self.first_baseline + row as f32 * self.line_height
    }

    /// How far the last of `rows` lines would sit past the limit.
    fn overflow(&self, rows: usize) -> f32 {
        match rows {
            0 => 0.0,
            n => self.baseline(n - 1) - self.limit,
        }
    }

    fn capacity(&self) -> usize {
        if self.first_baseline > self.limit {
            return 0;
        }
        ((self.limit - self.first_baseline) / self.line_height).floor() as usize + 1
    }
}

/// The configured layout with its footer band grown, at the expense of the
/// content area, until both signature blocks fit above the page counter.
/// The band never takes more than a third of the page.
pub(super) fn fit_layout(input: &ReportInput<'_>) -> Result<ReportLayoutConfig> {
    let mut layout = input.layout.clone();
    let rows = footer_rows(input, &layout);
    let overflow = Band::new(&layout).overflow(rows);
    if overflow <= 0.0 {
        return Ok(layout);
    }

    let ceiling = layout.page_height / 3.0;
    let grown = layout.footer_height + overflow;
    if grown > ceiling {
        let mut widest = layout.clone();
        widest.footer_height = ceiling;
        return Err(ReportError::FooterOverflow {
            rows,
            capacity: Band::new(&widest).capacity(),
        });
    }

    layout.footer_height = grown;
    layout.margin_bottom += overflow;
    debug!(rows, footer_height = grown, "footer band enlarged");
    Ok(layout)
}

/// Stamp both signature blocks and a page counter on every page.
pub(super) fn stamp(doc: &mut Document, input: &ReportInput<'_>) {
    let layout = doc.layout().clone();
    let style = TextStyle::regular(layout.footer_size);
    let half = layout.content_width() / 2.0;
    let band = Band::new(&layout);

    let left = wrap_block(&auditor_block(input), &layout);
    let right = wrap_block(&company_block(input), &layout);

    doc.stamp_footer(|index, count| {
        let mut ops = vec![DrawOp::Rule {
            x1: layout.margin_left,
            x2: layout.content_right(),
            y: layout.footer_top(),
            thickness: 0.2,
        }];

        for (row, line) in left.iter().enumerate() {
            ops.push(DrawOp::text_in(
                layout.margin_left,
                half,
                band.baseline(row),
                &line.text,
                line.style,
                Align::Left,
            ));
        }
        for (row, line) in right.iter().enumerate() {
            ops.push(DrawOp::text_in(
                layout.margin_left + half,
                half,
                band.baseline(row),
                &line.text,
                line.style,
                Align::Right,
            ));
        }

        let counter = format!("Page {} of {}", index + 1, count);
        let counter_x = layout.center_x() - text_width(&counter, style) / 2.0;
        ops.push(DrawOp::Text {
            x: counter_x,
            y: counter_baseline(&layout),
            style,
            text: counter,
        });
        ops
    });
}
