use super::text::wrap_text;
use super::{DrawOp, Document, TextStyle};
use crate::format::{px_to_mm, Align, ColumnSpec};

/// Left offset per indent level, in millimetres.
const INDENT_STEP: f32 = 4.0;

/// Labels containing any of these words are emphasised when a row is built
/// with [`Row::new`].
const EMPHASIS_WORDS: &[&str] = &["total", "profit", "loss"];

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub emphasized: bool,
    /// Indent level applied to the first cell.
    pub indent: u8,
    /// Draw the first cell across the full table width.
    pub span: bool,
}

impl Row {
    /// Row whose emphasis is inferred from its first cell.
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        let emphasized = cells.first().is_some_and(|label| is_emphasis_label(label));
        Self {
            cells,
            emphasized,
            indent: 0,
            span: false,
        }
    }

    /// Single-label row spanning the table, always emphasised.
    pub fn heading(label: impl Into<String>) -> Self {
        Self {
            cells: vec![label.into()],
            emphasized: true,
            indent: 0,
            span: true,
        }
    }

    /// Single-label row spanning the table in the regular weight, used in
    /// place of an empty body.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            emphasized: false,
            ..Self::heading(label)
        }
    }

    /// Override the inferred emphasis.
    pub fn emphasize(mut self, emphasized: bool) -> Self {
        self.emphasized = emphasized;
        self
    }

    pub fn indent(mut self, level: u8) -> Self {
        self.indent = level;
        self
    }
}

pub fn is_emphasis_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    EMPHASIS_WORDS.iter().any(|word| lower.contains(word))
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub font_size: f32,
    /// Cell padding in millimetres.
    pub padding: f32,
    /// Redraw the header row at the top of every continuation page.
    pub repeat_head: bool,
    /// Draw a hairline under every body row.
    pub row_rules: bool,
    /// Left edge; defaults to the left margin.
    pub left: Option<f32>,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            padding: px_to_mm(5.0),
            repeat_head: true,
            row_rules: false,
            left: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub head: Option<Vec<String>>,
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnSpec>,
    pub style: TableStyle,
}

impl Table {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            head: None,
            rows: Vec::new(),
            columns,
            style: TableStyle::default(),
        }
    }

    pub fn head<I, S>(mut self, head: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.head = Some(head.into_iter().map(Into::into).collect());
        self
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

/// Where a table ended up after drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOutcome {
    /// Cursor position just below the last row, on `last_page`.
    pub final_y: f32,
    pub first_page: usize,
    pub last_page: usize,
}

struct Geometry {
    left: f32,
    top: f32,
    bottom: f32,
    line_height: f32,
}

/// Lay out `table` starting at `start_y` on the document's current page,
/// adding pages whenever a row would cross the bottom margin.
pub fn layout_table(doc: &mut Document, start_y: f32, table: &Table) -> TableOutcome {
    let layout = doc.layout().clone();
    let geo = Geometry {
        left: table.style.left.unwrap_or(layout.margin_left),
        top: layout.margin_top,
        bottom: layout.content_bottom(),
        line_height: layout.line_height(table.style.font_size),
    };

    let mut y = start_y;
    let first_page = doc.current_page();
    let head = table
        .head
        .as_ref()
        .map(|cells| wrap_cells(table, &table.columns, cells, true, 0));
    let spanning = [ColumnSpec {
        width: table.width(),
        align: Align::Left,
    }];

    if let Some(head_lines) = &head {
        let head_height = row_height(head_lines, &geo, &table.style);
        let first_row_height = table
            .rows
            .first()
            .map(|row| {
                let columns = row_columns(table, &spanning, row);
                let lines = wrap_cells(table, columns, &row.cells, row.emphasized, row.indent);
                row_height(&lines, &geo, &table.style)
            })
            .unwrap_or(0.0);
        // never strand a header at the foot of a page
        if y + head_height + first_row_height > geo.bottom && y > geo.top {
            doc.add_page();
            y = geo.top;
        }
        y = draw_head(doc, table, head_lines, y, &geo);
    }

    for row in &table.rows {
        let columns = row_columns(table, &spanning, row);
        let lines = wrap_cells(table, columns, &row.cells, row.emphasized, row.indent);
        let height = row_height(&lines, &geo, &table.style);

        if y + height > geo.bottom && y > geo.top {
            doc.add_page();
            y = geo.top;
            if let (true, Some(head_lines)) = (table.style.repeat_head, &head) {
                y = draw_head(doc, table, head_lines, y, &geo);
            }
        }

        y = draw_row(doc, table, columns, &lines, row.emphasized, row.indent, y, &geo);

        if table.style.row_rules {
            doc.push(DrawOp::Rule {
                x1: geo.left,
                x2: geo.left + table.width(),
                y,
                thickness: 0.1,
            });
        }
    }

    TableOutcome {
        final_y: y,
        first_page,
        last_page: doc.current_page(),
    }
}

fn row_columns<'a>(table: &'a Table, spanning: &'a [ColumnSpec], row: &Row) -> &'a [ColumnSpec] {
    if row.span {
        spanning
    } else {
        &table.columns
    }
}

fn wrap_cells(
    table: &Table,
    columns: &[ColumnSpec],
    cells: &[String],
    bold: bool,
    indent: u8,
) -> Vec<Vec<String>> {
    let style = TextStyle {
        size: table.style.font_size,
        bold,
    };
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            let inset = if i == 0 { indent_width(indent) } else { 0.0 };
            wrap_text(text, (col.width - 2.0 * table.style.padding - inset).max(1.0), style)
        })
        .collect()
}

fn indent_width(indent: u8) -> f32 {
    f32::from(indent) * INDENT_STEP
}

fn row_height(lines: &[Vec<String>], geo: &Geometry, style: &TableStyle) -> f32 {
    let count = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
    count as f32 * geo.line_height + 2.0 * style.padding
}

fn draw_head(doc: &mut Document, table: &Table, lines: &[Vec<String>], y: f32, geo: &Geometry) -> f32 {
    let right = geo.left + table.width();
    doc.push(DrawOp::Rule {
        x1: geo.left,
        x2: right,
        y,
        thickness: 0.4,
    });
    let end = draw_row(doc, table, &table.columns, lines, true, 0, y, geo);
    doc.push(DrawOp::Rule {
        x1: geo.left,
        x2: right,
        y: end,
        thickness: 0.4,
    });
    end
}

/// Draw one row line by line, continuing on a new page if a single row is
/// taller than the space left.
#[allow(clippy::too_many_arguments)]
fn draw_row(
    doc: &mut Document,
    table: &Table,
    columns: &[ColumnSpec],
    lines: &[Vec<String>],
    bold: bool,
    indent: u8,
    y: f32,
    geo: &Geometry,
) -> f32 {
    let style = TextStyle {
        size: table.style.font_size,
        bold,
    };
    let pad = table.style.padding;
    let count = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);

    let mut line_top = y + pad;
    for line_index in 0..count {
        if line_top + geo.line_height > geo.bottom && line_top > geo.top + pad {
            doc.add_page();
            line_top = geo.top + pad;
        }

        let mut x = geo.left;
        for (i, (col, cell_lines)) in columns.iter().zip(lines).enumerate() {
            let inset = if i == 0 { indent_width(indent) } else { 0.0 };
            if let Some(text) = cell_lines.get(line_index).filter(|t| !t.is_empty()) {
                doc.push(DrawOp::text_in(
                    x + pad + inset,
                    col.width - 2.0 * pad - inset,
                    line_top + style.ascent(),
                    text,
                    style,
                    col.align,
                ));
            }
            x += col.width;
        }
        line_top += geo.line_height;
    }

    line_top + pad
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportLayoutConfig;
    use crate::format::equal_columns;

    fn doc() -> Document {
        Document::new("test", ReportLayoutConfig::default())
    }

    #[test]
    fn emphasis_heuristic() {
        assert!(Row::new(["Total Assets", "10"]).emphasized);
        assert!(Row::new(["V. Profit/(Loss) Before Tax", "1"]).emphasized);
        assert!(Row::new(["Net LOSS", "1"]).emphasized);
        assert!(!Row::new(["Share Capital", "1"]).emphasized);
        assert!(!Row::new(["Reserves and Surplus", "1"]).emphasize(false).emphasized);
    }

    #[test]
    fn short_table_stays_on_page() {
        let mut doc = doc();
        let table = Table::new(equal_columns(170.0, 2, &[1]))
            .head(["Particulars", "Amount"])
            .row(Row::new(["Revenue", "100"]));
        let outcome = layout_table(&mut doc, 30.0, &table);
        assert_eq!(outcome.first_page, 0);
        assert_eq!(outcome.last_page, 0);
        assert!(outcome.final_y > 30.0);
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn long_table_paginates_and_repeats_head() {
        let mut doc = doc();
        let mut table = Table::new(equal_columns(170.0, 2, &[1])).head(["Party", "Amount"]);
        for i in 0..200 {
            table.push(Row::new([format!("Line {i}"), i.to_string()]));
        }
        let outcome = layout_table(&mut doc, 30.0, &table);
        assert!(doc.page_count() > 1);
        assert_eq!(outcome.last_page, doc.page_count() - 1);

        let bottom = doc.layout().content_bottom();
        for page in doc.pages() {
            assert!(page.content.iter().all(|op| op.bottom() <= bottom + 1e-3));
            assert_eq!(page.texts().filter(|t| *t == "Party").count(), 1);
        }
    }

    #[test]
    fn placeholder_spans_the_table() {
        let mut doc = doc();
        let table = Table::new(equal_columns(170.0, 5, &[3, 4]))
            .head(["Date", "Party", "Section", "Amount", "TDS"])
            .row(Row::placeholder("No TDS transactions recorded"));
        layout_table(&mut doc, 30.0, &table);
        let texts: Vec<&str> = doc.pages()[0].texts().collect();
        assert!(texts.contains(&"No TDS transactions recorded"));
        let op = doc.pages()[0]
            .content
            .iter()
            .find(|op| op.text() == Some("No TDS transactions recorded"))
            .unwrap();
        assert!(!op.is_bold());
    }

    #[test]
    fn right_aligned_cells_end_at_column_edge() {
        let mut doc = doc();
        let table = Table::new(equal_columns(100.0, 2, &[1])).row(Row::new(["A", "1,000"]));
        layout_table(&mut doc, 30.0, &table);
        let op = doc.pages()[0]
            .content
            .iter()
            .find(|op| op.text() == Some("1,000"))
            .unwrap();
        if let DrawOp::Text { x, style, text, .. } = op {
            let right = x + crate::layout::text_width(text, *style);
            let expected = doc.layout().margin_left + 100.0 - table.style.padding;
            assert!((right - expected).abs() < 1e-3);
        }
    }
}
