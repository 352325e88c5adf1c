//! One builder per statutory section. Each draws at the canvas cursor and
//! leaves the cursor below whatever it drew.

pub(super) mod audit;
pub(super) mod balance_sheet;
pub(super) mod cash_flow;
pub(super) mod compliance;
pub(super) mod computation;
pub(super) mod contents;
pub(super) mod cover;
pub(super) mod directors;
pub(super) mod highlights;
pub(super) mod notes_to_accounts;
pub(super) mod profit_loss;
pub(super) mod tds;

use rust_decimal::Decimal;

use super::{Note, ReportInput};
use crate::aggregate::FinancialData;
use crate::format::{weighted_columns, Align};
use crate::layout::{Canvas, Row, Table, TableStyle, TextStyle};

pub(super) fn body(canvas: &Canvas) -> TextStyle {
    TextStyle::regular(canvas.layout().body_size)
}

pub(super) fn table_style(canvas: &Canvas) -> TableStyle {
    TableStyle {
        font_size: canvas.layout().table_size,
        ..TableStyle::default()
    }
}

/// Company name, statement title, period line and amount caption.
pub(super) fn statement_header(canvas: &mut Canvas, input: &ReportInput<'_>, title: &str, period: &str) {
    let style = body(canvas);
    canvas.centered(&input.company.name, TextStyle::bold(canvas.layout().heading_size));
    canvas.heading(title, 20.0);
    canvas.centered(period, style);
    canvas.line(&input.amount_caption(), TextStyle::regular(canvas.layout().table_size), Align::Right);
    canvas.advance(1.0);
}

/// "for the year ended ..." line used by period statements.
pub(super) fn year_ended(input: &ReportInput<'_>) -> String {
    format!("for the year ended {}", input.fiscal_year.closing_date_label())
}

/// Particulars | Note No. | current FY | previous FY
pub(super) fn statement_table(canvas: &Canvas, input: &ReportInput<'_>) -> Table {
    let mut columns = weighted_columns(canvas.layout().content_width(), &[5.2, 1.0, 1.9, 1.9], &[2, 3]);
    columns[1].align = Align::Center;
    Table::new(columns)
        .head([
            "Particulars".to_string(),
            "Note No.".to_string(),
            input.current_year_head(),
            input.previous_year_head(),
        ])
        .style(table_style(canvas))
}

/// Particulars | current FY | previous FY
pub(super) fn comparison_table(canvas: &Canvas, input: &ReportInput<'_>) -> Table {
    let columns = weighted_columns(canvas.layout().content_width(), &[5.0, 2.0, 2.0], &[1, 2]);
    Table::new(columns)
        .head([
            "Particulars".to_string(),
            input.current_year_head(),
            input.previous_year_head(),
        ])
        .style(table_style(canvas))
}

/// A statement line with both year columns filled from the aggregate.
pub(super) fn figure_row<F>(input: &ReportInput<'_>, label: &str, note: Option<Note>, pick: F) -> Row
where
    F: Fn(&FinancialData) -> Decimal,
{
    Row::new([
        label.to_string(),
        note.map(Note::cell).unwrap_or_default(),
        input.money(pick(input.current)),
        input.previous_money(pick),
    ])
}

/// A statement line for items the books do not track yet.
pub(super) fn unrecorded_row(label: &str) -> Row {
    Row::new([label, "", "-", "-"])
}

/// A caption line with no figures.
pub(super) fn caption_row(label: &str) -> Row {
    Row::new([label, "", "", ""])
}

/// Same as [`figure_row`] without the note column.
pub(super) fn comparison_row<F>(input: &ReportInput<'_>, label: &str, pick: F) -> Row
where
    F: Fn(&FinancialData) -> Decimal,
{
    Row::new([
        label.to_string(),
        input.money(pick(input.current)),
        input.previous_money(pick),
    ])
}

/// Money with the currency label, for prose.
pub(super) fn rupees(input: &ReportInput<'_>, amount: Decimal) -> String {
    format!("{} {}", input.currency_label, input.money(amount.abs()))
}
