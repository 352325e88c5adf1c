use rust_decimal::Decimal;

use super::super::{Note, ReportInput, SectionKind, TableOfContents};
use super::{caption_row, figure_row, unrecorded_row, rupees, statement_header, statement_table};
use crate::layout::Canvas;

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    let period = format!("as at {}", input.fiscal_year.closing_date_label());
    statement_header(canvas, input, SectionKind::BalanceSheet.title(), &period);

    let mut table = statement_table(canvas, input);

    table.push(caption_row("I. EQUITY AND LIABILITIES").emphasize(true));
    table.push(caption_row("(1) Shareholders' Funds").indent(1));
    table.push(figure_row(input, "(a) Share Capital", Some(Note::ShareCapital), |d| d.share_capital).indent(2));
    table.push(
        figure_row(input, "(b) Reserves and Surplus", Some(Note::ReservesAndSurplus), |d| {
            d.reserves_and_surplus
        })
        .indent(2),
    );
    table.push(caption_row("(2) Non-Current Liabilities").indent(1));
    table.push(unrecorded_row("(a) Long-term Borrowings").indent(2));
    table.push(caption_row("(3) Current Liabilities").indent(1));
    table.push(figure_row(input, "(a) Trade Payables", None, |d| d.trade_payables).indent(2));
    table.push(
        figure_row(
            input,
            "(b) Other Current Liabilities",
            Some(Note::OtherCurrentLiabilities),
            |d| d.other_current_liabilities,
        )
        .indent(2),
    );
    table.push(figure_row(input, "Total Equity & Liabilities", None, |d| d.total_liabilities));

    table.push(caption_row("II. ASSETS").emphasize(true));
    table.push(caption_row("(1) Non-Current Assets").indent(1));
    table.push(figure_row(input, "(a) Property, Plant and Equipment", None, |d| d.fixed_assets).indent(2));
    table.push(caption_row("(2) Current Assets").indent(1));
    table.push(figure_row(input, "(a) Trade Receivables", None, |d| d.trade_receivables).indent(2));
    table.push(
        figure_row(input, "(b) Cash and Bank Balances", Some(Note::CashAndBank), |d| d.cash_and_bank).indent(2),
    );
    table.push(figure_row(input, "(c) Other Current Assets", None, |d| d.other_current_assets).indent(2));
    table.push(figure_row(input, "Total Assets", None, |d| d.total_assets));

    canvas.table(&table);

    let difference = input.current.balance_difference();
    if !difference.is_zero() {
        canvas.advance(3.0);
        let direction = if difference > Decimal::ZERO { "exceed" } else { "fall short of" };
        canvas.paragraph(
            &format!(
                "Note: Total Assets {direction} Total Equity & Liabilities by {}. The difference arises from opening balances and \
                 transactions not yet recorded in the books.",
                rupees(input, difference)
            ),
            super::body(canvas),
        );
    }
}
