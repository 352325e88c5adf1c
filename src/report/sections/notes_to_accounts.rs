use rust_decimal::Decimal;

use super::super::{Note, ReportInput, SectionKind, TableOfContents};
use super::{body, comparison_row, comparison_table, year_ended};
use crate::aggregate::{AmountLine, FinancialData};
use crate::layout::{Canvas, Row, Table};

fn detail_amount(lines: &[AmountLine], label: &str) -> Decimal {
    lines
        .iter()
        .filter(|l| l.label == label)
        .map(|l| l.amount)
        .sum()
}

/// Breakdown rows for `pick`, matching prior-year lines by label.
fn detail_rows(
    table: &mut Table,
    input: &ReportInput<'_>,
    pick: fn(&FinancialData) -> &Vec<AmountLine>,
    empty: &str,
) {
    let current = pick(input.current);
    if current.is_empty() {
        table.push(Row::new([empty, "-", "-"]).emphasize(false));
        return;
    }
    for line in current {
        let previous = input
            .previous
            .map(|p| input.money(detail_amount(pick(p), &line.label)))
            .unwrap_or_else(|| "-".to_string());
        table.push(Row::new([line.label.clone(), input.money(line.amount), previous]).emphasize(false));
    }
}

fn share_capital(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let data = input.current;
    let mut table = comparison_table(canvas, input);
    let describe = |d: &FinancialData, what: &str| {
        format!(
            "{what}: {} Equity Shares of {} {} each",
            input.money(d.shares_outstanding),
            input.currency_label,
            input.money(d.face_value)
        )
    };
    table.push(comparison_row(input, &describe(data, "Authorised"), |d| d.share_capital));
    table.push(comparison_row(
        input,
        &describe(data, "Issued, Subscribed and Fully Paid-up"),
        |d| d.share_capital,
    ));
    table.push(comparison_row(input, "Total", |d| d.share_capital));
    canvas.table(&table);
}

fn reserves(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let mut table = comparison_table(canvas, input);
    table.push(Row::heading("Surplus in Statement of Profit and Loss"));
    table.push(comparison_row(input, "Opening balance", |d| d.opening_reserves).indent(1));
    table.push(comparison_row(input, "Add: Profit/(Loss) for the year", |d| d.profit_after_tax).indent(1));
    table.push(comparison_row(input, "Total", |d| d.reserves_and_surplus));
    canvas.table(&table);
}

fn other_current_liabilities(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let mut table = comparison_table(canvas, input);
    table.push(comparison_row(input, "Other payables", |d| d.other_payables));
    table.push(comparison_row(input, "Provision for Income Tax", |d| d.tax_expense));
    table.push(comparison_row(input, "Total", |d| d.other_current_liabilities));
    canvas.table(&table);
}

fn cash_and_bank(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let mut table = comparison_table(canvas, input);
    detail_rows(&mut table, input, |d| &d.cash_details, "Balances with banks");
    table.push(comparison_row(input, "Total", |d| d.cash_and_bank));
    canvas.table(&table);
}

fn revenue(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let mut table = comparison_table(canvas, input);
    table.push(comparison_row(input, "Sale of Products", |d| d.sale_of_products));
    table.push(comparison_row(input, "Sale of Services", |d| d.sale_of_services));
    table.push(comparison_row(input, "Total", |d| d.revenue_from_operations));
    canvas.table(&table);
}

fn other_income(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let mut table = comparison_table(canvas, input);
    detail_rows(&mut table, input, |d| &d.other_income_details, "No other income recorded");
    table.push(comparison_row(input, "Total", |d| d.other_income));
    canvas.table(&table);
}

fn other_expenses(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let mut table = comparison_table(canvas, input);
    detail_rows(&mut table, input, |d| &d.expense_details, "No other expenses recorded");
    table.push(comparison_row(input, "Total", |d| d.other_expenses));
    canvas.table(&table);
}

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    canvas.title(SectionKind::NotesToAccounts.title());
    canvas.centered(
        &format!("forming part of the financial statements {}", year_ended(input)),
        body(canvas),
    );
    canvas.advance(4.0);

    for note in Note::ALL {
        canvas.subheading(&note.heading());
        match note {
            Note::ShareCapital => share_capital(canvas, input),
            Note::ReservesAndSurplus => reserves(canvas, input),
            Note::OtherCurrentLiabilities => other_current_liabilities(canvas, input),
            Note::CashAndBank => cash_and_bank(canvas, input),
            Note::RevenueFromOperations => revenue(canvas, input),
            Note::OtherIncome => other_income(canvas, input),
            Note::OtherExpenses => other_expenses(canvas, input),
        }
        canvas.advance(5.0);
    }
}
