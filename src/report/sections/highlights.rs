use rust_decimal::Decimal;

use super::super::{ReportInput, SectionKind, TableOfContents};
use super::{comparison_row, comparison_table, year_ended};
use crate::aggregate::FinancialData;
use crate::format::{format_per_share, format_percent};
use crate::layout::{Canvas, Row};

fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}

fn net_margin(data: &FinancialData) -> Option<Decimal> {
    ratio(data.profit_after_tax, data.total_revenue)
}

fn return_on_net_worth(data: &FinancialData) -> Option<Decimal> {
    ratio(data.profit_after_tax, data.net_worth())
}

fn expense_ratio(data: &FinancialData) -> Option<Decimal> {
    ratio(data.total_expenses, data.total_revenue)
}

fn ratio_row(input: &ReportInput<'_>, label: &str, pick: fn(&FinancialData) -> Option<Decimal>) -> Row {
    let show = |value: Option<Decimal>| value.map(format_percent).unwrap_or_else(|| "-".to_string());
    Row::new([
        label.to_string(),
        show(pick(input.current)),
        input
            .previous
            .map(|p| show(pick(p)))
            .unwrap_or_else(|| "-".to_string()),
    ])
    .emphasize(false)
}

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    let data = input.current;
    canvas.title(SectionKind::FinancialHighlights.title());
    canvas.centered(&year_ended(input), super::body(canvas));
    canvas.advance(4.0);

    let mut table = comparison_table(canvas, input);
    table.push(comparison_row(input, "Revenue from Operations", |d| d.revenue_from_operations));
    table.push(comparison_row(input, "Other Income", |d| d.other_income));
    table.push(comparison_row(input, "Total Income", |d| d.total_revenue));
    table.push(comparison_row(input, "Total Expenses", |d| d.total_expenses));
    table.push(comparison_row(input, "Profit/(Loss) Before Tax", |d| d.profit_before_tax));
    table.push(comparison_row(input, "Tax Expense", |d| d.tax_expense));
    table.push(comparison_row(input, "Profit/(Loss) After Tax", |d| d.profit_after_tax));
    table.push(Row::new([
        format!("Earnings per Share ({})", input.currency_label),
        format_per_share(data.earnings_per_share),
        input.previous_per_share(|d| d.earnings_per_share),
    ]));
    table.push(comparison_row(input, "Share Capital", |d| d.share_capital));
    table.push(comparison_row(input, "Net Worth", |d| d.net_worth()));
    table.push(comparison_row(input, "Total Assets", |d| d.total_assets));
    table.push(comparison_row(input, "GST Collected", |d| d.gst.total));
    table.push(comparison_row(input, "TDS Deducted by Customers", |d| d.total_tds));
    canvas.table(&table);
    canvas.advance(6.0);

    canvas.subheading("Key Ratios");
    let mut ratios = comparison_table(canvas, input);
    ratios.push(ratio_row(input, "Net Profit Margin", net_margin));
    ratios.push(ratio_row(input, "Return on Net Worth", return_on_net_worth));
    ratios.push(ratio_row(input, "Expenses to Income", expense_ratio));
    canvas.table(&ratios);
}
