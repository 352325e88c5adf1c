use rust_decimal::Decimal;

use super::super::{ReportInput, SectionKind, TableOfContents};
use super::{caption_row, comparison_row, comparison_table, statement_header, year_ended};
use crate::aggregate::FinancialData;
use crate::layout::{Canvas, Row};

// Opening balances are not carried in the ledger, so every working capital
// movement is measured from zero.

fn operating_profit(d: &FinancialData) -> Decimal {
    d.profit_before_tax + d.depreciation + d.financial_costs
}

fn working_capital_change(d: &FinancialData) -> Decimal {
    -d.trade_receivables - d.other_current_assets + d.trade_payables + d.other_payables
}

fn cash_from_operations(d: &FinancialData) -> Decimal {
    operating_profit(d) + working_capital_change(d)
}

fn net_operating_cash(d: &FinancialData) -> Decimal {
    cash_from_operations(d) - d.tax_expense
}

fn dash_row(label: &str) -> Row {
    Row::new([label, "-", "-"])
}

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    statement_header(canvas, input, SectionKind::CashFlow.title(), &year_ended(input));

    let mut table = comparison_table(canvas, input);

    table.push(caption_row("A. Cash Flow from Operating Activities").emphasize(true));
    table.push(comparison_row(input, "Net Profit/(Loss) before Tax", |d| d.profit_before_tax).indent(1));
    table.push(caption_row("Adjustments for:").indent(1).emphasize(false));
    table.push(comparison_row(input, "Depreciation and amortization", |d| d.depreciation).indent(2));
    table.push(comparison_row(input, "Finance costs", |d| d.financial_costs).indent(2));
    table.push(comparison_row(input, "Operating Profit before Working Capital Changes", operating_profit).indent(1));
    table.push(caption_row("Changes in working capital:").indent(1).emphasize(false));
    table.push(comparison_row(input, "(Increase)/Decrease in Trade Receivables", |d| -d.trade_receivables).indent(2));
    table.push(
        comparison_row(input, "(Increase)/Decrease in Other Current Assets", |d| -d.other_current_assets).indent(2),
    );
    table.push(comparison_row(input, "Increase/(Decrease) in Trade Payables", |d| d.trade_payables).indent(2));
    table.push(
        comparison_row(input, "Increase/(Decrease) in Other Current Liabilities", |d| d.other_payables).indent(2),
    );
    table.push(comparison_row(input, "Cash Generated from Operations", cash_from_operations).indent(1));
    table.push(comparison_row(input, "Less: Income Taxes Provided", |d| -d.tax_expense).indent(1));
    table.push(comparison_row(input, "Net Cash from Operating Activities (A)", net_operating_cash));

    table.push(caption_row("B. Cash Flow from Investing Activities").emphasize(true));
    table.push(dash_row("Purchase of Property, Plant and Equipment").indent(1));
    table.push(dash_row("Net Cash used in Investing Activities (B)"));

    table.push(caption_row("C. Cash Flow from Financing Activities").emphasize(true));
    table.push(dash_row("Proceeds from Issue of Share Capital").indent(1));
    table.push(dash_row("Net Cash from Financing Activities (C)"));

    table.push(comparison_row(input, "Net Increase/(Decrease) in Cash (A + B + C)", net_operating_cash));
    table.push(dash_row("Cash and Cash Equivalents at the beginning of the year"));
    table.push(comparison_row(input, "Cash and Cash Equivalents at the end of the year", |d| d.cash_and_bank));

    canvas.table(&table);
}
