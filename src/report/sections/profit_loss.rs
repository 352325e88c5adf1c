use super::super::{Note, ReportInput, SectionKind, TableOfContents};
use super::{caption_row, figure_row, unrecorded_row, statement_header, statement_table, year_ended};
use crate::format::format_per_share;
use crate::layout::{Canvas, Row};

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    let data = input.current;
    statement_header(canvas, input, SectionKind::ProfitAndLoss.title(), &year_ended(input));

    let mut table = statement_table(canvas, input);
    table.push(figure_row(
        input,
        "I. Revenue from operations",
        Some(Note::RevenueFromOperations),
        |d| d.revenue_from_operations,
    ));
    table.push(figure_row(input, "II. Other income", Some(Note::OtherIncome), |d| d.other_income));
    table.push(figure_row(input, "III. Total Income (I + II)", None, |d| d.total_revenue));

    table.push(caption_row("IV. Expenses:").emphasize(true));
    table.push(figure_row(input, "Cost of materials consumed", None, |d| d.cost_of_materials).indent(1));
    table.push(unrecorded_row("Purchases of Stock-in-Trade").indent(1));
    table.push(
        unrecorded_row("Changes in inventories of finished goods, work-in-progress and Stock-in-Trade").indent(1),
    );
    table.push(figure_row(input, "Employee benefits expense", None, |d| d.employee_benefit).indent(1));
    table.push(figure_row(input, "Finance costs", None, |d| d.financial_costs).indent(1));
    table.push(figure_row(input, "Depreciation and amortization expense", None, |d| d.depreciation).indent(1));
    table.push(
        figure_row(input, "Other expenses", Some(Note::OtherExpenses), |d| d.other_expenses).indent(1),
    );
    table.push(figure_row(input, "Total expenses (IV)", None, |d| d.total_expenses));

    table.push(unrecorded_row("Exceptional and extraordinary items"));
    table.push(figure_row(
        input,
        "V. Profit/(Loss) Before Tax (III - IV)",
        None,
        |d| d.profit_before_tax,
    ));

    table.push(caption_row("VI. Tax expense:").emphasize(true));
    table.push(figure_row(input, "(1) Current tax", None, |d| d.tax_expense).indent(1));
    table.push(unrecorded_row("(2) Deferred tax").indent(1));

    table.push(figure_row(
        input,
        "VII. Profit/(Loss) for the period (V - VI)",
        None,
        |d| d.profit_after_tax,
    ));

    table.push(caption_row("VIII. Earnings per equity share:").emphasize(true));
    let eps = format_per_share(data.earnings_per_share);
    let prev_eps = input.previous_per_share(|d| d.earnings_per_share);
    table.push(Row::new(["(1) Basic".to_string(), String::new(), eps.clone(), prev_eps.clone()]).indent(1));
    table.push(Row::new(["(2) Diluted".to_string(), String::new(), eps, prev_eps]).indent(1));

    canvas.table(&table);
    canvas.advance(3.0);
    canvas.paragraph(
        &format!(
            "Number of equity shares of {} {} each: {}. Significant accounting policies and the accompanying notes form an integral part of the financial statements.",
            input.currency_label,
            input.money(data.face_value),
            input.money(data.shares_outstanding)
        ),
        super::body(canvas),
    );
}
