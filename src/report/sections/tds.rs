use rust_decimal::Decimal;

use super::super::{ReportInput, SectionKind, TableOfContents};
use super::{body, table_style, year_ended};
use crate::format::weighted_columns;
use crate::layout::{Canvas, Row, Table};

/// Placeholder row shown instead of an empty TDS table.
const NO_TDS: &str = "No TDS transactions recorded";

fn transactions(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let data = input.current;
    let columns = weighted_columns(
        canvas.layout().content_width(),
        &[1.6, 3.2, 1.2, 1.8, 1.6],
        &[3, 4],
    );
    let mut table = Table::new(columns)
        .head(["Date", "Deductor", "Section", "Amount Paid", "TDS"])
        .style(table_style(canvas));

    if data.tds_transactions.is_empty() {
        table.push(Row::placeholder(NO_TDS));
    } else {
        for txn in &data.tds_transactions {
            table.push(
                Row::new([
                    txn.date.format("%d-%m-%Y").to_string(),
                    txn.party.clone(),
                    txn.section.clone(),
                    input.money(txn.amount),
                    input.money(txn.tds),
                ])
                .emphasize(false),
            );
        }
        let gross: Decimal = data.tds_transactions.iter().map(|t| t.amount).sum();
        table.push(Row::new([
            "Total".to_string(),
            String::new(),
            String::new(),
            input.money(gross),
            input.money(data.total_tds),
        ]));
    }
    canvas.table(&table);
}

fn reconciliation(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let tax = &input.current.tax;
    let columns = weighted_columns(canvas.layout().content_width(), &[7.0, 2.2], &[1]);
    let mut table = Table::new(columns)
        .head(["Particulars".to_string(), format!("Amount ({})", input.currency_label)])
        .style(table_style(canvas));
    table.push(
        Row::new([
            "Tax expense charged to Profit and Loss".to_string(),
            input.money(input.current.tax_expense),
        ])
        .emphasize(false),
    );
    table.push(Row::new([
        "Tax liability as per computation (incl. cess)".to_string(),
        input.money(tax.total_liability),
    ]));
    table.push(Row::new(["Less: TDS credit available".to_string(), input.money(tax.tds_credit)]));
    let label = if tax.net_payable.is_sign_negative() {
        "Net tax refundable"
    } else {
        "Net tax payable"
    };
    table.push(Row::new([label.to_string(), input.money(tax.net_payable)]).emphasize(true));
    canvas.table(&table);
}

fn gst_summary(canvas: &mut Canvas, input: &ReportInput<'_>) {
    let gst = &input.current.gst;
    let columns = weighted_columns(canvas.layout().content_width(), &[7.0, 2.2], &[1]);
    let mut table = Table::new(columns)
        .head(["Particulars", "Value"])
        .style(table_style(canvas));
    table.push(Row::new(["Invoices issued".to_string(), gst.invoice_count.to_string()]));
    table.push(Row::new(["Invoices paid".to_string(), gst.paid_count.to_string()]));
    table.push(Row::new(["Invoices outstanding".to_string(), gst.outstanding_count.to_string()]));
    table.push(Row::new(["CGST collected".to_string(), input.money(gst.cgst)]));
    table.push(Row::new(["SGST collected".to_string(), input.money(gst.sgst)]));
    table.push(Row::new(["IGST collected".to_string(), input.money(gst.igst)]));
    table.push(Row::new(["Total GST collected".to_string(), input.money(gst.total)]));
    canvas.table(&table);
}

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    canvas.title(SectionKind::TdsSummary.title());
    canvas.centered(&year_ended(input), body(canvas));
    canvas.advance(4.0);

    canvas.subheading("A. Tax Deducted at Source by Customers");
    transactions(canvas, input);
    canvas.advance(5.0);

    canvas.subheading("B. Tax Paid vs Payable");
    reconciliation(canvas, input);
    canvas.advance(5.0);

    canvas.subheading("C. GST Summary");
    gst_summary(canvas, input);
}
