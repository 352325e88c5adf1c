use super::super::{ReportInput, SectionKind, TableOfContents};
use super::{body, table_style};
use crate::format::{format_percent, weighted_columns};
use crate::layout::{Canvas, Row, Table};

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    let style = body(canvas);
    let tax = &input.current.tax;
    let company = input.company;

    canvas.title(SectionKind::ComputationOfIncome.title());
    canvas.centered(&company.name, style);
    canvas.centered(
        &format!(
            "Previous Year {} | Assessment Year {}",
            input.fiscal_year.label(),
            input.fiscal_year.assessment_year_label()
        ),
        style,
    );
    let mut identity = vec!["Status: Domestic Company".to_string()];
    if let Some(pan) = company.pan.as_deref().filter(|p| !p.trim().is_empty()) {
        identity.push(format!("PAN: {pan}"));
    }
    canvas.centered(&identity.join(" | "), style);
    canvas.advance(4.0);

    let columns = weighted_columns(canvas.layout().content_width(), &[7.0, 2.2], &[1]);
    let money = |amount| input.money(amount);
    let mut table = Table::new(columns)
        .head(["Particulars".to_string(), format!("Amount ({})", input.currency_label)])
        .style(table_style(canvas));

    table.push(Row::heading("Income from Business or Profession"));
    table.push(
        Row::new([
            "Net Profit/(Loss) as per Statement of Profit and Loss".to_string(),
            money(tax.profit_before_tax),
        ])
        .indent(1),
    );
    table.push(
        Row::new(["Add: Depreciation as per books of account".to_string(), money(tax.add_book_depreciation)])
            .indent(1),
    );
    table.push(
        Row::new([
            "Less: Depreciation allowable under the Income-tax Act".to_string(),
            money(tax.less_allowable_depreciation),
        ])
        .indent(1),
    );
    table.push(Row::new(["Gross Total Income".to_string(), money(tax.gross_total_income)]));
    table.push(Row::new(["Less: Deductions under Chapter VI-A".to_string(), money(tax.deductions)]).emphasize(false));
    table.push(Row::new([
        "Total Income (rounded off u/s 288A)".to_string(),
        money(tax.taxable_income),
    ]));
    table.push(
        Row::new([
            format!("Tax on Total Income @ {}", format_percent(tax.rate)),
            money(tax.tax),
        ])
        .emphasize(false),
    );
    table.push(Row::new([
        format!("Add: Health and Education Cess @ {}", format_percent(tax.cess_rate)),
        money(tax.cess),
    ]));
    table.push(Row::new(["Total Tax Liability".to_string(), money(tax.total_liability)]));
    table.push(Row::new(["Less: Tax Deducted at Source".to_string(), money(tax.tds_credit)]));
    let net_label = if tax.net_payable.is_sign_negative() {
        "Net Tax Refundable"
    } else {
        "Net Tax Payable"
    };
    table.push(Row::new([net_label.to_string(), money(tax.net_payable)]).emphasize(true));

    canvas.table(&table);
    canvas.advance(4.0);
    canvas.paragraph(
        "Depreciation allowable under the Income-tax Act has been taken as equal to depreciation charged in the books. \
         Tax has been computed at the flat rate applicable to the Company without considering any other deductions or exemptions.",
        style,
    );
}
