use super::super::{ReportInput, SectionKind, TableOfContents};
use super::{body, table_style};
use crate::format::weighted_columns;
use crate::layout::{Canvas, Row, Table};

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    canvas.title(SectionKind::ComplianceSummary.title());
    canvas.paragraph(
        &format!(
            "Status of statutory filings of the Company for the financial year {} under the GST, Companies and Income-tax laws.",
            input.fiscal_year.label()
        ),
        body(canvas),
    );
    canvas.advance(4.0);

    let columns = weighted_columns(
        canvas.layout().content_width(),
        &[2.4, 2.2, 2.6, 1.6, 1.6],
        &[],
    );
    let mut table = Table::new(columns)
        .head(["Area", "Form", "Due", "Status", "Filed On"])
        .style(table_style(canvas));

    if input.compliance.is_empty() {
        table.push(Row::placeholder("No compliance items recorded"));
    }
    for item in input.compliance {
        table.push(
            Row::new([
                item.area.clone(),
                item.form.clone(),
                item.due.clone().unwrap_or_else(|| "-".to_string()),
                item.status.clone(),
                item.filed_on
                    .map(|d| d.format("%d-%m-%Y").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ])
            .emphasize(false),
        );
    }
    canvas.table(&table);
}
