use super::super::{ReportInput, SectionKind, TableOfContents};
use super::table_style;
use crate::format::weighted_columns;
use crate::layout::{Canvas, Row, Table};

/// Sections listed in the table of contents; the cover and the contents page
/// itself are left out.
fn listed() -> impl Iterator<Item = SectionKind> {
    SectionKind::ALL
        .into_iter()
        .filter(|k| !matches!(k, SectionKind::Cover | SectionKind::Contents))
}

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, toc: &TableOfContents) {
    canvas.title(SectionKind::Contents.title());
    canvas.centered(
        &format!("{} | FY {}", input.company.name, input.fiscal_year.label()),
        super::body(canvas),
    );
    canvas.advance(6.0);

    let columns = weighted_columns(canvas.layout().content_width(), &[1.0, 7.0, 1.5], &[2]);
    let mut table = Table::new(columns)
        .head(["S. No.", "Particulars", "Page No."])
        .style(table_style(canvas));

    for (i, kind) in listed().enumerate() {
        // the dry run has no page numbers yet; keep the row shape identical
        let page = toc
            .page_of(kind)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.push(Row::new([(i + 1).to_string(), kind.title().to_string(), page]).emphasize(false));
    }

    canvas.table(&table);
}
