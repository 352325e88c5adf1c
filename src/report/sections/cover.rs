use super::super::{ReportInput, TableOfContents};
use crate::format::Align;
use crate::layout::{Canvas, TextStyle};

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    let layout = canvas.layout().clone();
    let body = TextStyle::regular(layout.body_size);

    canvas.advance(layout.content_width() * 0.35);
    canvas.title(&input.company.name);
    canvas.advance(4.0);
    canvas.centered("ANNUAL REPORT", TextStyle::bold(layout.heading_size + 3.0));
    canvas.centered(
        &format!("Financial Year {}", input.fiscal_year.label()),
        TextStyle::bold(layout.heading_size),
    );
    canvas.centered(
        &format!("(1st April, {} to {})", input.fiscal_year.start_year(), input.fiscal_year.closing_date_label()),
        body,
    );
    canvas.advance(12.0);

    for line in input.company.address_lines() {
        canvas.centered(&line, body);
    }

    let identifiers = [
        ("CIN", &input.company.cin),
        ("PAN", &input.company.pan),
        ("GSTIN", &input.company.gstin),
    ];
    let present: Vec<String> = identifiers
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| format!("{label}: {v}"))
        })
        .collect();
    if !present.is_empty() {
        canvas.advance(4.0);
        for line in present {
            canvas.line(&line, body, Align::Center);
        }
    }
    if let Some(date) = input.company.incorporation_date {
        canvas.line(&format!("Incorporated on {}", date.format("%d %B, %Y")), body, Align::Center);
    }
    if let Some(email) = input.company.email.as_deref().filter(|e| !e.trim().is_empty()) {
        canvas.line(&format!("Email: {email}"), body, Align::Center);
    }
}
