use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use annual_report::aggregate::{FinancialData, FlatRateTax};
use annual_report::config::{
    AuditorInfo, CompanyInfo, ComplianceItem, DigitGrouping, Director, ReportLayoutConfig,
};
use annual_report::error::ReportError;
use annual_report::fiscal::FiscalYear;
use annual_report::layout::{text_width, Document, DrawOp, Page, PDF_MAGIC};
use annual_report::report::{
    compose_annual_report, section_order, ReportInput, SectionKind, TableOfContents,
};

struct Fixture {
    company: CompanyInfo,
    auditor: AuditorInfo,
    layout: ReportLayoutConfig,
    compliance: Vec<ComplianceItem>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            company: CompanyInfo {
                name: "Acme Analytics Private Limited".into(),
                cin: Some("U72900MH2020PTC123456".into()),
                address: "12 MG Road".into(),
                city: "Pune".into(),
                state: "Maharashtra".into(),
                pincode: "411001".into(),
                country: "India".into(),
                directors: vec![
                    Director {
                        name: "Asha Mehta".into(),
                        din: Some("08123456".into()),
                        designation: "Managing Director".into(),
                    },
                    Director {
                        name: "Rohan Iyer".into(),
                        din: None,
                        designation: "Director".into(),
                    },
                ],
                incorporation_date: NaiveDate::from_ymd_opt(2020, 6, 15),
                ..CompanyInfo::default()
            },
            auditor: AuditorInfo {
                firm_name: "Kapoor & Associates".into(),
                firm_registration_number: Some("123456W".into()),
                partner_name: Some("CA Vikram Kapoor".into()),
                membership_number: Some("045678".into()),
                place: Some("Pune".into()),
            },
            layout: ReportLayoutConfig::default(),
            compliance: ComplianceItem::default_checklist(),
        }
    }

    fn input<'a>(
        &'a self,
        current: &'a FinancialData,
        previous: Option<&'a FinancialData>,
    ) -> ReportInput<'a> {
        ReportInput {
            company: &self.company,
            auditor: &self.auditor,
            fiscal_year: FiscalYear::new(2024).unwrap(),
            current,
            previous,
            compliance: &self.compliance,
            layout: &self.layout,
            grouping: DigitGrouping::Western,
            currency_label: "Rs.",
            signed_on: None,
            strict_balance: false,
        }
    }
}

/// Revenue 500,000 against 150,000 of expenses.
fn scenario() -> FinancialData {
    let mut data = FinancialData {
        revenue_from_operations: dec!(500000),
        sale_of_services: dec!(500000),
        employee_benefit: dec!(100000),
        other_expenses: dec!(50000),
        share_capital: dec!(10000),
        face_value: dec!(10),
        ..FinancialData::default()
    };
    data.recompute(&FlatRateTax::default());
    data
}

fn loss_year() -> FinancialData {
    let mut data = FinancialData {
        revenue_from_operations: dec!(100000),
        employee_benefit: dec!(180000),
        share_capital: dec!(10000),
        face_value: dec!(10),
        opening_reserves: dec!(-20000),
        ..FinancialData::default()
    };
    data.recompute(&FlatRateTax::default());
    data
}

/// Every text drawn on the same baseline as the op labelled `label`.
fn row_texts(doc: &Document, label: &str) -> Vec<String> {
    for page in doc.pages() {
        if let Some(DrawOp::Text { y, .. }) = page.content.iter().find(|op| op.text() == Some(label)) {
            return page
                .content
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text { y: other, text, .. } if (other - y).abs() < 1e-3 => {
                        Some(text.clone())
                    }
                    _ => None,
                })
                .collect();
        }
    }
    panic!("no row labelled {label:?}");
}

fn label_is_bold(doc: &Document, label: &str) -> bool {
    doc.pages()
        .iter()
        .flat_map(|page| page.content.iter())
        .find(|op| op.text() == Some(label))
        .map(DrawOp::is_bold)
        .unwrap_or(false)
}

fn all_texts(doc: &Document) -> Vec<&str> {
    doc.pages().iter().flat_map(Page::texts).collect()
}

#[test]
fn sections_appear_in_statutory_order() {
    let fixture = Fixture::new();
    for data in [FinancialData::default(), scenario(), loss_year()] {
        let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
        assert_eq!(section_order(&doc), SectionKind::ALL.to_vec());
    }
}

#[test]
fn sections_start_on_their_own_page() {
    let fixture = Fixture::new();
    let data = scenario();
    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    let pages: Vec<usize> = doc.bookmarks().iter().map(|b| b.page).collect();
    assert!(pages.windows(2).all(|w| w[0] < w[1]), "{pages:?}");
}

#[test]
fn no_content_crosses_the_bottom_margin() {
    let fixture = Fixture::new();
    let data = scenario();
    let doc = compose_annual_report(&fixture.input(&data, Some(&data))).unwrap();
    let layout = doc.layout();

    for (i, page) in doc.pages().iter().enumerate() {
        for op in &page.content {
            assert!(
                op.bottom() <= layout.content_bottom() + 1e-3,
                "page {} draws below the margin: {op:?}",
                i + 1
            );
            if let DrawOp::Text { y, .. } = op {
                assert!(*y >= layout.margin_top, "page {} draws above the margin", i + 1);
            }
        }
    }
}

#[test]
fn directors_report_continues_at_top_margin() {
    let fixture = Fixture::new();
    let data = scenario();
    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    let toc = TableOfContents::from_document(&doc);

    let start = toc.page_of(SectionKind::DirectorsReport).unwrap();
    let next = toc.page_of(SectionKind::FinancialHighlights).unwrap();
    assert!(next - start >= 2, "directors' report should overflow one page");

    // first op on the continuation page sits right under the top margin
    let continuation = &doc.pages()[start];
    let first = continuation
        .content
        .iter()
        .map(DrawOp::bottom)
        .fold(f32::MAX, f32::min);
    let layout = doc.layout();
    assert!(first >= layout.margin_top);
    assert!(first <= layout.margin_top + layout.line_height(layout.body_size) + 3.0);
}

#[test]
fn profit_and_loss_renders_worked_example() {
    let fixture = Fixture::new();
    let data = scenario();
    assert_eq!(data.total_expenses, dec!(150000));
    assert_eq!(data.profit_before_tax, dec!(350000));
    assert_eq!(data.tax_expense, dec!(87500));
    assert_eq!(data.profit_after_tax, dec!(262500));

    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();

    let pbt = row_texts(&doc, "V. Profit/(Loss) Before Tax (III - IV)");
    assert!(pbt.contains(&"350,000".to_string()), "{pbt:?}");
    assert!(label_is_bold(&doc, "V. Profit/(Loss) Before Tax (III - IV)"));

    let tax = row_texts(&doc, "(1) Current tax");
    assert!(tax.contains(&"87,500".to_string()), "{tax:?}");

    let pat = row_texts(&doc, "VII. Profit/(Loss) for the period (V - VI)");
    assert!(pat.contains(&"262,500".to_string()), "{pat:?}");

    // unimplemented schedule lines are still printed
    assert_eq!(row_texts(&doc, "(2) Deferred tax"), vec!["(2) Deferred tax", "-", "-"]);
    assert!(all_texts(&doc).contains(&"Exceptional and extraordinary items"));
}

#[test]
fn loss_year_pays_no_tax() {
    let fixture = Fixture::new();
    let data = loss_year();
    assert!(data.profit_before_tax < dec!(0));
    assert_eq!(data.tax_expense, dec!(0));

    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    assert_eq!(row_texts(&doc, "(1) Current tax"), vec!["(1) Current tax", "-", "-"]);
    let pbt = row_texts(&doc, "V. Profit/(Loss) Before Tax (III - IV)");
    assert!(pbt.contains(&"(80,000)".to_string()), "{pbt:?}");
}

#[test]
fn empty_tds_list_shows_placeholder_row() {
    let fixture = Fixture::new();
    let data = scenario();
    assert!(data.tds_transactions.is_empty());

    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    let hits = all_texts(&doc)
        .into_iter()
        .filter(|t| *t == "No TDS transactions recorded")
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn negative_reserves_are_parenthesised_and_totals_bold() {
    let fixture = Fixture::new();
    let data = loss_year();
    assert_eq!(data.reserves_and_surplus, dec!(-100000));

    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    let reserves = row_texts(&doc, "(b) Reserves and Surplus");
    assert!(reserves.contains(&"(100,000)".to_string()), "{reserves:?}");
    assert!(!label_is_bold(&doc, "(b) Reserves and Surplus"));

    assert!(label_is_bold(&doc, "Total Equity & Liabilities"));
    assert!(label_is_bold(&doc, "Total Assets"));
}

#[test]
fn previous_year_column_uses_prior_figures_or_dash() {
    let fixture = Fixture::new();
    let current = scenario();
    let previous = loss_year();

    let with_prior = compose_annual_report(&fixture.input(&current, Some(&previous))).unwrap();
    assert_eq!(
        row_texts(&with_prior, "III. Total Income (I + II)"),
        vec!["III. Total Income (I + II)", "500,000", "100,000"]
    );

    let without = compose_annual_report(&fixture.input(&current, None)).unwrap();
    assert_eq!(
        row_texts(&without, "III. Total Income (I + II)"),
        vec!["III. Total Income (I + II)", "500,000", "-"]
    );
}

#[test]
fn contents_page_numbers_match_layout() {
    let fixture = Fixture::new();
    let data = scenario();
    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    let toc = TableOfContents::from_document(&doc);

    for kind in [
        SectionKind::ProfitAndLoss,
        SectionKind::BalanceSheet,
        SectionKind::AuditCertificate,
    ] {
        let row = row_texts(&doc, kind.title());
        let page = toc.page_of(kind).unwrap().to_string();
        assert_eq!(row.last(), Some(&page), "{kind:?}");
    }
}

#[test]
fn footer_is_stamped_on_every_page() {
    let fixture = Fixture::new();
    let data = scenario();
    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    let count = doc.page_count();

    for (i, page) in doc.pages().iter().enumerate() {
        let footer: Vec<&str> = page.footer.iter().filter_map(DrawOp::text).collect();
        assert!(footer.contains(&"For Kapoor & Associates"));
        assert!(footer.contains(&"For Acme Analytics Private Limited"));
        assert!(footer.contains(&"Asha Mehta (DIN: 08123456)"));
        assert!(footer.contains(&"Rohan Iyer"));
        let counter = format!("Page {} of {}", i + 1, count);
        assert!(footer.contains(&counter.as_str()));
    }
    assert_eq!(doc.current_page(), count - 1);
}

#[test]
fn strict_mode_rejects_unbalanced_sheet() {
    let fixture = Fixture::new();
    let data = scenario();
    assert!(!data.balance_difference().is_zero());

    let mut input = fixture.input(&data, None);
    input.strict_balance = true;
    let err = compose_annual_report(&input).unwrap_err();
    assert!(matches!(err, ReportError::UnbalancedBalanceSheet { .. }));

    input.strict_balance = false;
    assert!(compose_annual_report(&input).is_ok());
}

#[test]
fn each_call_builds_an_independent_document() {
    let fixture = Fixture::new();
    let data = scenario();
    let input = fixture.input(&data, None);
    let first = compose_annual_report(&input).unwrap();
    let second = compose_annual_report(&input).unwrap();
    assert_eq!(first.page_count(), second.page_count());
    assert_eq!(first.pages(), second.pages());
}

#[test]
fn serializes_to_pdf() {
    let fixture = Fixture::new();
    let data = scenario();
    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    let bytes = doc.to_pdf_bytes().unwrap();
    assert!(bytes.starts_with(PDF_MAGIC));
}

fn crowded_board(fixture: &mut Fixture, directors: usize) {
    fixture.company.name =
        "Acme Analytics and Consulting Services for Industrial Automation Private Limited".into();
    fixture.company.directors = (1..=directors)
        .map(|n| Director {
            name: format!("Director Number {n}"),
            din: Some(format!("080000{n:02}")),
            designation: "Director".into(),
        })
        .collect();
}

#[test]
fn crowded_footer_stays_on_the_page() {
    let mut fixture = Fixture::new();
    crowded_board(&mut fixture, 9);
    let data = scenario();
    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();
    let layout = doc.layout();
    assert!(layout.content_bottom() < layout.footer_top());

    for (i, page) in doc.pages().iter().enumerate() {
        let counter = format!("Page {} of {}", i + 1, doc.page_count());
        let (counter_y, counter_size) = page
            .footer
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { y, style, text, .. } if *text == counter => Some((*y, style.size)),
                _ => None,
            })
            .unwrap();
        let counter_top = counter_y - counter_size * 0.352_778;

        let mut spans: Vec<(f32, f32, f32)> = Vec::new();
        for op in &page.footer {
            assert!(op.bottom() < layout.page_height, "page {} footer off the page: {op:?}", i + 1);
            assert!(op.bottom() >= layout.footer_top() - 1e-3, "page {}: {op:?}", i + 1);
            if let DrawOp::Text { x, y, style, text } = op {
                let right = x + text_width(text, *style);
                assert!(*x >= layout.margin_left - 1e-3 && right <= layout.content_right() + 1e-3);
                if *text != counter {
                    assert!(*y < counter_top, "page {} footer meets the counter: {text}", i + 1);
                }
                for (other_y, other_x, other_right) in &spans {
                    if (other_y - y).abs() < 1e-3 {
                        assert!(right <= *other_x || *x >= *other_right, "overlap at y={y}: {text}");
                    }
                }
                spans.push((*y, *x, right));
            }
        }

        let footer: Vec<&str> = page.footer.iter().filter_map(DrawOp::text).collect();
        for n in 1..=9 {
            let line = format!("Director Number {n} (DIN: 080000{n:02})");
            assert!(footer.contains(&line.as_str()), "page {} lost {line}", i + 1);
        }
        assert!(footer.join(" ").contains("Industrial Automation Private Limited"));
    }

    for page in doc.pages() {
        for op in &page.content {
            assert!(op.bottom() <= layout.content_bottom() + 1e-3, "{op:?}");
        }
    }
}

#[test]
fn oversized_footer_is_rejected() {
    let mut fixture = Fixture::new();
    crowded_board(&mut fixture, 60);
    let data = scenario();
    let err = compose_annual_report(&fixture.input(&data, None)).unwrap_err();
    assert!(matches!(err, ReportError::FooterOverflow { rows, capacity } if rows > capacity));
}

#[test]
fn designation_and_incorporation_date_are_rendered() {
    let fixture = Fixture::new();
    let data = scenario();
    let doc = compose_annual_report(&fixture.input(&data, None)).unwrap();

    let cover: Vec<&str> = doc.pages()[0].texts().collect();
    assert!(cover.contains(&"Incorporated on 15 June, 2020"), "{cover:?}");
    assert!(all_texts(&doc).contains(&"Managing Director"));
}
