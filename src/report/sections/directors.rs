use rust_decimal::Decimal;

use super::super::{ReportInput, SectionKind, TableOfContents};
use super::{body, comparison_row, comparison_table, rupees};
use crate::layout::Canvas;

fn profit_or_loss(amount: Decimal) -> &'static str {
    if amount < Decimal::ZERO {
        "loss"
    } else {
        "profit"
    }
}

fn financial_results(input: &ReportInput<'_>) -> String {
    let data = input.current;
    format!(
        "During the financial year ended {closing}, the Company recorded revenue from operations of {revenue} \
         and other income of {other}, taking total income to {total}. Total expenses for the year amounted to {expenses}. \
         The Company made a {pbt_kind} before tax of {pbt}; after providing {tax} towards current tax, \
         the {pat_kind} for the year stands at {pat}.",
        closing = input.fiscal_year.closing_date_label(),
        revenue = rupees(input, data.revenue_from_operations),
        other = rupees(input, data.other_income),
        total = rupees(input, data.total_revenue),
        expenses = rupees(input, data.total_expenses),
        pbt_kind = profit_or_loss(data.profit_before_tax),
        pbt = rupees(input, data.profit_before_tax),
        tax = rupees(input, data.tax_expense),
        pat_kind = profit_or_loss(data.profit_after_tax),
        pat = rupees(input, data.profit_after_tax),
    )
}

fn directors_paragraph(input: &ReportInput<'_>) -> String {
    let names: Vec<String> = input
        .company
        .directors
        .iter()
        .map(|d| d.signature_line())
        .collect();
    if names.is_empty() {
        "There was no change in the composition of the Board during the year.".to_string()
    } else {
        format!(
            "The Board of Directors of the Company comprises {}. There was no change in the composition of the Board during the year.",
            names.join(", ")
        )
    }
}

fn auditor_paragraph(input: &ReportInput<'_>) -> String {
    let auditor = input.auditor;
    let frn = auditor
        .firm_registration_number
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .map(|f| format!(" (Firm Registration No. {f})"))
        .unwrap_or_default();
    format!(
        "M/s {}, Chartered Accountants{frn}, the Statutory Auditors of the Company, hold office until the conclusion of the \
         ensuing Annual General Meeting. The Auditors' Report on the financial statements does not contain any \
         qualification, reservation or adverse remark.",
        auditor.firm_name
    )
}

const RESPONSIBILITY: [&str; 6] = [
    "(a) in the preparation of the annual accounts, the applicable accounting standards have been followed and there are no material departures;",
    "(b) the Directors have selected such accounting policies and applied them consistently and made judgements and estimates that are reasonable and prudent so as to give a true and fair view of the state of affairs of the Company at the end of the financial year and of the profit or loss of the Company for that period;",
    "(c) the Directors have taken proper and sufficient care for the maintenance of adequate accounting records in accordance with the provisions of the Companies Act, 2013 for safeguarding the assets of the Company and for preventing and detecting fraud and other irregularities;",
    "(d) the Directors have prepared the annual accounts on a going concern basis;",
    "(e) the Directors have devised proper systems to ensure compliance with the provisions of all applicable laws and that such systems are adequate and operating effectively.",
    "(f) there were no frauds reported by the auditors under section 143(12) of the Companies Act, 2013.",
];

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    let style = body(canvas);
    let data = input.current;

    canvas.title(SectionKind::DirectorsReport.title());
    canvas.paragraph(&format!("To the Members of {},", input.company.name), style);
    canvas.advance(2.0);
    canvas.paragraph(
        &format!(
            "Your Directors have pleasure in presenting the Annual Report of the Company together with the audited \
             financial statements for the financial year ended {}.",
            input.fiscal_year.closing_date_label()
        ),
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("1. Financial Results");
    let mut table = comparison_table(canvas, input);
    table.push(comparison_row(input, "Revenue from Operations", |d| d.revenue_from_operations));
    table.push(comparison_row(input, "Other Income", |d| d.other_income));
    table.push(comparison_row(input, "Total Income", |d| d.total_revenue));
    table.push(comparison_row(input, "Total Expenses", |d| d.total_expenses));
    table.push(comparison_row(input, "Profit/(Loss) Before Tax", |d| d.profit_before_tax));
    table.push(comparison_row(input, "Less: Current Tax", |d| d.tax_expense));
    table.push(comparison_row(input, "Profit/(Loss) After Tax", |d| d.profit_after_tax));
    canvas.table(&table);
    canvas.advance(3.0);

    canvas.subheading("2. State of Company's Affairs");
    canvas.paragraph(&financial_results(input), style);
    canvas.advance(3.0);

    canvas.subheading("3. Dividend");
    canvas.paragraph(
        "With a view to conserve resources for the future growth of the business, your Directors do not recommend any dividend for the year under review.",
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("4. Transfer to Reserves");
    canvas.paragraph(
        &format!(
            "The {} of {} for the year has been carried to the Surplus in the Statement of Profit and Loss under Reserves and Surplus. No amount has been transferred to the General Reserve.",
            profit_or_loss(data.profit_after_tax),
            rupees(input, data.profit_after_tax)
        ),
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("5. Share Capital");
    canvas.paragraph(
        &format!(
            "The paid-up equity share capital of the Company as at {} stood at {} divided into {} equity shares of {} each. \
             The Company has not issued any shares during the year.",
            input.fiscal_year.closing_date_label(),
            rupees(input, data.share_capital),
            input.money(data.shares_outstanding),
            rupees(input, data.face_value)
        ),
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("6. Directors");
    canvas.paragraph(&directors_paragraph(input), style);
    canvas.advance(3.0);

    canvas.subheading("7. Deposits");
    canvas.paragraph(
        "The Company has not accepted any deposits from the public within the meaning of Chapter V of the Companies Act, 2013 during the year.",
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("8. Loans, Guarantees and Investments");
    canvas.paragraph(
        "The Company has not given any loans or guarantees nor made any investments covered under section 186 of the Companies Act, 2013.",
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("9. Related Party Transactions");
    canvas.paragraph(
        "There were no contracts or arrangements with related parties referred to in section 188(1) of the Companies Act, 2013 during the year.",
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("10. Material Changes and Commitments");
    canvas.paragraph(
        "No material changes or commitments affecting the financial position of the Company have occurred between the end of the financial year and the date of this report.",
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("11. Conservation of Energy, Technology Absorption and Foreign Exchange");
    canvas.paragraph(
        "Given the nature of its operations, the particulars relating to conservation of energy and technology absorption are not applicable to the Company. There were no foreign exchange earnings or outgo during the year.",
        style,
    );
    canvas.advance(3.0);

    canvas.subheading("12. Statutory Auditors");
    canvas.paragraph(&auditor_paragraph(input), style);
    canvas.advance(3.0);

    canvas.subheading("13. Directors' Responsibility Statement");
    canvas.paragraph(
        "Pursuant to section 134(5) of the Companies Act, 2013, the Directors confirm that:",
        style,
    );
    for item in RESPONSIBILITY {
        canvas.paragraph(item, style);
    }
    canvas.advance(3.0);

    canvas.subheading("14. Acknowledgement");
    canvas.paragraph(
        "Your Directors place on record their appreciation for the support extended by the bankers, customers, vendors and government authorities during the year.",
        style,
    );
    canvas.advance(8.0);

    let mut left = vec![format!("Date: {}", input.signed_on_label())];
    if let Some(place) = input.auditor.place.as_deref().filter(|p| !p.trim().is_empty()) {
        left.insert(0, format!("Place: {place}"));
    }
    let mut right = vec!["For and on behalf of the Board of Directors".to_string()];
    for director in &input.company.directors {
        right.push(director.signature_line());
        right.push(director.designation.clone());
    }
    canvas.columns(&left, &right, style);
}
