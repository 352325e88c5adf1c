use super::super::footer::{auditor_block, company_block};
use super::super::{ReportInput, SectionKind, TableOfContents};
use super::body;
use crate::layout::Canvas;

fn opinion(input: &ReportInput<'_>) -> String {
    let closing = input.fiscal_year.closing_date_label();
    format!(
        "We have audited the accompanying financial statements of {company}, which comprise the Balance Sheet as at {closing}, \
         the Statement of Profit and Loss and the Cash Flow Statement for the year then ended, and notes to the financial \
         statements, including a summary of significant accounting policies and other explanatory information. In our opinion \
         and to the best of our information and according to the explanations given to us, the aforesaid financial statements \
         give the information required by the Companies Act, 2013 in the manner so required and give a true and fair view in \
         conformity with the accounting principles generally accepted in India, of the state of affairs of the Company as at \
         {closing}, its profit or loss and its cash flows for the year ended on that date.",
        company = input.company.name,
    )
}

const BASIS: &str = "We conducted our audit in accordance with the Standards on Auditing specified under section 143(10) of the \
     Companies Act, 2013. Our responsibilities under those Standards are further described in the Auditor's Responsibilities \
     section of our report. We are independent of the Company in accordance with the Code of Ethics issued by the Institute \
     of Chartered Accountants of India, and we have fulfilled our other ethical responsibilities. We believe that the audit \
     evidence we have obtained is sufficient and appropriate to provide a basis for our opinion.";

const MANAGEMENT: &str = "The Company's Board of Directors is responsible for the preparation of these financial statements \
     that give a true and fair view of the financial position, financial performance and cash flows of the Company in \
     accordance with the accounting principles generally accepted in India, including the Accounting Standards specified \
     under section 133 of the Act. This responsibility includes maintenance of adequate accounting records, selection and \
     application of appropriate accounting policies, making judgments and estimates that are reasonable and prudent, and \
     the design, implementation and maintenance of adequate internal financial controls.";

const AUDITOR: &str = "Our objectives are to obtain reasonable assurance about whether the financial statements as a whole \
     are free from material misstatement, whether due to fraud or error, and to issue an auditor's report that includes our \
     opinion. Reasonable assurance is a high level of assurance, but is not a guarantee that an audit conducted in \
     accordance with the Standards on Auditing will always detect a material misstatement when it exists.";

const LEGAL: [&str; 5] = [
    "(a) We have sought and obtained all the information and explanations which to the best of our knowledge and belief were necessary for the purposes of our audit.",
    "(b) In our opinion, proper books of account as required by law have been kept by the Company so far as it appears from our examination of those books.",
    "(c) The Balance Sheet, the Statement of Profit and Loss and the Cash Flow Statement dealt with by this Report are in agreement with the books of account.",
    "(d) On the basis of the written representations received from the directors, none of the directors is disqualified from being appointed as a director in terms of section 164(2) of the Act.",
    "(e) The Company does not have any pending litigations which would impact its financial position.",
];

pub(crate) fn build(canvas: &mut Canvas, input: &ReportInput<'_>, _toc: &TableOfContents) {
    let style = body(canvas);

    canvas.title(SectionKind::AuditCertificate.title());
    canvas.paragraph(&format!("To the Members of {}", input.company.name), style);
    canvas.advance(3.0);

    canvas.subheading("Report on the Audit of the Financial Statements");
    canvas.subheading("Opinion");
    canvas.paragraph(&opinion(input), style);
    canvas.advance(3.0);

    canvas.subheading("Basis for Opinion");
    canvas.paragraph(BASIS, style);
    canvas.advance(3.0);

    canvas.subheading("Responsibilities of Management for the Financial Statements");
    canvas.paragraph(MANAGEMENT, style);
    canvas.advance(3.0);

    canvas.subheading("Auditor's Responsibilities for the Audit of the Financial Statements");
    canvas.paragraph(AUDITOR, style);
    canvas.advance(3.0);

    canvas.subheading("Report on Other Legal and Regulatory Requirements");
    canvas.paragraph("As required by section 143(3) of the Act, we report that:", style);
    for item in LEGAL {
        canvas.paragraph(item, style);
    }
    canvas.advance(10.0);

    let mut left = auditor_block(input);
    if let Some(place) = input.auditor.place.as_deref().filter(|p| !p.trim().is_empty()) {
        left.push(format!("Place: {place}"));
    }
    left.push(format!("Date: {}", input.signed_on_label()));
    canvas.columns(&left, &company_block(input), style);
}
