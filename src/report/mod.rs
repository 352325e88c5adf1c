//! Statutory annual report composition.
//!
//! Sections are drawn in a fixed order onto one [`Canvas`]. The composer
//! runs the sequence twice: a dry run to learn where every section starts,
//! then the real pass with those page numbers in the table of contents.
//! A signature footer is stamped on every page at the end.

mod footer;
mod notes;
mod sections;

pub use notes::Note;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::aggregate::FinancialData;
use crate::config::{AuditorInfo, CompanyInfo, ComplianceItem, DigitGrouping, ReportLayoutConfig};
use crate::error::{ReportError, Result};
use crate::fiscal::FiscalYear;
use crate::format::{format_currency_with, format_per_share};
use crate::layout::{Canvas, Document};

/// Everything a section builder may read. Never mutated during composition.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub company: &'a CompanyInfo,
    pub auditor: &'a AuditorInfo,
    pub fiscal_year: FiscalYear,
    pub current: &'a FinancialData,
    /// Prior-year figures; the comparison column shows a dash when absent.
    pub previous: Option<&'a FinancialData>,
    pub compliance: &'a [ComplianceItem],
    pub layout: &'a ReportLayoutConfig,
    pub grouping: DigitGrouping,
    pub currency_label: &'a str,
    /// Date printed beside signatures.
    pub signed_on: Option<NaiveDate>,
    /// Refuse to compose when the balance sheet does not tally.
    pub strict_balance: bool,
}

impl<'a> ReportInput<'a> {
    pub fn money(&self, amount: Decimal) -> String {
        format_currency_with(amount, self.grouping)
    }

    /// Previous-year figure, or a dash when no prior data was supplied.
    pub fn previous_money<F>(&self, pick: F) -> String
    where
        F: Fn(&FinancialData) -> Decimal,
    {
        self.previous
            .map(|p| self.money(pick(p)))
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn previous_per_share<F>(&self, pick: F) -> String
    where
        F: Fn(&FinancialData) -> Decimal,
    {
        self.previous
            .map(|p| format_per_share(pick(p)))
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn current_year_head(&self) -> String {
        format!("FY {}", self.fiscal_year.label())
    }

    pub fn previous_year_head(&self) -> String {
        format!("FY {}", self.fiscal_year.previous().label())
    }

    pub fn amount_caption(&self) -> String {
        format!("(All amounts in {})", self.currency_label)
    }

    pub fn signed_on_label(&self) -> String {
        self.signed_on
            .map(|d| d.format("%d-%m-%Y").to_string())
            .unwrap_or_default()
    }

    pub fn document_title(&self) -> String {
        format!(
            "{} - Annual Report FY {}",
            self.company.name,
            self.fiscal_year.label()
        )
    }
}

/// The statutory sections, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Cover,
    Contents,
    DirectorsReport,
    FinancialHighlights,
    ProfitAndLoss,
    BalanceSheet,
    CashFlow,
    NotesToAccounts,
    ComputationOfIncome,
    TdsSummary,
    ComplianceSummary,
    AuditCertificate,
}

/// Draws one section at the canvas cursor.
pub type SectionBuilder = fn(&mut Canvas, &ReportInput<'_>, &TableOfContents);

impl SectionKind {
    pub const ALL: [SectionKind; 12] = [
        SectionKind::Cover,
        SectionKind::Contents,
        SectionKind::DirectorsReport,
        SectionKind::FinancialHighlights,
        SectionKind::ProfitAndLoss,
        SectionKind::BalanceSheet,
        SectionKind::CashFlow,
        SectionKind::NotesToAccounts,
        SectionKind::ComputationOfIncome,
        SectionKind::TdsSummary,
        SectionKind::ComplianceSummary,
        SectionKind::AuditCertificate,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Cover => "Cover",
            SectionKind::Contents => "Table of Contents",
            SectionKind::DirectorsReport => "Directors' Report",
            SectionKind::FinancialHighlights => "Financial Highlights",
            SectionKind::ProfitAndLoss => "Statement of Profit and Loss",
            SectionKind::BalanceSheet => "Balance Sheet",
            SectionKind::CashFlow => "Cash Flow Statement",
            SectionKind::NotesToAccounts => "Notes to Accounts",
            SectionKind::ComputationOfIncome => "Computation of Income",
            SectionKind::TdsSummary => "TDS & Tax Summary",
            SectionKind::ComplianceSummary => "Compliance Summary",
            SectionKind::AuditCertificate => "Independent Auditor's Report",
        }
    }

    pub fn from_title(title: &str) -> Option<SectionKind> {
        SectionKind::ALL.into_iter().find(|k| k.title() == title)
    }

    pub fn builder(self) -> SectionBuilder {
        match self {
            SectionKind::Cover => sections::cover::build,
            SectionKind::Contents => sections::contents::build,
            SectionKind::DirectorsReport => sections::directors::build,
            SectionKind::FinancialHighlights => sections::highlights::build,
            SectionKind::ProfitAndLoss => sections::profit_loss::build,
            SectionKind::BalanceSheet => sections::balance_sheet::build,
            SectionKind::CashFlow => sections::cash_flow::build,
            SectionKind::NotesToAccounts => sections::notes_to_accounts::build,
            SectionKind::ComputationOfIncome => sections::computation::build,
            SectionKind::TdsSummary => sections::tds::build,
            SectionKind::ComplianceSummary => sections::compliance::build,
            SectionKind::AuditCertificate => sections::audit::build,
        }
    }
}

/// First page (1-based) of every section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOfContents {
    pages: BTreeMap<SectionKind, usize>,
}

impl TableOfContents {
    pub fn from_document(doc: &Document) -> Self {
        let pages = doc
            .bookmarks()
            .iter()
            .filter_map(|b| SectionKind::from_title(&b.title).map(|k| (k, b.page + 1)))
            .collect();
        Self { pages }
    }

    pub fn page_of(&self, kind: SectionKind) -> Option<usize> {
        self.pages.get(&kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Sections in the order they appear in `doc`.
pub fn section_order(doc: &Document) -> Vec<SectionKind> {
    doc.bookmarks()
        .iter()
        .filter_map(|b| SectionKind::from_title(&b.title))
        .collect()
}

fn draw_sections(input: &ReportInput<'_>, layout: &ReportLayoutConfig, toc: &TableOfContents) -> Document {
    let mut canvas = Canvas::new(&input.document_title(), layout.clone());

    for kind in SectionKind::ALL {
        canvas.fresh_page();
        let first = canvas.document().current_page();
        canvas.bookmark(kind.title());
        (kind.builder())(&mut canvas, input, toc);
        debug!(
            section = kind.title(),
            first_page = first + 1,
            last_page = canvas.document().current_page() + 1,
            "section drawn"
        );
    }

    canvas.into_document()
}

fn check_balance(input: &ReportInput<'_>) -> Result<()> {
    let difference = input.current.balance_difference();
    if difference.is_zero() {
        return Ok(());
    }
    if input.strict_balance {
        return Err(ReportError::UnbalancedBalanceSheet {
            assets: input.current.total_assets,
            liabilities: input.current.total_liabilities,
        });
    }
    warn!(
        assets = %input.current.total_assets,
        liabilities = %input.current.total_liabilities,
        %difference,
        "balance sheet does not tally"
    );
    Ok(())
}

/// Compose the full annual report. Each call owns a fresh document.
pub fn compose_annual_report(input: &ReportInput<'_>) -> Result<Document> {
    check_balance(input)?;
    let layout = footer::fit_layout(input)?;

    let dry_run = draw_sections(input, &layout, &TableOfContents::default());
    let toc = TableOfContents::from_document(&dry_run);

    let mut doc = draw_sections(input, &layout, &toc);
    if TableOfContents::from_document(&doc) != toc {
        warn!("table of contents page numbers shifted between passes");
    }

    footer::stamp(&mut doc, input);

    info!(
        company = %input.company.name,
        fy = %input.fiscal_year,
        pages = doc.page_count(),
        "annual report composed"
    );
    Ok(doc)
}
