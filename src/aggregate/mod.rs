//! Reduction of raw ledger records into the flat figures every statement reads.

mod tax;

pub use tax::{FlatRateTax, TaxComputation, TaxPolicy};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::Config;
use crate::fiscal::FiscalYear;
use crate::ledger::{
    BalanceStatus, ExpenseCategory, InvoiceStatus, JournalAccount, LedgerRecords, RevenueKind,
    TdsTransaction,
};

/// A labelled amount inside a note breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountLine {
    pub label: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GstSummary {
    pub invoice_count: usize,
    pub paid_count: usize,
    pub outstanding_count: usize,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total: Decimal,
}

/// Pre-computed monetary figures for one fiscal year.
///
/// Component fields are filled by [`Aggregator`] (or directly, in tests);
/// totals and derived figures are produced by [`FinancialData::recompute`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialData {
    // Revenue
    pub revenue_from_operations: Decimal,
    pub sale_of_products: Decimal,
    pub sale_of_services: Decimal,
    pub other_income: Decimal,
    pub total_revenue: Decimal,

    // Expenses
    pub cost_of_materials: Decimal,
    pub employee_benefit: Decimal,
    pub financial_costs: Decimal,
    pub depreciation: Decimal,
    pub other_expenses: Decimal,
    pub total_expenses: Decimal,

    // Profit
    pub profit_before_tax: Decimal,
    pub tax_expense: Decimal,
    pub profit_after_tax: Decimal,
    pub shares_outstanding: Decimal,
    pub earnings_per_share: Decimal,

    // Equity & liabilities
    pub share_capital: Decimal,
    pub face_value: Decimal,
    pub opening_reserves: Decimal,
    pub reserves_and_surplus: Decimal,
    pub trade_payables: Decimal,
    pub other_payables: Decimal,
    pub other_current_liabilities: Decimal,
    pub total_liabilities: Decimal,

    // Assets
    pub fixed_asset_additions: Decimal,
    pub fixed_assets: Decimal,
    pub trade_receivables: Decimal,
    pub cash_and_bank: Decimal,
    pub sundry_current_assets: Decimal,
    pub other_current_assets: Decimal,
    pub total_assets: Decimal,

    // Supplementary
    pub total_tds: Decimal,
    pub tds_transactions: Vec<TdsTransaction>,
    pub expense_details: Vec<AmountLine>,
    pub other_income_details: Vec<AmountLine>,
    pub cash_details: Vec<AmountLine>,
    pub gst: GstSummary,
    pub tax: TaxComputation,
}

impl FinancialData {
    /// Derive every total from the component fields. Idempotent.
    pub fn recompute(&mut self, policy: &dyn TaxPolicy) {
        self.total_revenue = self.revenue_from_operations + self.other_income;
        self.total_expenses = self.cost_of_materials
            + self.employee_benefit
            + self.financial_costs
            + self.depreciation
            + self.other_expenses;

        self.profit_before_tax = self.total_revenue - self.total_expenses;
        self.tax_expense = policy.tax_expense(self.profit_before_tax);
        self.profit_after_tax = self.profit_before_tax - self.tax_expense;

        self.shares_outstanding = if self.face_value > Decimal::ZERO {
            (self.share_capital / self.face_value).floor()
        } else {
            Decimal::ZERO
        };
        self.earnings_per_share = if self.shares_outstanding > Decimal::ZERO {
            (self.profit_after_tax / self.shares_outstanding).round_dp(2)
        } else {
            Decimal::ZERO
        };

        self.reserves_and_surplus = self.opening_reserves + self.profit_after_tax;
        // provision for the year's tax sits with other current liabilities
        self.other_current_liabilities = self.other_payables + self.tax_expense;
        self.total_liabilities = self.share_capital
            + self.reserves_and_surplus
            + self.trade_payables
            + self.other_current_liabilities;

        self.fixed_assets = self.fixed_asset_additions - self.depreciation;
        // TDS deducted by customers is recoverable against the year's tax
        self.other_current_assets = self.sundry_current_assets + self.total_tds;
        self.total_assets = self.fixed_assets
            + self.trade_receivables
            + self.cash_and_bank
            + self.other_current_assets;

        self.tax = TaxComputation::compute(
            policy,
            self.profit_before_tax,
            self.depreciation,
            self.total_tds,
        );
    }

    /// Total assets minus total equity & liabilities; zero when the balance sheet tallies.
    pub fn balance_difference(&self) -> Decimal {
        self.total_assets - self.total_liabilities
    }

    pub fn net_worth(&self) -> Decimal {
        self.share_capital + self.reserves_and_surplus
    }

    /// Whether any period flow was recorded; used to decide if a prior-year column is worth showing.
    pub fn has_activity(&self) -> bool {
        !self.total_revenue.is_zero()
            || !self.total_expenses.is_zero()
            || !self.total_tds.is_zero()
            || self.gst.invoice_count > 0
    }
}

/// Reduces ledger records into [`FinancialData`] for a fiscal year.
pub struct Aggregator {
    pub share_capital: Decimal,
    pub face_value: Decimal,
    pub opening_reserves: Decimal,
    pub policy: Box<dyn TaxPolicy>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            share_capital: dec!(10000),
            face_value: dec!(10),
            opening_reserves: Decimal::ZERO,
            policy: Box::new(FlatRateTax::default()),
        }
    }
}

impl Aggregator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            share_capital: config.report.share_capital,
            face_value: config.report.face_value,
            opening_reserves: config.report.opening_reserves,
            policy: Box::new(FlatRateTax::from(&config.tax)),
        }
    }

    /// Period flows (invoices, expenses, journals, TDS) are taken from the
    /// fiscal-year window; receivables and payables are point-in-time and
    /// selected by outstanding status instead.
    pub fn aggregate(&self, records: &LedgerRecords, fy: FiscalYear) -> FinancialData {
        debug!(
            fy = %fy,
            start = %fy.start(),
            end = %fy.end(),
            records = records.record_count(),
            "aggregating ledger"
        );

        let mut data = FinancialData {
            share_capital: self.share_capital,
            face_value: self.face_value,
            opening_reserves: self.opening_reserves,
            ..Default::default()
        };

        for invoice in records
            .invoices
            .iter()
            .filter(|i| fy.contains(i.date) && i.status.is_booked())
        {
            match invoice.kind {
                RevenueKind::Products => data.sale_of_products += invoice.taxable_value,
                RevenueKind::Services => data.sale_of_services += invoice.taxable_value,
            }
            data.gst.invoice_count += 1;
            match invoice.status {
                InvoiceStatus::Paid => data.gst.paid_count += 1,
                _ => data.gst.outstanding_count += 1,
            }
            data.gst.cgst += invoice.cgst;
            data.gst.sgst += invoice.sgst;
            data.gst.igst += invoice.igst;
            data.gst.total += invoice.gst();
        }
        data.revenue_from_operations = data.sale_of_products + data.sale_of_services;

        let mut other_expense_lines: BTreeMap<String, Decimal> = BTreeMap::new();
        for expense in records.expenses.iter().filter(|e| fy.contains(e.date)) {
            match expense.resolved_category() {
                ExpenseCategory::CostOfMaterials => data.cost_of_materials += expense.amount,
                ExpenseCategory::EmployeeBenefit => data.employee_benefit += expense.amount,
                ExpenseCategory::FinanceCost => data.financial_costs += expense.amount,
                ExpenseCategory::Depreciation => data.depreciation += expense.amount,
                ExpenseCategory::Other | ExpenseCategory::Uncategorized => {
                    data.other_expenses += expense.amount;
                    *other_expense_lines
                        .entry(expense.display_label())
                        .or_default() += expense.amount;
                }
            }
        }
        data.expense_details = into_lines(other_expense_lines);

        let mut other_income_lines: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut cash_lines: BTreeMap<String, Decimal> = BTreeMap::new();
        for entry in records.journals.iter().filter(|j| fy.contains(j.date)) {
            match entry.account {
                JournalAccount::OtherIncome => {
                    data.other_income += entry.amount;
                    *other_income_lines
                        .entry(narration_or(&entry.narration, "Other income"))
                        .or_default() += entry.amount;
                }
                JournalAccount::OtherCurrentLiability => data.other_payables += entry.amount,
                JournalAccount::OtherCurrentAsset => data.sundry_current_assets += entry.amount,
                JournalAccount::FixedAsset => data.fixed_asset_additions += entry.amount,
                JournalAccount::CashAndBank => {
                    data.cash_and_bank += entry.amount;
                    *cash_lines
                        .entry(narration_or(&entry.narration, "Balances with banks"))
                        .or_default() += entry.amount;
                }
            }
        }
        data.other_income_details = into_lines(other_income_lines);
        data.cash_details = into_lines(cash_lines);

        data.trade_receivables = records
            .receivables
            .iter()
            .filter(|r| r.status == BalanceStatus::Outstanding)
            .map(|r| r.amount)
            .sum();
        data.trade_payables = records
            .payables
            .iter()
            .filter(|p| p.status == BalanceStatus::Outstanding)
            .map(|p| p.amount)
            .sum();

        let mut tds: Vec<TdsTransaction> = records
            .tds
            .iter()
            .filter(|t| fy.contains(t.date))
            .cloned()
            .collect();
        tds.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.party.cmp(&b.party)));
        data.total_tds = tds.iter().map(|t| t.tds).sum();
        data.tds_transactions = tds;

        data.recompute(self.policy.as_ref());

        info!(
            fy = %fy,
            revenue = %data.total_revenue,
            expenses = %data.total_expenses,
            profit_before_tax = %data.profit_before_tax,
            policy = %self.policy.name(),
            "aggregated financial data"
        );
        data
    }
}

/// Aggregate with default parameters (share capital 10,000 at face value 10, flat 25% tax).
pub fn aggregate(records: &LedgerRecords, fy: FiscalYear) -> FinancialData {
    Aggregator::default().aggregate(records, fy)
}

fn narration_or(narration: &str, fallback: &str) -> String {
    let trimmed = narration.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn into_lines(map: BTreeMap<String, Decimal>) -> Vec<AmountLine> {
    map.into_iter()
        .map(|(label, amount)| AmountLine { label, amount })
        .collect()
}
