mod source;

pub use source::{source_from_settings, FileLedgerSource, HttpLedgerSource, LedgerSource};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the data source returns for one owner. Optional monetary
/// fields default to zero.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LedgerRecords {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub journals: Vec<JournalEntry>,
    #[serde(default)]
    pub receivables: Vec<OpenBalance>,
    #[serde(default)]
    pub payables: Vec<OpenBalance>,
    #[serde(default)]
    pub tds: Vec<TdsTransaction>,
}

impl LedgerRecords {
    pub fn record_count(&self) -> usize {
        self.invoices.len()
            + self.expenses.len()
            + self.journals.len()
            + self.receivables.len()
            + self.payables.len()
            + self.tds.len()
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevenueKind {
    Products,
    #[default]
    Services,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Unpaid,
    Partial,
    Draft,
    Cancelled,
}

impl InvoiceStatus {
    /// Drafts and cancelled invoices never reach the books.
    pub fn is_booked(self) -> bool {
        !matches!(self, InvoiceStatus::Draft | InvoiceStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Invoice {
    #[serde(default)]
    pub number: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub kind: RevenueKind,
    #[serde(default)]
    pub taxable_value: Decimal,
    #[serde(default)]
    pub cgst: Decimal,
    #[serde(default)]
    pub sgst: Decimal,
    #[serde(default)]
    pub igst: Decimal,
    #[serde(default)]
    pub status: InvoiceStatus,
}

impl Invoice {
    pub fn gst(&self) -> Decimal {
        self.cgst + self.sgst + self.igst
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Expense {
    pub date: NaiveDate,
    /// Free-text label as entered by the user.
    #[serde(default)]
    pub category: String,
    /// Explicit category chosen at entry time; wins over the label.
    #[serde(default)]
    pub code: Option<ExpenseCategory>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

impl Expense {
    pub fn resolved_category(&self) -> ExpenseCategory {
        self.code
            .unwrap_or_else(|| ExpenseCategory::from_label(&self.category))
    }

    /// Label used in the expense breakdown note.
    pub fn display_label(&self) -> String {
        let label = self.category.trim();
        if label.is_empty() {
            "Miscellaneous".to_string()
        } else {
            label.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    CostOfMaterials,
    EmployeeBenefit,
    FinanceCost,
    Depreciation,
    Other,
    Uncategorized,
}

/// Known free-text labels, compared after trimming and lowercasing.
/// Anything not listed is `Uncategorized` and reported under other expenses.
const LABEL_MAP: &[(&str, ExpenseCategory)] = &[
    ("raw materials", ExpenseCategory::CostOfMaterials),
    ("materials", ExpenseCategory::CostOfMaterials),
    ("cost of materials", ExpenseCategory::CostOfMaterials),
    ("salary", ExpenseCategory::EmployeeBenefit),
    ("salaries", ExpenseCategory::EmployeeBenefit),
    ("payroll", ExpenseCategory::EmployeeBenefit),
    ("wages", ExpenseCategory::EmployeeBenefit),
    ("staff welfare", ExpenseCategory::EmployeeBenefit),
    ("bank charges", ExpenseCategory::FinanceCost),
    ("interest", ExpenseCategory::FinanceCost),
    ("interest expense", ExpenseCategory::FinanceCost),
    ("depreciation", ExpenseCategory::Depreciation),
];

impl ExpenseCategory {
    pub fn from_label(label: &str) -> ExpenseCategory {
        let key = label.trim().to_lowercase();
        LABEL_MAP
            .iter()
            .find(|(known, _)| *known == key)
            .map(|(_, category)| *category)
            .unwrap_or(ExpenseCategory::Uncategorized)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JournalAccount {
    OtherIncome,
    OtherCurrentLiability,
    OtherCurrentAsset,
    FixedAsset,
    CashAndBank,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub account: JournalAccount,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub narration: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    #[default]
    Outstanding,
    Settled,
}

/// A receivable or payable as it stands today.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OpenBalance {
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub status: BalanceStatus,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TdsTransaction {
    pub date: NaiveDate,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub section: String,
    /// Gross amount the tax was deducted from.
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub tds: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn known_labels_map_case_insensitively() {
        assert_eq!(
            ExpenseCategory::from_label(" Salary "),
            ExpenseCategory::EmployeeBenefit
        );
        assert_eq!(
            ExpenseCategory::from_label("PAYROLL"),
            ExpenseCategory::EmployeeBenefit
        );
        assert_eq!(
            ExpenseCategory::from_label("Bank Charges"),
            ExpenseCategory::FinanceCost
        );
        assert_eq!(
            ExpenseCategory::from_label("Depreciation"),
            ExpenseCategory::Depreciation
        );
        assert_eq!(
            ExpenseCategory::from_label("Salary advance"),
            ExpenseCategory::Uncategorized
        );
    }

    #[test]
    fn material_labels_feed_cost_of_materials() {
        for label in ["Raw Materials", "materials", "Cost of Materials"] {
            assert_eq!(
                ExpenseCategory::from_label(label),
                ExpenseCategory::CostOfMaterials
            );
        }
        assert_eq!(
            ExpenseCategory::from_label("Packing materials"),
            ExpenseCategory::Uncategorized
        );
    }

    #[test]
    fn explicit_code_wins_over_label() {
        let expense = Expense {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            category: "Salary".into(),
            code: Some(ExpenseCategory::Other),
            amount: dec!(10),
            description: String::new(),
        };
        assert_eq!(expense.resolved_category(), ExpenseCategory::Other);
    }

    #[test]
    fn missing_optional_fields_default_to_zero() {
        let records: LedgerRecords = toml::from_str(
            r#"
            [[invoices]]
            date = "2024-05-10"

            [[tds]]
            date = "2024-06-01"
            "#,
        )
        .unwrap();
        assert_eq!(records.invoices[0].taxable_value, Decimal::ZERO);
        assert_eq!(records.invoices[0].gst(), Decimal::ZERO);
        assert_eq!(records.invoices[0].status, InvoiceStatus::Unpaid);
        assert_eq!(records.tds[0].tds, Decimal::ZERO);
        assert_eq!(records.record_count(), 2);
    }
}
