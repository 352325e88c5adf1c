use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// 1,234,567
    #[default]
    Western,
    /// 12,34,567
    Indian,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ReportSettings {
    pub output_dir: String,
    /// Shown in table captions only; builtin PDF fonts cannot draw most currency glyphs.
    pub currency_label: String,
    pub grouping: DigitGrouping,
    /// Fail generation when total assets differ from total equity & liabilities.
    pub strict_balance: bool,
    pub share_capital: Decimal,
    pub face_value: Decimal,
    pub opening_reserves: Decimal,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: "~/.annual-report/output".to_string(),
            currency_label: "Rs.".to_string(),
            grouping: DigitGrouping::Western,
            strict_balance: false,
            share_capital: dec!(10000),
            face_value: dec!(10),
            opening_reserves: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct TaxSettings {
    pub rate: Decimal,
    pub cess_rate: Decimal,
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            rate: dec!(0.25),
            cess_rate: dec!(0.04),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    File,
    Http,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// Directory holding `<owner>.toml` ledgers, relative to the config directory.
    pub ledger_dir: String,
    pub url: Option<String>,
    /// Environment variable holding the API key sent with HTTP requests.
    pub api_key_env: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::File,
            ledger_dir: "ledger".to_string(),
            url: None,
            api_key_env: None,
            timeout_secs: 10,
        }
    }
}

/// One row of the compliance checklist. Populated by the caller; the report
/// only renders it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComplianceItem {
    pub area: String,
    pub form: String,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub filed_on: Option<NaiveDate>,
}

fn default_status() -> String {
    "Pending".to_string()
}

impl ComplianceItem {
    fn pending(area: &str, form: &str, due: &str) -> Self {
        Self {
            area: area.to_string(),
            form: form.to_string(),
            due: Some(due.to_string()),
            status: default_status(),
            filed_on: None,
        }
    }

    /// Checklist used when the config declares no `[[compliance]]` entries.
    pub fn default_checklist() -> Vec<ComplianceItem> {
        vec![
            Self::pending("GST", "GSTR-1", "Monthly, 11th"),
            Self::pending("GST", "GSTR-3B", "Monthly, 20th"),
            Self::pending("GST", "GSTR-9", "31st December"),
            Self::pending("MCA", "AOC-4", "Within 30 days of AGM"),
            Self::pending("MCA", "MGT-7", "Within 60 days of AGM"),
            Self::pending("MCA", "DIR-3 KYC", "30th September"),
            Self::pending("Income Tax", "ITR-6", "31st October"),
            Self::pending("Income Tax", "TDS Returns (24Q/26Q)", "Quarterly"),
        ]
    }
}
