mod company;
mod layout;
mod settings;

pub use company::{AuditorInfo, CompanyInfo, Config, Director};
pub use layout::ReportLayoutConfig;
pub use settings::{
    ComplianceItem, DigitGrouping, ReportSettings, SourceKind, SourceSettings, TaxSettings,
};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, falling back to ~/.annual-report/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "annual-report") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".annual-report"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve a configured directory: `~` is expanded, relative paths hang off the config dir.
pub fn resolve_dir(configured: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(configured);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

impl Config {
    /// Configured compliance checklist, or the default one when none is declared.
    pub fn compliance_items(&self) -> Vec<ComplianceItem> {
        if self.compliance.is_empty() {
            ComplianceItem::default_checklist()
        } else {
            self.compliance.clone()
        }
    }
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[company]
name = "Example Technologies Private Limited"
cin = "U72900MH2020PTC123456"        # optional
pan = "AABCE1234F"                   # optional
gstin = "27AABCE1234F1Z5"            # optional
address = "401, Business Park, Andheri East"
city = "Mumbai"
state = "Maharashtra"
pincode = "400069"
country = "India"
email = "accounts@example.com"       # optional
incorporation_date = "2020-06-15"    # optional

[[company.directors]]
name = "Asha Mehta"
din = "08123456"

[[company.directors]]
name = "Rohan Iyer"
din = "08654321"

[auditor]
firm_name = "Kapoor & Associates"
firm_registration_number = "123456W"
partner_name = "CA Vikram Kapoor"
membership_number = "045678"
place = "Mumbai"

[report]
output_dir = "~/.annual-report/output"
currency_label = "Rs."
grouping = "western"      # or "indian" for 12,34,567
strict_balance = false    # fail when the balance sheet does not tally
share_capital = 10000
face_value = 10
opening_reserves = 0

[tax]
rate = "0.25"
cess_rate = "0.04"

[source]
kind = "file"             # or "http"
ledger_dir = "ledger"     # <ledger_dir>/<owner>.toml
# url = "https://db.example.com/rest/v1"
# api_key_env = "ANNUAL_REPORT_API_KEY"
timeout_secs = 10

# Compliance checklist; a default list is used when none is given.
# [[compliance]]
# area = "GST"
# form = "GSTR-3B"
# due = "Monthly, 20th"
# status = "Filed"
# filed_on = "2025-04-18"
"#;

/// Template content for ledger/example.toml
pub const LEDGER_TEMPLATE: &str = r#"# Ledger records for one owner. Dates are "YYYY-MM-DD" strings.
# Invoices, expenses, journals and TDS entries are filtered by fiscal year;
# receivables and payables are point-in-time balances filtered by status.

[[invoices]]
number = "INV-2024-0001"
date = "2024-05-10"
customer = "Globex Corporation"
kind = "services"         # or "products"
taxable_value = 300000
cgst = 27000
sgst = 27000
status = "paid"

[[invoices]]
number = "INV-2024-0002"
date = "2024-11-02"
customer = "Initech Ltd"
kind = "services"
taxable_value = 200000
igst = 36000
status = "unpaid"

[[expenses]]
date = "2024-06-30"
category = "Salary"
amount = 100000
description = "Staff salaries"

[[expenses]]
date = "2024-09-30"
category = "Rent"
amount = 30000
description = "Office rent"

[[expenses]]
date = "2025-01-15"
category = "Professional Fees"
amount = 20000

[[journals]]
date = "2025-03-31"
account = "cash_and_bank"
amount = 104000
narration = "Closing bank balance"

[[receivables]]
party = "Initech Ltd"
amount = 236000
status = "outstanding"

[[payables]]
party = "Office landlord"
amount = 10000
status = "outstanding"

[[tds]]
date = "2024-05-20"
party = "Globex Corporation"
section = "194J"
amount = 300000
tds = 30000
"#;
