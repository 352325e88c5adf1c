pub mod aggregate;
pub mod config;
pub mod error;
pub mod fiscal;
pub mod format;
pub mod layout;
pub mod ledger;
pub mod report;

pub use aggregate::{aggregate, Aggregator, FinancialData, FlatRateTax, TaxPolicy};
pub use config::{load_config, Config, ReportLayoutConfig};
pub use error::{ReportError, Result};
pub use fiscal::FiscalYear;
pub use format::format_currency;
pub use layout::{Document, PDF_MAGIC};
pub use ledger::{LedgerRecords, LedgerSource};
pub use report::{compose_annual_report, ReportInput, SectionKind};
