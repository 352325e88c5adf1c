use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config directory not found at {0}. Run 'annual-report init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Financial data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    #[error("Invalid fiscal year '{0}'. Expected e.g. '2024', '2024-25' or 'FY2024-25'.")]
    InvalidFiscalYear(String),

    #[error("Balance sheet does not balance: total assets {assets} vs total equity & liabilities {liabilities}")]
    UnbalancedBalanceSheet {
        assets: Decimal,
        liabilities: Decimal,
    },

    #[error("Signature footer needs {rows} lines but at most {capacity} fit on a page")]
    FooterOverflow { rows: usize, capacity: usize },

    #[error("Failed to generate PDF: {0}")]
    Pdf(String),

    #[error("Generated output is not a PDF document (raw bytes saved to {0})")]
    MalformedOutput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
