use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use ureq::Agent;

use super::LedgerRecords;
use crate::config::{resolve_dir, SourceKind, SourceSettings};
use crate::error::{ReportError, Result};

/// Supplies raw ledger records for an owner. Failures surface as
/// `DataUnavailable`; a source never substitutes empty data.
pub trait LedgerSource {
    fn name(&self) -> String;

    fn fetch(&self, owner: &str) -> Result<LedgerRecords>;
}

fn unavailable(source_name: String, reason: impl Into<String>) -> ReportError {
    ReportError::DataUnavailable {
        source_name,
        reason: reason.into(),
    }
}

fn validate_owner(source_name: &str, owner: &str) -> Result<()> {
    let trimmed = owner.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed.starts_with('.') {
        return Err(unavailable(
            source_name.to_string(),
            format!("invalid owner name '{owner}'"),
        ));
    }
    Ok(())
}

/// Reads `<dir>/<owner>.toml`.
pub struct FileLedgerSource {
    dir: PathBuf,
}

impl FileLedgerSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, owner: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", owner.trim()))
    }
}

impl LedgerSource for FileLedgerSource {
    fn name(&self) -> String {
        format!("ledger directory {}", self.dir.display())
    }

    fn fetch(&self, owner: &str) -> Result<LedgerRecords> {
        validate_owner(&self.name(), owner)?;
        let path = self.path_for(owner);
        debug!(path = %path.display(), "reading ledger file");

        let content = fs::read_to_string(&path)
            .map_err(|e| unavailable(self.name(), format!("{}: {e}", path.display())))?;
        let records: LedgerRecords = toml::from_str(&content)
            .map_err(|e| unavailable(self.name(), format!("{}: {e}", path.display())))?;

        info!(owner, records = records.record_count(), "loaded ledger");
        Ok(records)
    }
}

/// Fetches each record table from a REST endpoint of the hosted database,
/// filtered server-side by owner.
pub struct HttpLedgerSource {
    base_url: String,
    api_key: Option<String>,
    agent: Agent,
}

impl HttpLedgerSource {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            agent,
        }
    }

    fn fetch_table<T: DeserializeOwned>(&self, table: &str, owner: &str) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, table);
        debug!(%url, owner, "fetching ledger table");

        let mut request = self
            .agent
            .get(&url)
            .query("owner", format!("eq.{owner}"))
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {key}"));
        }

        let body: String = request
            .call()
            .map_err(|e| unavailable(self.name(), format!("{table}: {e}")))?
            .body_mut()
            .read_to_string()
            .map_err(|e| unavailable(self.name(), format!("{table}: {e}")))?;

        serde_json::from_str(&body).map_err(|e| unavailable(self.name(), format!("{table}: {e}")))
    }
}

impl LedgerSource for HttpLedgerSource {
    fn name(&self) -> String {
        self.base_url.clone()
    }

    fn fetch(&self, owner: &str) -> Result<LedgerRecords> {
        validate_owner(&self.name(), owner)?;

        let records = LedgerRecords {
            invoices: self.fetch_table("invoices", owner)?,
            expenses: self.fetch_table("expenses", owner)?,
            journals: self.fetch_table("journals", owner)?,
            receivables: self.fetch_table("receivables", owner)?,
            payables: self.fetch_table("payables", owner)?,
            tds: self.fetch_table("tds_transactions", owner)?,
        };

        info!(owner, records = records.record_count(), "fetched ledger");
        Ok(records)
    }
}

/// Build the configured source.
pub fn source_from_settings(
    settings: &SourceSettings,
    config_dir: &Path,
) -> Result<Box<dyn LedgerSource>> {
    match settings.kind {
        SourceKind::File => Ok(Box::new(FileLedgerSource::new(resolve_dir(
            &settings.ledger_dir,
            config_dir,
        )))),
        SourceKind::Http => {
            let url = settings.url.as_deref().ok_or_else(|| {
                unavailable(
                    "http source".to_string(),
                    "[source] url is not configured",
                )
            })?;
            let api_key = settings
                .api_key_env
                .as_deref()
                .and_then(|var| std::env::var(var).ok());
            Ok(Box::new(HttpLedgerSource::new(
                url,
                api_key,
                Duration::from_secs(settings.timeout_secs),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_ledger_file_is_unavailable_not_empty() {
        let dir = TempDir::new().unwrap();
        let source = FileLedgerSource::new(dir.path());
        let err = source.fetch("acme").unwrap_err();
        assert!(matches!(err, ReportError::DataUnavailable { .. }));
    }

    #[test]
    fn owner_cannot_escape_ledger_dir() {
        let dir = TempDir::new().unwrap();
        let source = FileLedgerSource::new(dir.path());
        assert!(source.fetch("../secrets").is_err());
        assert!(source.fetch("").is_err());
    }

    #[test]
    fn reads_owner_ledger() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("acme.toml"),
            crate::config::LEDGER_TEMPLATE,
        )
        .unwrap();
        let records = FileLedgerSource::new(dir.path()).fetch("acme").unwrap();
        assert_eq!(records.invoices.len(), 2);
        assert_eq!(records.tds.len(), 1);
    }

    #[test]
    fn http_source_requires_url() {
        let settings = SourceSettings {
            kind: SourceKind::Http,
            ..Default::default()
        };
        assert!(source_from_settings(&settings, Path::new(".")).is_err());
    }
}
