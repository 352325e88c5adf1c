use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::layout::ReportLayoutConfig;
use super::settings::{ComplianceItem, ReportSettings, SourceSettings, TaxSettings};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub company: CompanyInfo,
    pub auditor: AuditorInfo,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub layout: ReportLayoutConfig,
    #[serde(default)]
    pub tax: TaxSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub compliance: Vec<ComplianceItem>,
}

/// Statutory identity of the reporting company. Optional identifiers are
/// left blank on the report when absent.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default)]
    pub cin: Option<String>,
    #[serde(default)]
    pub pan: Option<String>,
    #[serde(default)]
    pub gstin: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub incorporation_date: Option<NaiveDate>,
    #[serde(default)]
    pub directors: Vec<Director>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Director {
    pub name: String,
    #[serde(default)]
    pub din: Option<String>,
    #[serde(default = "default_designation")]
    pub designation: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AuditorInfo {
    pub firm_name: String,
    #[serde(default)]
    pub firm_registration_number: Option<String>,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub membership_number: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
}

fn default_country() -> String {
    "India".to_string()
}

fn default_designation() -> String {
    "Director".to_string()
}

impl CompanyInfo {
    /// Address lines for cover and header blocks, skipping empty parts.
    pub fn address_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.address.trim().is_empty() {
            lines.push(self.address.trim().to_string());
        }
        let locality: Vec<&str> = [self.city.as_str(), self.state.as_str()]
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let mut city_line = locality.join(", ");
        if !self.pincode.trim().is_empty() {
            if !city_line.is_empty() {
                city_line.push_str(" - ");
            }
            city_line.push_str(self.pincode.trim());
        }
        if !city_line.is_empty() {
            lines.push(city_line);
        }
        if !self.country.trim().is_empty() {
            lines.push(self.country.trim().to_string());
        }
        lines
    }
}

impl Director {
    /// `Name (DIN: 01234567)`, or just the name when no DIN is on file.
    pub fn signature_line(&self) -> String {
        match self.din.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(din) => format!("{} (DIN: {})", self.name, din),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_lines_skip_blank_parts() {
        let company = CompanyInfo {
            name: "Acme".into(),
            address: "12 MG Road".into(),
            city: "Pune".into(),
            state: "".into(),
            pincode: "411001".into(),
            country: "India".into(),
            ..Default::default()
        };
        assert_eq!(
            company.address_lines(),
            vec!["12 MG Road", "Pune - 411001", "India"]
        );
    }

    #[test]
    fn director_without_din() {
        let director = Director {
            name: "A. Rao".into(),
            din: Some("  ".into()),
            designation: "Director".into(),
        };
        assert_eq!(director.signature_line(), "A. Rao");
    }
}
