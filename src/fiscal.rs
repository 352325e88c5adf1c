use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::{ReportError, Result};

/// An April-to-March reporting year, identified by the calendar year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiscalYear {
    start_year: i32,
}

impl FiscalYear {
    pub fn new(start_year: i32) -> Result<Self> {
        if !(1900..=9998).contains(&start_year) {
            return Err(ReportError::InvalidFiscalYear(start_year.to_string()));
        }
        Ok(Self { start_year })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// April 1 of the starting year.
    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, 4, 1).unwrap_or(NaiveDate::MIN)
    }

    /// March 31 of the following year.
    pub fn end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year + 1, 3, 31).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    pub fn previous(&self) -> FiscalYear {
        FiscalYear {
            start_year: self.start_year - 1,
        }
    }

    /// Short label such as `2024-25`.
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }

    /// Balance sheet date, e.g. `31st March, 2025`.
    pub fn closing_date_label(&self) -> String {
        format!("31st March, {}", self.start_year + 1)
    }

    /// Income-tax assessment year following this fiscal year, e.g. `2025-26`.
    pub fn assessment_year_label(&self) -> String {
        format!("{}-{:02}", self.start_year + 1, (self.start_year + 2) % 100)
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FiscalYear {
    type Err = ReportError;

    /// Accepts `2024`, `2024-25`, `2024-2025`, `FY2024-25` and `FY 2024-25`.
    fn from_str(input: &str) -> Result<Self> {
        let invalid = || ReportError::InvalidFiscalYear(input.to_string());

        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix("FY")
            .or_else(|| trimmed.strip_prefix("fy"))
            .unwrap_or(trimmed)
            .trim();

        let (start, end) = match body.split_once(['-', '/']) {
            Some((s, e)) => (s, Some(e)),
            None => (body, None),
        };

        if start.len() != 4 {
            return Err(invalid());
        }
        let start_year: i32 = start.parse().map_err(|_| invalid())?;

        if let Some(end) = end {
            let next = start_year + 1;
            let matches = match end.len() {
                2 => end.parse::<i32>().map_err(|_| invalid())? == next % 100,
                4 => end.parse::<i32>().map_err(|_| invalid())? == next,
                _ => false,
            };
            if !matches {
                return Err(invalid());
            }
        }

        FiscalYear::new(start_year).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accepted_forms() {
        for input in ["2024", "2024-25", "2024-2025", "FY2024-25", "FY 2024-25", "2024/25"] {
            let fy: FiscalYear = input.parse().unwrap();
            assert_eq!(fy.start_year(), 2024, "input {input}");
        }
    }

    #[test]
    fn rejects_inconsistent_or_garbage() {
        for input in ["2024-27", "24-25", "abcd", "", "2024-2026", "FY"] {
            assert!(input.parse::<FiscalYear>().is_err(), "input {input}");
        }
    }

    #[test]
    fn window_runs_april_to_march() {
        let fy: FiscalYear = "2024-25".parse().unwrap();
        assert_eq!(fy.start(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(fy.end(), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert!(fy.contains(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(!fy.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!fy.contains(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
    }

    #[test]
    fn century_rollover_label() {
        let fy = FiscalYear::new(1999).unwrap();
        assert_eq!(fy.label(), "1999-00");
        assert_eq!(fy.previous().label(), "1998-99");
    }
}
