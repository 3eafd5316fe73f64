//! CSV loader for client records.
//!
//! ## CSV Format
//!
//! Headers are matched by name. Optional columns may be omitted entirely or
//! left empty per row.
//!
//! | Column                 | Required | Type    | Notes |
//! |------------------------|----------|---------|-------|
//! | `company_name`         | yes      | string  | Must not be blank |
//! | `legal_entity_type`    | yes      | string  | `PT`, `PT_PMA`, `CV`, `FIRMA`, `UD`, `PERORANGAN`; other tags are taxed at the standard corporate rate |
//! | `annual_revenue`       | yes      | decimal | Non-negative |
//! | `monthly_gross_income` | no       | decimal | Non-negative; drives the monthly withholding estimate |
//! | `npwp`                 | no       | string  | `NN.NNN.NNN.N-NNN.NNN` |
//! | `kbli_code`            | no       | string  | Exactly 5 digits |
//! | `next_payment`         | no       | date    | `YYYY-MM-DD` |
//!
//! ### Example
//!
//! ```csv
//! company_name,legal_entity_type,annual_revenue,monthly_gross_income,npwp,kbli_code,next_payment
//! PT Maju Jaya,PT,4000000000,,01.234.567.8-901.000,62010,2025-10-15
//! CV Sinar Terang,CV,300000000,6000000,,,
//! ```

use std::io::Read;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static NPWP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}\.\d{3}\.\d{3}\.\d-\d{3}\.\d{3}$").expect("NPWP pattern is valid")
});

const KBLI_LENGTH: usize = 5;

/// Errors that can occur when loading client records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("company name is blank on row {row}")]
    MissingCompanyName { row: usize },

    #[error("NPWP '{npwp}' on row {row} should be formatted as XX.XXX.XXX.X-XXX.XXX")]
    InvalidNpwp { npwp: String, row: usize },

    #[error("KBLI code '{code}' on row {row} must be 5 digits")]
    InvalidKbli { code: String, row: usize },

    #[error("{field} must not be negative on row {row}, got {value}")]
    NegativeAmount {
        field: &'static str,
        value: Decimal,
        row: usize,
    },
}

impl From<csv::Error> for ClientLoaderError {
    fn from(err: csv::Error) -> Self {
        ClientLoaderError::CsvParse(err.to_string())
    }
}

/// A single client from the CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub company_name: String,

    /// Raw entity tag, kept as written so unknown tags can be echoed back.
    pub legal_entity_type: String,

    #[serde(deserialize_with = "deserialize_decimal")]
    pub annual_revenue: Decimal,

    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub monthly_gross_income: Option<Decimal>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub npwp: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub kbli_code: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub next_payment: Option<NaiveDate>,
}

/// Parses from the raw cell text so amounts never pass through `f64`.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Loader for client records from CSV files.
pub struct ClientLoader;

impl ClientLoader {
    /// Parse client records from a CSV reader without validating them.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ClientRecord>, ClientLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ClientRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate every record, stopping at the first invalid row.
    pub fn load<R: Read>(reader: R) -> Result<Vec<ClientRecord>, ClientLoaderError> {
        let records = Self::parse(reader)?;

        for (index, record) in records.iter().enumerate() {
            Self::validate(record, index + 1)?;
        }

        Ok(records)
    }

    /// Checks a record against the client form rules.
    ///
    /// `row` is 1-based (the header is row 0) and only used in error messages.
    pub fn validate(
        record: &ClientRecord,
        row: usize,
    ) -> Result<(), ClientLoaderError> {
        if record.company_name.trim().is_empty() {
            return Err(ClientLoaderError::MissingCompanyName { row });
        }

        check_non_negative("annual_revenue", record.annual_revenue, row)?;
        if let Some(income) = record.monthly_gross_income {
            check_non_negative("monthly_gross_income", income, row)?;
        }

        if let Some(npwp) = &record.npwp {
            if !NPWP_PATTERN.is_match(npwp) {
                return Err(ClientLoaderError::InvalidNpwp {
                    npwp: npwp.clone(),
                    row,
                });
            }
        }

        if let Some(code) = &record.kbli_code {
            if code.len() != KBLI_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(ClientLoaderError::InvalidKbli {
                    code: code.clone(),
                    row,
                });
            }
        }

        Ok(())
    }
}

fn check_non_negative(
    field: &'static str,
    value: Decimal,
    row: usize,
) -> Result<(), ClientLoaderError> {
    if value < Decimal::ZERO {
        return Err(ClientLoaderError::NegativeAmount { field, value, row });
    }
    Ok(())
}
