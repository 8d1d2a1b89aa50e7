//! Input loading for period records and financial profiles
//!
//! Period records come as CSV (`label,period_index,income,expenses,is_actual`)
//! or as a JSON array. In both formats `label` and `is_actual` are optional:
//! a missing label is derived from the index and a missing flag means the
//! record was observed.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    check_amounts, check_unique_periods, period_label, FinancialProfile, PeriodRecord,
    PERIODS_PER_YEAR,
};

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A record as written by hand, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RecordInput {
    #[serde(default)]
    pub label: Option<String>,
    pub period_index: u8,
    pub income: f64,
    pub expenses: f64,
    #[serde(default)]
    pub is_actual: Option<bool>,
}

impl RecordInput {
    /// Validate the index and amounts, filling in the label and actual flag
    pub fn into_record(self) -> Result<PeriodRecord> {
        let derived = period_label(self.period_index).ok_or_else(|| {
            Error::InvalidData(format!(
                "period index {} is outside 0-{}",
                self.period_index,
                PERIODS_PER_YEAR - 1
            ))
        })?;
        check_amounts(self.period_index, self.income, self.expenses)?;

        Ok(PeriodRecord {
            label: self
                .label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| derived.to_string()),
            period_index: self.period_index,
            income: self.income,
            expenses: self.expenses,
            is_actual: self.is_actual.unwrap_or(true),
        })
    }
}

/// Validate a whole series of inputs; each period index may appear once
pub fn records_from_inputs(inputs: Vec<RecordInput>) -> Result<Vec<PeriodRecord>> {
    let records = inputs
        .into_iter()
        .map(RecordInput::into_record)
        .collect::<Result<Vec<_>>>()?;
    check_unique_periods(&records)?;
    Ok(records)
}

/// Find a column by header name
fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "y" => Ok(true),
        "false" | "no" | "0" | "n" => Ok(false),
        other => Err(Error::InvalidData(format!("Invalid is_actual flag: {}", other))),
    }
}

fn parse_number(value: &str, field: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidData(format!("Invalid {}: {}", field, value)))
}

/// Parse period records from CSV with a header row
pub fn parse_records_csv<R: Read>(reader: R) -> Result<Vec<PeriodRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index_col = column(&headers, "period_index")
        .ok_or_else(|| Error::InvalidData("Missing period_index column".into()))?;
    let income_col = column(&headers, "income")
        .ok_or_else(|| Error::InvalidData("Missing income column".into()))?;
    let expenses_col = column(&headers, "expenses")
        .ok_or_else(|| Error::InvalidData("Missing expenses column".into()))?;
    let label_col = column(&headers, "label");
    let actual_col = column(&headers, "is_actual");

    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result?;

        let index_str = row
            .get(index_col)
            .ok_or_else(|| Error::InvalidData("Missing period_index".into()))?;
        let period_index = index_str
            .parse::<u8>()
            .map_err(|_| Error::InvalidData(format!("Invalid period_index: {}", index_str)))?;

        let income = parse_number(
            row.get(income_col)
                .ok_or_else(|| Error::InvalidData("Missing income".into()))?,
            "income",
        )?;
        let expenses = parse_number(
            row.get(expenses_col)
                .ok_or_else(|| Error::InvalidData("Missing expenses".into()))?,
            "expenses",
        )?;

        let label = label_col
            .and_then(|i| row.get(i))
            .map(|s| s.to_string());
        let is_actual = match actual_col.and_then(|i| row.get(i)) {
            Some(value) if !value.is_empty() => Some(parse_bool(value)?),
            _ => None,
        };

        records.push(
            RecordInput {
                label,
                period_index,
                income,
                expenses,
                is_actual,
            }
            .into_record()?,
        );
    }

    check_unique_periods(&records)?;

    debug!("Parsed {} period records from CSV", records.len());
    Ok(records)
}

/// Parse period records from a JSON array
pub fn parse_records_json<R: Read>(reader: R) -> Result<Vec<PeriodRecord>> {
    let raw: Vec<RecordInput> = serde_json::from_reader(reader)?;
    let records = records_from_inputs(raw)?;

    debug!("Parsed {} period records from JSON", records.len());
    Ok(records)
}

/// Load period records, picking the parser from the file extension
pub fn load_records(path: &Path) -> Result<Vec<PeriodRecord>> {
    let format = InputFormat::from_path(path).ok_or_else(|| {
        Error::InvalidData(format!(
            "Unsupported input file (expected .csv or .json): {}",
            path.display()
        ))
    })?;

    let file = File::open(path)?;
    match format {
        InputFormat::Csv => parse_records_csv(file),
        InputFormat::Json => parse_records_json(file),
    }
}

/// Load a financial profile from JSON
pub fn load_profile(path: &Path) -> Result<FinancialProfile> {
    let file = File::open(path)?;
    let profile: FinancialProfile = serde_json::from_reader(file)?;
    debug!(
        recurring = profile.income.recurring.len(),
        fixed = profile.expenses.fixed.len(),
        variable = profile.expenses.variable.len(),
        debts = profile.debts.len(),
        "Loaded financial profile"
    );
    Ok(profile)
}
