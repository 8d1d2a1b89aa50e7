//! Data models for Finaxis

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of ordinal periods in a year series
pub const PERIODS_PER_YEAR: usize = 12;

const MONTH_LABELS: [&str; PERIODS_PER_YEAR] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Label for an ordinal period (0 = JAN ... 11 = DEC)
pub fn period_label(period_index: u8) -> Option<&'static str> {
    MONTH_LABELS.get(period_index as usize).copied()
}

/// Reject amounts that are negative or not numbers
pub(crate) fn check_amounts(period_index: u8, income: f64, expenses: f64) -> Result<()> {
    if !income.is_finite() || !expenses.is_finite() {
        return Err(Error::InvalidData(format!(
            "period {} has a non-numeric amount",
            period_index
        )));
    }
    if income < 0.0 || expenses < 0.0 {
        return Err(Error::InvalidData(format!(
            "period {} has a negative amount",
            period_index
        )));
    }
    Ok(())
}

/// A series holds at most one record per period index
pub fn check_unique_periods(records: &[PeriodRecord]) -> Result<()> {
    let mut seen = [false; PERIODS_PER_YEAR];
    for record in records {
        let slot = seen.get_mut(record.period_index as usize).ok_or_else(|| {
            Error::InvalidData(format!(
                "period index {} is outside 0-{}",
                record.period_index,
                PERIODS_PER_YEAR - 1
            ))
        })?;
        if *slot {
            return Err(Error::InvalidData(format!(
                "period index {} appears more than once",
                record.period_index
            )));
        }
        *slot = true;
    }
    Ok(())
}

/// One observed (or placeholder) month of income and expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub label: String,
    /// Ordinal within a year (0-11)
    pub period_index: u8,
    pub income: f64,
    pub expenses: f64,
    /// Observed data (true) vs forecast or empty placeholder (false)
    #[serde(default)]
    pub is_actual: bool,
}

impl PeriodRecord {
    /// Create an observed record, deriving the label from the index
    pub fn actual(period_index: u8, income: f64, expenses: f64) -> Result<Self> {
        let label = period_label(period_index).ok_or_else(|| {
            Error::InvalidData(format!(
                "period index {} is outside 0-{}",
                period_index,
                PERIODS_PER_YEAR - 1
            ))
        })?;
        check_amounts(period_index, income, expenses)?;

        Ok(Self {
            label: label.to_string(),
            period_index,
            income,
            expenses,
            is_actual: true,
        })
    }

    /// Create a placeholder record (forecast or empty future period)
    pub(crate) fn placeholder(period_index: u8, income: f64, expenses: f64) -> Self {
        Self {
            label: period_label(period_index).unwrap_or("").to_string(),
            period_index,
            income,
            expenses,
            is_actual: false,
        }
    }

    pub fn balance(&self) -> f64 {
        self.income - self.expenses
    }
}

// ============================================================================
// Financial profile
// ============================================================================

/// Pay frequency of a recurring income stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Biweekly,
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Biweekly => "biweekly",
            Self::Weekly => "weekly",
        }
    }

    /// Payments per year divided across 12 months
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Self::Monthly => 1.0,
            Self::Biweekly => 26.0 / 12.0,
            Self::Weekly => 52.0 / 12.0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "biweekly" => Ok(Self::Biweekly),
            "weekly" => Ok(Self::Weekly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

/// A salary, pension or other regular inflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringIncome {
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeSources {
    #[serde(default)]
    pub recurring: Vec<RecurringIncome>,
    /// Unpredictable monthly inflows, counted flat
    #[serde(default)]
    pub other: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedCategory {
    Housing,
    Utilities,
    Education,
    Subscriptions,
    Other,
}

impl FixedCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Education => "education",
            Self::Subscriptions => "subscriptions",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub name: String,
    pub amount: f64,
    pub category: FixedCategory,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableCategory {
    Groceries,
    Leisure,
    Transport,
    Health,
    Other,
}

impl VariableCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::Leisure => "leisure",
            Self::Transport => "transport",
            Self::Health => "health",
            Self::Other => "other",
        }
    }
}

/// Direction a variable expense has been moving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    #[default]
    Stable,
    Decreasing,
}

impl Trend {
    /// Per-period growth applied to projected variable spending
    pub fn monthly_rate(&self) -> f64 {
        match self {
            Self::Increasing => 0.05,
            Self::Stable => 0.0,
            Self::Decreasing => -0.03,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableExpense {
    pub category: VariableCategory,
    pub average_amount: f64,
    #[serde(default)]
    pub last_month_amount: Option<f64>,
    #[serde(default)]
    pub trend: Trend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSources {
    #[serde(default)]
    pub fixed: Vec<FixedExpense>,
    #[serde(default)]
    pub variable: Vec<VariableExpense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,
    pub total_amount: f64,
    pub installment_amount: f64,
    /// Annual interest rate, in percent
    pub interest_rate: f64,
    #[serde(default)]
    pub remaining_months: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFund {
    pub target_amount: f64,
    pub current_amount: f64,
    pub monthly_contribution: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub emergency_fund: EmergencyFund,
}

/// Everything the axis scorer needs to know about a household
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    #[serde(default)]
    pub income: IncomeSources,
    #[serde(default)]
    pub expenses: ExpenseSources,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub goals: Goals,
}

fn default_active() -> bool {
    true
}
