//! Core types for next-period forecasting

use serde::{Deserialize, Serialize};
use std::fmt;

/// Financial risk of the predicted period
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sign of the predicted balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Positive,
    Negative,
    /// Exactly zero
    Neutral,
}

impl BalanceStatus {
    pub fn from_balance(balance: f64) -> Self {
        if balance > 0.0 {
            BalanceStatus::Positive
        } else if balance < 0.0 {
            BalanceStatus::Negative
        } else {
            BalanceStatus::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::Positive => "positive",
            BalanceStatus::Negative => "negative",
            BalanceStatus::Neutral => "neutral",
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which insight branch produced the message, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightScenario {
    /// Target fits with more than 500 to spare
    Comfortable,
    /// Target fits, little margin left
    Tight,
    /// Balance is positive but the target would cause a deficit
    TargetTooHigh,
    /// The period itself ends negative
    Deficit,
    /// Balance is zero or near zero
    LowBalance,
}

impl InsightScenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightScenario::Comfortable => "comfortable",
            InsightScenario::Tight => "tight",
            InsightScenario::TargetTooHigh => "target_too_high",
            InsightScenario::Deficit => "deficit",
            InsightScenario::LowBalance => "low_balance",
        }
    }
}

/// Diagnostic plus a concrete action for the predicted period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub scenario: InsightScenario,
    pub can_save_target: bool,
    pub risk_level: RiskLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Next-period prediction. Monetary fields are rounded to whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predicted_income: f64,
    pub predicted_expenses: f64,
    pub predicted_balance: f64,
    /// Savings target taken off income before spending
    pub suggested_savings: f64,
    pub balance_after_savings: f64,
    /// Rate the target was computed with (0-1)
    pub savings_rate: f64,
    /// Fallback savings when the target doesn't fit
    pub realistic_savings: f64,
    pub status: BalanceStatus,
    /// 0-100, grows with the number of observed periods
    pub confidence: u8,
    pub insight: Insight,
}

/// Savings rate band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsRateBand {
    Excellent,
    Healthy,
    Acceptable,
    Critical,
}

impl SavingsRateBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavingsRateBand::Excellent => "excellent",
            SavingsRateBand::Healthy => "healthy",
            SavingsRateBand::Acceptable => "acceptable",
            SavingsRateBand::Critical => "critical",
        }
    }
}

impl fmt::Display for SavingsRateBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
