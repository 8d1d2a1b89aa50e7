//! Core types for the financial axis scorer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monthly expense totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTotals {
    pub fixed: f64,
    pub variable: f64,
    pub total: f64,
}

/// Aggregated debt position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtLoad {
    pub monthly_payment: f64,
    pub total_debt: f64,
    /// Interest rate weighted by outstanding amount (0 with no debt)
    pub weighted_interest_rate: f64,
}

/// Projected monthly position `periods_ahead` periods from now
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    pub periods_ahead: u32,
    pub total_income: f64,
    /// Fixed plus trend-adjusted variable expenses
    pub total_expenses: f64,
    pub debt_payments: f64,
    pub net_balance: f64,
    /// Net balance accumulated over the projection window
    pub projected_balance: f64,
    /// 95 now, minus 5 per period ahead, never below 50
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FutureTrend {
    Positive,
    Neutral,
    Negative,
}

impl FutureTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            FutureTrend::Positive => "positive",
            FutureTrend::Neutral => "neutral",
            FutureTrend::Negative => "negative",
        }
    }
}

/// Health status derived from the axis score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisStatus {
    /// Score 70-100
    Stable,
    /// Score 40-69
    Warning,
    /// Score 0-39
    Critical,
}

impl AxisStatus {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            AxisStatus::Stable
        } else if score >= 40 {
            AxisStatus::Warning
        } else {
            AxisStatus::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AxisStatus::Stable => "stable",
            AxisStatus::Warning => "warning",
            AxisStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for AxisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Factors behind the axis score, as percentages of income
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisFactors {
    /// Expenses plus debt payments
    pub income_commitment: f64,
    /// Emergency fund contribution
    pub reserve_allocation: f64,
    /// Total debt against a year of income
    pub debt_weight: f64,
    pub future_trend: FutureTrend,
}

/// Composite 0-100 financial health score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisIndex {
    pub score: u8,
    pub status: AxisStatus,
    pub factors: AxisFactors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    Corrective,
    Preventive,
    Motivational,
}

impl InterventionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionKind::Corrective => "corrective",
            InterventionKind::Preventive => "preventive",
            InterventionKind::Motivational => "motivational",
        }
    }
}

impl fmt::Display for InterventionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// The single action suggested by an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub kind: InterventionKind,
    pub message: String,
    pub micro_action: String,
    pub impact: String,
    pub priority: Priority,
}

/// One of the largest spending lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub category: String,
    pub amount: f64,
    /// Share of monthly income
    pub percentage: f64,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingCapacity {
    /// What is being saved today
    pub current: f64,
    /// What could be saved from the current net balance
    pub potential: f64,
    pub blockers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveProgress {
    /// Emergency fund completion, 0-100
    pub percent: f64,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projections {
    pub near: MonthlyBalance,
    pub far: MonthlyBalance,
}

/// Full analysis of a financial profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub current: MonthlyBalance,
    pub projections: Projections,
    pub axis_index: AxisIndex,
    pub bottlenecks: Vec<Bottleneck>,
    pub saving_capacity: SavingCapacity,
    pub reserve_progress: ReserveProgress,
    pub intervention: Intervention,
    pub generated_at: DateTime<Utc>,
}
