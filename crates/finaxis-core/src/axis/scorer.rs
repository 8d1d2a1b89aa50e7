//! Balance projection and the 0-100 axis index

use tracing::debug;

use crate::models::FinancialProfile;

use super::normalize::{
    normalize_debt_load, normalize_monthly_expenses, normalize_monthly_income, variable_trend,
};
use super::types::{AxisFactors, AxisIndex, AxisStatus, FutureTrend, MonthlyBalance};

const BASE_CONFIDENCE: u32 = 95;
const CONFIDENCE_DECAY_PER_PERIOD: u32 = 5;
const MIN_CONFIDENCE: u32 = 50;

/// Project the monthly position `periods_ahead` periods from now.
///
/// Variable expenses grow linearly with the averaged category trend:
/// `variable × (1 + trend × periods_ahead)`.
pub fn project_balance(profile: &FinancialProfile, periods_ahead: u32) -> MonthlyBalance {
    let income = normalize_monthly_income(profile);
    let expenses = normalize_monthly_expenses(profile);
    let debt = normalize_debt_load(profile);

    let trend = variable_trend(&profile.expenses.variable);
    let adjusted_variable = expenses.variable * (1.0 + trend * periods_ahead as f64);
    let total_expenses = expenses.fixed + adjusted_variable;

    let net_balance = income - total_expenses - debt.monthly_payment;

    let decay = periods_ahead.saturating_mul(CONFIDENCE_DECAY_PER_PERIOD);
    let confidence = BASE_CONFIDENCE.saturating_sub(decay).max(MIN_CONFIDENCE) as u8;

    MonthlyBalance {
        periods_ahead,
        total_income: income,
        total_expenses,
        debt_payments: debt.monthly_payment,
        net_balance,
        projected_balance: net_balance * periods_ahead as f64,
        confidence,
    }
}

/// Compare the future net balance against the current one (±10% band)
pub fn future_trend(current: &MonthlyBalance, future: &MonthlyBalance) -> FutureTrend {
    if future.net_balance > current.net_balance * 1.1 {
        FutureTrend::Positive
    } else if future.net_balance < current.net_balance * 0.9 {
        FutureTrend::Negative
    } else {
        FutureTrend::Neutral
    }
}

fn commitment_penalty(income_commitment: f64) -> i32 {
    if income_commitment > 80.0 {
        -30
    } else if income_commitment > 70.0 {
        -20
    } else if income_commitment > 60.0 {
        -10
    } else {
        0
    }
}

fn reserve_adjustment(reserve_allocation: f64) -> i32 {
    if reserve_allocation >= 15.0 {
        10
    } else if reserve_allocation >= 10.0 {
        5
    } else if reserve_allocation < 5.0 {
        -15
    } else {
        0
    }
}

fn debt_penalty(debt_weight: f64) -> i32 {
    if debt_weight > 50.0 {
        -25
    } else if debt_weight > 30.0 {
        -15
    } else if debt_weight > 15.0 {
        -5
    } else {
        0
    }
}

fn trend_adjustment(trend: FutureTrend) -> i32 {
    match trend {
        FutureTrend::Positive => 10,
        FutureTrend::Neutral => 0,
        FutureTrend::Negative => -15,
    }
}

/// Score a profile against its current and future balances.
///
/// Starts at 100 and applies fixed step adjustments. Without positive income
/// every ratio is undefined, so the profile is scored 0 (critical) with
/// worst-case factors.
pub fn compute_axis_index(
    profile: &FinancialProfile,
    current: &MonthlyBalance,
    future: &MonthlyBalance,
) -> AxisIndex {
    let income = normalize_monthly_income(profile);
    let expenses = normalize_monthly_expenses(profile);
    let debt = normalize_debt_load(profile);
    let trend = future_trend(current, future);

    if income <= 0.0 {
        debug!(income, "Non-positive income, scoring as critical");
        return AxisIndex {
            score: 0,
            status: AxisStatus::Critical,
            factors: AxisFactors {
                income_commitment: 100.0,
                reserve_allocation: 0.0,
                debt_weight: if profile.debts.is_empty() { 0.0 } else { 100.0 },
                future_trend: trend,
            },
        };
    }

    let income_commitment = (expenses.total + debt.monthly_payment) / income * 100.0;
    let reserve_allocation =
        profile.goals.emergency_fund.monthly_contribution / income * 100.0;
    let debt_weight = debt.total_debt / (income * 12.0) * 100.0;

    let raw = 100
        + commitment_penalty(income_commitment)
        + reserve_adjustment(reserve_allocation)
        + debt_penalty(debt_weight)
        + trend_adjustment(trend);
    let score = raw.clamp(0, 100) as u8;
    let status = AxisStatus::from_score(score);

    debug!(
        score,
        status = status.as_str(),
        income_commitment,
        reserve_allocation,
        debt_weight,
        trend = trend.as_str(),
        "Axis index computed"
    );

    AxisIndex {
        score,
        status,
        factors: AxisFactors {
            income_commitment,
            reserve_allocation,
            debt_weight,
            future_trend: trend,
        },
    }
}
