//! Risk classification for a predicted period

use super::types::RiskLevel;

/// Balance/income ratio below which risk is high
const HIGH_RISK_RATIO: f64 = 0.05;
/// Balance/income ratio below which risk is at least medium
const MEDIUM_RISK_RATIO: f64 = 0.10;
/// How many recent expense values the trend check looks at
const TREND_WINDOW: usize = 3;

/// Classify the risk of the predicted period.
///
/// First match wins:
/// 1. no income, a negative balance, or a balance under 5% of income → high
/// 2. a balance under 10% of income, or rising recent expenses → medium
/// 3. otherwise → low
///
/// `expense_history` is chronological; only the first and last of the most
/// recent three values are compared.
pub fn classify_risk(
    predicted_balance: f64,
    predicted_income: f64,
    expense_history: &[f64],
) -> RiskLevel {
    if predicted_income <= 0.0 || predicted_balance < 0.0 {
        return RiskLevel::High;
    }

    let balance_ratio = predicted_balance / predicted_income;
    if balance_ratio < HIGH_RISK_RATIO {
        return RiskLevel::High;
    }

    if balance_ratio < MEDIUM_RISK_RATIO || expenses_growing(expense_history) {
        return RiskLevel::Medium;
    }

    RiskLevel::Low
}

fn expenses_growing(expense_history: &[f64]) -> bool {
    let recent = &expense_history[expense_history.len().saturating_sub(TREND_WINDOW)..];
    match (recent.first(), recent.last()) {
        (Some(first), Some(last)) if recent.len() >= 2 => last > first,
        _ => false,
    }
}
