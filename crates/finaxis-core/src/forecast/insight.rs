//! Insight generation for a predicted period
//!
//! Turns the forecast, savings feasibility and risk into a diagnostic and
//! one concrete action. Scenarios are an ordered rule list evaluated top to
//! bottom; the first rule whose predicate holds wins. Several predicates
//! overlap (a zero balance with an unaffordable target matches neither
//! `TargetTooHigh` nor `Deficit` and falls through to `LowBalance`), so the
//! order is part of the contract.

use crate::rounding::round_amount;

use super::types::{Insight, InsightScenario, RiskLevel, SavingsRateBand};

/// Leftover above which saving the target is considered comfortable
const COMFORTABLE_MARGIN: f64 = 500.0;
/// Buffer recommended when the balance is too low
const MINIMUM_BUFFER: f64 = 500.0;

/// Everything the insight rules look at
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs {
    pub predicted_balance: f64,
    pub suggested_savings: f64,
    pub balance_after_savings: f64,
    pub realistic_savings: f64,
    pub can_save_target: bool,
    pub risk_level: RiskLevel,
    pub target_rate: f64,
}

struct InsightRule {
    scenario: InsightScenario,
    applies: fn(&InsightInputs) -> bool,
}

const INSIGHT_RULES: [InsightRule; 5] = [
    InsightRule {
        scenario: InsightScenario::Comfortable,
        applies: |i| i.can_save_target && i.balance_after_savings > COMFORTABLE_MARGIN,
    },
    InsightRule {
        scenario: InsightScenario::Tight,
        applies: |i| i.can_save_target && i.balance_after_savings >= 0.0,
    },
    InsightRule {
        scenario: InsightScenario::TargetTooHigh,
        applies: |i| !i.can_save_target && i.predicted_balance > 0.0,
    },
    InsightRule {
        scenario: InsightScenario::Deficit,
        applies: |i| i.predicted_balance < 0.0,
    },
    InsightRule {
        scenario: InsightScenario::LowBalance,
        applies: |_| true,
    },
];

/// Pick the first matching scenario
pub fn select_scenario(inputs: &InsightInputs) -> InsightScenario {
    INSIGHT_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs))
        .map(|rule| rule.scenario)
        .unwrap_or(InsightScenario::LowBalance)
}

/// Build the insight for a forecast
pub fn generate_insight(inputs: &InsightInputs) -> Insight {
    let scenario = select_scenario(inputs);
    let target_percent = round_amount(inputs.target_rate * 100.0);

    let (can_save_target, risk_level, message, suggestion) = match scenario {
        InsightScenario::Comfortable => (
            true,
            inputs.risk_level,
            format!(
                "You can set aside {:.0} ({:.0}%) without strain.",
                round_amount(inputs.suggested_savings),
                target_percent
            ),
            format!(
                "Consider raising it to {:.0}% and building an emergency reserve.",
                target_percent + 5.0
            ),
        ),
        InsightScenario::Tight => (
            true,
            inputs.risk_level,
            format!(
                "Saving {:.0}% is possible but leaves a thin margin ({:.0}).",
                target_percent,
                round_amount(inputs.balance_after_savings)
            ),
            "Try trimming 200-300 from variable spending for more breathing room.".to_string(),
        ),
        InsightScenario::TargetTooHigh => {
            let savings_percent =
                round_amount(inputs.realistic_savings / inputs.predicted_balance * 100.0);
            (
                false,
                inputs.risk_level,
                format!(
                    "Saving {:.0}% would push you into the red.",
                    target_percent
                ),
                format!(
                    "Start with {:.0} ({:.0}% of the balance) and cut spending gradually.",
                    round_amount(inputs.realistic_savings),
                    savings_percent
                ),
            )
        }
        InsightScenario::Deficit => (
            false,
            RiskLevel::High,
            format!(
                "Next period goes into the red (short by {:.0}).",
                round_amount(inputs.predicted_balance.abs())
            ),
            "Urgent: identify where to cut expenses. Prioritize essentials.".to_string(),
        ),
        InsightScenario::LowBalance => (
            false,
            RiskLevel::High,
            format!(
                "Projected balance is very low ({:.0}).",
                round_amount(inputs.predicted_balance)
            ),
            format!(
                "Avoid new spending and build a minimum buffer of {:.0}.",
                MINIMUM_BUFFER
            ),
        ),
    };

    Insight {
        scenario,
        can_save_target,
        risk_level,
        message,
        suggestion: Some(suggestion),
    }
}

/// Band a savings rate: excellent ≥20%, healthy ≥15%, acceptable ≥10%
pub fn classify_savings_rate(rate: f64) -> SavingsRateBand {
    if rate >= 0.20 {
        SavingsRateBand::Excellent
    } else if rate >= 0.15 {
        SavingsRateBand::Healthy
    } else if rate >= 0.10 {
        SavingsRateBand::Acceptable
    } else {
        SavingsRateBand::Critical
    }
}

/// How much spending must drop for `target_rate` of income to be saved
pub fn expense_reduction_needed(expenses: f64, income: f64, target_rate: f64) -> f64 {
    let target_expenses = income * (1.0 - target_rate);
    (expenses - target_expenses).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(predicted_balance: f64, target_rate: f64, income: f64) -> InsightInputs {
        let suggested_savings = income * target_rate;
        let balance_after_savings = predicted_balance - suggested_savings;
        let can_save_target = balance_after_savings >= 0.0;
        InsightInputs {
            predicted_balance,
            suggested_savings,
            balance_after_savings,
            realistic_savings: if can_save_target {
                suggested_savings
            } else {
                (predicted_balance * 0.5).max(0.0)
            },
            can_save_target,
            risk_level: RiskLevel::Low,
            target_rate,
        }
    }

    #[test]
    fn test_comfortable() {
        let insight = generate_insight(&inputs(1500.0, 0.15, 4000.0));
        assert_eq!(insight.scenario, InsightScenario::Comfortable);
        assert!(insight.can_save_target);
        assert!(insight.message.contains("600"));
        assert!(insight.message.contains("15%"));
        assert!(insight.suggestion.unwrap().contains("20%"));
    }

    #[test]
    fn test_tight() {
        let insight = generate_insight(&inputs(900.0, 0.15, 4000.0));
        assert_eq!(insight.scenario, InsightScenario::Tight);
        assert!(insight.message.contains("(300)"));
        assert_eq!(insight.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_target_too_high_suggests_half_balance() {
        let insight = generate_insight(&inputs(400.0, 0.15, 4000.0));
        assert_eq!(insight.scenario, InsightScenario::TargetTooHigh);
        assert!(!insight.can_save_target);
        let suggestion = insight.suggestion.unwrap();
        assert!(suggestion.contains("200"));
        assert!(suggestion.contains("50%"));
    }

    #[test]
    fn test_deficit_forces_high_risk() {
        let insight = generate_insight(&inputs(-166.67, 0.15, 4200.0));
        assert_eq!(insight.scenario, InsightScenario::Deficit);
        assert_eq!(insight.risk_level, RiskLevel::High);
        assert!(insight.message.contains("red"));
        assert!(insight.message.contains("167"));
    }

    #[test]
    fn test_zero_balance_falls_through_to_low_balance() {
        let insight = generate_insight(&inputs(0.0, 0.15, 4000.0));
        assert_eq!(insight.scenario, InsightScenario::LowBalance);
        assert_eq!(insight.risk_level, RiskLevel::High);
        assert!(insight.suggestion.unwrap().contains("500"));
    }

    #[test]
    fn test_zero_rate_with_zero_balance_is_tight() {
        // Affordable target takes precedence over the low-balance fallback
        let insight = generate_insight(&inputs(0.0, 0.0, 4000.0));
        assert_eq!(insight.scenario, InsightScenario::Tight);
    }

    #[test]
    fn test_classify_savings_rate() {
        assert_eq!(classify_savings_rate(0.25), SavingsRateBand::Excellent);
        assert_eq!(classify_savings_rate(0.15), SavingsRateBand::Healthy);
        assert_eq!(classify_savings_rate(0.12), SavingsRateBand::Acceptable);
        assert_eq!(classify_savings_rate(0.05), SavingsRateBand::Critical);
    }

    #[test]
    fn test_expense_reduction_needed() {
        assert!((expense_reduction_needed(4000.0, 4200.0, 0.15) - 430.0).abs() < 1e-9);
        assert_eq!(expense_reduction_needed(3000.0, 4200.0, 0.15), 0.0);
    }
}
