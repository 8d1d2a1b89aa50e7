//! Intervention selection
//!
//! One action is suggested per analysis. Rules are evaluated top to bottom
//! and the first match wins: critical rules come before warning rules, and
//! anything unmatched (including every stable profile) gets the
//! motivational fallback.

use tracing::debug;

use crate::rounding::round_amount;

use super::types::{AxisIndex, AxisStatus, Intervention, InterventionKind, MonthlyBalance, Priority};

/// Share of income suggested as a first reserve contribution
const RESERVE_NUDGE_SHARE: f64 = 0.1;

/// What the intervention rules look at
#[derive(Debug, Clone, Copy)]
pub struct InterventionContext<'a> {
    pub axis_index: &'a AxisIndex,
    pub current: &'a MonthlyBalance,
    pub future: &'a MonthlyBalance,
}

struct InterventionRule {
    name: &'static str,
    applies: fn(&InterventionContext<'_>) -> bool,
    build: fn(&InterventionContext<'_>) -> Intervention,
}

const INTERVENTION_RULES: [InterventionRule; 4] = [
    InterventionRule {
        name: "approaching_deficit",
        applies: |c| c.axis_index.status == AxisStatus::Critical && c.future.net_balance < 0.0,
        build: approaching_deficit,
    },
    InterventionRule {
        name: "heavy_debt",
        applies: |c| {
            c.axis_index.status == AxisStatus::Critical && c.axis_index.factors.debt_weight > 50.0
        },
        build: |_| Intervention {
            kind: InterventionKind::Corrective,
            message: "Debt is weighing heavily on your budget.".to_string(),
            micro_action: "Pay down the debt with the highest interest rate first.".to_string(),
            impact: "Frees income for other priorities".to_string(),
            priority: Priority::High,
        },
    },
    InterventionRule {
        name: "thin_reserve",
        applies: |c| {
            c.axis_index.status == AxisStatus::Warning
                && c.axis_index.factors.reserve_allocation < 10.0
        },
        build: |c| Intervention {
            kind: InterventionKind::Preventive,
            message: "Your emergency reserve needs to grow.".to_string(),
            micro_action: format!(
                "Set aside {:.0} this month (just this amount, nothing more).",
                round_amount(c.current.total_income * RESERVE_NUDGE_SHARE)
            ),
            impact: "Builds financial protection gradually".to_string(),
            priority: Priority::Medium,
        },
    },
    InterventionRule {
        name: "high_commitment",
        applies: |c| {
            c.axis_index.status == AxisStatus::Warning
                && c.axis_index.factors.income_commitment > 70.0
        },
        build: |_| Intervention {
            kind: InterventionKind::Preventive,
            message: "More than 70% of your income is committed.".to_string(),
            micro_action: "Pick one variable expense and cut just that one by 10% this month."
                .to_string(),
            impact: "Widens your safety margin".to_string(),
            priority: Priority::Medium,
        },
    },
];

/// Periods until the accumulated projection turns negative, when defined
fn periods_to_deficit(current: &MonthlyBalance, future: &MonthlyBalance) -> Option<f64> {
    if current.net_balance == 0.0 {
        return None;
    }
    Some(round_amount(future.projected_balance / current.net_balance).abs())
}

fn approaching_deficit(c: &InterventionContext<'_>) -> Intervention {
    let message = match periods_to_deficit(c.current, c.future) {
        Some(periods) => format!(
            "Spending is above income. In {:.0} periods the balance turns negative.",
            periods
        ),
        None => "Spending is above income. The balance is about to turn negative.".to_string(),
    };

    Intervention {
        kind: InterventionKind::Corrective,
        message,
        micro_action: format!(
            "Cut {:.0} from variable spending this month (pick just one category).",
            round_amount(c.future.net_balance.abs())
        ),
        impact: "Keeps you out of the red and holds stability".to_string(),
        priority: Priority::High,
    }
}

fn motivational() -> Intervention {
    Intervention {
        kind: InterventionKind::Motivational,
        message: "You are on your financial axis. Well done.".to_string(),
        micro_action: "Keep going. Your discipline is making things predictable.".to_string(),
        impact: "Holds stability and builds a secure future".to_string(),
        priority: Priority::Low,
    }
}

/// Choose the intervention for a scored profile
pub fn generate_intervention(
    axis_index: &AxisIndex,
    current: &MonthlyBalance,
    future: &MonthlyBalance,
) -> Intervention {
    let context = InterventionContext {
        axis_index,
        current,
        future,
    };

    match INTERVENTION_RULES.iter().find(|rule| (rule.applies)(&context)) {
        Some(rule) => {
            debug!(rule = rule.name, "Intervention selected");
            (rule.build)(&context)
        }
        None => motivational(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::types::{AxisFactors, FutureTrend};

    fn balance(periods_ahead: u32, income: f64, net_balance: f64) -> MonthlyBalance {
        MonthlyBalance {
            periods_ahead,
            total_income: income,
            total_expenses: income - net_balance,
            debt_payments: 0.0,
            net_balance,
            projected_balance: net_balance * periods_ahead as f64,
            confidence: 80,
        }
    }

    fn index(score: u8, income_commitment: f64, reserve_allocation: f64, debt_weight: f64) -> AxisIndex {
        AxisIndex {
            score,
            status: AxisStatus::from_score(score),
            factors: AxisFactors {
                income_commitment,
                reserve_allocation,
                debt_weight,
                future_trend: FutureTrend::Neutral,
            },
        }
    }

    #[test]
    fn test_critical_with_negative_future_is_corrective() {
        let current = balance(0, 3000.0, 100.0);
        let future = balance(3, 3000.0, -20.0);
        let result = generate_intervention(&index(15, 96.0, 0.0, 60.0), &current, &future);

        assert_eq!(result.kind, InterventionKind::Corrective);
        assert_eq!(result.priority, Priority::High);
        // Deficit rule wins over heavy debt
        assert!(result.message.contains("above income"));
        assert!(result.micro_action.contains("20"));
    }

    #[test]
    fn test_deficit_message_without_current_balance() {
        let current = balance(0, 3000.0, 0.0);
        let future = balance(3, 3000.0, -50.0);
        let result = generate_intervention(&index(10, 100.0, 0.0, 0.0), &current, &future);

        assert_eq!(result.kind, InterventionKind::Corrective);
        assert!(!result.message.contains("inf"));
        assert!(!result.message.contains("NaN"));
    }

    #[test]
    fn test_critical_heavy_debt() {
        let current = balance(0, 3000.0, 400.0);
        let future = balance(3, 3000.0, 350.0);
        let result = generate_intervention(&index(30, 65.0, 0.0, 70.0), &current, &future);

        assert_eq!(result.kind, InterventionKind::Corrective);
        assert!(result.message.contains("Debt"));
    }

    #[test]
    fn test_warning_thin_reserve_suggests_tenth_of_income() {
        let current = balance(0, 4235.0, 800.0);
        let future = balance(3, 4235.0, 800.0);
        let result = generate_intervention(&index(55, 75.0, 2.0, 0.0), &current, &future);

        assert_eq!(result.kind, InterventionKind::Preventive);
        assert_eq!(result.priority, Priority::Medium);
        assert!(result.micro_action.contains("424"));
    }

    #[test]
    fn test_warning_high_commitment() {
        let current = balance(0, 4000.0, 600.0);
        let future = balance(3, 4000.0, 600.0);
        let result = generate_intervention(&index(60, 75.0, 12.0, 0.0), &current, &future);

        assert_eq!(result.kind, InterventionKind::Preventive);
        assert!(result.message.contains("70%"));
    }

    #[test]
    fn test_unmatched_critical_and_stable_are_motivational() {
        let current = balance(0, 4000.0, 600.0);
        let future = balance(3, 4000.0, 600.0);

        let critical = generate_intervention(&index(35, 50.0, 12.0, 10.0), &current, &future);
        assert_eq!(critical.kind, InterventionKind::Motivational);

        let stable = generate_intervention(&index(90, 50.0, 12.0, 0.0), &current, &future);
        assert_eq!(stable.kind, InterventionKind::Motivational);
        assert_eq!(stable.priority, Priority::Low);
    }
}
