//! Full profile analysis
//!
//! Runs the projection, scoring and intervention steps and adds the
//! supporting breakdowns (largest spending lines, saving capacity, reserve
//! progress).

use chrono::Utc;
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{FinancialProfile, Trend};

use super::intervention::generate_intervention;
use super::normalize::normalize_monthly_income;
use super::scorer::{compute_axis_index, project_balance};
use super::types::{
    Bottleneck, FinancialAnalysis, MonthlyBalance, Projections, ReserveProgress, SavingCapacity,
};

const BOTTLENECK_COUNT: usize = 3;
const RESERVE_MILESTONE_PERCENT: f64 = 25.0;

/// Analyze a profile using the configured projection horizons
pub fn analyze(profile: &FinancialProfile, config: &EngineConfig) -> FinancialAnalysis {
    let current = project_balance(profile, 0);
    let near = project_balance(profile, config.near_horizon);
    let far = project_balance(profile, config.far_horizon);

    let axis_index = compute_axis_index(profile, &current, &near);
    let intervention = generate_intervention(&axis_index, &current, &near);

    debug!(
        score = axis_index.score,
        status = axis_index.status.as_str(),
        intervention = intervention.kind.as_str(),
        "Profile analyzed"
    );

    FinancialAnalysis {
        current,
        projections: Projections { near, far },
        axis_index,
        bottlenecks: identify_bottlenecks(profile),
        saving_capacity: saving_capacity(profile, &current),
        reserve_progress: reserve_progress(profile, &current),
        intervention,
        generated_at: Utc::now(),
    }
}

/// The largest spending lines, fixed expenses grouped by category
pub fn identify_bottlenecks(profile: &FinancialProfile) -> Vec<Bottleneck> {
    let income = normalize_monthly_income(profile);

    // Keep first-seen category order so ties sort deterministically
    let mut lines: Vec<(String, &'static str, f64)> = Vec::new();
    for expense in profile.expenses.fixed.iter().filter(|e| e.is_active) {
        let category = expense.category.as_str();
        match lines.iter_mut().find(|(_, key, _)| *key == category) {
            Some((_, _, amount)) => *amount += expense.amount,
            None => lines.push((format!("Fixed: {}", category), category, expense.amount)),
        }
    }
    for expense in &profile.expenses.variable {
        let category = expense.category.as_str();
        lines.push((
            format!("Variable: {}", category),
            category,
            expense.average_amount,
        ));
    }

    lines.sort_by(|a, b| b.2.total_cmp(&a.2));

    lines
        .into_iter()
        .take(BOTTLENECK_COUNT)
        .map(|(label, category, amount)| Bottleneck {
            category: label,
            amount,
            percentage: if income > 0.0 {
                amount / income * 100.0
            } else {
                0.0
            },
            suggestion: suggestion_for(category).to_string(),
        })
        .collect()
}

fn suggestion_for(category: &str) -> &'static str {
    match category {
        "housing" => "Housing is essential, but check for extra costs you can reduce.",
        "groceries" => "Plan weekly shopping and avoid waste.",
        "leisure" => "Leisure matters, but it can be adjusted without losing quality.",
        "subscriptions" => "Cancel subscriptions you rarely use.",
        _ => "See whether this expense can be trimmed gradually.",
    }
}

/// Current savings, what could be saved, and what stands in the way
pub fn saving_capacity(profile: &FinancialProfile, current: &MonthlyBalance) -> SavingCapacity {
    let mut blockers = Vec::new();
    if current.debt_payments > current.total_income * 0.3 {
        blockers.push("Debt payments take more than 30% of income".to_string());
    }
    if current.total_expenses > current.total_income * 0.7 {
        blockers.push("Expenses are above 70% of income".to_string());
    }
    if profile
        .expenses
        .variable
        .iter()
        .any(|e| e.trend == Trend::Increasing)
    {
        blockers.push("Variable spending is trending up".to_string());
    }

    SavingCapacity {
        current: profile.goals.emergency_fund.monthly_contribution,
        potential: current.net_balance.max(0.0),
        blockers,
    }
}

/// Emergency fund completion and reached milestones
pub fn reserve_progress(profile: &FinancialProfile, current: &MonthlyBalance) -> ReserveProgress {
    let fund = &profile.goals.emergency_fund;
    let percent = if fund.target_amount > 0.0 {
        (fund.current_amount / fund.target_amount * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let mut milestones = Vec::new();
    if percent >= RESERVE_MILESTONE_PERCENT {
        milestones.push("25% of the reserve reached".to_string());
    }
    if current.net_balance > 0.0 {
        milestones.push("Positive balance this period".to_string());
    }

    ReserveProgress {
        percent,
        milestones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::types::{AxisStatus, InterventionKind};
    use crate::models::{
        EmergencyFund, FixedCategory, FixedExpense, Frequency, RecurringIncome,
        VariableCategory, VariableExpense,
    };

    fn fixed(name: &str, amount: f64, category: FixedCategory) -> FixedExpense {
        FixedExpense {
            name: name.to_string(),
            amount,
            category,
            is_active: true,
        }
    }

    fn variable(category: VariableCategory, amount: f64, trend: Trend) -> VariableExpense {
        VariableExpense {
            category,
            average_amount: amount,
            last_month_amount: None,
            trend,
        }
    }

    fn sample_profile() -> FinancialProfile {
        let mut profile = FinancialProfile::default();
        profile.income.recurring.push(RecurringIncome {
            name: "Salary".to_string(),
            amount: 5000.0,
            frequency: Frequency::Monthly,
            is_active: true,
        });
        profile.expenses.fixed = vec![
            fixed("Rent", 1400.0, FixedCategory::Housing),
            fixed("Condo fee", 300.0, FixedCategory::Housing),
            fixed("Streaming", 60.0, FixedCategory::Subscriptions),
        ];
        profile.expenses.variable = vec![
            variable(VariableCategory::Groceries, 800.0, Trend::Stable),
            variable(VariableCategory::Leisure, 400.0, Trend::Increasing),
        ];
        profile.goals.emergency_fund = EmergencyFund {
            target_amount: 12000.0,
            current_amount: 4000.0,
            monthly_contribution: 600.0,
        };
        profile
    }

    #[test]
    fn test_bottlenecks_group_fixed_and_rank() {
        let bottlenecks = identify_bottlenecks(&sample_profile());

        assert_eq!(bottlenecks.len(), 3);
        assert_eq!(bottlenecks[0].category, "Fixed: housing");
        assert_eq!(bottlenecks[0].amount, 1700.0);
        assert!((bottlenecks[0].percentage - 34.0).abs() < 1e-9);
        assert!(bottlenecks[0].suggestion.contains("Housing"));
        assert_eq!(bottlenecks[1].category, "Variable: groceries");
        assert_eq!(bottlenecks[2].category, "Variable: leisure");
    }

    #[test]
    fn test_bottlenecks_without_income() {
        let mut profile = sample_profile();
        profile.income.recurring.clear();
        let bottlenecks = identify_bottlenecks(&profile);
        assert!(bottlenecks.iter().all(|b| b.percentage == 0.0));
    }

    #[test]
    fn test_saving_capacity_blockers() {
        let profile = sample_profile();
        let current = project_balance(&profile, 0);
        let capacity = saving_capacity(&profile, &current);

        assert_eq!(capacity.current, 600.0);
        assert!((capacity.potential - 2040.0).abs() < 1e-9);
        assert_eq!(capacity.blockers, vec!["Variable spending is trending up".to_string()]);
    }

    #[test]
    fn test_reserve_progress() {
        let profile = sample_profile();
        let current = project_balance(&profile, 0);
        let progress = reserve_progress(&profile, &current);

        assert!((progress.percent - 33.333_333).abs() < 1e-3);
        assert_eq!(progress.milestones.len(), 2);
    }

    #[test]
    fn test_reserve_progress_without_target() {
        let profile = FinancialProfile::default();
        let current = project_balance(&profile, 0);
        let progress = reserve_progress(&profile, &current);

        assert_eq!(progress.percent, 0.0);
        assert!(progress.milestones.is_empty());
    }

    #[test]
    fn test_analyze_uses_configured_horizons() {
        let config = EngineConfig::default();
        let analysis = analyze(&sample_profile(), &config);

        assert_eq!(analysis.current.periods_ahead, 0);
        assert_eq!(analysis.projections.near.periods_ahead, config.near_horizon);
        assert_eq!(analysis.projections.far.periods_ahead, config.far_horizon);
        assert_eq!(analysis.axis_index.status, AxisStatus::Stable);
        assert_eq!(analysis.intervention.kind, InterventionKind::Motivational);
    }
}
