//! Goal planning - linear plans and progressive savings challenges
//!
//! Deterministic schedules only: a target split evenly over the periods, or
//! an arithmetic progression that starts small and grows up to a cap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::rounding::{round_amount, round_to};

/// Accepted overshoot for the optimized challenge (total ≤ target × 1.2)
const MAX_OVERSHOOT: f64 = 1.2;
/// Below this share of income a goal is considered comfortable
const COMFORTABLE_PERCENT: f64 = 10.0;

/// Target split evenly across periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPlan {
    pub periods: u32,
    /// Rounded to 2 decimals
    pub monthly_average: f64,
    pub target: f64,
}

/// Arithmetic progression parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveParams {
    pub start: f64,
    pub increment: f64,
    pub cap: f64,
}

impl Default for ProgressiveParams {
    fn default() -> Self {
        Self {
            start: 1.0,
            increment: 1.0,
            cap: 500.0,
        }
    }
}

impl ProgressiveParams {
    /// Reject parameters that would break the growing, capped sequence
    pub fn validate(&self) -> Result<()> {
        if !(self.start.is_finite() && self.increment.is_finite() && self.cap.is_finite()) {
            return Err(Error::InvalidData(
                "progression parameters must be finite numbers".to_string(),
            ));
        }
        if self.increment < 0.0 {
            return Err(Error::InvalidData(format!(
                "increment must not be negative (got {})",
                self.increment
            )));
        }
        if self.start > self.cap {
            return Err(Error::InvalidData(format!(
                "start value {} is above the cap {}",
                self.start, self.cap
            )));
        }
        Ok(())
    }
}

/// A schedule of per-period contributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveChallenge {
    pub values: Vec<f64>,
    pub total_accumulated: f64,
    pub goal_reached: bool,
    pub start: f64,
    pub increment: f64,
    /// Ceiling applied to values; for optimized challenges, the last value
    pub cap: f64,
    pub target: f64,
    pub periods: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalPlan {
    Linear(LinearPlan),
    Progressive(ProgressiveChallenge),
}

impl GoalPlan {
    pub fn target(&self) -> f64 {
        match self {
            GoalPlan::Linear(plan) => plan.target,
            GoalPlan::Progressive(challenge) => challenge.target,
        }
    }

    pub fn periods(&self) -> u32 {
        match self {
            GoalPlan::Linear(plan) => plan.periods,
            GoalPlan::Progressive(challenge) => challenge.periods,
        }
    }

    /// Expected contribution for each period
    pub fn expected_values(&self) -> Vec<f64> {
        match self {
            GoalPlan::Linear(plan) => vec![plan.monthly_average; plan.periods as usize],
            GoalPlan::Progressive(challenge) => challenge.values.clone(),
        }
    }
}

/// Whether a goal fits within a share of income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalFeasibility {
    pub realistic: bool,
    /// Rounded to 2 decimals
    pub monthly_required: f64,
    /// Rounded to 2 decimals
    pub percent_of_income: f64,
    pub recommendation: String,
    /// Periods needed to stay within the savings rate, when the goal doesn't fit
    pub suggested_periods: Option<u32>,
}

/// Tracking row for one period of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeProgress {
    /// 1-based
    pub period: u32,
    pub expected: f64,
    pub actual: f64,
    pub accumulated: f64,
    /// Whole percent, never above 100
    pub percent_complete: f64,
}

/// A plan wrapped for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialChallenge {
    pub title: String,
    pub description: String,
    pub target: f64,
    pub duration: u32,
    pub plan: GoalPlan,
    pub progress: f64,
    pub current_period: u32,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn validate_goal(target: f64, periods: u32) -> Result<()> {
    if periods == 0 {
        return Err(Error::InvalidData(
            "a plan needs at least one period".to_string(),
        ));
    }
    if !target.is_finite() || target < 0.0 {
        return Err(Error::InvalidData(format!(
            "target must be a non-negative amount (got {})",
            target
        )));
    }
    Ok(())
}

/// Split the target evenly over `periods`
pub fn create_linear_plan(target: f64, periods: u32) -> Result<LinearPlan> {
    validate_goal(target, periods)?;

    Ok(LinearPlan {
        periods,
        monthly_average: round_to(target / periods as f64, 2),
        target,
    })
}

/// `periods` values from `start`, each `increment` higher, never above `cap`
fn capped_progression(start: f64, increment: f64, cap: f64, periods: u32) -> Vec<f64> {
    let mut values = Vec::with_capacity(periods as usize);
    let mut current = start;
    for _ in 0..periods {
        values.push(current);
        current = (current + increment).min(cap);
    }
    values
}

/// Grow from `params.start` by `params.increment` per period up to `params.cap`
pub fn create_progressive_challenge(
    target: f64,
    periods: u32,
    params: ProgressiveParams,
) -> Result<ProgressiveChallenge> {
    validate_goal(target, periods)?;
    params.validate()?;

    let values = capped_progression(params.start, params.increment, params.cap, periods);
    let total_accumulated: f64 = values.iter().sum();

    Ok(ProgressiveChallenge {
        goal_reached: total_accumulated >= target,
        total_accumulated,
        values,
        start: params.start,
        increment: params.increment,
        cap: params.cap,
        target,
        periods,
    })
}

/// A progression described by its terms, materialized only once chosen
struct Candidate {
    label: &'static str,
    start: f64,
    increment: f64,
    /// Round each term to cents
    cents: bool,
}

impl Candidate {
    fn value(&self, i: u32) -> f64 {
        let value = self.start + self.increment * i as f64;
        if self.cents {
            round_to(value, 2)
        } else {
            value
        }
    }

    fn total(&self, periods: u32) -> f64 {
        (0..periods).map(|i| self.value(i)).sum()
    }

    fn values(&self, periods: u32) -> Vec<f64> {
        (0..periods).map(|i| self.value(i)).collect()
    }
}

/// An arithmetic progression from 1 whose sum lands close to `target`.
///
/// The common difference comes from the series sum `S = n/2 × (2a + (n-1)d)`.
/// Candidates are tried in order and the first within the accepted overshoot
/// wins: the whole-number increment, then the exact increment rounded to
/// cents, then a flat split which always fits. Rounding to cents can leave
/// the total a little under the target, in which case `goal_reached` is false.
pub fn create_optimized_progressive_challenge(
    target: f64,
    periods: u32,
) -> Result<ProgressiveChallenge> {
    validate_goal(target, periods)?;

    if periods == 1 {
        return Ok(ProgressiveChallenge {
            values: vec![target],
            total_accumulated: target,
            goal_reached: true,
            start: target,
            increment: 0.0,
            cap: target,
            target,
            periods,
        });
    }

    let start = 1.0;
    let n = periods as f64;
    let exact = (2.0 * target / n - 2.0 * start) / (n - 1.0);

    let candidates = [
        Candidate {
            label: "whole",
            start,
            increment: round_amount(exact).max(1.0),
            cents: false,
        },
        Candidate {
            label: "fractional",
            start,
            increment: round_to(exact.max(0.0), 2),
            cents: true,
        },
        Candidate {
            label: "flat",
            start: round_to(target / n, 2),
            increment: 0.0,
            cents: false,
        },
    ];

    let limit = target * MAX_OVERSHOOT;
    let last = candidates.len() - 1;
    let (index, chosen) = candidates
        .into_iter()
        .enumerate()
        .find(|(i, c)| *i == last || c.total(periods) <= limit)
        .ok_or_else(|| Error::InvalidData("no progression candidate".to_string()))?;

    if index > 0 {
        warn!(
            target,
            periods,
            candidate = chosen.label,
            "Whole-number progression overshoots the target, using fallback"
        );
    }

    let values = chosen.values(periods);
    let total_accumulated: f64 = values.iter().sum();
    let cap = values.last().copied().unwrap_or(chosen.start);

    debug!(
        target,
        periods,
        increment = chosen.increment,
        total_accumulated,
        "Optimized progression built"
    );

    Ok(ProgressiveChallenge {
        goal_reached: total_accumulated >= target,
        total_accumulated,
        values,
        start: chosen.start,
        increment: chosen.increment,
        cap,
        target,
        periods,
    })
}

/// Check a goal against `max_savings_rate` of monthly income
pub fn is_realistic_goal(
    target: f64,
    periods: u32,
    monthly_income: f64,
    max_savings_rate: f64,
) -> Result<GoalFeasibility> {
    validate_goal(target, periods)?;

    let monthly_required = target / periods as f64;

    if monthly_income <= 0.0 {
        return Ok(GoalFeasibility {
            realistic: false,
            monthly_required: round_to(monthly_required, 2),
            percent_of_income: 100.0,
            recommendation: "There is no income to save from yet.".to_string(),
            suggested_periods: None,
        });
    }

    let percent_of_income = monthly_required / monthly_income * 100.0;
    let realistic = percent_of_income <= max_savings_rate * 100.0;

    let (recommendation, suggested_periods) = if !realistic {
        let suggested = (target / (monthly_income * max_savings_rate)).ceil() as u32;
        (
            format!(
                "Consider extending to {} periods to keep it sustainable.",
                suggested
            ),
            Some(suggested),
        )
    } else if percent_of_income < COMFORTABLE_PERCENT {
        (
            "Comfortable goal. Consider raising it to reach results sooner.".to_string(),
            None,
        )
    } else {
        (
            "Balanced goal. Achievable with discipline.".to_string(),
            None,
        )
    };

    Ok(GoalFeasibility {
        realistic,
        monthly_required: round_to(monthly_required, 2),
        percent_of_income: round_to(percent_of_income, 2),
        recommendation,
        suggested_periods,
    })
}

/// How closely actual contributions followed the plan, 0 to 1.
///
/// Missing actual values count as 0.
pub fn calculate_consistency_rate(expected: &[f64], actual: &[f64]) -> f64 {
    let mut total_deviation = 0.0;
    let mut total_expected = 0.0;

    for (i, &value) in expected.iter().enumerate() {
        let observed = actual.get(i).copied().unwrap_or(0.0);
        total_deviation += (value - observed).abs();
        total_expected += value;
    }

    if total_expected == 0.0 {
        return 0.0;
    }

    round_to((1.0 - total_deviation / total_expected).max(0.0), 2)
}

/// Running totals of actual contributions against the plan
pub fn calculate_progress(expected: &[f64], actual: &[f64], target: f64) -> Vec<ChallengeProgress> {
    let mut accumulated = 0.0;

    expected
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let observed = actual.get(i).copied().unwrap_or(0.0);
            accumulated += observed;

            let percent_complete = if target > 0.0 {
                round_amount(accumulated / target * 100.0).min(100.0)
            } else {
                100.0
            };

            ChallengeProgress {
                period: i as u32 + 1,
                expected: value,
                actual: observed,
                accumulated,
                percent_complete,
            }
        })
        .collect()
}

/// Target plus a cushion of `margin_percent`
pub fn safety_margin(target: f64, margin_percent: f64) -> f64 {
    target * (1.0 + margin_percent / 100.0)
}

/// Wrap a linear or optimized progressive plan as a challenge
pub fn generate_challenge(target: f64, periods: u32, linear: bool) -> Result<FinancialChallenge> {
    let (title, description, plan) = if linear {
        (
            "Linear Plan",
            "Target split evenly across periods",
            GoalPlan::Linear(create_linear_plan(target, periods)?),
        )
    } else {
        (
            "Progressive Challenge",
            "Start small and grow gradually",
            GoalPlan::Progressive(create_optimized_progressive_challenge(target, periods)?),
        )
    };

    Ok(FinancialChallenge {
        title: title.to_string(),
        description: description.to_string(),
        target,
        duration: periods,
        plan,
        progress: 0.0,
        current_period: 1,
        accepted: false,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_plan() {
        let plan = create_linear_plan(1000.0, 3).unwrap();
        assert_eq!(plan.monthly_average, 333.33);
        assert!((plan.monthly_average * 3.0 - 1000.0).abs() <= 0.01 + 1e-9);
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert!(create_linear_plan(1000.0, 0).is_err());
        assert!(create_progressive_challenge(1000.0, 0, ProgressiveParams::default()).is_err());
        assert!(create_optimized_progressive_challenge(1000.0, 0).is_err());
        assert!(is_realistic_goal(1000.0, 0, 3000.0, 0.3).is_err());
    }

    #[test]
    fn test_progressive_defaults() {
        let challenge =
            create_progressive_challenge(100.0, 12, ProgressiveParams::default()).unwrap();

        assert_eq!(challenge.values.first(), Some(&1.0));
        assert_eq!(challenge.values.last(), Some(&12.0));
        assert_eq!(challenge.total_accumulated, 78.0);
        assert!(!challenge.goal_reached);
    }

    #[test]
    fn test_progressive_respects_cap() {
        let params = ProgressiveParams {
            start: 10.0,
            increment: 25.0,
            cap: 60.0,
        };
        let challenge = create_progressive_challenge(200.0, 5, params).unwrap();

        assert_eq!(challenge.values, vec![10.0, 35.0, 60.0, 60.0, 60.0]);
        assert!(challenge.goal_reached);
        assert!(challenge.values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_progressive_rejects_bad_params() {
        let above_cap = ProgressiveParams {
            start: 600.0,
            increment: 1.0,
            cap: 500.0,
        };
        assert!(create_progressive_challenge(100.0, 3, above_cap).is_err());

        let shrinking = ProgressiveParams {
            start: 1.0,
            increment: -1.0,
            cap: 500.0,
        };
        assert!(create_progressive_challenge(100.0, 3, shrinking).is_err());

        let nan = ProgressiveParams {
            start: f64::NAN,
            ..Default::default()
        };
        assert!(create_progressive_challenge(100.0, 3, nan).is_err());
    }

    #[test]
    fn test_optimized_whole_increment() {
        let challenge = create_optimized_progressive_challenge(1000.0, 12).unwrap();

        // d = round((2000/12 - 2) / 11) = 15
        assert_eq!(challenge.increment, 15.0);
        assert_eq!(challenge.values[0], 1.0);
        assert_eq!(challenge.values[11], 166.0);
        assert_eq!(challenge.total_accumulated, 1002.0);
        assert_eq!(challenge.cap, 166.0);
        assert!(challenge.goal_reached);
    }

    #[test]
    fn test_optimized_single_period() {
        let challenge = create_optimized_progressive_challenge(750.0, 1).unwrap();
        assert_eq!(challenge.values, vec![750.0]);
        assert_eq!(challenge.increment, 0.0);
        assert!(challenge.goal_reached);
    }

    #[test]
    fn test_optimized_falls_back_when_whole_increment_overshoots() {
        // d would be clamped to 1: total 1+2+...+10 = 55 > 24
        let challenge = create_optimized_progressive_challenge(20.0, 10).unwrap();

        assert!(challenge.total_accumulated <= 20.0 * MAX_OVERSHOOT);
        assert!(challenge.increment < 1.0);
        assert!(challenge.values.windows(2).all(|w| w[0] <= w[1]));
        // Cent rounding leaves the total just under 20
        assert!(challenge.total_accumulated < 20.0);
        assert!(!challenge.goal_reached);
    }

    #[test]
    fn test_optimized_always_terminates_within_bound() {
        for target in [0.0, 1.0, 10.0, 99.0, 1000.0, 12345.0] {
            for periods in [1, 2, 3, 7, 12, 60, 120] {
                let challenge = create_optimized_progressive_challenge(target, periods).unwrap();
                assert_eq!(challenge.values.len(), periods as usize);
                assert!(challenge.total_accumulated <= target * MAX_OVERSHOOT + 0.01 * periods as f64);
                assert_eq!(
                    challenge.goal_reached,
                    challenge.total_accumulated >= target
                );
            }
        }
    }

    #[test]
    fn test_is_realistic_goal() {
        let fits = is_realistic_goal(6000.0, 12, 4000.0, 0.3).unwrap();
        assert!(fits.realistic);
        assert_eq!(fits.monthly_required, 500.0);
        assert_eq!(fits.percent_of_income, 12.5);
        assert!(fits.recommendation.contains("Balanced"));

        let comfortable = is_realistic_goal(1200.0, 12, 4000.0, 0.3).unwrap();
        assert!(comfortable.recommendation.contains("Comfortable"));

        let too_much = is_realistic_goal(24000.0, 12, 4000.0, 0.3).unwrap();
        assert!(!too_much.realistic);
        assert_eq!(too_much.suggested_periods, Some(20));
        assert!(too_much.recommendation.contains("20"));
    }

    #[test]
    fn test_is_realistic_goal_without_income() {
        let result = is_realistic_goal(1000.0, 10, 0.0, 0.3).unwrap();
        assert!(!result.realistic);
        assert_eq!(result.suggested_periods, None);
        assert!(result.percent_of_income.is_finite());
    }

    #[test]
    fn test_consistency_rate() {
        assert_eq!(calculate_consistency_rate(&[100.0, 100.0], &[100.0, 100.0]), 1.0);
        assert_eq!(calculate_consistency_rate(&[100.0, 100.0], &[90.0, 80.0]), 0.85);
        // Missing actuals count as zero
        assert_eq!(calculate_consistency_rate(&[100.0, 100.0], &[100.0]), 0.5);
        assert_eq!(calculate_consistency_rate(&[100.0], &[400.0]), 0.0);
        assert_eq!(calculate_consistency_rate(&[0.0, 0.0], &[5.0]), 0.0);
        assert_eq!(calculate_consistency_rate(&[], &[]), 0.0);
    }

    #[test]
    fn test_calculate_progress() {
        let rows = calculate_progress(&[100.0, 200.0, 300.0], &[100.0, 250.0], 500.0);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].percent_complete, 20.0);
        assert_eq!(rows[1].accumulated, 350.0);
        assert_eq!(rows[1].percent_complete, 70.0);
        assert_eq!(rows[2].actual, 0.0);
        assert_eq!(rows[2].period, 3);

        let over = calculate_progress(&[100.0], &[900.0], 500.0);
        assert_eq!(over[0].percent_complete, 100.0);
    }

    #[test]
    fn test_safety_margin() {
        assert!((safety_margin(1000.0, 20.0) - 1200.0).abs() < 1e-9);
        assert_eq!(safety_margin(1000.0, 0.0), 1000.0);
    }

    #[test]
    fn test_generate_challenge() {
        let linear = generate_challenge(1200.0, 12, true).unwrap();
        assert_eq!(linear.title, "Linear Plan");
        assert_eq!(linear.plan.expected_values(), vec![100.0; 12]);
        assert_eq!(linear.current_period, 1);
        assert!(!linear.accepted);

        let progressive = generate_challenge(1000.0, 12, false).unwrap();
        assert!(matches!(progressive.plan, GoalPlan::Progressive(_)));
        assert_eq!(progressive.plan.periods(), 12);
    }

    #[test]
    fn test_goal_plan_serializes_with_type_tag() {
        let plan = GoalPlan::Linear(create_linear_plan(300.0, 3).unwrap());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["type"], "linear");
        assert_eq!(json["monthly_average"], 100.0);
    }
}
