//! Savings protocols
//!
//! A protocol is a progressive challenge checked against educational limits
//! and delivered with a plain-language reading. [`ProtocolLimits`] decides
//! whether a request is accepted, [`ProtocolEngine`] computes the
//! progression, and the narrative functions interpret it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::rounding::round_to;

use super::narrative::{
    comparative_insight, maturity_message, protocol_insight, protocol_recommendation,
    ProtocolStatus,
};
use super::planner::{
    create_optimized_progressive_challenge, create_progressive_challenge, validate_goal,
    ProgressiveChallenge, ProgressiveParams,
};

pub const PROTOCOL_VERSION: &str = "1.0";

/// Tolerance when checking a sequence for a common difference
const PROGRESSION_TOLERANCE: f64 = 0.01;

/// Bounds a protocol request must fall within
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolLimits {
    pub min_target: f64,
    pub max_target: f64,
    pub min_periods: u32,
    pub max_periods: u32,
    pub min_start: f64,
    pub max_start: f64,
    pub min_increment: f64,
    pub max_increment: f64,
    pub min_cap: f64,
    pub max_cap: f64,
}

impl Default for ProtocolLimits {
    fn default() -> Self {
        Self {
            min_target: 10.0,
            max_target: 1_000_000.0,
            min_periods: 3,
            max_periods: 120,
            min_start: 1.0,
            max_start: 100.0,
            min_increment: 0.5,
            max_increment: 50.0,
            min_cap: 10.0,
            max_cap: 2000.0,
        }
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::InvalidData(format!(
            "{} must be between {} and {} (got {})",
            field, min, max, value
        )));
    }
    Ok(())
}

impl ProtocolLimits {
    /// Check the goal amount and duration
    pub fn validate_goal(&self, target: f64, periods: u32) -> Result<()> {
        if !target.is_finite() || target <= 0.0 {
            return Err(Error::InvalidData(
                "The goal amount must be a positive number.".to_string(),
            ));
        }
        if target > self.max_target {
            return Err(Error::InvalidData(
                "Goal is outside the educational scope. This system builds consistency, it does not promise wealth."
                    .to_string(),
            ));
        }
        if target < self.min_target {
            return Err(Error::InvalidData(format!(
                "Goal is too low to form a behavioral pattern. Minimum: {}",
                self.min_target
            )));
        }
        if periods < self.min_periods {
            return Err(Error::InvalidData(format!(
                "Period too short. Behavior needs at least {} cycles to form.",
                self.min_periods
            )));
        }
        if periods > self.max_periods {
            return Err(Error::InvalidData(format!(
                "Period too long. Protocols work best within {} to {} periods.",
                self.min_periods, self.max_periods
            )));
        }
        Ok(())
    }

    /// Check progression parameters; the cap must leave room to grow
    pub fn validate_params(&self, params: &ProgressiveParams) -> Result<()> {
        check_range("start_value", params.start, self.min_start, self.max_start)?;
        check_range(
            "increment",
            params.increment,
            self.min_increment,
            self.max_increment,
        )?;
        check_range("cap", params.cap, self.min_cap, self.max_cap)?;
        if params.cap <= params.start {
            return Err(Error::InvalidData(
                "The cap must be above the start value. A progression needs room to grow."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Raw numbers of a computed progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionResult {
    pub progression: Vec<f64>,
    /// Rounded to 2 decimals
    pub total: f64,
    pub periods: u32,
    /// Rounded to 2 decimals
    pub average: f64,
    /// Rounded to 2 decimals
    pub peak: f64,
}

impl From<ProgressiveChallenge> for ProgressionResult {
    fn from(challenge: ProgressiveChallenge) -> Self {
        let total = challenge.total_accumulated;
        let peak = challenge
            .values
            .iter()
            .copied()
            .fold(0.0_f64, f64::max);

        Self {
            total: round_to(total, 2),
            periods: challenge.periods,
            average: round_to(total / challenge.periods as f64, 2),
            peak: round_to(peak, 2),
            progression: challenge.values,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolType {
    Progressive,
    Optimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtocolGoal {
    pub target_amount: f64,
    pub periods: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolOutcome {
    pub total_accumulated: f64,
    pub periods_completed: u32,
    pub average_per_period: f64,
    pub peak_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolAssessment {
    pub status: ProtocolStatus,
    /// 0 to 1, rounded to 3 decimals
    pub viability: f64,
    pub insight: String,
    pub recommendation: Option<String>,
}

/// A computed protocol with its interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolReport {
    pub protocol_version: String,
    pub protocol_type: ProtocolType,
    pub goal: ProtocolGoal,
    pub result: ProtocolOutcome,
    pub status: ProtocolAssessment,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub total: f64,
    pub viability: f64,
    pub status: ProtocolStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub progressive: ComparisonEntry,
    pub optimized: ComparisonEntry,
}

/// Hand-tuned progression against the optimized one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolComparison {
    pub protocol_version: String,
    pub comparison: Comparison,
    pub insight: String,
    pub recommendation: String,
}

/// Progression calculator for one goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProtocolEngine {
    target: f64,
    periods: u32,
}

impl ProtocolEngine {
    pub fn new(target: f64, periods: u32) -> Result<Self> {
        validate_goal(target, periods)?;
        Ok(Self { target, periods })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn periods(&self) -> u32 {
        self.periods
    }

    /// Capped arithmetic progression
    pub fn calculate(&self, params: &ProgressiveParams) -> Result<ProgressionResult> {
        let challenge = create_progressive_challenge(self.target, self.periods, *params)?;
        Ok(challenge.into())
    }

    /// Progression solved to land near the target
    pub fn optimize(&self) -> Result<ProgressionResult> {
        let challenge = create_optimized_progressive_challenge(self.target, self.periods)?;
        Ok(challenge.into())
    }

    /// Share of the target reached, capped at 1
    pub fn viability(&self, total: f64) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (total / self.target).min(1.0)
    }

    /// Evenly spaced scenarios across a start and an increment range
    pub fn simulate_scenarios(
        &self,
        start_range: (f64, f64),
        increment_range: (f64, f64),
        cap: f64,
        samples: usize,
    ) -> Result<Vec<ProgressionResult>> {
        let (start_min, start_max) = start_range;
        let (increment_min, increment_max) = increment_range;

        let step = |min: f64, max: f64| {
            if samples > 1 {
                (max - min) / (samples - 1) as f64
            } else {
                0.0
            }
        };
        let start_step = step(start_min, start_max);
        let increment_step = step(increment_min, increment_max);

        (0..samples)
            .map(|i| {
                self.calculate(&ProgressiveParams {
                    start: start_min + i as f64 * start_step,
                    increment: increment_min + i as f64 * increment_step,
                    cap,
                })
            })
            .collect()
    }

    /// Compute and interpret a hand-tuned progression
    pub fn progressive_report(&self, params: &ProgressiveParams) -> Result<ProtocolReport> {
        let result = self.calculate(params)?;
        let viability = self.viability(result.total);

        debug!(
            target = self.target,
            periods = self.periods,
            total = result.total,
            viability,
            "Progressive protocol computed"
        );

        Ok(ProtocolReport {
            protocol_version: PROTOCOL_VERSION.to_string(),
            protocol_type: ProtocolType::Progressive,
            goal: self.goal(),
            result: ProtocolOutcome {
                total_accumulated: result.total,
                periods_completed: result.periods,
                average_per_period: result.average,
                peak_value: result.peak,
                maturity_insight: None,
            },
            status: ProtocolAssessment {
                status: ProtocolStatus::from_ratio(viability),
                viability: round_to(viability, 3),
                insight: protocol_insight(result.total, self.target).to_string(),
                recommendation: Some(protocol_recommendation(viability).to_string()),
            },
            created_at: Utc::now(),
        })
    }

    /// Compute and interpret the optimized progression
    pub fn optimized_report(&self) -> Result<ProtocolReport> {
        let result = self.optimize()?;
        let viability = self.viability(result.total);

        Ok(ProtocolReport {
            protocol_version: PROTOCOL_VERSION.to_string(),
            protocol_type: ProtocolType::Optimized,
            goal: self.goal(),
            result: ProtocolOutcome {
                total_accumulated: result.total,
                periods_completed: result.periods,
                average_per_period: result.average,
                peak_value: result.peak,
                maturity_insight: Some(maturity_message(self.periods).to_string()),
            },
            status: ProtocolAssessment {
                status: ProtocolStatus::Optimal,
                viability: round_to(viability, 3),
                insight: protocol_insight(result.total, self.target).to_string(),
                recommendation: Some(
                    "Mathematically optimized protocol. Follow the suggested progression."
                        .to_string(),
                ),
            },
            created_at: Utc::now(),
        })
    }

    /// Compare a hand-tuned progression with the optimized one
    pub fn compare(&self, params: &ProgressiveParams) -> Result<ProtocolComparison> {
        let progressive = self.calculate(params)?;
        let optimized = self.optimize()?;

        let ratio = |total: f64| {
            if self.target > 0.0 {
                total / self.target
            } else {
                0.0
            }
        };
        let progressive_ratio = ratio(progressive.total);
        let optimized_ratio = ratio(optimized.total);

        let recommendation = if optimized.total > progressive.total {
            "Optimized protocol"
        } else {
            "Progressive protocol is adequate"
        };

        Ok(ProtocolComparison {
            protocol_version: PROTOCOL_VERSION.to_string(),
            comparison: Comparison {
                progressive: ComparisonEntry {
                    total: progressive.total,
                    viability: round_to(progressive_ratio, 3),
                    status: ProtocolStatus::from_ratio(progressive_ratio),
                },
                optimized: ComparisonEntry {
                    total: optimized.total,
                    viability: round_to(optimized_ratio, 3),
                    status: ProtocolStatus::Optimal,
                },
            },
            insight: comparative_insight(progressive.total, optimized.total, self.target),
            recommendation: recommendation.to_string(),
        })
    }

    fn goal(&self) -> ProtocolGoal {
        ProtocolGoal {
            target_amount: self.target,
            periods: self.periods,
        }
    }
}

/// Common difference of `sequence` if it is arithmetic within a cent.
///
/// Sequences shorter than two values count as arithmetic with difference 0.
pub fn is_arithmetic_progression(sequence: &[f64]) -> Option<f64> {
    if sequence.len() < 2 {
        return Some(0.0);
    }

    let first = sequence[1] - sequence[0];
    sequence
        .windows(2)
        .all(|w| ((w[1] - w[0]) - first).abs() < PROGRESSION_TOLERANCE)
        .then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: f64, increment: f64, cap: f64) -> ProgressiveParams {
        ProgressiveParams {
            start,
            increment,
            cap,
        }
    }

    #[test]
    fn test_limits_accept_defaults() {
        let limits = ProtocolLimits::default();
        assert!(limits.validate_goal(1000.0, 12).is_ok());
        assert!(limits.validate_params(&ProgressiveParams::default()).is_ok());
    }

    #[test]
    fn test_limits_reject_out_of_scope_goals() {
        let limits = ProtocolLimits::default();

        let err = limits.validate_goal(5_000_000.0, 12).unwrap_err();
        assert!(err.to_string().contains("educational scope"));
        assert!(limits.validate_goal(5.0, 12).is_err());
        assert!(limits.validate_goal(1000.0, 2).is_err());
        assert!(limits.validate_goal(1000.0, 121).is_err());
        assert!(limits.validate_goal(f64::NAN, 12).is_err());
    }

    #[test]
    fn test_limits_reject_bad_params() {
        let limits = ProtocolLimits::default();

        assert!(limits.validate_params(&params(0.5, 1.0, 500.0)).is_err());
        assert!(limits.validate_params(&params(1.0, 60.0, 500.0)).is_err());
        assert!(limits.validate_params(&params(1.0, 1.0, 5000.0)).is_err());

        let err = limits.validate_params(&params(50.0, 1.0, 50.0)).unwrap_err();
        assert!(err.to_string().contains("cap must be above"));
    }

    #[test]
    fn test_calculate() {
        let engine = ProtocolEngine::new(1000.0, 12).unwrap();
        let result = engine.calculate(&params(10.0, 10.0, 500.0)).unwrap();

        assert_eq!(result.progression.len(), 12);
        assert_eq!(result.total, 780.0);
        assert_eq!(result.average, 65.0);
        assert_eq!(result.peak, 120.0);
        assert_eq!(engine.viability(result.total), 0.78);
    }

    #[test]
    fn test_optimize_lands_near_target() {
        let engine = ProtocolEngine::new(1000.0, 12).unwrap();
        let result = engine.optimize().unwrap();

        assert!(result.total >= 1000.0);
        assert!(result.total <= 1200.0);
        assert_eq!(engine.viability(result.total), 1.0);
    }

    #[test]
    fn test_engine_rejects_zero_periods() {
        assert!(ProtocolEngine::new(1000.0, 0).is_err());
    }

    #[test]
    fn test_simulate_scenarios() {
        let engine = ProtocolEngine::new(1000.0, 12).unwrap();
        let scenarios = engine
            .simulate_scenarios((1.0, 5.0), (1.0, 9.0), 500.0, 5)
            .unwrap();

        assert_eq!(scenarios.len(), 5);
        assert_eq!(scenarios[0].progression[0], 1.0);
        assert_eq!(scenarios[4].progression[0], 5.0);
        assert_eq!(scenarios[4].progression[1], 14.0);
        assert!(scenarios.windows(2).all(|w| w[0].total < w[1].total));

        let single = engine
            .simulate_scenarios((2.0, 8.0), (1.0, 3.0), 500.0, 1)
            .unwrap();
        assert_eq!(single[0].progression[0], 2.0);
    }

    #[test]
    fn test_progressive_report() {
        let engine = ProtocolEngine::new(1000.0, 12).unwrap();
        let report = engine.progressive_report(&params(10.0, 10.0, 500.0)).unwrap();

        assert_eq!(report.protocol_version, "1.0");
        assert_eq!(report.protocol_type, ProtocolType::Progressive);
        assert_eq!(report.result.total_accumulated, 780.0);
        assert_eq!(report.status.status, ProtocolStatus::Incomplete);
        assert_eq!(report.status.viability, 0.78);
        assert!(report.status.insight.starts_with("Consistent progress"));
        assert!(report.result.maturity_insight.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["peak_value"], 120.0);
        assert!(json["result"].get("maturity_insight").is_none());
    }

    #[test]
    fn test_optimized_report() {
        let engine = ProtocolEngine::new(1000.0, 12).unwrap();
        let report = engine.optimized_report().unwrap();

        assert_eq!(report.protocol_type, ProtocolType::Optimized);
        assert_eq!(report.status.status, ProtocolStatus::Optimal);
        assert!(report
            .result
            .maturity_insight
            .as_deref()
            .unwrap()
            .starts_with("Maturity developing"));
    }

    #[test]
    fn test_compare() {
        let engine = ProtocolEngine::new(1000.0, 12).unwrap();
        let comparison = engine.compare(&params(1.0, 1.0, 500.0)).unwrap();

        assert_eq!(comparison.comparison.progressive.total, 78.0);
        assert_eq!(comparison.comparison.optimized.status, ProtocolStatus::Optimal);
        assert_eq!(comparison.recommendation, "Optimized protocol");
        assert!(comparison.insight.contains("more efficient"));
    }

    #[test]
    fn test_is_arithmetic_progression() {
        assert_eq!(is_arithmetic_progression(&[]), Some(0.0));
        assert_eq!(is_arithmetic_progression(&[5.0]), Some(0.0));
        assert_eq!(is_arithmetic_progression(&[1.0, 3.0, 5.0, 7.0]), Some(2.0));
        assert!(is_arithmetic_progression(&[1.0, 1.5, 2.005]).is_some());
        assert_eq!(is_arithmetic_progression(&[1.0, 2.0, 4.0]), None);
    }
}
