//! Protocol narrative - turns progression ratios into plain-language readings
//!
//! Every function here is a pure lookup over fixed bands.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolStatus {
    Reached,
    InProgress,
    Incomplete,
    /// Reserved for optimized protocols
    Optimal,
}

impl ProtocolStatus {
    /// Status from `total / target`
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            ProtocolStatus::Reached
        } else if ratio >= 0.8 {
            ProtocolStatus::InProgress
        } else {
            ProtocolStatus::Incomplete
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolStatus::Reached => "reached",
            ProtocolStatus::InProgress => "in_progress",
            ProtocolStatus::Incomplete => "incomplete",
            ProtocolStatus::Optimal => "optimal",
        }
    }
}

impl fmt::Display for ProtocolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reading of how far `total` goes toward `target`
pub fn protocol_insight(total: f64, target: f64) -> &'static str {
    if target <= 0.0 {
        return "Invalid goal. Nothing to evaluate.";
    }

    let ratio = total / target;
    if ratio >= 1.0 {
        "Consistency consolidated. Financial base stabilized. Protocol fully under control."
    } else if ratio >= 0.85 {
        "Solid pace. The system is working. Financial maturity is developing."
    } else if ratio >= 0.70 {
        "Consistent progress detected. Time is working in your favor. Keep the protocol active."
    } else if ratio >= 0.50 {
        "Measurable early progress. Patterns are starting to emerge. Avoid interruptions."
    } else if ratio >= 0.30 {
        "Building phase. The habit is still forming. Consistency matters more than amount."
    } else {
        "Adaptation phase. Behavior needs time to form. Focus on consistency, not speed."
    }
}

/// Next step for a given viability ratio
pub fn protocol_recommendation(ratio: f64) -> &'static str {
    if ratio >= 1.0 {
        "Protocol completed. Consider setting a new goal to keep the rhythm."
    } else if ratio >= 0.85 {
        "Keep going. Minor adjustments can improve the final result."
    } else if ratio >= 0.50 {
        "Viable protocol. A gradual increase in pace can speed things up."
    } else if ratio >= 0.30 {
        "Revisit the parameters. Small progressive increments can improve viability."
    } else {
        "The goal may be out of reach with this protocol. Adjust the duration or progression."
    }
}

pub fn interpret_viability(viability: f64) -> &'static str {
    if viability >= 0.95 {
        "Highly viable. Success is very likely."
    } else if viability >= 0.80 {
        "Viable. Minor adjustments can optimize it."
    } else if viability >= 0.60 {
        "Partially viable. Needs strategic adjustments."
    } else if viability >= 0.40 {
        "Low viability. Review the protocol parameters."
    } else {
        "Not viable with the current protocol. Adjustments needed."
    }
}

/// Compare a hand-tuned progression with the optimized one
pub fn comparative_insight(progressive_total: f64, optimized_total: f64, target: f64) -> String {
    let ratio = |total: f64| if target > 0.0 { total / target } else { 0.0 };
    let progressive_ratio = ratio(progressive_total);
    let optimized_ratio = ratio(optimized_total);

    if (optimized_ratio - progressive_ratio).abs() < 0.05 {
        "The progressive protocol is close to optimal. Keep the current parameters.".to_string()
    } else if optimized_ratio > progressive_ratio {
        let improvement = if progressive_ratio > 0.0 {
            (optimized_ratio - progressive_ratio) / progressive_ratio * 100.0
        } else {
            0.0
        };
        format!(
            "The optimized protocol is {:.1}% more efficient. Consider adjusting increments.",
            improvement
        )
    } else {
        "The progressive protocol is adequate. Further optimization is not critical.".to_string()
    }
}

/// Shape of a progression, second half against first half
pub fn interpret_curve(progression: &[f64]) -> &'static str {
    if progression.len() < 3 {
        return "Not enough data to read the curve.";
    }

    let (first, second) = progression.split_at(progression.len() / 2);
    let first_half: f64 = first.iter().sum();
    let second_half: f64 = second.iter().sum();

    if second_half > first_half * 1.2 {
        "Accelerating curve. Momentum has built over time."
    } else if second_half > first_half * 0.8 {
        "Steady curve. A consistent pace held across periods."
    } else {
        "Decelerating curve. Check for limiting factors in the protocol."
    }
}

pub fn maturity_message(periods: u32) -> &'static str {
    match periods {
        24.. => "Maturity consolidated. Long-term financial behavior is established.",
        12..=23 => "Maturity developing. A year of consistency shows real commitment.",
        6..=11 => "Early pattern formed. Six months mark the move from experiment to habit.",
        3..=5 => "Adaptation phase. Three cycles are the minimum to validate a protocol.",
        _ => "Protocol start. Behavior is still forming.",
    }
}
