//! Goal Planning
//!
//! Turns a savings target and a duration into a schedule, checks whether the
//! schedule fits the household income, and tracks adherence.
//!
//! ## Components
//!
//! - **Planner** - linear plans, progressive and optimized challenges,
//!   feasibility, consistency and progress tracking
//! - **Protocol** - progressive challenges validated against limits and
//!   reported with an interpretation
//! - **Narrative** - banded readings of protocol ratios

pub mod narrative;
pub mod planner;
pub mod protocol;

pub use narrative::{
    comparative_insight, interpret_curve, interpret_viability, maturity_message,
    protocol_insight, protocol_recommendation, ProtocolStatus,
};
pub use planner::{
    calculate_consistency_rate, calculate_progress, create_linear_plan,
    create_optimized_progressive_challenge, create_progressive_challenge, generate_challenge,
    is_realistic_goal, safety_margin, ChallengeProgress, FinancialChallenge, GoalFeasibility,
    GoalPlan, LinearPlan, ProgressiveChallenge, ProgressiveParams,
};
pub use protocol::{
    is_arithmetic_progression, ProgressionResult, ProtocolComparison, ProtocolEngine,
    ProtocolLimits, ProtocolReport, ProtocolType, PROTOCOL_VERSION,
};
