//! Goal planning handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use finaxis_core::goals::{
    calculate_consistency_rate, calculate_progress, create_linear_plan,
    create_optimized_progressive_challenge, create_progressive_challenge, generate_challenge,
    is_realistic_goal, ChallengeProgress, FinancialChallenge, GoalFeasibility, LinearPlan,
    ProgressiveChallenge, ProgressiveParams,
};

/// Plans are built period by period, so their length is bounded by the
/// configured protocol limit
fn check_periods(state: &AppState, periods: u32) -> Result<(), AppError> {
    let max = state.engine.protocol.max_periods;
    if periods > max {
        return Err(AppError::rejected(&format!(
            "A plan can span at most {} periods.",
            max
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub target: f64,
    pub periods: u32,
}

/// POST /api/goals/linear - Split the target evenly
pub async fn goal_linear(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoalRequest>,
) -> Result<Json<LinearPlan>, AppError> {
    check_periods(&state, req.periods)?;
    Ok(Json(create_linear_plan(req.target, req.periods)?))
}

#[derive(Debug, Deserialize)]
pub struct ProgressiveGoalRequest {
    pub target: f64,
    pub periods: u32,
    pub start: Option<f64>,
    pub increment: Option<f64>,
    pub cap: Option<f64>,
}

/// POST /api/goals/progressive - Growing contributions up to a cap
pub async fn goal_progressive(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProgressiveGoalRequest>,
) -> Result<Json<ProgressiveChallenge>, AppError> {
    check_periods(&state, req.periods)?;
    let defaults = &state.engine.goals;
    let params = ProgressiveParams {
        start: req.start.unwrap_or(defaults.start),
        increment: req.increment.unwrap_or(defaults.increment),
        cap: req.cap.unwrap_or(defaults.cap),
    };

    Ok(Json(create_progressive_challenge(
        req.target,
        req.periods,
        params,
    )?))
}

/// POST /api/goals/optimized - Progression solved to land near the target
pub async fn goal_optimized(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoalRequest>,
) -> Result<Json<ProgressiveChallenge>, AppError> {
    check_periods(&state, req.periods)?;
    Ok(Json(create_optimized_progressive_challenge(
        req.target,
        req.periods,
    )?))
}

#[derive(Debug, Deserialize)]
pub struct FeasibilityRequest {
    pub target: f64,
    pub periods: u32,
    pub monthly_income: f64,
    /// Defaults to the configured rate
    pub max_savings_rate: Option<f64>,
}

/// POST /api/goals/feasibility - Does the goal fit the income?
pub async fn goal_feasibility(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeasibilityRequest>,
) -> Result<Json<GoalFeasibility>, AppError> {
    let max_rate = req
        .max_savings_rate
        .unwrap_or(state.engine.goals.max_savings_rate);
    if max_rate <= 0.0 || max_rate > 1.0 {
        return Err(AppError::rejected("max_savings_rate must be in (0, 1]"));
    }

    Ok(Json(is_realistic_goal(
        req.target,
        req.periods,
        req.monthly_income,
        max_rate,
    )?))
}

#[derive(Debug, Deserialize)]
pub struct ConsistencyRequest {
    pub expected: Vec<f64>,
    #[serde(default)]
    pub actual: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct ConsistencyResponse {
    /// 0 to 1
    pub consistency_rate: f64,
}

/// POST /api/goals/consistency - Adherence of actual contributions to the plan
pub async fn goal_consistency(Json(req): Json<ConsistencyRequest>) -> Json<ConsistencyResponse> {
    Json(ConsistencyResponse {
        consistency_rate: calculate_consistency_rate(&req.expected, &req.actual),
    })
}

#[derive(Debug, Deserialize)]
pub struct ChallengeRequest {
    pub target: f64,
    pub periods: u32,
    #[serde(default)]
    pub linear: bool,
}

/// POST /api/goals/challenge - Wrap a plan as a presentable challenge
pub async fn goal_challenge(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChallengeRequest>,
) -> Result<Json<FinancialChallenge>, AppError> {
    check_periods(&state, req.periods)?;
    Ok(Json(generate_challenge(req.target, req.periods, req.linear)?))
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub expected: Vec<f64>,
    #[serde(default)]
    pub actual: Vec<f64>,
    pub target: f64,
}

/// POST /api/goals/progress - Running totals against the plan
pub async fn goal_progress(Json(req): Json<ProgressRequest>) -> Json<Vec<ChallengeProgress>> {
    Json(calculate_progress(&req.expected, &req.actual, req.target))
}
