//! Savings protocol handlers
//!
//! Requests are checked against the configured protocol limits before any
//! progression is computed; violations answer 422 with the rejection reason.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::{AppError, AppState};
use finaxis_core::goals::{
    ProgressionResult, ProgressiveParams, ProtocolComparison, ProtocolEngine, ProtocolReport,
    PROTOCOL_VERSION,
};
use finaxis_core::EngineConfig;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GoalInput {
    pub target_amount: f64,
    pub periods: u32,
}

/// Progression parameters; unset values come from the configured defaults
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ProtocolInput {
    pub start_value: Option<f64>,
    pub increment: Option<f64>,
    pub cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ProtocolRequest {
    pub goal: GoalInput,
    #[serde(default)]
    pub protocol: ProtocolInput,
}

fn engine_for(config: &EngineConfig, goal: GoalInput) -> Result<ProtocolEngine, AppError> {
    config
        .protocol
        .validate_goal(goal.target_amount, goal.periods)?;
    Ok(ProtocolEngine::new(goal.target_amount, goal.periods)?)
}

fn params_for(config: &EngineConfig, input: ProtocolInput) -> Result<ProgressiveParams, AppError> {
    let params = ProgressiveParams {
        start: input.start_value.unwrap_or(config.goals.start),
        increment: input.increment.unwrap_or(config.goals.increment),
        cap: input.cap.unwrap_or(config.goals.cap),
    };
    config.protocol.validate_params(&params)?;
    Ok(params)
}

/// POST /api/protocols/progressive - Hand-tuned progression with interpretation
pub async fn protocol_progressive(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProtocolRequest>,
) -> Result<Json<ProtocolReport>, AppError> {
    let engine = engine_for(&state.engine, req.goal)?;
    let params = params_for(&state.engine, req.protocol)?;
    let report = engine.progressive_report(&params)?;

    debug!(
        status = %report.status.status,
        viability = report.status.viability,
        "Progressive protocol computed"
    );

    Ok(Json(report))
}

/// POST /api/protocols/optimized - Mathematically optimized progression
pub async fn protocol_optimized(
    State(state): State<Arc<AppState>>,
    Json(goal): Json<GoalInput>,
) -> Result<Json<ProtocolReport>, AppError> {
    let engine = engine_for(&state.engine, goal)?;
    Ok(Json(engine.optimized_report()?))
}

/// POST /api/protocols/compare - Hand-tuned against optimized
pub async fn protocol_compare(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProtocolRequest>,
) -> Result<Json<ProtocolComparison>, AppError> {
    let engine = engine_for(&state.engine, req.goal)?;
    let params = params_for(&state.engine, req.protocol)?;
    Ok(Json(engine.compare(&params)?))
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub goal: GoalInput,
    pub start_range: (f64, f64),
    pub increment_range: (f64, f64),
    pub cap: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_samples() -> usize {
    5
}

/// Upper bound on simulated scenarios per request
const MAX_SAMPLES: usize = 50;

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub protocol_version: &'static str,
    pub scenarios: Vec<ProgressionResult>,
}

/// POST /api/protocols/simulate - Evenly spaced scenarios across parameter ranges
pub async fn protocol_simulate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, AppError> {
    if req.samples == 0 || req.samples > MAX_SAMPLES {
        return Err(AppError::rejected(&format!(
            "samples must be between 1 and {}",
            MAX_SAMPLES
        )));
    }

    let engine = engine_for(&state.engine, req.goal)?;
    for (start, increment) in [
        (req.start_range.0, req.increment_range.0),
        (req.start_range.1, req.increment_range.1),
    ] {
        state.engine.protocol.validate_params(&ProgressiveParams {
            start,
            increment,
            cap: req.cap,
        })?;
    }

    let scenarios =
        engine.simulate_scenarios(req.start_range, req.increment_range, req.cap, req.samples)?;

    Ok(Json(SimulateResponse {
        protocol_version: PROTOCOL_VERSION,
        scenarios,
    }))
}

/// GET /api/protocols/info - Available protocols and validation rules
pub async fn protocol_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let limits = &state.engine.protocol;

    Json(json!({
        "protocol_version": PROTOCOL_VERSION,
        "available_protocols": [
            {
                "type": "progressive",
                "description": "Custom progression with a psychological cap",
                "parameters": ["start_value", "increment", "cap"]
            },
            {
                "type": "optimized",
                "description": "Mathematically optimized progression",
                "parameters": ["automatic"]
            }
        ],
        "validation_rules": {
            "target_amount": format!("{} to {}", limits.min_target, limits.max_target),
            "periods": format!("{} to {}", limits.min_periods, limits.max_periods),
            "start_value": format!("{} to {}", limits.min_start, limits.max_start),
            "increment": format!("{} to {}", limits.min_increment, limits.max_increment),
            "cap": format!("{} to {}", limits.min_cap, limits.max_cap)
        }
    }))
}
