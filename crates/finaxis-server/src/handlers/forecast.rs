//! Forecast handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{AppError, AppState};
use finaxis_core::{
    apply_actual_update, build_year_series, predict_next_period, records_from_inputs,
    ForecastResult, PeriodRecord, RecordInput,
};

fn into_records(records: Vec<RecordInput>) -> Result<Vec<PeriodRecord>, AppError> {
    Ok(records_from_inputs(records)?)
}

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub records: Vec<RecordInput>,
    /// Defaults to the configured rate
    pub target_savings_rate: Option<f64>,
}

/// POST /api/forecast - Predict next period with savings guidance
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForecastRequest>,
) -> Result<Json<ForecastResult>, AppError> {
    let rate = req
        .target_savings_rate
        .unwrap_or(state.engine.default_savings_rate);
    if !(0.0..=1.0).contains(&rate) {
        return Err(AppError::rejected(
            "target_savings_rate must be between 0 and 1",
        ));
    }

    let records = into_records(req.records)?;
    Ok(Json(predict_next_period(&records, rate)))
}

#[derive(Debug, Deserialize)]
pub struct YearRequest {
    pub current_period_index: u8,
    pub records: Vec<RecordInput>,
}

/// POST /api/forecast/year - Twelve periods with the next one forecast
pub async fn forecast_year(Json(req): Json<YearRequest>) -> Result<Json<Vec<PeriodRecord>>, AppError> {
    if req.current_period_index > 11 {
        return Err(AppError::rejected(
            "current_period_index must be between 0 and 11",
        ));
    }

    let records = into_records(req.records)?;
    Ok(Json(build_year_series(req.current_period_index, &records)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub records: Vec<RecordInput>,
    pub period_index: u8,
    pub income: f64,
    pub expenses: f64,
}

/// POST /api/forecast/update - Record observed values for a period
pub async fn forecast_update(
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Vec<PeriodRecord>>, AppError> {
    let records = into_records(req.records)?;
    let updated = apply_actual_update(&records, req.period_index, req.income, req.expenses)?;
    Ok(Json(updated))
}
