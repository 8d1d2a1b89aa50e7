//! Financial axis analysis handler

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use crate::{AppError, AppState};
use finaxis_core::{analyze, FinancialAnalysis, FinancialProfile};

/// POST /api/analysis - Score a profile and suggest one intervention
pub async fn analysis(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<FinancialProfile>,
) -> Result<Json<FinancialAnalysis>, AppError> {
    let amounts = profile
        .income
        .recurring
        .iter()
        .map(|r| r.amount)
        .chain(std::iter::once(profile.income.other))
        .chain(profile.expenses.fixed.iter().map(|e| e.amount))
        .chain(profile.expenses.variable.iter().map(|e| e.average_amount))
        .chain(
            profile
                .expenses
                .variable
                .iter()
                .filter_map(|e| e.last_month_amount),
        )
        .chain(profile.debts.iter().flat_map(|d| {
            [d.total_amount, d.installment_amount, d.interest_rate]
        }))
        .chain([
            profile.goals.emergency_fund.target_amount,
            profile.goals.emergency_fund.current_amount,
            profile.goals.emergency_fund.monthly_contribution,
        ]);
    for amount in amounts {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::rejected(
                "Profile amounts must be non-negative numbers.",
            ));
        }
    }

    let result = analyze(&profile, &state.engine);
    debug!(
        score = result.axis_index.score,
        status = %result.axis_index.status,
        "Analysis computed"
    );

    Ok(Json(result))
}
