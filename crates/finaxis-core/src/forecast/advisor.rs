//! Savings Advisor - next-period prediction with a pay-yourself-first policy
//!
//! Combines the weighted forecaster, risk classifier and insight rules:
//! 1. Weighted average of observed income and expenses
//! 2. Savings reserved off income before spending
//! 3. A realistic fallback when the target doesn't fit
//! 4. Risk + insight for the predicted period
//!
//! Everything runs at full precision; monetary outputs are rounded once, when
//! the result is built.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{check_amounts, check_unique_periods, PeriodRecord, PERIODS_PER_YEAR};
use crate::rounding::round_amount;

use super::insight::{generate_insight, InsightInputs};
use super::risk::classify_risk;
use super::types::{BalanceStatus, ForecastResult};
use super::weighted::{confidence_from_sample_count, weighted_average};

/// Savings rate used when the caller has no preference
pub const DEFAULT_SAVINGS_RATE: f64 = 0.15;

/// Share of a positive balance suggested when the target doesn't fit
const REALISTIC_SAVINGS_SHARE: f64 = 0.5;

/// Predict the next period from observed records.
///
/// Records with `is_actual == false` are ignored; the rest are read in
/// `period_index` order.
pub fn predict_next_period(records: &[PeriodRecord], target_savings_rate: f64) -> ForecastResult {
    let mut actual: Vec<&PeriodRecord> = records.iter().filter(|r| r.is_actual).collect();
    actual.sort_by_key(|r| r.period_index);

    let incomes: Vec<f64> = actual.iter().map(|r| r.income).collect();
    let expenses: Vec<f64> = actual.iter().map(|r| r.expenses).collect();

    let predicted_income = weighted_average(&incomes);
    let predicted_expenses = weighted_average(&expenses);
    let predicted_balance = predicted_income - predicted_expenses;

    // Pay yourself first: savings come off income, not off what's left
    let suggested_savings = predicted_income * target_savings_rate;
    let balance_after_savings = predicted_balance - suggested_savings;
    let can_save_target = balance_after_savings >= 0.0;

    let realistic_savings = if can_save_target {
        suggested_savings
    } else {
        (predicted_balance * REALISTIC_SAVINGS_SHARE).max(0.0)
    };

    let risk_level = classify_risk(predicted_balance, predicted_income, &expenses);

    let insight = generate_insight(&InsightInputs {
        predicted_balance,
        suggested_savings,
        balance_after_savings,
        realistic_savings,
        can_save_target,
        risk_level,
        target_rate: target_savings_rate,
    });

    debug!(
        samples = actual.len(),
        predicted_income,
        predicted_expenses,
        risk = insight.risk_level.as_str(),
        scenario = insight.scenario.as_str(),
        "Next period forecast"
    );

    ForecastResult {
        predicted_income: round_amount(predicted_income),
        predicted_expenses: round_amount(predicted_expenses),
        predicted_balance: round_amount(predicted_balance),
        suggested_savings: round_amount(suggested_savings),
        balance_after_savings: round_amount(balance_after_savings),
        savings_rate: target_savings_rate,
        realistic_savings: round_amount(realistic_savings),
        status: BalanceStatus::from_balance(predicted_balance),
        confidence: confidence_from_sample_count(actual.len()),
        insight,
    }
}

/// Lay out the 12 periods of a year.
///
/// Existing records are kept verbatim. The period right after
/// `current_period_index` gets the forecast; every other missing period is
/// zeroed. Only one period is ever predicted.
pub fn build_year_series(current_period_index: u8, records: &[PeriodRecord]) -> Vec<PeriodRecord> {
    let forecast = predict_next_period(records, DEFAULT_SAVINGS_RATE);
    let next_index = current_period_index as usize + 1;

    (0..PERIODS_PER_YEAR)
        .map(|i| {
            let index = i as u8;
            if let Some(existing) = records.iter().find(|r| r.period_index == index) {
                existing.clone()
            } else if i == next_index {
                PeriodRecord::placeholder(
                    index,
                    forecast.predicted_income,
                    forecast.predicted_expenses,
                )
            } else {
                PeriodRecord::placeholder(index, 0.0, 0.0)
            }
        })
        .collect()
}

/// Record observed values for a period, returning a new series sorted by index.
///
/// An existing record for the period is replaced and marked actual; otherwise
/// a new record is inserted. The input is never modified.
pub fn apply_actual_update(
    series: &[PeriodRecord],
    period_index: u8,
    income: f64,
    expenses: f64,
) -> Result<Vec<PeriodRecord>> {
    if period_index as usize >= PERIODS_PER_YEAR {
        return Err(Error::InvalidData(format!(
            "period index {} is outside 0-{}",
            period_index,
            PERIODS_PER_YEAR - 1
        )));
    }
    check_amounts(period_index, income, expenses)?;
    check_unique_periods(series)?;

    let mut updated: Vec<PeriodRecord> = series.to_vec();

    match updated.iter_mut().find(|r| r.period_index == period_index) {
        Some(existing) => {
            existing.income = income;
            existing.expenses = expenses;
            existing.is_actual = true;
        }
        None => updated.push(PeriodRecord::actual(period_index, income, expenses)?),
    }

    updated.sort_by_key(|r| r.period_index);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::{InsightScenario, RiskLevel};

    fn records(rows: &[(u8, f64, f64)]) -> Vec<PeriodRecord> {
        rows.iter()
            .map(|&(i, income, expenses)| PeriodRecord::actual(i, income, expenses).unwrap())
            .collect()
    }

    #[test]
    fn test_predict_healthy() {
        let history = records(&[(0, 4200.0, 3100.0), (1, 4200.0, 3000.0), (2, 4200.0, 2900.0)]);
        let result = predict_next_period(&history, 0.15);

        assert_eq!(result.predicted_income, 4200.0);
        assert_eq!(result.predicted_expenses, 2967.0);
        assert_eq!(result.predicted_balance, 1233.0);
        assert_eq!(result.suggested_savings, 630.0);
        assert_eq!(result.balance_after_savings, 603.0);
        assert_eq!(result.realistic_savings, 630.0);
        assert_eq!(result.status, BalanceStatus::Positive);
        assert_eq!(result.confidence, 75);
        assert!(result.insight.can_save_target);
        assert_eq!(result.insight.risk_level, RiskLevel::Low);
        assert_eq!(result.insight.scenario, InsightScenario::Comfortable);
    }

    #[test]
    fn test_predict_empty_history() {
        let result = predict_next_period(&[], 0.15);

        assert_eq!(result.predicted_income, 0.0);
        assert_eq!(result.predicted_balance, 0.0);
        assert_eq!(result.status, BalanceStatus::Neutral);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.insight.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_predict_ignores_placeholders_and_sorts() {
        let mut history = records(&[(2, 4200.0, 2900.0), (0, 4200.0, 3100.0), (1, 4200.0, 3000.0)]);
        history.push(PeriodRecord::placeholder(3, 9999.0, 0.0));

        let shuffled = predict_next_period(&history, 0.15);
        let ordered = predict_next_period(
            &records(&[(0, 4200.0, 3100.0), (1, 4200.0, 3000.0), (2, 4200.0, 2900.0)]),
            0.15,
        );
        assert_eq!(shuffled, ordered);
    }

    #[test]
    fn test_realistic_savings_is_half_balance() {
        let history = records(&[(0, 4200.0, 3900.0), (1, 4200.0, 4000.0), (2, 4200.0, 4100.0)]);
        let result = predict_next_period(&history, 0.15);

        assert!(!result.insight.can_save_target);
        // Balance 166.67 → half is 83.33
        assert_eq!(result.realistic_savings, 83.0);
        assert!(result.realistic_savings <= result.suggested_savings);
    }

    #[test]
    fn test_build_year_series() {
        let history = records(&[(0, 4200.0, 3100.0), (1, 4200.0, 3000.0), (2, 4200.0, 2900.0)]);
        let series = build_year_series(2, &history);

        assert_eq!(series.len(), 12);
        assert_eq!(series[0], history[0]);
        assert_eq!(series[2], history[2]);

        let forecast = &series[3];
        assert!(!forecast.is_actual);
        assert_eq!(forecast.label, "APR");
        assert_eq!(forecast.income, 4200.0);
        assert_eq!(forecast.expenses, 2967.0);

        for record in &series[4..] {
            assert!(!record.is_actual);
            assert_eq!(record.income, 0.0);
            assert_eq!(record.expenses, 0.0);
        }
    }

    #[test]
    fn test_build_year_series_last_period_has_no_forecast() {
        let history = records(&[(10, 3000.0, 2000.0)]);
        let series = build_year_series(11, &history);

        assert_eq!(series.len(), 12);
        assert!(series.iter().filter(|r| !r.is_actual).all(|r| r.income == 0.0));
    }

    #[test]
    fn test_apply_actual_update_replaces() {
        let mut series = records(&[(0, 4200.0, 3100.0)]);
        series.push(PeriodRecord::placeholder(1, 4200.0, 2967.0));

        let updated = apply_actual_update(&series, 1, 4300.0, 3050.0).unwrap();

        assert_eq!(updated.len(), 2);
        assert!(updated[1].is_actual);
        assert_eq!(updated[1].income, 4300.0);
        // Input untouched
        assert!(!series[1].is_actual);
        assert_eq!(series[1].income, 4200.0);
    }

    #[test]
    fn test_apply_actual_update_inserts_sorted() {
        let series = records(&[(0, 4200.0, 3100.0), (5, 4200.0, 3000.0)]);
        let updated = apply_actual_update(&series, 3, 4100.0, 2800.0).unwrap();

        let indexes: Vec<u8> = updated.iter().map(|r| r.period_index).collect();
        assert_eq!(indexes, vec![0, 3, 5]);
        assert_eq!(updated[1].label, "APR");
    }

    #[test]
    fn test_apply_actual_update_rejects_out_of_range() {
        assert!(apply_actual_update(&[], 12, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_apply_actual_update_rejects_negative_amounts() {
        let series = records(&[(0, 4200.0, 3100.0)]);
        assert!(apply_actual_update(&series, 0, -4200.0, 3100.0).is_err());
        assert!(apply_actual_update(&series, 1, 4200.0, -1.0).is_err());
        assert!(apply_actual_update(&series, 1, f64::INFINITY, 1.0).is_err());

        // The input is untouched
        assert_eq!(series[0].income, 4200.0);
    }

    #[test]
    fn test_apply_actual_update_rejects_duplicate_periods() {
        let mut series = records(&[(0, 4200.0, 3100.0)]);
        series.push(PeriodRecord::placeholder(0, 100.0, 9000.0));
        assert!(apply_actual_update(&series, 1, 4200.0, 3000.0).is_err());
    }
}
