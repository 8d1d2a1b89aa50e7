//! Next-Period Forecasting
//!
//! Predicts the coming month from observed income/expense records and turns
//! the prediction into savings guidance.
//!
//! ## Components
//!
//! - **Weighted forecaster** - linearly weighted moving average + confidence steps
//! - **Risk classifier** - low / medium / high from balance ratio and expense trend
//! - **Insight rules** - ordered scenarios producing a message and an action
//! - **Savings advisor** - orchestrates the above into a [`ForecastResult`]
//!
//! ## Usage
//!
//! ```rust
//! use finaxis_core::forecast::predict_next_period;
//! use finaxis_core::models::PeriodRecord;
//!
//! let history = vec![
//!     PeriodRecord::actual(0, 4200.0, 3100.0).unwrap(),
//!     PeriodRecord::actual(1, 4200.0, 3000.0).unwrap(),
//! ];
//! let forecast = predict_next_period(&history, 0.15);
//! assert!(forecast.insight.can_save_target);
//! ```

pub mod advisor;
pub mod insight;
pub mod risk;
pub mod types;
pub mod weighted;

pub use advisor::{apply_actual_update, build_year_series, predict_next_period, DEFAULT_SAVINGS_RATE};
pub use insight::{
    classify_savings_rate, expense_reduction_needed, generate_insight, select_scenario,
    InsightInputs,
};
pub use risk::classify_risk;
pub use types::{
    BalanceStatus, ForecastResult, Insight, InsightScenario, RiskLevel, SavingsRateBand,
};
pub use weighted::{confidence_from_sample_count, weighted_average};
