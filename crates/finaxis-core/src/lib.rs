//! Finaxis Core Library
//!
//! Deterministic financial projection and scoring for a personal finance
//! dashboard:
//! - Next-period forecasting with a pay-yourself-first savings advisor
//! - Financial axis scoring with a single suggested intervention
//! - Goal planning with linear and progressive savings schedules
//! - Savings protocols validated against configurable limits
//! - Engine configuration and input loading (CSV / JSON)
//!
//! Every computation is a pure function over caller-owned data. Inputs are
//! never modified; updates return new values.

pub mod axis;
pub mod config;
pub mod error;
pub mod forecast;
pub mod goals;
pub mod import;
pub mod models;
pub mod rounding;

pub use axis::{analyze, AxisIndex, AxisStatus, FinancialAnalysis, Intervention, MonthlyBalance};
pub use config::{default_config_path, EngineConfig, GoalDefaults};
pub use error::{Error, Result};
pub use forecast::{
    apply_actual_update, build_year_series, predict_next_period, ForecastResult, Insight,
    RiskLevel,
};
pub use goals::{GoalPlan, ProgressiveParams, ProtocolEngine, ProtocolLimits};
pub use import::{load_profile, load_records, records_from_inputs, InputFormat, RecordInput};
pub use models::{check_unique_periods, FinancialProfile, PeriodRecord};
