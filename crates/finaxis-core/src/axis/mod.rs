//! Financial Axis Scorer
//!
//! Reads a structured [`FinancialProfile`](crate::models::FinancialProfile)
//! and answers "is this household on its axis?".
//!
//! ## Steps
//!
//! 1. **Normalize** income, expenses and debt into monthly figures
//! 2. **Project** the monthly position now and a few periods ahead
//! 3. **Score** the profile 0-100 and derive a stable / warning / critical status
//! 4. **Intervene** with exactly one concrete action
//!
//! [`analyze`] runs every step and adds spending bottlenecks, saving capacity
//! and emergency reserve progress.

pub mod analysis;
pub mod intervention;
pub mod normalize;
pub mod scorer;
pub mod types;

pub use analysis::{analyze, identify_bottlenecks, reserve_progress, saving_capacity};
pub use intervention::generate_intervention;
pub use normalize::{normalize_debt_load, normalize_monthly_expenses, normalize_monthly_income};
pub use scorer::{compute_axis_index, future_trend, project_balance};
pub use types::{
    AxisFactors, AxisIndex, AxisStatus, Bottleneck, DebtLoad, ExpenseTotals, FinancialAnalysis,
    FutureTrend, Intervention, InterventionKind, MonthlyBalance, Priority, Projections,
    ReserveProgress, SavingCapacity,
};
