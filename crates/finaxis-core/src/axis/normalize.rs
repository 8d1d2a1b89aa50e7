//! Normalization - turns a profile into predictable monthly flows

use crate::models::{FinancialProfile, VariableExpense};

use super::types::{DebtLoad, ExpenseTotals};

/// Monthly income from active recurring streams plus other inflows
pub fn normalize_monthly_income(profile: &FinancialProfile) -> f64 {
    let recurring: f64 = profile
        .income
        .recurring
        .iter()
        .filter(|stream| stream.is_active)
        .map(|stream| stream.amount * stream.frequency.monthly_factor())
        .sum();

    recurring + profile.income.other
}

/// Active fixed expenses plus the average of each variable category
pub fn normalize_monthly_expenses(profile: &FinancialProfile) -> ExpenseTotals {
    let fixed: f64 = profile
        .expenses
        .fixed
        .iter()
        .filter(|expense| expense.is_active)
        .map(|expense| expense.amount)
        .sum();

    let variable: f64 = profile
        .expenses
        .variable
        .iter()
        .map(|expense| expense.average_amount)
        .sum();

    ExpenseTotals {
        fixed,
        variable,
        total: fixed + variable,
    }
}

/// Installments, outstanding debt and the amount-weighted interest rate
pub fn normalize_debt_load(profile: &FinancialProfile) -> DebtLoad {
    let monthly_payment: f64 = profile.debts.iter().map(|d| d.installment_amount).sum();
    let total_debt: f64 = profile.debts.iter().map(|d| d.total_amount).sum();

    let weighted_interest_rate = if total_debt > 0.0 {
        profile
            .debts
            .iter()
            .map(|d| d.interest_rate * d.total_amount)
            .sum::<f64>()
            / total_debt
    } else {
        0.0
    };

    DebtLoad {
        monthly_payment,
        total_debt,
        weighted_interest_rate,
    }
}

/// Mean per-period growth across variable categories
pub fn variable_trend(expenses: &[VariableExpense]) -> f64 {
    if expenses.is_empty() {
        return 0.0;
    }
    expenses.iter().map(|e| e.trend.monthly_rate()).sum::<f64>() / expenses.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Debt, FixedCategory, FixedExpense, Frequency, IncomeSources, RecurringIncome, Trend,
        VariableCategory,
    };

    fn stream(amount: f64, frequency: Frequency, is_active: bool) -> RecurringIncome {
        RecurringIncome {
            name: "stream".to_string(),
            amount,
            frequency,
            is_active,
        }
    }

    #[test]
    fn test_income_frequency_conversion() {
        let profile = FinancialProfile {
            income: IncomeSources {
                recurring: vec![
                    stream(3000.0, Frequency::Monthly, true),
                    stream(1200.0, Frequency::Biweekly, true),
                    stream(300.0, Frequency::Weekly, true),
                    stream(9999.0, Frequency::Monthly, false),
                ],
                other: 150.0,
            },
            ..Default::default()
        };

        // 3000 + 2600 + 1300 + 150
        assert!((normalize_monthly_income(&profile) - 7050.0).abs() < 1e-9);
    }

    #[test]
    fn test_expenses_use_active_fixed_and_variable_averages() {
        let mut profile = FinancialProfile::default();
        profile.expenses.fixed = vec![
            FixedExpense {
                name: "Rent".to_string(),
                amount: 1500.0,
                category: FixedCategory::Housing,
                is_active: true,
            },
            FixedExpense {
                name: "Old gym".to_string(),
                amount: 80.0,
                category: FixedCategory::Other,
                is_active: false,
            },
        ];
        profile.expenses.variable = vec![VariableExpense {
            category: VariableCategory::Groceries,
            average_amount: 700.0,
            last_month_amount: Some(900.0),
            trend: Trend::Increasing,
        }];

        let totals = normalize_monthly_expenses(&profile);
        assert_eq!(totals.fixed, 1500.0);
        assert_eq!(totals.variable, 700.0);
        assert_eq!(totals.total, 2200.0);
    }

    #[test]
    fn test_debt_load_weighted_rate() {
        let mut profile = FinancialProfile::default();
        profile.debts = vec![
            Debt {
                name: "Card".to_string(),
                total_amount: 1000.0,
                installment_amount: 100.0,
                interest_rate: 30.0,
                remaining_months: None,
            },
            Debt {
                name: "Car".to_string(),
                total_amount: 3000.0,
                installment_amount: 250.0,
                interest_rate: 10.0,
                remaining_months: Some(12),
            },
        ];

        let load = normalize_debt_load(&profile);
        assert_eq!(load.monthly_payment, 350.0);
        assert_eq!(load.total_debt, 4000.0);
        assert!((load.weighted_interest_rate - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_debt_has_zero_rate() {
        let load = normalize_debt_load(&FinancialProfile::default());
        assert_eq!(load.total_debt, 0.0);
        assert_eq!(load.weighted_interest_rate, 0.0);
    }

    #[test]
    fn test_variable_trend_average() {
        let expense = |trend| VariableExpense {
            category: VariableCategory::Leisure,
            average_amount: 100.0,
            last_month_amount: None,
            trend,
        };
        assert_eq!(variable_trend(&[]), 0.0);
        let mixed = [expense(Trend::Increasing), expense(Trend::Decreasing)];
        assert!((variable_trend(&mixed) - 0.01).abs() < 1e-12);
    }
}
