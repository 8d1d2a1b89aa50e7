//! Forecast command implementations (forecast, year, update)

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use finaxis_core::forecast::{classify_savings_rate, expense_reduction_needed};
use finaxis_core::{
    apply_actual_update, build_year_series, load_records, predict_next_period, EngineConfig,
    PeriodRecord,
};

use super::{format_amount, format_percent, print_json};

fn read_records(file: &Path) -> Result<Vec<PeriodRecord>> {
    load_records(file).with_context(|| format!("Failed to read records from {}", file.display()))
}

pub fn cmd_forecast(config: &EngineConfig, file: &Path, rate: Option<f64>, json: bool) -> Result<()> {
    let rate = rate.unwrap_or(config.default_savings_rate);
    if !(0.0..=1.0).contains(&rate) {
        bail!("Savings rate must be between 0 and 1, got {}", rate);
    }

    let records = read_records(file)?;
    let result = predict_next_period(&records, rate);

    if json {
        return print_json(&result);
    }

    let insight = &result.insight;

    println!();
    println!("🔮 Next Period Forecast");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:            {:>12}", format_amount(result.predicted_income));
    println!("   Expenses:          {:>12}", format_amount(result.predicted_expenses));
    println!("   Balance:           {:>12}", format_amount(result.predicted_balance));
    println!();
    println!(
        "   Savings target:    {:>12}  ({})",
        format_amount(result.suggested_savings),
        format_percent(result.savings_rate)
    );
    println!("   After savings:     {:>12}", format_amount(result.balance_after_savings));
    println!("   Realistic savings: {:>12}", format_amount(result.realistic_savings));
    println!();
    println!(
        "   Risk: {}   Status: {}   Confidence: {}%",
        insight.risk_level, result.status, result.confidence
    );
    println!("   Savings rate band: {}", classify_savings_rate(rate).as_str());
    println!();

    let icon = if insight.can_save_target { "✅" } else { "⚠️ " };
    println!("   {} {}", icon, insight.message);
    if let Some(suggestion) = &insight.suggestion {
        println!("   💡 {}", suggestion);
    }

    let reduction =
        expense_reduction_needed(result.predicted_expenses, result.predicted_income, rate);
    if reduction > 0.0 {
        println!(
            "   ✂️  Cut {} in spending to save the full {}",
            format_amount(reduction),
            format_percent(rate)
        );
    }
    println!();

    Ok(())
}

pub fn cmd_year(file: &Path, current: u8, json: bool) -> Result<()> {
    if current > 11 {
        bail!("Current period must be between 0 and 11, got {}", current);
    }

    let records = read_records(file)?;
    let series = build_year_series(current, &records);

    if json {
        return print_json(&series);
    }

    println!();
    println!("📅 Year Overview");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:<6} {:>12} {:>12} {:>12}  ", "", "Income", "Expenses", "Balance");
    for record in &series {
        let marker = if record.is_actual {
            ""
        } else if record.income != 0.0 || record.expenses != 0.0 {
            "forecast"
        } else {
            "·"
        };
        println!(
            "   {:<6} {:>12} {:>12} {:>12}  {}",
            record.label,
            format_amount(record.income),
            format_amount(record.expenses),
            format_amount(record.balance()),
            marker
        );
    }
    println!();

    Ok(())
}

pub fn cmd_update(
    file: &Path,
    period: u8,
    income: f64,
    expenses: f64,
    output: Option<&Path>,
) -> Result<()> {
    let records = read_records(file)?;
    let updated = apply_actual_update(&records, period, income, expenses)
        .context("Failed to apply update")?;

    let json = serde_json::to_string_pretty(&updated).context("Failed to serialize records")?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✅ Recorded period {} ({} records) to {}",
                period,
                updated.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
