//! Goal planning commands

use anyhow::{bail, Context, Result};
use finaxis_core::goals::{
    calculate_consistency_rate, calculate_progress, create_linear_plan,
    create_optimized_progressive_challenge, create_progressive_challenge, generate_challenge,
    interpret_curve, is_realistic_goal, safety_margin, ProgressiveChallenge, ProgressiveParams,
};
use finaxis_core::EngineConfig;

use super::{format_amount, format_cents, format_percent, print_json};

/// Fill unset progression parameters from the configured defaults
pub fn resolve_params(
    config: &EngineConfig,
    start: Option<f64>,
    increment: Option<f64>,
    cap: Option<f64>,
) -> ProgressiveParams {
    ProgressiveParams {
        start: start.unwrap_or(config.goals.start),
        increment: increment.unwrap_or(config.goals.increment),
        cap: cap.unwrap_or(config.goals.cap),
    }
}

pub fn cmd_plan_linear(config: &EngineConfig, target: f64, periods: u32, json: bool) -> Result<()> {
    let plan = create_linear_plan(target, periods).context("Failed to build linear plan")?;

    if json {
        return print_json(&plan);
    }

    let buffered = safety_margin(target, config.goals.safety_margin_percent);

    println!();
    println!("📏 Linear Plan");
    println!("   Target:      {}", format_amount(plan.target));
    println!("   Periods:     {}", plan.periods);
    println!("   Per period:  {}", format_cents(plan.monthly_average));
    println!(
        "   With a {:.0}% safety margin, aim for {}",
        config.goals.safety_margin_percent,
        format_amount(buffered)
    );
    println!();

    Ok(())
}

fn print_challenge(title: &str, challenge: &ProgressiveChallenge) {
    println!();
    println!("📈 {}", title);
    println!(
        "   Start {}  +{} per period  cap {}",
        format_cents(challenge.start),
        format_cents(challenge.increment),
        format_cents(challenge.cap)
    );
    println!();
    for (i, value) in challenge.values.iter().enumerate() {
        println!("   {:>4}. {:>10}", i + 1, format_cents(*value));
    }
    println!();
    println!(
        "   Total: {} of {}",
        format_cents(challenge.total_accumulated),
        format_amount(challenge.target)
    );

    if challenge.goal_reached {
        println!("   ✅ Goal reached");
    } else {
        println!(
            "   ⚠️  Short by {}",
            format_cents(challenge.target - challenge.total_accumulated)
        );
    }
    println!("   {}", interpret_curve(&challenge.values));
    println!();
}

pub fn cmd_plan_progressive(
    config: &EngineConfig,
    target: f64,
    periods: u32,
    start: Option<f64>,
    increment: Option<f64>,
    cap: Option<f64>,
    json: bool,
) -> Result<()> {
    let params = resolve_params(config, start, increment, cap);
    let challenge = create_progressive_challenge(target, periods, params)
        .context("Failed to build progressive challenge")?;

    if json {
        return print_json(&challenge);
    }

    print_challenge("Progressive Challenge", &challenge);
    Ok(())
}

pub fn cmd_plan_optimized(target: f64, periods: u32, json: bool) -> Result<()> {
    let challenge = create_optimized_progressive_challenge(target, periods)
        .context("Failed to build optimized challenge")?;

    if json {
        return print_json(&challenge);
    }

    print_challenge("Optimized Challenge", &challenge);
    Ok(())
}

pub fn cmd_plan_feasibility(
    config: &EngineConfig,
    target: f64,
    periods: u32,
    income: f64,
    max_rate: Option<f64>,
    json: bool,
) -> Result<()> {
    let max_rate = max_rate.unwrap_or(config.goals.max_savings_rate);
    if max_rate <= 0.0 || max_rate > 1.0 {
        bail!("Max savings rate must be in (0, 1], got {}", max_rate);
    }

    let feasibility = is_realistic_goal(target, periods, income, max_rate)
        .context("Failed to check goal")?;

    if json {
        return print_json(&feasibility);
    }

    let icon = if feasibility.realistic { "✅" } else { "⚠️ " };
    println!();
    println!("{} {}", icon, feasibility.recommendation);
    println!(
        "   Needs {} per period ({:.2}% of income)",
        format_cents(feasibility.monthly_required),
        feasibility.percent_of_income
    );
    if let Some(suggested) = feasibility.suggested_periods {
        println!("   💡 Stretch it to {} periods to stay within budget", suggested);
    }
    println!();

    Ok(())
}

pub fn cmd_plan_consistency(expected: &[f64], actual: &[f64], json: bool) -> Result<()> {
    let rate = calculate_consistency_rate(expected, actual);

    if json {
        return print_json(&serde_json::json!({ "consistency_rate": rate }));
    }

    let icon = if rate >= 0.8 {
        "🏆"
    } else if rate >= 0.5 {
        "👍"
    } else {
        "🔁"
    };
    println!();
    println!(
        "{} Consistency: {} across {} planned periods",
        icon,
        format_percent(rate),
        expected.len()
    );
    println!();

    Ok(())
}

pub fn cmd_plan_progress(
    target: f64,
    periods: u32,
    actual: &[f64],
    linear: bool,
    json: bool,
) -> Result<()> {
    let mut challenge =
        generate_challenge(target, periods, linear).context("Failed to build challenge")?;
    let expected = challenge.plan.expected_values();
    let rows = calculate_progress(&expected, actual, target);

    if let Some(last) = rows.last() {
        challenge.progress = last.percent_complete;
        challenge.current_period = (actual.len() as u32).min(last.period);
    }

    if json {
        return print_json(&serde_json::json!({
            "challenge": challenge,
            "progress": rows,
        }));
    }

    println!();
    println!("🎯 {}", challenge.title);
    println!("   {}", challenge.description);
    println!();
    if rows.is_empty() {
        println!("   No contributions recorded yet.");
    } else {
        println!(
            "   {:>6} {:>10} {:>10} {:>12} {:>6}",
            "Period", "Planned", "Actual", "Accumulated", "Done"
        );
        for row in &rows {
            let mark = if row.actual >= row.expected { "✓" } else { "·" };
            println!(
                "   {:>6} {:>10} {:>10} {:>12} {:>5.0}% {}",
                row.period,
                format_cents(row.expected),
                format_cents(row.actual),
                format_cents(row.accumulated),
                row.percent_complete,
                mark
            );
        }
    }
    println!();

    Ok(())
}
