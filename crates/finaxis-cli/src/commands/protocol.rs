//! Savings protocol commands
//!
//! Every request is checked against the configured protocol limits before
//! anything is computed.

use anyhow::{Context, Result};
use finaxis_core::goals::{
    interpret_curve, interpret_viability, ProgressiveParams, ProtocolEngine, ProtocolReport,
    PROTOCOL_VERSION,
};
use finaxis_core::EngineConfig;

use super::plan::resolve_params;
use super::{format_amount, format_cents, format_percent, print_json};

fn build_engine(config: &EngineConfig, target: f64, periods: u32) -> Result<ProtocolEngine> {
    config
        .protocol
        .validate_goal(target, periods)
        .context("Protocol rejected")?;
    ProtocolEngine::new(target, periods).context("Failed to create protocol")
}

fn checked_params(
    config: &EngineConfig,
    start: Option<f64>,
    increment: Option<f64>,
    cap: Option<f64>,
) -> Result<ProgressiveParams> {
    let params = resolve_params(config, start, increment, cap);
    config
        .protocol
        .validate_params(&params)
        .context("Protocol rejected")?;
    Ok(params)
}

fn print_report(report: &ProtocolReport) {
    let outcome = &report.result;
    let assessment = &report.status;

    println!();
    println!("📜 Savings Protocol v{}", report.protocol_version);
    println!(
        "   Goal: {} over {} periods",
        format_amount(report.goal.target_amount),
        report.goal.periods
    );
    println!();
    println!("   Accumulated:  {}", format_cents(outcome.total_accumulated));
    println!("   Average:      {}", format_cents(outcome.average_per_period));
    println!("   Peak:         {}", format_cents(outcome.peak_value));
    println!(
        "   Viability:    {} ({})",
        format_percent(assessment.viability),
        assessment.status
    );
    println!();
    println!("   {}", assessment.insight);
    if let Some(recommendation) = &assessment.recommendation {
        println!("   💡 {}", recommendation);
    }
    if let Some(maturity) = &outcome.maturity_insight {
        println!("   🌱 {}", maturity);
    }
    println!();
}

pub fn cmd_protocol_progressive(
    config: &EngineConfig,
    target: f64,
    periods: u32,
    start: Option<f64>,
    increment: Option<f64>,
    cap: Option<f64>,
    json: bool,
) -> Result<()> {
    let engine = build_engine(config, target, periods)?;
    let params = checked_params(config, start, increment, cap)?;
    let report = engine
        .progressive_report(&params)
        .context("Failed to compute protocol")?;

    if json {
        return print_json(&report);
    }

    print_report(&report);
    Ok(())
}

pub fn cmd_protocol_optimized(
    config: &EngineConfig,
    target: f64,
    periods: u32,
    json: bool,
) -> Result<()> {
    let engine = build_engine(config, target, periods)?;
    let report = engine
        .optimized_report()
        .context("Failed to compute protocol")?;

    if json {
        return print_json(&report);
    }

    print_report(&report);
    Ok(())
}

pub fn cmd_protocol_compare(
    config: &EngineConfig,
    target: f64,
    periods: u32,
    start: Option<f64>,
    increment: Option<f64>,
    cap: Option<f64>,
    json: bool,
) -> Result<()> {
    let engine = build_engine(config, target, periods)?;
    let params = checked_params(config, start, increment, cap)?;
    let comparison = engine.compare(&params).context("Failed to compare protocols")?;

    if json {
        return print_json(&comparison);
    }

    let progressive = &comparison.comparison.progressive;
    let optimized = &comparison.comparison.optimized;

    println!();
    println!("⚖️  Protocol Comparison");
    println!("   {:<12} {:>12} {:>10}  {}", "", "Total", "Viability", "Status");
    println!(
        "   {:<12} {:>12} {:>10}  {}",
        "Progressive",
        format_cents(progressive.total),
        format_percent(progressive.viability),
        progressive.status
    );
    println!(
        "   {:<12} {:>12} {:>10}  {}",
        "Optimized",
        format_cents(optimized.total),
        format_percent(optimized.viability),
        optimized.status
    );
    println!();
    println!("   {}", comparison.insight);
    println!("   💡 {}", comparison.recommendation);
    println!();

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_protocol_simulate(
    config: &EngineConfig,
    target: f64,
    periods: u32,
    start_range: (f64, f64),
    increment_range: (f64, f64),
    cap: f64,
    samples: usize,
    json: bool,
) -> Result<()> {
    let engine = build_engine(config, target, periods)?;
    for (start, increment) in [
        (start_range.0, increment_range.0),
        (start_range.1, increment_range.1),
    ] {
        config
            .protocol
            .validate_params(&ProgressiveParams {
                start,
                increment,
                cap,
            })
            .context("Protocol rejected")?;
    }

    let scenarios = engine
        .simulate_scenarios(start_range, increment_range, cap, samples)
        .context("Failed to simulate scenarios")?;

    if json {
        return print_json(&serde_json::json!({
            "protocol_version": PROTOCOL_VERSION,
            "scenarios": scenarios,
        }));
    }

    println!();
    println!(
        "🧪 {} scenarios for {} over {} periods",
        scenarios.len(),
        format_amount(target),
        periods
    );
    println!();
    for (i, scenario) in scenarios.iter().enumerate() {
        let viability = engine.viability(scenario.total);
        println!(
            "   #{:<2} total {:>10}  avg {:>8}  peak {:>8}  {:>4}",
            i + 1,
            format_cents(scenario.total),
            format_cents(scenario.average),
            format_cents(scenario.peak),
            format_percent(viability)
        );
        println!("       {}", interpret_viability(viability));
        println!("       {}", interpret_curve(&scenario.progression));
    }
    println!();

    Ok(())
}
