//! Profile analysis command

use std::path::Path;

use anyhow::{Context, Result};
use finaxis_core::axis::{AxisStatus, InterventionKind};
use finaxis_core::{analyze, load_profile, EngineConfig};

use super::{format_amount, print_json};

pub fn cmd_analyze(config: &EngineConfig, profile_path: &Path, json: bool) -> Result<()> {
    let profile = load_profile(profile_path)
        .with_context(|| format!("Failed to read profile from {}", profile_path.display()))?;
    let analysis = analyze(&profile, config);

    if json {
        return print_json(&analysis);
    }

    let index = &analysis.axis_index;
    let status_icon = match index.status {
        AxisStatus::Stable => "🟢",
        AxisStatus::Warning => "🟡",
        AxisStatus::Critical => "🔴",
    };

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         🧭 Financial Axis Report         │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {} Score: {}/100 ({})", status_icon, index.score, index.status);
    println!("     Income committed:  {:.1}%", index.factors.income_commitment);
    println!("     Reserve allocated: {:.1}%", index.factors.reserve_allocation);
    println!("     Debt weight:       {:.1}%", index.factors.debt_weight);
    println!("     Trend:             {}", index.factors.future_trend.as_str());
    println!();

    println!("  Balance");
    for balance in [
        &analysis.current,
        &analysis.projections.near,
        &analysis.projections.far,
    ] {
        let label = if balance.periods_ahead == 0 {
            "now".to_string()
        } else {
            format!("+{} periods", balance.periods_ahead)
        };
        println!(
            "     {:<12} net {:>10}   ({}% confidence)",
            label,
            format_amount(balance.net_balance),
            balance.confidence
        );
    }
    println!();

    if !analysis.bottlenecks.is_empty() {
        println!("  Largest expenses");
        for bottleneck in &analysis.bottlenecks {
            println!(
                "     {:<24} {:>10}  {:>5.1}%",
                bottleneck.category,
                format_amount(bottleneck.amount),
                bottleneck.percentage
            );
            println!("       {}", bottleneck.suggestion);
        }
        println!();
    }

    let capacity = &analysis.saving_capacity;
    println!(
        "  Saving now {} / could save {}",
        format_amount(capacity.current),
        format_amount(capacity.potential)
    );
    for blocker in &capacity.blockers {
        println!("     ⛔ {}", blocker);
    }
    println!(
        "  Emergency reserve: {:.0}% complete",
        analysis.reserve_progress.percent
    );
    for milestone in &analysis.reserve_progress.milestones {
        println!("     🏅 {}", milestone);
    }
    println!();

    let intervention = &analysis.intervention;
    let kind_icon = match intervention.kind {
        InterventionKind::Corrective => "🚨",
        InterventionKind::Preventive => "🛡️ ",
        InterventionKind::Motivational => "🎯",
    };
    println!("  {} {}", kind_icon, intervention.message);
    println!("     Next step: {}", intervention.micro_action);
    println!("     Why: {}", intervention.impact);
    println!();

    Ok(())
}
