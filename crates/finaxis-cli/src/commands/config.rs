//! Effective configuration display

use std::path::Path;

use anyhow::Result;
use finaxis_core::{default_config_path, EngineConfig};

use super::{format_percent, print_json};

pub fn cmd_config(config: &EngineConfig, explicit_path: Option<&Path>, json: bool) -> Result<()> {
    let source = match explicit_path {
        Some(path) => path.display().to_string(),
        None => match default_config_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };

    if json {
        return print_json(&serde_json::json!({
            "source": source,
            "default_savings_rate": config.default_savings_rate,
            "near_horizon": config.near_horizon,
            "far_horizon": config.far_horizon,
            "goals": {
                "max_savings_rate": config.goals.max_savings_rate,
                "safety_margin_percent": config.goals.safety_margin_percent,
                "start": config.goals.start,
                "increment": config.goals.increment,
                "cap": config.goals.cap,
            },
            "protocol": config.protocol,
        }));
    }

    let limits = &config.protocol;

    println!();
    println!("⚙️  Engine Configuration");
    println!("   Source: {}", source);
    println!();
    println!("   Forecast");
    println!("     Default savings rate:  {}", format_percent(config.default_savings_rate));
    println!();
    println!("   Projection");
    println!("     Near horizon:          {} periods", config.near_horizon);
    println!("     Far horizon:           {} periods", config.far_horizon);
    println!();
    println!("   Goals");
    println!("     Max savings rate:      {}", format_percent(config.goals.max_savings_rate));
    println!("     Safety margin:         {}%", config.goals.safety_margin_percent);
    println!(
        "     Progression:           start {}, +{}, cap {}",
        config.goals.start, config.goals.increment, config.goals.cap
    );
    println!();
    println!("   Protocol limits");
    println!("     Target:                {} - {}", limits.min_target, limits.max_target);
    println!("     Periods:               {} - {}", limits.min_periods, limits.max_periods);
    println!("     Start:                 {} - {}", limits.min_start, limits.max_start);
    println!("     Increment:             {} - {}", limits.min_increment, limits.max_increment);
    println!("     Cap:                   {} - {}", limits.min_cap, limits.max_cap);
    println!();

    if explicit_path.is_none() {
        if let Some(path) = default_config_path() {
            println!("   Override file: {}", path.display());
            println!();
        }
    }

    Ok(())
}
