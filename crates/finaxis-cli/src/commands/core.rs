//! Shared command utilities
//!
//! This module contains:
//! - `load_config` - Resolve the engine configuration for a command
//! - `print_json` - Pretty-print a result as JSON
//! - `format_amount` - Render an amount for terminal output

use std::path::Path;

use anyhow::{bail, Context, Result};
use finaxis_core::EngineConfig;
use serde::Serialize;

/// Load the engine config from an explicit path, or the default resolution
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            EngineConfig::from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => EngineConfig::load().context("Failed to load engine config"),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

/// Whole units with thousands separators, e.g. `-1,234`
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && rounded != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Amount with cents, e.g. `333.33`
pub fn format_cents(value: f64) -> String {
    format!("{:.2}", value)
}

/// Fraction as a percentage, e.g. `0.15` -> `15%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
