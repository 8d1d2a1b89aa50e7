//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::Path;

use finaxis_core::{load_records, EngineConfig};
use tempfile::{tempdir, NamedTempFile};

use crate::commands::{self, format_amount, format_percent, resolve_params};

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn records_csv() -> NamedTempFile {
    temp_file(
        ".csv",
        "label,period_index,income,expenses,is_actual\n\
         JAN,0,4200,3100,true\n\
         FEB,1,4200,3000,true\n\
         MAR,2,4200,2900,true\n",
    )
}

fn profile_json() -> NamedTempFile {
    temp_file(
        ".json",
        r#"{
            "income": { "recurring": [{ "name": "Salary", "amount": 5000, "frequency": "monthly" }] },
            "expenses": {
                "fixed": [{ "name": "Rent", "amount": 1700, "category": "housing" }],
                "variable": [{ "category": "groceries", "average_amount": 600 }]
            },
            "goals": { "emergency_fund": { "target_amount": 15000, "current_amount": 2000, "monthly_contribution": 500 } }
        }"#,
    )
}

// ========== Formatting Tests ==========

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(0.0), "0");
    assert_eq!(format_amount(999.4), "999");
    assert_eq!(format_amount(1234.0), "1,234");
    assert_eq!(format_amount(1_234_567.0), "1,234,567");
    assert_eq!(format_amount(-4500.0), "-4,500");
    assert_eq!(format_amount(-0.2), "0");
}

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(0.15), "15%");
    assert_eq!(format_percent(1.0), "100%");
}

// ========== Config Tests ==========

#[test]
fn test_load_config_defaults() {
    let config = commands::load_config(None);
    assert!(config.is_ok());
}

#[test]
fn test_load_config_missing_explicit_path() {
    let result = commands::load_config(Some(Path::new("/nonexistent/engine.toml")));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn test_load_config_explicit_file() {
    let file = temp_file(".toml", "[forecast]\ndefault_savings_rate = 0.25\n");
    let config = commands::load_config(Some(file.path())).unwrap();
    assert_eq!(config.default_savings_rate, 0.25);
}

#[test]
fn test_cmd_config() {
    let config = EngineConfig::default();
    assert!(commands::cmd_config(&config, None, false).is_ok());
    assert!(commands::cmd_config(&config, None, true).is_ok());
}

// ========== Forecast Command Tests ==========

#[test]
fn test_cmd_forecast() {
    let file = records_csv();
    let config = EngineConfig::default();
    assert!(commands::cmd_forecast(&config, file.path(), None, false).is_ok());
    assert!(commands::cmd_forecast(&config, file.path(), Some(0.3), true).is_ok());
}

#[test]
fn test_cmd_forecast_rejects_bad_rate() {
    let file = records_csv();
    let config = EngineConfig::default();
    let result = commands::cmd_forecast(&config, file.path(), Some(1.5), false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_forecast_missing_file() {
    let config = EngineConfig::default();
    let result = commands::cmd_forecast(&config, Path::new("/nonexistent.csv"), None, false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_year() {
    let file = records_csv();
    assert!(commands::cmd_year(file.path(), 2, false).is_ok());
    assert!(commands::cmd_year(file.path(), 12, false).is_err());
}

#[test]
fn test_cmd_update_writes_output() {
    let file = records_csv();
    let dir = tempdir().unwrap();
    let output = dir.path().join("updated.json");

    commands::cmd_update(file.path(), 3, 4300.0, 3200.0, Some(&output)).unwrap();

    let records = load_records(&output).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].period_index, 3);
    assert_eq!(records[3].income, 4300.0);
    assert!(records[3].is_actual);
}

#[test]
fn test_cmd_update_rejects_bad_period() {
    let file = records_csv();
    let result = commands::cmd_update(file.path(), 12, 100.0, 50.0, None);
    assert!(result.is_err());
}

// ========== Analyze Command Tests ==========

#[test]
fn test_cmd_analyze() {
    let file = profile_json();
    let config = EngineConfig::default();
    assert!(commands::cmd_analyze(&config, file.path(), false).is_ok());
    assert!(commands::cmd_analyze(&config, file.path(), true).is_ok());
}

#[test]
fn test_cmd_analyze_invalid_profile() {
    let file = temp_file(".json", "{ not json");
    let config = EngineConfig::default();
    assert!(commands::cmd_analyze(&config, file.path(), false).is_err());
}

// ========== Plan Command Tests ==========

#[test]
fn test_resolve_params_fills_defaults() {
    let config = EngineConfig::default();
    let params = resolve_params(&config, Some(5.0), None, None);
    assert_eq!(params.start, 5.0);
    assert_eq!(params.increment, config.goals.increment);
    assert_eq!(params.cap, config.goals.cap);
}

#[test]
fn test_cmd_plan_commands() {
    let config = EngineConfig::default();
    assert!(commands::cmd_plan_linear(&config, 1200.0, 12, false).is_ok());
    assert!(commands::cmd_plan_progressive(&config, 1000.0, 12, None, None, None, false).is_ok());
    assert!(commands::cmd_plan_optimized(1000.0, 12, false).is_ok());
    assert!(commands::cmd_plan_feasibility(&config, 6000.0, 12, 3000.0, None, false).is_ok());
    assert!(commands::cmd_plan_consistency(&[100.0, 100.0], &[100.0, 50.0], false).is_ok());
    assert!(commands::cmd_plan_progress(1000.0, 12, &[1.0, 2.0], false, false).is_ok());
    assert!(commands::cmd_plan_progress(1200.0, 12, &[100.0], true, true).is_ok());
}

#[test]
fn test_cmd_plan_zero_periods_fails() {
    let config = EngineConfig::default();
    assert!(commands::cmd_plan_linear(&config, 1200.0, 0, false).is_err());
    assert!(commands::cmd_plan_optimized(1000.0, 0, false).is_err());
}

#[test]
fn test_cmd_plan_feasibility_rejects_bad_rate() {
    let config = EngineConfig::default();
    let result = commands::cmd_plan_feasibility(&config, 6000.0, 12, 3000.0, Some(0.0), false);
    assert!(result.is_err());
}

// ========== Protocol Command Tests ==========

#[test]
fn test_cmd_protocol_commands() {
    let config = EngineConfig::default();
    assert!(
        commands::cmd_protocol_progressive(&config, 1000.0, 12, Some(10.0), Some(10.0), None, false)
            .is_ok()
    );
    assert!(commands::cmd_protocol_optimized(&config, 1000.0, 12, true).is_ok());
    assert!(commands::cmd_protocol_compare(&config, 1000.0, 12, None, None, None, false).is_ok());
    assert!(commands::cmd_protocol_simulate(
        &config,
        1000.0,
        12,
        (1.0, 10.0),
        (1.0, 10.0),
        500.0,
        5,
        false
    )
    .is_ok());
}

#[test]
fn test_cmd_protocol_rejects_out_of_scope_goal() {
    let config = EngineConfig::default();
    let result = commands::cmd_protocol_optimized(&config, 5_000_000.0, 12, false);
    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("educational scope"));
}

#[test]
fn test_cmd_protocol_rejects_cap_below_start() {
    let config = EngineConfig::default();
    let result =
        commands::cmd_protocol_compare(&config, 1000.0, 12, Some(50.0), Some(1.0), Some(40.0), false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_protocol_simulate_checks_ranges() {
    let config = EngineConfig::default();
    let result = commands::cmd_protocol_simulate(
        &config,
        1000.0,
        12,
        (1.0, 500.0),
        (1.0, 10.0),
        500.0,
        3,
        false,
    );
    assert!(result.is_err());
}
