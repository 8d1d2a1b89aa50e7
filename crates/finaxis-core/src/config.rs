//! Engine configuration
//!
//! Tunable defaults for the engine: the default savings rate, projection
//! horizons, goal planning defaults and the limits applied to savings
//! protocols. The fixed scoring thresholds (axis status boundaries, risk
//! ratios, confidence steps) are not configurable.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/finaxis/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::goals::protocol::ProtocolLimits;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Defaults for goal planning
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDefaults {
    /// Highest share of income a goal may take and still be realistic
    pub max_savings_rate: f64,
    pub safety_margin_percent: f64,
    pub start: f64,
    pub increment: f64,
    pub cap: f64,
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            max_savings_rate: 0.3,
            safety_margin_percent: 20.0,
            start: 1.0,
            increment: 1.0,
            cap: 500.0,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Savings rate used when the caller doesn't pass one
    pub default_savings_rate: f64,
    /// Periods ahead for the scored projection
    pub near_horizon: u32,
    /// Periods ahead for the long projection
    pub far_horizon: u32,
    pub goals: GoalDefaults,
    pub protocol: ProtocolLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_savings_rate: 0.15,
            near_horizon: 3,
            far_horizon: 6,
            goals: GoalDefaults::default(),
            protocol: ProtocolLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (embedded defaults if the file is missing)
    pub fn from_path(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finaxis").join("config").join("engine.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<EngineConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(ref path) if path.exists() => {
            debug!(path = %path.display(), "Loading engine config override");
            fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    projection: Option<RawProjection>,
    goals: Option<RawGoals>,
    protocol: Option<RawProtocol>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    default_savings_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawProjection {
    near_horizon: Option<u32>,
    far_horizon: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawGoals {
    max_savings_rate: Option<f64>,
    safety_margin_percent: Option<f64>,
    default_start: Option<f64>,
    default_increment: Option<f64>,
    default_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawProtocol {
    min_target: Option<f64>,
    max_target: Option<f64>,
    min_periods: Option<u32>,
    max_periods: Option<u32>,
    min_start: Option<f64>,
    max_start: Option<f64>,
    min_increment: Option<f64>,
    max_increment: Option<f64>,
    min_cap: Option<f64>,
    max_cap: Option<f64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(forecast) = raw.forecast {
        if let Some(rate) = forecast.default_savings_rate {
            config.default_savings_rate = rate;
        }
    }

    if let Some(projection) = raw.projection {
        if let Some(near) = projection.near_horizon {
            config.near_horizon = near;
        }
        if let Some(far) = projection.far_horizon {
            config.far_horizon = far;
        }
    }

    if let Some(goals) = raw.goals {
        let defaults = &mut config.goals;
        if let Some(rate) = goals.max_savings_rate {
            defaults.max_savings_rate = rate;
        }
        if let Some(margin) = goals.safety_margin_percent {
            defaults.safety_margin_percent = margin;
        }
        if let Some(start) = goals.default_start {
            defaults.start = start;
        }
        if let Some(increment) = goals.default_increment {
            defaults.increment = increment;
        }
        if let Some(cap) = goals.default_cap {
            defaults.cap = cap;
        }
    }

    if let Some(protocol) = raw.protocol {
        let limits = &mut config.protocol;
        if let Some(v) = protocol.min_target {
            limits.min_target = v;
        }
        if let Some(v) = protocol.max_target {
            limits.max_target = v;
        }
        if let Some(v) = protocol.min_periods {
            limits.min_periods = v;
        }
        if let Some(v) = protocol.max_periods {
            limits.max_periods = v;
        }
        if let Some(v) = protocol.min_start {
            limits.min_start = v;
        }
        if let Some(v) = protocol.max_start {
            limits.max_start = v;
        }
        if let Some(v) = protocol.min_increment {
            limits.min_increment = v;
        }
        if let Some(v) = protocol.max_increment {
            limits.max_increment = v;
        }
        if let Some(v) = protocol.min_cap {
            limits.min_cap = v;
        }
        if let Some(v) = protocol.max_cap {
            limits.max_cap = v;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &EngineConfig) -> Result<()> {
    if !(0.0..=1.0).contains(&config.default_savings_rate) {
        return Err(Error::Config(format!(
            "default_savings_rate must be between 0 and 1, got {}",
            config.default_savings_rate
        )));
    }
    if config.near_horizon == 0 || config.far_horizon < config.near_horizon {
        return Err(Error::Config(format!(
            "projection horizons must satisfy 0 < near ({}) <= far ({})",
            config.near_horizon, config.far_horizon
        )));
    }
    if config.goals.max_savings_rate <= 0.0 || config.goals.max_savings_rate > 1.0 {
        return Err(Error::Config(format!(
            "max_savings_rate must be in (0, 1], got {}",
            config.goals.max_savings_rate
        )));
    }
    Ok(())
}
