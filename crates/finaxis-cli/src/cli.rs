//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Finaxis - Know where your money is heading
#[derive(Parser)]
#[command(name = "finaxis")]
#[command(about = "Financial forecasting, health scoring and savings planning", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to the data dir override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict next period's balance and savings
    Forecast {
        /// Period records (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Target savings rate (0-1, defaults to the configured rate)
        #[arg(short, long)]
        rate: Option<f64>,
    },

    /// Lay out the 12 periods of a year with next period's forecast
    Year {
        /// Period records (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Index of the current period (0 = JAN ... 11 = DEC)
        #[arg(short, long)]
        current: u8,
    },

    /// Record observed income and expenses for a period
    Update {
        /// Period records (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Period index (0-11)
        #[arg(short, long)]
        period: u8,

        /// Observed income
        #[arg(long)]
        income: f64,

        /// Observed expenses
        #[arg(long)]
        expenses: f64,

        /// Write the updated series as JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score a financial profile and suggest one action
    Analyze {
        /// Financial profile (.json)
        #[arg(short, long)]
        profile: PathBuf,
    },

    /// Plan a savings goal
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Build and interpret a savings protocol
    Protocol {
        #[command(subcommand)]
        action: ProtocolAction,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origins (comma-separated, also read from FINAXIS_ALLOWED_ORIGINS)
        #[arg(long, value_delimiter = ',')]
        allowed_origins: Vec<String>,
    },

    /// Show the effective engine configuration
    Config,
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Split the target evenly across periods
    Linear {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,
    },

    /// Start small and grow by a fixed increment up to a cap
    Progressive {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,

        /// First contribution (defaults to config)
        #[arg(long)]
        start: Option<f64>,

        /// Growth per period (defaults to config)
        #[arg(long)]
        increment: Option<f64>,

        /// Highest contribution (defaults to config)
        #[arg(long)]
        cap: Option<f64>,
    },

    /// Progression solved to land near the target
    Optimized {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,
    },

    /// Check whether a goal fits the monthly income
    Feasibility {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,

        /// Monthly income
        #[arg(short, long)]
        income: f64,

        /// Highest share of income to commit (defaults to config)
        #[arg(long)]
        max_rate: Option<f64>,
    },

    /// Measure how closely actual contributions followed the plan
    Consistency {
        /// Planned contributions (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        expected: Vec<f64>,

        /// Actual contributions (comma-separated)
        #[arg(long, value_delimiter = ',')]
        actual: Vec<f64>,
    },

    /// Track actual contributions against a generated challenge
    Progress {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,

        /// Actual contributions so far (comma-separated)
        #[arg(long, value_delimiter = ',')]
        actual: Vec<f64>,

        /// Track against a linear plan instead of a progressive challenge
        #[arg(long)]
        linear: bool,
    },
}

#[derive(Subcommand)]
pub enum ProtocolAction {
    /// Hand-tuned progressive protocol
    Progressive {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,

        #[arg(long)]
        start: Option<f64>,

        #[arg(long)]
        increment: Option<f64>,

        #[arg(long)]
        cap: Option<f64>,
    },

    /// Mathematically optimized protocol
    Optimized {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,
    },

    /// Compare a hand-tuned protocol with the optimized one
    Compare {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,

        #[arg(long)]
        start: Option<f64>,

        #[arg(long)]
        increment: Option<f64>,

        #[arg(long)]
        cap: Option<f64>,
    },

    /// Simulate evenly spaced scenarios across start and increment ranges
    Simulate {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        periods: u32,

        /// Lowest start value
        #[arg(long, default_value = "1")]
        start_min: f64,

        /// Highest start value
        #[arg(long, default_value = "10")]
        start_max: f64,

        /// Lowest increment
        #[arg(long, default_value = "1")]
        increment_min: f64,

        /// Highest increment
        #[arg(long, default_value = "10")]
        increment_max: f64,

        #[arg(long, default_value = "500")]
        cap: f64,

        /// Number of scenarios
        #[arg(long, default_value = "5")]
        samples: usize,
    },
}
