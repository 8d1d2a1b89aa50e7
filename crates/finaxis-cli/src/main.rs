//! Finaxis CLI - Know where your money is heading
//!
//! Usage:
//!   finaxis forecast --file records.csv        Predict next period
//!   finaxis analyze --profile profile.json     Score a financial profile
//!   finaxis protocol progressive -t 1000 -p 12 Build a savings protocol
//!   finaxis serve --port 3000                  Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Forecast { file, rate } => commands::cmd_forecast(&config, &file, rate, json),
        Commands::Year { file, current } => commands::cmd_year(&file, current, json),
        Commands::Update {
            file,
            period,
            income,
            expenses,
            output,
        } => commands::cmd_update(&file, period, income, expenses, output.as_deref()),
        Commands::Analyze { profile } => commands::cmd_analyze(&config, &profile, json),
        Commands::Plan { action } => match action {
            PlanAction::Linear { target, periods } => {
                commands::cmd_plan_linear(&config, target, periods, json)
            }
            PlanAction::Progressive {
                target,
                periods,
                start,
                increment,
                cap,
            } => commands::cmd_plan_progressive(
                &config, target, periods, start, increment, cap, json,
            ),
            PlanAction::Optimized { target, periods } => {
                commands::cmd_plan_optimized(target, periods, json)
            }
            PlanAction::Feasibility {
                target,
                periods,
                income,
                max_rate,
            } => commands::cmd_plan_feasibility(&config, target, periods, income, max_rate, json),
            PlanAction::Consistency { expected, actual } => {
                commands::cmd_plan_consistency(&expected, &actual, json)
            }
            PlanAction::Progress {
                target,
                periods,
                actual,
                linear,
            } => commands::cmd_plan_progress(target, periods, &actual, linear, json),
        },
        Commands::Protocol { action } => match action {
            ProtocolAction::Progressive {
                target,
                periods,
                start,
                increment,
                cap,
            } => commands::cmd_protocol_progressive(
                &config, target, periods, start, increment, cap, json,
            ),
            ProtocolAction::Optimized { target, periods } => {
                commands::cmd_protocol_optimized(&config, target, periods, json)
            }
            ProtocolAction::Compare {
                target,
                periods,
                start,
                increment,
                cap,
            } => commands::cmd_protocol_compare(
                &config, target, periods, start, increment, cap, json,
            ),
            ProtocolAction::Simulate {
                target,
                periods,
                start_min,
                start_max,
                increment_min,
                increment_max,
                cap,
                samples,
            } => commands::cmd_protocol_simulate(
                &config,
                target,
                periods,
                (start_min, start_max),
                (increment_min, increment_max),
                cap,
                samples,
                json,
            ),
        },
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => commands::cmd_serve(config, &host, port, allowed_origins).await,
        Commands::Config => commands::cmd_config(&config, cli.config.as_deref(), json),
    }
}
