//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Financial axis report for a profile
//! - `config` - Effective engine configuration
//! - `core` - Shared utilities (config loading, JSON output, amount formatting)
//! - `forecast` - Next-period forecast, year overview and actual updates
//! - `plan` - Goal plans, feasibility, consistency and progress
//! - `protocol` - Savings protocols (progressive, optimized, compare, simulate)
//! - `serve` - Web server command

pub mod analyze;
pub mod config;
pub mod core;
pub mod forecast;
pub mod plan;
pub mod protocol;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
pub use core::*;
pub use forecast::*;
pub use plan::*;
pub use protocol::*;
pub use serve::*;
