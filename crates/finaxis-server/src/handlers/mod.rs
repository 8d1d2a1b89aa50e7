//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analysis;
pub mod forecast;
pub mod goals;
pub mod health;
pub mod protocols;

// Re-export all handlers for use in router
pub use analysis::*;
pub use forecast::*;
pub use goals::*;
pub use health::*;
pub use protocols::*;
