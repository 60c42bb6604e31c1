//! CLI command implementations
//!
//! Each subcommand has its own module with the implementation logic.

pub mod history;
pub mod holiday;
pub mod preview;
pub mod run;
