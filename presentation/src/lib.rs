//! Presentation layer for blockagent
//!
//! This crate contains CLI definitions, parameter parsing and output
//! formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, RunArgs};
pub use cli::params::{ParamError, build_params, parse_key_value};
pub use output::console::ConsoleFormatter;
