//! Command-line definitions and argument parsing

pub mod commands;
pub mod params;
