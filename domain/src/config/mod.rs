//! Configuration concepts shared across layers.

pub mod validation;

pub use validation::{ConfigIssue, Severity};
