//! Execution policy: tool allowlist, amount ceiling, method blocklist.

pub mod tool_policy;

pub use tool_policy::{
    DEFAULT_ALLOWED_TOOLS, DEFAULT_BLOCKED_METHODS, DEFAULT_MAX_AMOUNT, Policy, PolicyViolation,
};
