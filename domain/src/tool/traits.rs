//! Tool domain traits
//!
//! Contains pure domain logic for parameter validation.
//! The async tool contract lives in the application layer.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// Validates a (hydrated) call against its definition without any I/O.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Checks that every required parameter is present and non-null, that
/// parameters typed as `address` hold a `0x`-prefixed 20-byte hex string,
/// and that `decimal` parameters are text or integers (never fractional
/// JSON numbers).
/// Unknown parameters are tolerated since overrides may carry extra keys.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            let value = call.params.get(&param.name);
            let present = !matches!(value, None | Some(serde_json::Value::Null));

            if param.required && !present {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }

            if present && param.param_type == "address" {
                let raw = call.require_string(&param.name)?;
                if !is_evm_address(raw) {
                    return Err(format!(
                        "Parameter '{}' is not a valid address: {}",
                        param.name, raw
                    ));
                }
            }

            if present && param.param_type == "decimal" && call.get_decimal(&param.name).is_none() {
                return Err(format!(
                    "Parameter '{}' must be a decimal string such as \"0.5\"",
                    param.name
                ));
            }
        }

        Ok(())
    }
}

/// `0x` followed by exactly 40 hex digits. Checksum casing is not enforced.
pub fn is_evm_address(raw: &str) -> bool {
    let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Check that `raw` is a plain non-negative decimal: digits with at most one
/// `.` between digits, and no more than `max_fraction_digits` after it.
///
/// Signs, exponents, separators and surplus precision are all rejected so
/// that an amount is never silently rounded or truncated.
pub fn check_decimal_amount(raw: &str, max_fraction_digits: usize) -> Result<(), String> {
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw, None),
    };
    let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());

    if !digits(whole) || !fraction.is_none_or(digits) {
        return Err(format!(
            "'{}' is not a non-negative decimal amount (digits and one '.' only)",
            raw
        ));
    }
    if fraction.map_or(0, str::len) > max_fraction_digits {
        return Err(format!(
            "'{}' has more than {} decimal places",
            raw, max_fraction_digits
        ));
    }
    Ok(())
}
