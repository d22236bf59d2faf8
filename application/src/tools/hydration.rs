//! Parameter helpers shared by the contract tools.

use blockagent_domain::{ContractTemplate, ToolCall, ToolError};
use serde_json::Value;

/// Param naming a built-in contract template.
pub const TEMPLATE_PARAM: &str = "template";

/// Fill `abi` (and `bytecode` when `with_bytecode`) from the `template`
/// param. Explicitly supplied values win over the template.
pub fn apply_template(call: &mut ToolCall, with_bytecode: bool) -> Result<(), ToolError> {
    let Some(raw) = call.params.get(TEMPLATE_PARAM) else {
        return Ok(());
    };
    let name = raw
        .as_str()
        .ok_or_else(|| ToolError::validation("Parameter 'template' must be a string"))?;
    let template: ContractTemplate = name.parse().map_err(ToolError::Validation)?;

    if is_absent(call, "abi") {
        call.params.insert("abi".to_string(), template.abi());
    }
    if with_bytecode && is_absent(call, "bytecode") {
        call.params
            .insert("bytecode".to_string(), Value::String(template.bytecode().to_string()));
    }
    Ok(())
}

fn is_absent(call: &ToolCall, key: &str) -> bool {
    matches!(call.params.get(key), None | Some(Value::Null))
}

/// The `abi` param as a JSON array. A string holding JSON is accepted.
pub fn abi_param(call: &ToolCall) -> Result<Value, ToolError> {
    match call.params.get("abi") {
        Some(value @ Value::Array(_)) => Ok(value.clone()),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(value @ Value::Array(_)) => Ok(value),
            Ok(_) => Err(ToolError::validation("Parameter 'abi' must be a JSON array")),
            Err(e) => Err(ToolError::validation(format!(
                "Parameter 'abi' is not valid JSON: {}",
                e
            ))),
        },
        Some(_) => Err(ToolError::validation("Parameter 'abi' must be a JSON array")),
        None => Err(ToolError::validation("Missing required parameter: abi")),
    }
}

/// The optional `args` param.
pub fn args_param(call: &ToolCall) -> Result<Vec<Value>, ToolError> {
    call.get_args("args").map_err(ToolError::Validation)
}
