//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameter map carried by a tool call.
pub type ToolParams = HashMap<String, serde_json::Value>;

/// How a tool interacts with chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Never changes chain state (e.g., GET_BALANCE)
    ReadOnly,
    /// Always changes chain state (e.g., SEND_NATIVE, DEPLOY_CONTRACT)
    Mutating,
    /// Decided per call from its parameters (e.g., CONTRACT_CALL with `write`)
    Mixed,
}

impl ToolKind {
    pub fn as_str(&self) -> &str {
        match self {
            ToolKind::ReadOnly => "read_only",
            ToolKind::Mutating => "mutating",
            ToolKind::Mixed => "mixed",
        }
    }

    /// Whether a call of this kind has to pass the approval gate.
    ///
    /// `Mixed` is conservative here; tools resolve the effective kind for a
    /// concrete call before the pipeline consults this.
    pub fn requires_approval(&self) -> bool {
        !matches!(self, ToolKind::ReadOnly)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool exposed by the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "SEND_NATIVE")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Declared kind
    pub kind: ToolKind,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "address", "decimal", "abi")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ToolKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// A request to run a tool on a chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Network selector; `None` means the configured default chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    /// Parameters passed to the tool
    #[serde(default)]
    pub params: ToolParams,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            chain: None,
            params: HashMap::new(),
        }
    }

    pub fn on_chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merge `overrides` over the current params. Overrides win on conflict.
    pub fn merge_overrides(&mut self, overrides: ToolParams) {
        self.params.extend(overrides);
    }

    /// Get a string param
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    /// Get a required, non-empty string param or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        match self.get_string(key) {
            Some(s) if !s.trim().is_empty() => Ok(s),
            Some(_) => Err(format!("Parameter '{}' must not be empty", key)),
            None if self.params.contains_key(key) => {
                Err(format!("Parameter '{}' must be a string", key))
            }
            None => Err(format!("Missing required parameter: {}", key)),
        }
    }

    /// Get a boolean param. Accepts JSON booleans and the strings "true"/"false".
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.params.get(key)? {
            serde_json::Value::Bool(b) => Some(*b),
            serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get an amount param as a decimal string.
    ///
    /// Integer JSON numbers are accepted. Fractional numbers are not, since
    /// they have already been rounded through `f64`.
    pub fn get_decimal(&self, key: &str) -> Option<String> {
        match self.params.get(key)? {
            serde_json::Value::String(s) => Some(s.trim().to_string()),
            serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
            _ => None,
        }
    }

    /// Get positional call args. Missing or null means no args.
    pub fn get_args(&self, key: &str) -> Result<Vec<serde_json::Value>, String> {
        match self.params.get(key) {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(serde_json::Value::Array(items)) => Ok(items.clone()),
            Some(_) => Err(format!("Parameter '{}' must be an array", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_kind_approval() {
        assert!(!ToolKind::ReadOnly.requires_approval());
        assert!(ToolKind::Mutating.requires_approval());
        assert!(ToolKind::Mixed.requires_approval());
    }

    #[test]
    fn test_tool_kind_serde() {
        assert_eq!(serde_json::to_string(&ToolKind::ReadOnly).unwrap(), "\"read_only\"");
        let kind: ToolKind = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(kind, ToolKind::Mixed);
    }

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("GET_BALANCE", "Native balance", ToolKind::ReadOnly)
            .with_parameter(
                ToolParameter::new("address", "Account to query", true).with_type("address"),
            )
            .with_parameter(ToolParameter::new("block", "Block tag", false));

        assert_eq!(tool.name, "GET_BALANCE");
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.required_parameters().count(), 1);
        assert_eq!(tool.parameters[0].param_type, "address");
    }

    #[test]
    fn test_merge_overrides_wins() {
        let mut call = ToolCall::new("CONTRACT_CALL")
            .with_param("method", "get")
            .with_param("address", "0x01");

        let mut overrides = ToolParams::new();
        overrides.insert("address".to_string(), json!("0x02"));
        call.merge_overrides(overrides);

        assert_eq!(call.get_string("address"), Some("0x02"));
        assert_eq!(call.get_string("method"), Some("get"));
    }

    #[test]
    fn test_require_string() {
        let call = ToolCall::new("SEND_NATIVE")
            .with_param("to", "0xabc")
            .with_param("empty", "  ")
            .with_param("number", 5);

        assert_eq!(call.require_string("to").unwrap(), "0xabc");
        assert!(call.require_string("empty").unwrap_err().contains("must not be empty"));
        assert!(call.require_string("number").unwrap_err().contains("must be a string"));
        assert!(call.require_string("missing").unwrap_err().contains("Missing"));
    }

    #[test]
    fn test_get_bool_accepts_strings() {
        let call = ToolCall::new("CONTRACT_CALL")
            .with_param("a", true)
            .with_param("b", "FALSE")
            .with_param("c", "maybe");

        assert_eq!(call.get_bool("a"), Some(true));
        assert_eq!(call.get_bool("b"), Some(false));
        assert_eq!(call.get_bool("c"), None);
        assert_eq!(call.get_bool("d"), None);
    }

    #[test]
    fn test_get_decimal_and_args() {
        let call = ToolCall::new("SEND_NATIVE")
            .with_param("amount", " 0.5 ")
            .with_param("num", 2)
            .with_param("args", json!([1, "two"]))
            .with_param("bad_args", "nope");

        assert_eq!(call.get_decimal("amount").as_deref(), Some("0.5"));
        assert_eq!(call.get_decimal("num").as_deref(), Some("2"));
        assert_eq!(call.get_args("args").unwrap().len(), 2);
        assert!(call.get_args("missing").unwrap().is_empty());
        assert!(call.get_args("bad_args").is_err());
    }

    #[test]
    fn test_get_decimal_rejects_fractional_numbers() {
        let call = ToolCall::new("SEND_NATIVE")
            .with_param("amount", json!(1.000000000000000009))
            .with_param("exact", "1.000000000000000009");

        assert_eq!(call.get_decimal("amount"), None);
        assert_eq!(call.get_decimal("exact").as_deref(), Some("1.000000000000000009"));
    }
}
