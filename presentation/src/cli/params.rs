//! Parameter parsing for `run`.
//!
//! `key=value` values are read as JSON when they parse as JSON (`true`,
//! `42`, `["a", 1]`) and kept as plain strings otherwise, so addresses need
//! no quoting. Decimal numbers such as `0.5` stay text so amounts keep
//! every digit.

use blockagent_domain::ToolParams;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("expected KEY=VALUE, got '{0}'")]
    MissingSeparator(String),

    #[error("parameter name is empty in '{0}'")]
    EmptyKey(String),

    #[error("--params-json must be a JSON object: {0}")]
    InvalidJson(String),
}

/// Parse one `key=value` pair.
pub fn parse_key_value(raw: &str) -> Result<(String, Value), ParamError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ParamError::MissingSeparator(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParamError::EmptyKey(raw.to_string()));
    }
    Ok((key.to_string(), parse_value(value)))
}

fn parse_value(raw: &str) -> Value {
    match serde_json::from_str(raw) {
        // Fractional and oversized numbers would round through f64
        Ok(Value::Number(n)) if !(n.is_u64() || n.is_i64()) => Value::String(raw.to_string()),
        Ok(value) => value,
        Err(_) => Value::String(raw.to_string()),
    }
}

/// Build tool params from `--params-json` and repeated `--param`.
///
/// `--param` entries are applied after the JSON object and win on conflict.
pub fn build_params(json: Option<&str>, pairs: &[String]) -> Result<ToolParams, ParamError> {
    let mut params = ToolParams::new();

    if let Some(json) = json {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => params.extend(map),
            Ok(other) => return Err(ParamError::InvalidJson(format!("got {}", other))),
            Err(e) => return Err(ParamError::InvalidJson(e.to_string())),
        }
    }

    for pair in pairs {
        let (key, value) = parse_key_value(pair)?;
        params.insert(key, value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockagent_domain::ToolCall;
    use serde_json::json;

    #[test]
    fn test_values_are_json_when_possible() {
        assert_eq!(parse_key_value("write=true").unwrap().1, json!(true));
        assert_eq!(parse_key_value("args=[1,\"a\"]").unwrap().1, json!([1, "a"]));
        assert_eq!(
            parse_key_value("to=0x2222222222222222222222222222222222222222")
                .unwrap()
                .1,
            json!("0x2222222222222222222222222222222222222222")
        );
        assert_eq!(parse_key_value("method=get").unwrap().1, json!("get"));
    }

    #[test]
    fn test_decimal_amounts_keep_every_digit() {
        let params = build_params(None, &["amount=1.000000000000000009".to_string()]).unwrap();
        assert_eq!(params["amount"], json!("1.000000000000000009"));

        let mut call = ToolCall::new("SEND_NATIVE");
        call.params = params;
        assert_eq!(call.get_decimal("amount").as_deref(), Some("1.000000000000000009"));

        assert_eq!(
            parse_key_value("amount=100000000000000000000").unwrap().1,
            json!("100000000000000000000")
        );
        assert_eq!(parse_key_value("amount=2").unwrap().1, json!(2));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let (key, value) = parse_key_value("note=a=b").unwrap();
        assert_eq!(key, "note");
        assert_eq!(value, json!("a=b"));
    }

    #[test]
    fn test_malformed_pairs() {
        assert_eq!(
            parse_key_value("amount"),
            Err(ParamError::MissingSeparator("amount".into()))
        );
        assert_eq!(parse_key_value("=1"), Err(ParamError::EmptyKey("=1".into())));
    }

    #[test]
    fn test_param_flags_win_over_json() {
        let params = build_params(
            Some(r#"{"amount": "1.0", "to": "0xabc"}"#),
            &["amount=0.25".to_string()],
        )
        .unwrap();

        assert_eq!(params["amount"], json!("0.25"));
        assert_eq!(params["to"], json!("0xabc"));
    }

    #[test]
    fn test_params_json_must_be_object() {
        assert!(matches!(
            build_params(Some("[1,2]"), &[]),
            Err(ParamError::InvalidJson(_))
        ));
        assert!(matches!(
            build_params(Some("{"), &[]),
            Err(ParamError::InvalidJson(_))
        ));
    }
}
