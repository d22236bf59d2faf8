//! ABI binding of JSON arguments and return values.
//!
//! A method is bound by name and argument count against the supplied ABI;
//! each JSON argument is rendered to text and tokenized against the
//! declared parameter type, so `"42"` and `42` both encode a `uint256`.

use blockagent_application::{ChainError, ContractDeployment, ContractInvocation};
use ethers_core::abi::token::{LenientTokenizer, Tokenizer};
use ethers_core::abi::{Abi, Function, Param, Token};
use ethers_core::types::I256;
use ethers_core::utils::to_checksum;
use serde_json::Value;

/// Parse a JSON ABI array.
pub fn parse_abi(abi: &Value) -> Result<Abi, ChainError> {
    serde_json::from_value(abi.clone())
        .map_err(|e| ChainError::InvalidInput(format!("invalid ABI: {}", e)))
}

/// Find `method` taking exactly `argc` inputs.
pub fn select_function<'a>(abi: &'a Abi, method: &str, argc: usize) -> Result<&'a Function, ChainError> {
    let overloads = abi
        .functions_by_name(method)
        .map_err(|_| ChainError::InvalidInput(format!("method '{}' not found in ABI", method)))?;

    overloads
        .iter()
        .find(|f| f.inputs.len() == argc)
        .ok_or_else(|| {
            let expected: Vec<String> = overloads.iter().map(|f| f.inputs.len().to_string()).collect();
            ChainError::InvalidInput(format!(
                "method '{}' takes {} argument(s), got {}",
                method,
                expected.join(" or "),
                argc
            ))
        })
}

/// Tokenize JSON args against declared params.
pub fn tokenize_args(params: &[Param], args: &[Value]) -> Result<Vec<Token>, ChainError> {
    if params.len() != args.len() {
        return Err(ChainError::InvalidInput(format!(
            "expected {} argument(s), got {}",
            params.len(),
            args.len()
        )));
    }

    params
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let text = match arg {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            LenientTokenizer::tokenize(&param.kind, &text).map_err(|e| {
                ChainError::InvalidInput(format!(
                    "argument '{}' ({}) is invalid: {}",
                    param.name, param.kind, e
                ))
            })
        })
        .collect()
}

/// Bound function plus its calldata.
pub fn encode_invocation(invocation: &ContractInvocation) -> Result<(Function, Vec<u8>), ChainError> {
    let abi = parse_abi(&invocation.abi)?;
    let function = select_function(&abi, &invocation.method, invocation.args.len())?;
    let tokens = tokenize_args(&function.inputs, &invocation.args)?;
    let data = function
        .encode_input(&tokens)
        .map_err(|e| ChainError::InvalidInput(format!("failed to encode call: {}", e)))?;
    Ok((function.clone(), data))
}

/// Creation bytecode followed by encoded constructor arguments.
pub fn encode_deployment(deployment: &ContractDeployment) -> Result<Vec<u8>, ChainError> {
    let raw = deployment.bytecode.trim();
    let code = hex::decode(raw.strip_prefix("0x").unwrap_or(raw))
        .map_err(|e| ChainError::InvalidInput(format!("bytecode is not hex: {}", e)))?;
    if code.is_empty() {
        return Err(ChainError::InvalidInput("bytecode is empty".to_string()));
    }

    let abi = parse_abi(&deployment.abi)?;
    match abi.constructor() {
        Some(constructor) => {
            let tokens = tokenize_args(&constructor.inputs, &deployment.args)?;
            constructor
                .encode_input(code, &tokens)
                .map_err(|e| ChainError::InvalidInput(format!("failed to encode constructor: {}", e)))
        }
        None if deployment.args.is_empty() => Ok(code),
        None => Err(ChainError::InvalidInput(
            "constructor arguments given but the ABI has no constructor".to_string(),
        )),
    }
}

/// Decode return data. One output becomes a plain value, several an array.
pub fn decode_output(function: &Function, data: &[u8]) -> Result<Value, ChainError> {
    let mut tokens = function
        .decode_output(data)
        .map_err(|e| ChainError::Decode(format!("failed to decode '{}' output: {}", function.name, e)))?;

    Ok(match tokens.len() {
        0 => Value::Null,
        1 => token_to_json(tokens.remove(0)),
        _ => Value::Array(tokens.into_iter().map(token_to_json).collect()),
    })
}

/// JSON form of a token. Integers become decimal strings so no precision
/// is lost.
pub fn token_to_json(token: Token) -> Value {
    match token {
        Token::Address(address) => Value::String(to_checksum(&address, None)),
        Token::FixedBytes(bytes) | Token::Bytes(bytes) => {
            Value::String(format!("0x{}", hex::encode(bytes)))
        }
        Token::Int(raw) => Value::String(I256::from_raw(raw).to_string()),
        Token::Uint(n) => Value::String(n.to_string()),
        Token::Bool(b) => Value::Bool(b),
        Token::String(s) => Value::String(s),
        Token::FixedArray(items) | Token::Array(items) | Token::Tuple(items) => {
            Value::Array(items.into_iter().map(token_to_json).collect())
        }
    }
}
