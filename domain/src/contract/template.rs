//! Built-in contract templates
//!
//! A template bundles an ABI with its creation bytecode so callers can say
//! `template = "SimpleStorage"` instead of pasting both.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;

const SIMPLE_STORAGE_BYTECODE: &str = "0x608060405234801561001057600080fd5b5061012b806100206000396000f3fe608060405260043610601f5760003560e01c806360fe47b11460245780636d4ce63c14603e575b600080fd5b603c6004803603810190603891906100b6565b6056565b005b6044605c565b604051605191906100e1565b60405180910390f35b60005481565b60008054905090565b600081359050607081610114565b92915050565b600060208284031215608657600080fd5b600061009484828501606a565b91505092915050565b6100a681610107565b82525050565b60006020820190506100c1600083018461009d565b92915050565b6000819050919050565b6100db81610107565b81146100e657600080fd5b50565b6000813590506100f88161011f565b92915050565b600080fd5b61010c81610107565b811461011757600080fd5b5056fea2646970667358221220a1d3d7d0a0d9c23a4c4fb2b0bd4c9d9d6e0773f3941d1b7a6f2d7a3d2b0a9a7d64736f6c63430008140033";

/// Named contract with a known ABI and bytecode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractTemplate {
    /// `set(uint256)` / `get() -> uint256` plus a `ValueChanged` event
    SimpleStorage,
}

impl ContractTemplate {
    pub fn as_str(&self) -> &str {
        match self {
            ContractTemplate::SimpleStorage => "SimpleStorage",
        }
    }

    pub fn all() -> &'static [ContractTemplate] {
        &[ContractTemplate::SimpleStorage]
    }

    /// JSON ABI of the template
    pub fn abi(&self) -> Value {
        match self {
            ContractTemplate::SimpleStorage => json!([
                {
                    "inputs": [{"internalType": "uint256", "name": "newValue", "type": "uint256"}],
                    "name": "set",
                    "outputs": [],
                    "stateMutability": "nonpayable",
                    "type": "function"
                },
                {
                    "inputs": [],
                    "name": "get",
                    "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
                    "stateMutability": "view",
                    "type": "function"
                },
                {
                    "anonymous": false,
                    "inputs": [{"indexed": false, "internalType": "uint256", "name": "newValue", "type": "uint256"}],
                    "name": "ValueChanged",
                    "type": "event"
                }
            ]),
        }
    }

    /// `0x`-prefixed creation bytecode
    pub fn bytecode(&self) -> &'static str {
        match self {
            ContractTemplate::SimpleStorage => SIMPLE_STORAGE_BYTECODE,
        }
    }
}

impl std::fmt::Display for ContractTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContractTemplate {
    type Err = String;

    /// Case-insensitive; `_` and `-` are ignored ("simple_storage" works).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "simplestorage" => Ok(ContractTemplate::SimpleStorage),
            _ => Err(format!(
                "Unknown contract template '{}' (available: {})",
                s,
                ContractTemplate::all()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_names() {
        for name in ["SimpleStorage", "simple_storage", "simple-storage", " SIMPLESTORAGE "] {
            assert_eq!(name.parse::<ContractTemplate>(), Ok(ContractTemplate::SimpleStorage));
        }
        let err = "Token".parse::<ContractTemplate>().unwrap_err();
        assert!(err.contains("available: SimpleStorage"));
    }

    #[test]
    fn test_simple_storage_abi_shape() {
        let abi = ContractTemplate::SimpleStorage.abi();
        let names: Vec<&str> = abi
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|item| item["name"].as_str())
            .collect();
        assert_eq!(names, vec!["set", "get", "ValueChanged"]);
    }

    #[test]
    fn test_simple_storage_bytecode_is_hex() {
        let code = ContractTemplate::SimpleStorage.bytecode();
        let body = code.strip_prefix("0x").unwrap();
        assert_eq!(body.len() % 2, 0);
        assert!(body.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
