//! In-memory port implementations for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blockagent_domain::{ToolError, check_decimal_amount};
use ethers_core::utils::{format_ether, parse_ether};
use serde_json::Value;

use crate::ports::audit_log::{AuditRecord, AuditSink};
use crate::ports::chain_client::{
    ChainClient, ChainError, ContractDeployment, ContractInvocation, DeployReceipt,
    GeneratedAccount, LatestBlock, TransferRequest, TxReceipt, TxSkeleton, U256,
};
use crate::ports::chain_resolver::ChainResolver;
use crate::ports::signer::{SignerAccount, SignerProvider};

pub const ADDR_A: &str = "0x1111111111111111111111111111111111111111";
pub const ADDR_B: &str = "0x2222222222222222222222222222222222222222";
pub const ADDR_C: &str = "0x3333333333333333333333333333333333333333";

pub fn gwei(n: u64) -> U256 {
    U256::from(n) * U256::exp10(9)
}

/// Chain client that answers from canned values and records every remote
/// call by method name. Local helpers (unit conversion, key generation)
/// are not recorded.
pub struct MockChainClient {
    network: String,
    balance: U256,
    gas: U256,
    gas_price: U256,
    chain_id: u64,
    base_fee: Option<U256>,
    call_result: Value,
    failures: HashMap<&'static str, String>,
    calls: Mutex<Vec<String>>,
    last_transfer: Mutex<Option<TransferRequest>>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self {
            network: "mock".to_string(),
            balance: U256::zero(),
            gas: U256::from(21_000u64),
            gas_price: gwei(1),
            chain_id: 44787,
            base_fee: None,
            call_result: Value::Null,
            failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            last_transfer: Mutex::new(None),
        }
    }

    pub fn with_network(mut self, network: &str) -> Self {
        self.network = network.to_string();
        self
    }

    pub fn with_balance(mut self, ether: &str) -> Self {
        self.balance = parse_ether(ether).unwrap();
        self
    }

    pub fn with_base_fee(mut self, base_fee: U256) -> Self {
        self.base_fee = Some(base_fee);
        self
    }

    pub fn with_call_result(mut self, value: Value) -> Self {
        self.call_result = value;
        self
    }

    pub fn failing_estimate(mut self, message: &str) -> Self {
        self.failures.insert("estimate", message.to_string());
        self
    }

    /// Fail every submission (transfer, method send, deployment).
    pub fn failing_send(mut self, message: &str) -> Self {
        self.failures.insert("send", message.to_string());
        self
    }

    pub fn failing_call(mut self, message: &str) -> Self {
        self.failures.insert("call", message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_transfer(&self) -> Option<TransferRequest> {
        self.last_transfer.lock().unwrap().clone()
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }

    fn fail(&self, kind: &str) -> Result<(), ChainError> {
        match self.failures.get(kind) {
            Some(message) => Err(ChainError::Rpc {
                code: -32000,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    fn network(&self) -> &str {
        &self.network
    }

    async fn get_balance(&self, _address: &str) -> Result<U256, ChainError> {
        self.record("get_balance");
        Ok(self.balance)
    }

    async fn estimate_gas(&self, _tx: &TxSkeleton) -> Result<U256, ChainError> {
        self.record("estimate_gas");
        self.fail("estimate")?;
        Ok(self.gas)
    }

    async fn get_gas_price(&self) -> Result<U256, ChainError> {
        self.record("get_gas_price");
        Ok(self.gas_price)
    }

    async fn get_chain_id(&self) -> Result<u64, ChainError> {
        self.record("get_chain_id");
        Ok(self.chain_id)
    }

    async fn get_latest_block(&self) -> Result<LatestBlock, ChainError> {
        self.record("get_latest_block");
        Ok(LatestBlock {
            number: Some(1),
            base_fee_per_gas: self.base_fee,
        })
    }

    async fn send_transaction(&self, tx: &TransferRequest) -> Result<TxReceipt, ChainError> {
        self.record("send_transaction");
        self.fail("send")?;
        *self.last_transfer.lock().unwrap() = Some(tx.clone());
        Ok(TxReceipt {
            transaction_hash: format!("0x{}", "ab".repeat(32)),
        })
    }

    async fn call_contract_method(&self, _call: &ContractInvocation) -> Result<Value, ChainError> {
        self.record("call_contract_method");
        self.fail("call")?;
        Ok(self.call_result.clone())
    }

    async fn send_contract_method(
        &self,
        _call: &ContractInvocation,
        _from: &str,
        _gas: U256,
    ) -> Result<TxReceipt, ChainError> {
        self.record("send_contract_method");
        self.fail("send")?;
        Ok(TxReceipt {
            transaction_hash: format!("0x{}", "cd".repeat(32)),
        })
    }

    async fn deploy_contract(
        &self,
        _deployment: &ContractDeployment,
        _from: &str,
        _gas: U256,
    ) -> Result<DeployReceipt, ChainError> {
        self.record("deploy_contract");
        self.fail("send")?;
        Ok(DeployReceipt {
            address: ADDR_C.to_string(),
            transaction_hash: format!("0x{}", "ef".repeat(32)),
        })
    }

    fn create_account(&self) -> Result<GeneratedAccount, ChainError> {
        Ok(GeneratedAccount {
            address: ADDR_C.to_string(),
            private_key: format!("0x{}", "11".repeat(32)),
        })
    }

    fn to_smallest_unit(&self, amount: &str) -> Result<U256, ChainError> {
        check_decimal_amount(amount, 18).map_err(ChainError::InvalidInput)?;
        parse_ether(amount).map_err(|e| ChainError::InvalidInput(e.to_string()))
    }

    fn from_smallest_unit(&self, amount: U256) -> String {
        let full = format_ether(amount);
        if full.contains('.') {
            full.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            full
        }
    }
}

/// Resolver with exactly one configured chain.
pub struct StaticResolver {
    name: String,
    client: Arc<dyn ChainClient>,
}

impl StaticResolver {
    pub fn new(name: &str, client: Arc<dyn ChainClient>) -> Self {
        Self {
            name: name.to_string(),
            client,
        }
    }
}

impl ChainResolver for StaticResolver {
    fn resolve(&self, chain: Option<&str>) -> Result<Arc<dyn ChainClient>, ToolError> {
        match chain {
            None => Ok(self.client.clone()),
            Some(name) if name.eq_ignore_ascii_case(&self.name) => Ok(self.client.clone()),
            Some(name) => Err(ToolError::ChainConfigMissing(name.to_string())),
        }
    }
}

/// Signer provider that counts how often it was asked.
pub struct CountingSigner {
    address: Option<String>,
    requests: AtomicUsize,
}

impl CountingSigner {
    pub fn new(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            requests: AtomicUsize::new(0),
        }
    }

    /// Provider with no key configured.
    pub fn missing() -> Self {
        Self {
            address: None,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl SignerProvider for CountingSigner {
    fn signer(&self, _chain: &dyn ChainClient) -> Result<SignerAccount, ToolError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match &self.address {
            Some(address) => Ok(SignerAccount {
                address: address.clone(),
            }),
            None => Err(ToolError::MissingCredential(
                "PRIVATE_KEY is not set".to_string(),
            )),
        }
    }
}

#[derive(Default)]
pub struct RecordingAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAuditSink {
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, record: AuditRecord) {
        self.records.lock().unwrap().push(record);
    }
}
