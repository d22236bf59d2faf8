//! EVM chain client over JSON-RPC.
//!
//! Implements the [`ChainClient`] port for any EVM-compatible node:
//! reads go straight to `eth_*` methods, writes are built as typed
//! transactions, signed locally with the configured key and submitted with
//! `eth_sendRawTransaction`. The nonce comes from the pending transaction
//! count at submission time.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use blockagent_application::{
    ChainClient, ChainError, ContractDeployment, ContractInvocation, DeployReceipt, FeeFields,
    GeneratedAccount, LatestBlock, TransferRequest, TxReceipt, TxSkeleton, U256,
};
use blockagent_domain::check_decimal_amount;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Address, Bytes, Eip1559TransactionRequest, TransactionRequest, U64};
use ethers_core::utils::{format_ether, get_contract_address, parse_ether, to_checksum};
use ethers_signers::{LocalWallet, Signer};
use serde_json::{Value, json};
use tracing::{debug, info};

use super::abi_codec::{decode_output, encode_deployment, encode_invocation};
use super::json_rpc::RpcTransport;
use crate::signer::{KeySource, load_wallet};

/// Decimal places of the native token on every supported chain.
const NATIVE_DECIMALS: usize = 18;

/// Parse a decimal amount in whole native units (18 decimals).
///
/// Input is checked before `parse_ether`, which would otherwise drop
/// digits past the 18th decimal and ignore `_` separators.
pub fn parse_native_amount(amount: &str) -> Result<U256, ChainError> {
    check_decimal_amount(amount, NATIVE_DECIMALS).map_err(ChainError::InvalidInput)?;
    parse_ether(amount).map_err(|e| ChainError::InvalidInput(format!("'{}': {}", amount, e)))
}

/// Render a smallest-unit amount as a trimmed decimal string ("2.5", "0").
pub fn format_native_amount(amount: U256) -> String {
    let full = format_ether(amount);
    match full.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => full,
    }
}

fn parse_address(raw: &str) -> Result<Address, ChainError> {
    Address::from_str(raw.trim())
        .map_err(|_| ChainError::InvalidInput(format!("'{}' is not a valid address", raw)))
}

fn checksum(address: &Address) -> String {
    to_checksum(address, None)
}

/// Chain client bound to one named network.
pub struct EvmChainClient {
    network: String,
    transport: RpcTransport,
    keys: Arc<dyn KeySource>,
}

impl EvmChainClient {
    pub fn new(
        network: impl Into<String>,
        rpc_url: impl Into<String>,
        timeout: Duration,
        keys: Arc<dyn KeySource>,
    ) -> Result<Self, ChainError> {
        Ok(Self::with_transport(
            network,
            RpcTransport::new(rpc_url, timeout)?,
            keys,
        ))
    }

    pub fn with_transport(
        network: impl Into<String>,
        transport: RpcTransport,
        keys: Arc<dyn KeySource>,
    ) -> Self {
        Self {
            network: network.into(),
            transport,
            keys,
        }
    }

    /// Wallet able to sign for `from`.
    fn wallet_for(&self, from: &str) -> Result<LocalWallet, ChainError> {
        let wallet = load_wallet(self.keys.as_ref(), "signing key")
            .map_err(|e| ChainError::MissingKey(e.to_string()))?;
        let from = parse_address(from)?;
        if wallet.address() != from {
            return Err(ChainError::MissingKey(format!(
                "no key for sender {}",
                checksum(&from)
            )));
        }
        Ok(wallet)
    }

    async fn pending_nonce(&self, address: Address) -> Result<U256, ChainError> {
        self.transport
            .call_as("eth_getTransactionCount", json!([address, "pending"]))
            .await
    }

    async fn sign_and_send(
        &self,
        wallet: &LocalWallet,
        tx: TypedTransaction,
    ) -> Result<String, ChainError> {
        let signature = wallet
            .sign_transaction_sync(&tx)
            .map_err(|e| ChainError::InvalidInput(format!("failed to sign transaction: {}", e)))?;
        let raw = tx.rlp_signed(&signature);

        let hash: String = self
            .transport
            .call_as("eth_sendRawTransaction", json!([raw]))
            .await?;
        info!(network = %self.network, tx_hash = %hash, "Transaction submitted");
        Ok(hash)
    }

    /// Legacy-priced transaction for contract calls and deployments.
    async fn legacy_tx(
        &self,
        from: Address,
        to: Option<Address>,
        data: Vec<u8>,
        gas: U256,
    ) -> Result<(TypedTransaction, U256), ChainError> {
        let chain_id = self.get_chain_id().await?;
        let gas_price = self.get_gas_price().await?;
        let nonce = self.pending_nonce(from).await?;

        let mut request = TransactionRequest::new()
            .from(from)
            .data(Bytes::from(data))
            .gas(gas)
            .gas_price(gas_price)
            .nonce(nonce)
            .chain_id(chain_id);
        if let Some(to) = to {
            request = request.to(to);
        }
        Ok((TypedTransaction::Legacy(request), nonce))
    }
}

#[async_trait]
impl ChainClient for EvmChainClient {
    fn network(&self) -> &str {
        &self.network
    }

    async fn get_balance(&self, address: &str) -> Result<U256, ChainError> {
        let address = parse_address(address)?;
        self.transport
            .call_as("eth_getBalance", json!([address, "latest"]))
            .await
    }

    async fn estimate_gas(&self, tx: &TxSkeleton) -> Result<U256, ChainError> {
        let request = match tx {
            TxSkeleton::Transfer { from, to, value } => json!({
                "from": parse_address(from)?,
                "to": parse_address(to)?,
                "value": value,
            }),
            TxSkeleton::ContractMethod { from, invocation } => {
                let (_, data) = encode_invocation(invocation)?;
                json!({
                    "from": parse_address(from)?,
                    "to": parse_address(&invocation.address)?,
                    "data": Bytes::from(data),
                })
            }
            TxSkeleton::Deploy { from, deployment } => json!({
                "from": parse_address(from)?,
                "data": Bytes::from(encode_deployment(deployment)?),
            }),
        };

        let gas: U256 = self
            .transport
            .call_as("eth_estimateGas", json!([request]))
            .await?;
        debug!(network = %self.network, %gas, "Estimated gas");
        Ok(gas)
    }

    async fn get_gas_price(&self) -> Result<U256, ChainError> {
        self.transport.call_as("eth_gasPrice", json!([])).await
    }

    async fn get_chain_id(&self) -> Result<u64, ChainError> {
        let id: U64 = self.transport.call_as("eth_chainId", json!([])).await?;
        Ok(id.as_u64())
    }

    async fn get_latest_block(&self) -> Result<LatestBlock, ChainError> {
        let block: Value = self
            .transport
            .call("eth_getBlockByNumber", json!(["latest", false]))
            .await?;
        if block.is_null() {
            return Err(ChainError::Decode("latest block not available".to_string()));
        }

        let number = match block.get("number") {
            Some(raw) if !raw.is_null() => serde_json::from_value::<U64>(raw.clone())
                .map(|n| Some(n.as_u64()))
                .map_err(|e| ChainError::Decode(format!("invalid block number: {}", e)))?,
            _ => None,
        };
        let base_fee_per_gas = match block.get("baseFeePerGas") {
            Some(raw) if !raw.is_null() => Some(
                serde_json::from_value::<U256>(raw.clone())
                    .map_err(|e| ChainError::Decode(format!("invalid baseFeePerGas: {}", e)))?,
            ),
            _ => None,
        };

        Ok(LatestBlock {
            number,
            base_fee_per_gas,
        })
    }

    async fn send_transaction(&self, tx: &TransferRequest) -> Result<TxReceipt, ChainError> {
        let wallet = self.wallet_for(&tx.from)?;
        let from = wallet.address();
        let to = parse_address(&tx.to)?;
        let chain_id = self.get_chain_id().await?;
        let nonce = self.pending_nonce(from).await?;

        let typed = match tx.fees {
            FeeFields::FeeMarket {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => TypedTransaction::Eip1559(
                Eip1559TransactionRequest::new()
                    .from(from)
                    .to(to)
                    .value(tx.value)
                    .gas(tx.gas)
                    .max_fee_per_gas(max_fee_per_gas)
                    .max_priority_fee_per_gas(max_priority_fee_per_gas)
                    .nonce(nonce)
                    .chain_id(chain_id),
            ),
            FeeFields::Legacy { gas_price } => TypedTransaction::Legacy(
                TransactionRequest::new()
                    .from(from)
                    .to(to)
                    .value(tx.value)
                    .gas(tx.gas)
                    .gas_price(gas_price)
                    .nonce(nonce)
                    .chain_id(chain_id),
            ),
        };

        let transaction_hash = self.sign_and_send(&wallet, typed).await?;
        Ok(TxReceipt { transaction_hash })
    }

    async fn call_contract_method(&self, call: &ContractInvocation) -> Result<Value, ChainError> {
        let (function, data) = encode_invocation(call)?;
        let to = parse_address(&call.address)?;

        let output: Bytes = self
            .transport
            .call_as(
                "eth_call",
                json!([{"to": to, "data": Bytes::from(data)}, "latest"]),
            )
            .await?;
        decode_output(&function, &output)
    }

    async fn send_contract_method(
        &self,
        call: &ContractInvocation,
        from: &str,
        gas: U256,
    ) -> Result<TxReceipt, ChainError> {
        let wallet = self.wallet_for(from)?;
        let (_, data) = encode_invocation(call)?;
        let to = parse_address(&call.address)?;

        let (typed, _) = self
            .legacy_tx(wallet.address(), Some(to), data, gas)
            .await?;
        let transaction_hash = self.sign_and_send(&wallet, typed).await?;
        Ok(TxReceipt { transaction_hash })
    }

    async fn deploy_contract(
        &self,
        deployment: &ContractDeployment,
        from: &str,
        gas: U256,
    ) -> Result<DeployReceipt, ChainError> {
        let wallet = self.wallet_for(from)?;
        let data = encode_deployment(deployment)?;

        let (typed, nonce) = self.legacy_tx(wallet.address(), None, data, gas).await?;
        let address = get_contract_address(wallet.address(), nonce);
        let transaction_hash = self.sign_and_send(&wallet, typed).await?;

        Ok(DeployReceipt {
            address: checksum(&address),
            transaction_hash,
        })
    }

    fn create_account(&self) -> Result<GeneratedAccount, ChainError> {
        let wallet = LocalWallet::new(&mut rand::thread_rng());
        Ok(GeneratedAccount {
            address: checksum(&wallet.address()),
            private_key: format!("0x{}", hex::encode(wallet.signer().to_bytes())),
        })
    }

    fn to_smallest_unit(&self, amount: &str) -> Result<U256, ChainError> {
        parse_native_amount(amount)
    }

    fn from_smallest_unit(&self, amount: U256) -> String {
        format_native_amount(amount)
    }
}
