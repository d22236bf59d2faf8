//! JSON-RPC 2.0 over HTTP for EVM nodes.
//!
//! Every request carries the client-level timeout; an elapsed timeout is
//! reported as [`ChainError::Timeout`] instead of a generic transport error.

use blockagent_application::ChainError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;

/// Global request ID counter for JSON-RPC requests.
static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    REQUEST_ID.fetch_add(1, Ordering::SeqCst)
}

/// JSON-RPC request
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: next_id(),
            method,
            params,
        }
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcErrorObject {
    fn into_chain_error(self) -> ChainError {
        // Nodes put revert reasons in `data`; keep them visible
        let message = match self.data {
            Some(Value::String(data)) if !data.is_empty() => {
                format!("{} ({})", self.message, data)
            }
            _ => self.message,
        };
        ChainError::Rpc {
            code: self.code,
            message,
        }
    }
}

/// HTTP transport bound to one endpoint.
#[derive(Debug, Clone)]
pub struct RpcTransport {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl RpcTransport {
    /// Build a transport with its own HTTP client.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, url, timeout))
    }

    /// Build a transport sharing an existing HTTP client (and its timeout).
    pub fn with_client(client: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    /// Call `method` and return the raw `result`.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let request = JsonRpcRequest::new(method, params);
        trace!(method, id = request.id, "JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(method, e))?;

        let status = response.status();
        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| self.map_reqwest_error(method, e))?;

        if let Some(error) = body.error {
            return Err(error.into_chain_error());
        }
        if !status.is_success() {
            return Err(ChainError::Transport(format!(
                "{} returned HTTP status {}",
                method, status
            )));
        }

        body.result
            .ok_or_else(|| ChainError::Decode(format!("{} result was missing", method)))
    }

    /// Call `method` and deserialize the `result`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ChainError> {
        let raw = self.call(method, params).await?;
        serde_json::from_value(raw)
            .map_err(|e| ChainError::Decode(format!("failed to decode {} result: {}", method, e)))
    }

    fn map_reqwest_error(&self, method: &str, error: reqwest::Error) -> ChainError {
        if error.is_timeout() {
            ChainError::Timeout(format!("{} after {}s", method, self.timeout.as_secs()))
        } else if error.is_decode() {
            ChainError::Decode(format!("{} response was not JSON-RPC: {}", method, error))
        } else {
            ChainError::Transport(format!("{} failed: {}", method, error))
        }
    }
}
