//! Minimal Ethereum JSON-RPC client over HTTP.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::{Address, TxHash, U256};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("response to {0} carried no result")]
    MissingResult(String),

    #[error("unexpected result shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid hex value: {0}")]
    InvalidHex(String),

    #[error("return data too short: {0} bytes")]
    ShortReturn(usize),
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

pub struct JsonRpcClient {
    http: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request and return its `result`
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest { jsonrpc: "2.0", id, method, params };

        debug!("rpc -> {} (id {})", method, id);
        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        unwrap_response(method, response)
    }

    /// Accounts the node can sign for
    pub async fn accounts(&self) -> Result<Vec<Address>, RpcError> {
        let value = self.request("eth_accounts", json!([])).await?;
        let raw: Vec<String> = serde_json::from_value(value)?;
        raw.iter().map(|s| parse_address(s)).collect()
    }

    /// Native balance in wei at the latest block
    pub async fn get_balance(&self, address: &Address) -> Result<U256, RpcError> {
        let value = self
            .request("eth_getBalance", json!([address.to_string(), "latest"]))
            .await?;
        let raw: String = serde_json::from_value(value)?;
        parse_quantity(&raw)
    }

    /// Read-only contract call at the latest block
    pub async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, RpcError> {
        let value = self
            .request(
                "eth_call",
                json!([{ "to": to.to_string(), "data": encode_hex(data) }, "latest"]),
            )
            .await?;
        let raw: String = serde_json::from_value(value)?;
        decode_hex(&raw)
    }

    /// Contract call returning a single uint256
    pub async fn call_uint(&self, to: &Address, data: &[u8]) -> Result<U256, RpcError> {
        let ret = self.call(to, data).await?;
        decode_uint(&ret)
    }

    /// Submit a transaction signed by the node
    pub async fn send_transaction(
        &self,
        from: &Address,
        to: &Address,
        data: &[u8],
    ) -> Result<TxHash, RpcError> {
        let value = self
            .request(
                "eth_sendTransaction",
                json!([{
                    "from": from.to_string(),
                    "to": to.to_string(),
                    "data": encode_hex(data),
                }]),
            )
            .await?;
        let raw: String = serde_json::from_value(value)?;
        TxHash::from_str(&raw).map_err(|_| RpcError::InvalidHex(raw))
    }
}

fn unwrap_response(method: &str, response: RpcResponse) -> Result<Value, RpcError> {
    if let Some(err) = response.error {
        return Err(RpcError::Rpc { code: err.code, message: err.message });
    }
    match response.result {
        Some(Value::Null) | None => Err(RpcError::MissingResult(method.to_string())),
        Some(value) => Ok(value),
    }
}

pub fn encode_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

pub fn decode_hex(raw: &str) -> Result<Vec<u8>, RpcError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits).map_err(|_| RpcError::InvalidHex(raw.to_string()))
}

/// Parse a hex quantity such as `0x1bc16d674ec80000`
pub fn parse_quantity(raw: &str) -> Result<U256, RpcError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|_| RpcError::InvalidHex(raw.to_string()))
}

/// First ABI word of return data as uint256
pub fn decode_uint(ret: &[u8]) -> Result<U256, RpcError> {
    if ret.len() < 32 {
        return Err(RpcError::ShortReturn(ret.len()));
    }
    Ok(U256::from_be_slice(&ret[..32]))
}

pub fn parse_address(raw: &str) -> Result<Address, RpcError> {
    Address::from_str(raw.trim()).map_err(|_| RpcError::InvalidHex(raw.to_string()))
}
