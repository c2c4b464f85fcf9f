//! JSON-RPC 2.0 envelope types
//!
//! The registry speaks plain JSON-RPC 2.0; server-side rejections arrive as
//! error objects with the Keyspace codes below.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::transport::TransportError;

/// JSON-RPC version string (always "2.0")
pub const JSONRPC_VERSION: &str = "2.0";

/// No proof exists for the requested key/vkHash/dataHash
pub const PROOF_NOT_FOUND: i32 = -32001;
/// The signature does not authorize recovery for the key
pub const RECOVERY_REJECTED: i32 = -32002;
/// The recovery proof was already consumed
pub const STALE_PROOF: i32 = -32003;
/// The key already points at the requested configuration
pub const ALREADY_APPLIED: i32 = -32004;

/// Request ID - can be string, number, or null
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
    Null,
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::String(s) => write!(f, "{}", s),
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

/// JSON-RPC Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<RequestId>, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = Some(params);
        self
    }
}

/// JSON-RPC Response
///
/// An explicit `"result": null` is a success for methods that return nothing;
/// a reply with neither `result` nor `error` is malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Split into the result value or the error object
    pub fn into_result(self) -> Result<serde_json::Value, TransportError> {
        match (self.error, self.result) {
            (Some(error), _) => Err(TransportError::Rpc(error)),
            (None, Some(result)) => Ok(result),
            (None, None) => Err(TransportError::InvalidResponse(format!(
                "response {} has neither result nor error",
                self.id
            ))),
        }
    }
}

/// Keeps a present `null` as `Some(Value::Null)`; only a missing field is `None`
fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC Error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    // Standard JSON-RPC errors
    pub fn method_not_found(method: &str) -> Self {
        Self::new(-32601, format!("Method not found: {}", method))
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(-32602, msg)
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(-32603, msg)
    }

    // Keyspace registry errors
    pub fn proof_not_found(msg: impl Into<String>) -> Self {
        Self::new(PROOF_NOT_FOUND, msg)
    }

    pub fn recovery_rejected(msg: impl Into<String>) -> Self {
        Self::new(RECOVERY_REJECTED, msg)
    }

    pub fn stale_proof(msg: impl Into<String>) -> Self {
        Self::new(STALE_PROOF, msg)
    }

    pub fn already_applied(msg: impl Into<String>) -> Self {
        Self::new(ALREADY_APPLIED, msg)
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}
