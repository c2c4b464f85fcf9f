//! Request/response transport for registry calls
//!
//! A transport moves one JSON-RPC call and hands back either the `result`
//! value or the server's error object. Connection handling, timeouts and
//! cancellation belong to the transport; the client never retries.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::config::ClientConfig;
use crate::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Failure of a single RPC round trip
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a JSON-RPC error object
    #[error("RPC error: {0}")]
    Rpc(JsonRpcError),

    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

/// A request/response RPC channel to a registry
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Dispatch `method` with positional `params` and return the result value
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        (**self).request(method, params).await
    }
}

/// JSON-RPC over HTTP POST
pub struct HttpTransport {
    url: Url,
    http: Client,
    next_id: AtomicI64,
}

impl HttpTransport {
    /// Create a transport for `url` with a request timeout
    pub fn new(url: impl AsRef<str>, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ClientSetup(e.to_string()))?;
        Self::with_http_client(url, http)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(&config.rpc_url, config.timeout())
    }

    /// Use an existing reqwest client (custom TLS, proxies, middleware)
    pub fn with_http_client(url: impl AsRef<str>, http: Client) -> Result<Self, TransportError> {
        let url = Url::parse(url.as_ref())
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url.as_ref(), e)))?;
        Ok(Self {
            url,
            http,
            next_id: AtomicI64::new(1),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method).with_params(params);

        debug!(method, id, url = %self.url, "Sending RPC request");
        trace!("Request: {}", serde_json::to_string(&request).unwrap_or_default());

        let response = self.http.post(self.url.clone()).json(&request).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        trace!("Response ({}): {}", status, String::from_utf8_lossy(&bytes));

        // JSON-RPC servers may put an error object behind a non-2xx status
        match serde_json::from_slice::<JsonRpcResponse>(&bytes) {
            Ok(body) => body.into_result(),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).to_string(),
            }),
            Err(e) => Err(TransportError::InvalidResponse(e.to_string())),
        }
    }
}
