//! Keyspace Client - JSON-RPC access to a Keyspace key registry
//!
//! The registry keeps a Merkle-committed map from account keys to config data.
//! This crate wraps its three methods:
//!
//! - `mksr_proof`: inclusion proof of a configuration under the current root
//! - `mksr_recover`: proof authorizing rotation of a key to a new configuration
//! - `mksr_set`: apply a recovery proof
//!
//! Proofs, verification keys and config blobs returned by the registry are
//! treated as opaque bytes and passed back unchanged.
//!
//! # Example Usage
//!
//! ```no_run
//! use keyspace_client::{ClientConfig, KeyspaceClient};
//! use keyspace_core::{Hash32, Key};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), keyspace_client::ClientError> {
//!     let client = KeyspaceClient::from_config(&ClientConfig::from_env()?)?;
//!     let proof = client
//!         .get_config_proof(&Key::new(vec![0x01; 32]), &Hash32::new([0; 32]), &Hash32::new([0; 32]))
//!         .await?;
//!     println!("root {}", proof.root);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod jsonrpc;
pub mod mock;
pub mod transport;

pub use client::{
    ConfigProof, GetConfigProofParameters, GetRecoverProofParameters, KeyspaceClient,
    RecoverProof, SetConfigParameters,
};
pub use config::ClientConfig;
pub use error::{ClientError, ErrorCategory, Result};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};
pub use mock::MockRegistry;
pub use transport::{HttpTransport, RpcTransport, TransportError};
