//! In-memory registry for tests and offline runs
//!
//! Answers `mksr_*` calls from seeded state and enforces single-use recovery
//! proofs the way a real registry does.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use keyspace_core::{Hash32, HexBytes, Key, SignatureScheme};

use crate::client::{methods, ConfigProof, RecoverProof};
use crate::jsonrpc::JsonRpcError;
use crate::transport::{RpcTransport, TransportError};

#[derive(Debug, Clone)]
struct RecoveryEntry {
    signature: HexBytes,
    proof: RecoverProof,
}

#[derive(Debug, Default)]
struct RegistryState {
    proofs: HashMap<(Key, Hash32, Hash32), ConfigProof>,
    recoveries: HashMap<(Key, SignatureScheme), RecoveryEntry>,
    /// Recovery proofs handed out and not yet applied, by proof bytes
    issued: HashMap<HexBytes, (Key, RecoverProof)>,
    consumed: HashSet<HexBytes>,
    /// Current new-key pointer per key, set by `mksr_set`
    pointers: HashMap<Key, Key>,
}

/// Mock registry implementing [`RpcTransport`]
#[derive(Debug, Default)]
pub struct MockRegistry {
    state: RwLock<RegistryState>,
    calls: AtomicUsize,
    fail_transport: AtomicBool,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a config proof for `(key, vk_hash, data_hash)`
    pub async fn insert_proof(&self, key: Key, vk_hash: Hash32, data_hash: Hash32, proof: ConfigProof) {
        self.state
            .write()
            .await
            .proofs
            .insert((key, vk_hash, data_hash), proof);
    }

    /// Authorize recovery of `key` under `scheme` with exactly `signature`
    pub async fn insert_recovery(
        &self,
        key: Key,
        scheme: SignatureScheme,
        signature: HexBytes,
        proof: RecoverProof,
    ) {
        self.state
            .write()
            .await
            .recoveries
            .insert((key, scheme), RecoveryEntry { signature, proof });
    }

    /// Where `key` currently points, if it was ever rotated
    pub async fn pointer(&self, key: &Key) -> Option<Key> {
        self.state.read().await.pointers.get(key).cloned()
    }

    /// Number of requests that reached the registry
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Simulate a network outage for subsequent calls
    pub fn set_fail_transport(&self, fail: bool) {
        self.fail_transport.store(fail, Ordering::SeqCst);
    }

    async fn handle(&self, method: &str, params: Value) -> Result<Value, JsonRpcError> {
        match method {
            methods::PROOF => {
                let (key, vk_hash, data_hash): (Key, Hash32, Hash32) = parse_params(params)?;
                let state = self.state.read().await;
                let proof = state
                    .proofs
                    .get(&(key.clone(), vk_hash, data_hash))
                    .ok_or_else(|| {
                        JsonRpcError::proof_not_found(format!(
                            "no proof for key {} vk {} data {}",
                            key, vk_hash, data_hash
                        ))
                    })?;
                to_result(proof)
            }
            methods::RECOVER => {
                let (key, new_key, circuit, signature): (Key, Key, String, HexBytes) =
                    parse_params(params)?;
                let scheme: SignatureScheme = circuit
                    .parse()
                    .map_err(|e: keyspace_core::Error| JsonRpcError::invalid_params(e.to_string()))?;

                let mut state = self.state.write().await;
                let entry = state
                    .recoveries
                    .get(&(key.clone(), scheme))
                    .filter(|entry| entry.signature == signature)
                    .cloned()
                    .ok_or_else(|| {
                        JsonRpcError::recovery_rejected(format!(
                            "signature does not authorize recovery of {} to {}",
                            key, new_key
                        ))
                    })?;
                state
                    .issued
                    .insert(entry.proof.proof.clone(), (key, entry.proof.clone()));
                to_result(&entry.proof)
            }
            methods::SET => {
                let (key, new_key, current_vk, current_data, proof): (
                    Key,
                    Key,
                    HexBytes,
                    HexBytes,
                    HexBytes,
                ) = parse_params(params)?;

                let mut state = self.state.write().await;
                if state.consumed.contains(&proof) {
                    if state.pointers.get(&key) == Some(&new_key) {
                        return Err(JsonRpcError::already_applied(format!(
                            "{} already points to {}",
                            key, new_key
                        )));
                    }
                    return Err(JsonRpcError::stale_proof("recovery proof already consumed"));
                }

                let (issued_key, issued) = state
                    .issued
                    .get(&proof)
                    .cloned()
                    .ok_or_else(|| JsonRpcError::invalid_params("unknown recovery proof"))?;
                if issued_key != key
                    || issued.current_vk != current_vk
                    || issued.current_data != current_data
                {
                    return Err(JsonRpcError::invalid_params(
                        "proof was not issued for this key/currentVk/currentData",
                    ));
                }

                state.issued.remove(&proof);
                state.consumed.insert(proof);
                state.pointers.insert(key, new_key);
                Ok(Value::Null)
            }
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }
}

#[async_trait]
impl RpcTransport for MockRegistry {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        if self.fail_transport.load(Ordering::SeqCst) {
            return Err(TransportError::ConnectionFailed(
                "mock registry unreachable".to_string(),
            ));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(method, "Mock registry request");

        // Let concurrent callers interleave
        tokio::task::yield_now().await;

        self.handle(method, params).await.map_err(TransportError::Rpc)
    }
}

fn parse_params<P: DeserializeOwned>(params: Value) -> Result<P, JsonRpcError> {
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

fn to_result<R: serde::Serialize>(value: &R) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
