//! Typed client for the registry's `mksr_*` methods

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use keyspace_core::{ConfigData, Hash32, HexBytes, Key, SignatureScheme};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::transport::{HttpTransport, RpcTransport};

/// RPC method names
pub mod methods {
    pub const PROOF: &str = "mksr_proof";
    pub const RECOVER: &str = "mksr_recover";
    pub const SET: &str = "mksr_set";
}

/// Parameters of `mksr_proof`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigProofParameters {
    pub key: Key,
    pub vk_hash: Hash32,
    pub data_hash: Hash32,
}

impl GetConfigProofParameters {
    /// Positional wire params: `[key, vkHash, dataHash]`
    pub fn to_rpc_params(&self) -> Value {
        json!([self.key, self.vk_hash, self.data_hash])
    }
}

/// Parameters of `mksr_recover`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRecoverProofParameters {
    pub key: Key,
    pub new_key: Key,
    pub circuit_type: SignatureScheme,
    pub signature: HexBytes,
}

impl GetRecoverProofParameters {
    /// Positional wire params: `[key, newKey, circuitType, signature]`
    ///
    /// Unlike the other slots, `circuitType` is not hex: it is the plain
    /// scheme name, `"secp256k1"` or `"webauthn"`, which selects the
    /// verification circuit on the registry side.
    pub fn to_rpc_params(&self) -> Value {
        json!([self.key, self.new_key, self.circuit_type, self.signature])
    }
}

/// Parameters of `mksr_set`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetConfigParameters {
    pub key: Key,
    pub new_key: Key,
    pub current_vk: HexBytes,
    pub current_data: HexBytes,
    pub proof: HexBytes,
}

impl SetConfigParameters {
    /// Positional wire params: `[key, newKey, currentVk, currentData, proof]`
    pub fn to_rpc_params(&self) -> Value {
        json!([
            self.key,
            self.new_key,
            self.current_vk,
            self.current_data,
            self.proof
        ])
    }
}

/// Inclusion proof of a configuration under a published root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProof {
    pub root: Hash32,
    pub proof: HexBytes,
}

/// Proof authorizing rotation of a key to a new configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverProof {
    pub proof: HexBytes,
    pub current_vk: HexBytes,
    pub current_data: HexBytes,
}

impl RecoverProof {
    /// Decode `current_data` as an owner list.
    ///
    /// The proof itself is still sent back byte for byte; this is a view.
    pub fn current_config(&self) -> Result<ConfigData> {
        Ok(ConfigData::decode(self.current_data.as_bytes())?)
    }

    /// `mksr_set` parameters that apply this proof
    pub fn into_set_config(self, key: Key, new_key: Key) -> SetConfigParameters {
        SetConfigParameters {
            key,
            new_key,
            current_vk: self.current_vk,
            current_data: self.current_data,
            proof: self.proof,
        }
    }
}

/// Client for a Keyspace registry.
///
/// Holds no registry state: every call is an independent request, so one
/// client can be shared across tasks. Failures are returned as-is and never
/// retried here.
pub struct KeyspaceClient<T> {
    transport: T,
}

impl KeyspaceClient<HttpTransport> {
    /// Create an HTTP client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::from_config(config)?))
    }
}

impl<T: RpcTransport> KeyspaceClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the inclusion proof for `data_hash` under `key`
    pub async fn get_config_proof(
        &self,
        key: &Key,
        vk_hash: &Hash32,
        data_hash: &Hash32,
    ) -> Result<ConfigProof> {
        let params = GetConfigProofParameters {
            key: key.clone(),
            vk_hash: *vk_hash,
            data_hash: *data_hash,
        };
        self.call(methods::PROOF, params.to_rpc_params()).await
    }

    /// Fetch a recovery proof rotating `key` to `new_key`.
    ///
    /// `circuit_type` must be `"secp256k1"` or `"webauthn"`; anything else is
    /// rejected before a request is made.
    pub async fn get_recover_proof(
        &self,
        key: &Key,
        new_key: &Key,
        circuit_type: &str,
        signature: &HexBytes,
    ) -> Result<RecoverProof> {
        let circuit_type: SignatureScheme = circuit_type.parse()?;
        let params = GetRecoverProofParameters {
            key: key.clone(),
            new_key: new_key.clone(),
            circuit_type,
            signature: signature.clone(),
        };
        self.call(methods::RECOVER, params.to_rpc_params()).await
    }

    /// Apply a recovery proof, pointing `key` at `new_key`.
    ///
    /// Recovery proofs are single use: a replay fails with
    /// [`ClientError::StaleProof`] or [`ClientError::AlreadyApplied`].
    pub async fn set_config(
        &self,
        key: &Key,
        new_key: &Key,
        current_vk: &HexBytes,
        current_data: &HexBytes,
        proof: &HexBytes,
    ) -> Result<()> {
        let params = SetConfigParameters {
            key: key.clone(),
            new_key: new_key.clone(),
            current_vk: current_vk.clone(),
            current_data: current_data.clone(),
            proof: proof.clone(),
        };
        self.apply(&params).await
    }

    /// [`Self::set_config`] taking the parameters as one value
    pub async fn apply(&self, params: &SetConfigParameters) -> Result<()> {
        let result = self.request(methods::SET, params.to_rpc_params()).await?;
        if !result.is_null() {
            return Err(ClientError::UnexpectedResponse(format!(
                "{} returned {}",
                methods::SET,
                result
            )));
        }
        Ok(())
    }

    async fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R> {
        let result = self.request(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| ClientError::UnexpectedResponse(format!("{}: {}", method, e)))
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        debug!(method, "Registry call");
        match self.transport.request(method, params).await {
            Ok(value) => Ok(value),
            Err(e) => {
                let err = ClientError::from(e);
                warn!(method, category = ?err.category(), "Registry call failed: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proof_params_order() {
        let params = GetConfigProofParameters {
            key: Key::new(vec![0x01]),
            vk_hash: Hash32::new([0x02; 32]),
            data_hash: Hash32::new([0x03; 32]),
        };
        let value = params.to_rpc_params();
        assert_eq!(value[0], "0x01");
        assert_eq!(value[1], format!("0x{}", "02".repeat(32)));
        assert_eq!(value[2], format!("0x{}", "03".repeat(32)));
    }

    #[test]
    fn test_recover_params_order() {
        let params = GetRecoverProofParameters {
            key: Key::new(vec![0xaa]),
            new_key: Key::new(vec![0xbb]),
            circuit_type: SignatureScheme::WebAuthn,
            signature: HexBytes::new(vec![0xcc, 0xdd]),
        };
        assert_eq!(
            params.to_rpc_params(),
            json!(["0xaa", "0xbb", "webauthn", "0xccdd"])
        );
    }

    #[test]
    fn test_set_params_order() {
        let params = SetConfigParameters {
            key: Key::new(vec![1]),
            new_key: Key::new(vec![2]),
            current_vk: HexBytes::new(vec![3]),
            current_data: HexBytes::new(vec![4]),
            proof: HexBytes::new(vec![5]),
        };
        assert_eq!(
            params.to_rpc_params(),
            json!(["0x01", "0x02", "0x03", "0x04", "0x05"])
        );
    }

    #[test]
    fn test_recover_proof_wire_shape() {
        let json = r#"{"proof":"0xdead","currentVk":"0x01","currentData":"0x02"}"#;
        let proof: RecoverProof = serde_json::from_str(json).unwrap();
        assert_eq!(proof.proof.as_bytes(), &[0xde, 0xad]);
        assert_eq!(proof.current_vk.as_bytes(), &[0x01]);

        let back = serde_json::to_value(&proof).unwrap();
        assert_eq!(back["currentData"], "0x02");
    }

    #[test]
    fn test_current_config_view() {
        let config = ConfigData::single(keyspace_core::Owner::new([0x44; 64]));
        let proof = RecoverProof {
            proof: HexBytes::default(),
            current_vk: HexBytes::default(),
            current_data: HexBytes::new(config.encode()),
        };
        assert_eq!(proof.current_config().unwrap(), config);
    }
}
