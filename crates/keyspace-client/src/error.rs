//! Error types for registry calls
//!
//! Callers need to tell three kinds of failure apart: bad local input (fix the
//! input), a registry rejection (regenerate the proof or give up), and a
//! transport failure (the call may simply be retried).

use crate::jsonrpc::{self, JsonRpcError};
use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Coarse classification of a [`ClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected locally before anything was sent
    Validation,
    /// The registry answered and refused the call
    Protocol,
    /// The call did not complete
    Transport,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid input: {0}")]
    Validation(#[from] keyspace_core::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Proof not found: {0}")]
    ProofNotFound(String),

    #[error("Recovery rejected: {0}")]
    RecoveryRejected(String),

    #[error("Stale proof: {0}")]
    StaleProof(String),

    #[error("Already applied: {0}")]
    AlreadyApplied(String),

    #[error("Server error {code}: {message}")]
    Server { code: i32, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Transport error: {0}")]
    Transport(TransportError),
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Validation(_) | ClientError::Config(_) => ErrorCategory::Validation,
            ClientError::ProofNotFound(_)
            | ClientError::RecoveryRejected(_)
            | ClientError::StaleProof(_)
            | ClientError::AlreadyApplied(_)
            | ClientError::Server { .. }
            | ClientError::UnexpectedResponse(_) => ErrorCategory::Protocol,
            ClientError::Transport(_) => ErrorCategory::Transport,
        }
    }

    /// Only transport failures are worth repeating unchanged
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    fn from_rpc_error(e: JsonRpcError) -> Self {
        match e.code {
            jsonrpc::PROOF_NOT_FOUND => ClientError::ProofNotFound(e.message),
            jsonrpc::RECOVERY_REJECTED => ClientError::RecoveryRejected(e.message),
            jsonrpc::STALE_PROOF => ClientError::StaleProof(e.message),
            jsonrpc::ALREADY_APPLIED => ClientError::AlreadyApplied(e.message),
            code => ClientError::Server {
                code,
                message: e.message,
            },
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Rpc(rpc) => ClientError::from_rpc_error(rpc),
            // Local setup problems; retrying the same call cannot help
            e @ (TransportError::InvalidUrl(_) | TransportError::ClientSetup(_)) => {
                ClientError::Config(e.to_string())
            }
            other => ClientError::Transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_codes_map_to_conditions() {
        let cases = [
            (JsonRpcError::proof_not_found("x"), "ProofNotFound"),
            (JsonRpcError::recovery_rejected("x"), "RecoveryRejected"),
            (JsonRpcError::stale_proof("x"), "StaleProof"),
            (JsonRpcError::already_applied("x"), "AlreadyApplied"),
        ];
        for (rpc, name) in cases {
            let err = ClientError::from(TransportError::Rpc(rpc));
            assert!(format!("{:?}", err).starts_with(name), "{:?}", err);
            assert_eq!(err.category(), ErrorCategory::Protocol);
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn test_unknown_code_stays_protocol() {
        let err = ClientError::from(TransportError::Rpc(JsonRpcError::internal_error("boom")));
        assert!(matches!(err, ClientError::Server { code: -32603, .. }));
        assert_eq!(err.category(), ErrorCategory::Protocol);
    }

    #[test]
    fn test_transport_is_retryable() {
        let err = ClientError::from(TransportError::ConnectionFailed("refused".to_string()));
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_bad_rpc_url_is_config_error() {
        let err = ClientError::from(TransportError::InvalidUrl("not a url".to_string()));
        assert!(matches!(err, ClientError::Config(_)));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());

        let err = ClientError::from(TransportError::ClientSetup("no TLS backend".to_string()));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_client_from_bad_config() {
        let config = crate::ClientConfig {
            rpc_url: "registry without scheme".to_string(),
            ..Default::default()
        };
        let err = crate::KeyspaceClient::from_config(&config).err().unwrap();
        assert!(matches!(err, ClientError::Config(_)), "{:?}", err);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_validation_category() {
        let err = ClientError::from(keyspace_core::Error::UnsupportedCircuitType("ed25519".into()));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
