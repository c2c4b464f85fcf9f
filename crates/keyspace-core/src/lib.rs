//! Keyspace Core - owner encoding and config-data codec
//!
//! This crate provides the byte formats shared by everything that talks to a
//! Keyspace key registry: the canonical 64-byte owner encoding for secp256k1
//! and WebAuthn signers, the config-data blob that packs an ordered owner
//! list, and the hex wire primitives used by the registry RPC.
//!
//! Everything here is pure and free of shared state.

pub mod config;
pub mod error;
pub mod owner;
pub mod signer;
pub mod types;

pub use config::ConfigData;
pub use error::{Error, Result};
pub use owner::{Owner, SignatureScheme, COORDINATE_SIZE, OWNER_SIZE};
pub use signer::{Secp256k1PrivateKey, SignerKey, WebAuthnPrivateKey};
pub use types::{Hash32, HexBytes, Key};
