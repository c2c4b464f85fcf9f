//! Error types for keyspace-core
//!
//! Everything in this crate fails locally: these are input validation errors,
//! detected before anything is sent to a registry.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid coordinate length: {coordinate} is {len} bytes, expected 32")]
    InvalidCoordinateLength { coordinate: &'static str, len: usize },

    #[error("Malformed config data: length {len} is not a positive multiple of 64")]
    MalformedConfigData { len: usize },

    #[error("Unsupported circuit type: {0}")]
    UnsupportedCircuitType(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid hash length: {0} bytes, expected 32")]
    InvalidHashLength(usize),
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidHex(e.to_string())
    }
}
