//! Config-data codec
//!
//! The registry value for an account is its ordered owner list, encoded as the
//! owners' 64-byte blobs back to back: no separators, length prefixes, or
//! padding. An encoded config is always `64 * owner_count` bytes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::owner::{Owner, OWNER_SIZE};
use crate::signer::SignerKey;
use crate::types::{from_hex_prefixed, to_hex_prefixed};

/// Ordered, non-empty list of owners.
///
/// Order matters: owner indices are referenced by the registry, so a change
/// in configuration always produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigData {
    owners: Vec<Owner>,
}

impl ConfigData {
    pub fn new(owners: Vec<Owner>) -> Result<Self> {
        if owners.is_empty() {
            return Err(Error::MalformedConfigData { len: 0 });
        }
        Ok(Self { owners })
    }

    pub fn single(owner: Owner) -> Self {
        Self {
            owners: vec![owner],
        }
    }

    /// Initial single-owner config for a signer key
    pub fn for_signer(key: &SignerKey) -> Result<Self> {
        Ok(Self::single(key.owner()?))
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// A new config with `owner` appended
    pub fn with_owner(&self, owner: Owner) -> Self {
        let mut owners = self.owners.clone();
        owners.push(owner);
        Self { owners }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.owners.len() * OWNER_SIZE);
        for owner in &self.owners {
            bytes.extend_from_slice(owner.as_bytes());
        }
        bytes
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() || bytes.len() % OWNER_SIZE != 0 {
            return Err(Error::MalformedConfigData { len: bytes.len() });
        }
        let owners = bytes
            .chunks_exact(OWNER_SIZE)
            .map(Owner::from_slice)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { owners })
    }

    pub fn to_hex(&self) -> String {
        to_hex_prefixed(&self.encode())
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::decode(&from_hex_prefixed(s)?)
    }
}

impl TryFrom<&[u8]> for ConfigData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes)
    }
}

impl From<Owner> for ConfigData {
    fn from(owner: Owner) -> Self {
        Self::single(owner)
    }
}

impl Serialize for ConfigData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ConfigData {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
