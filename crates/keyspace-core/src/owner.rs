//! Canonical owner encoding
//!
//! An owner is the 64-byte uncompressed public key point `x || y`. The layout is
//! the same for secp256k1 and WebAuthn (P-256) signers: nothing in the bytes says
//! which curve they belong to, so callers carry the [`SignatureScheme`] alongside.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::types::{from_hex_prefixed, to_hex_prefixed};

/// Size of one coordinate in bytes
pub const COORDINATE_SIZE: usize = 32;

/// Size of an encoded owner in bytes
pub const OWNER_SIZE: usize = 2 * COORDINATE_SIZE;

/// Signature scheme of a signer, also the registry's circuit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    Secp256k1,
    WebAuthn,
}

impl SignatureScheme {
    pub const ALL: [SignatureScheme; 2] = [SignatureScheme::Secp256k1, SignatureScheme::WebAuthn];

    /// Wire name used by the registry
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureScheme::Secp256k1 => "secp256k1",
            SignatureScheme::WebAuthn => "webauthn",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "secp256k1" => Ok(SignatureScheme::Secp256k1),
            "webauthn" => Ok(SignatureScheme::WebAuthn),
            other => Err(Error::UnsupportedCircuitType(other.to_string())),
        }
    }
}

impl Serialize for SignatureScheme {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SignatureScheme {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single authorized signer: `x || y`, 64 bytes
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Owner([u8; OWNER_SIZE]);

impl Owner {
    pub fn new(bytes: [u8; OWNER_SIZE]) -> Self {
        Self(bytes)
    }

    /// Encode a public key point from its affine coordinates.
    ///
    /// Both coordinates must be exactly 32 bytes; nothing is padded or truncated.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self> {
        let x: &[u8; COORDINATE_SIZE] = x.try_into().map_err(|_| Error::InvalidCoordinateLength {
            coordinate: "x",
            len: x.len(),
        })?;
        let y: &[u8; COORDINATE_SIZE] = y.try_into().map_err(|_| Error::InvalidCoordinateLength {
            coordinate: "y",
            len: y.len(),
        })?;

        let mut bytes = [0u8; OWNER_SIZE];
        bytes[..COORDINATE_SIZE].copy_from_slice(x);
        bytes[COORDINATE_SIZE..].copy_from_slice(y);
        Ok(Self(bytes))
    }

    /// Take an already encoded 64-byte owner.
    ///
    /// A blob of any other length is reported as malformed config data, since
    /// that is where encoded owners come from.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; OWNER_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::MalformedConfigData { len: bytes.len() })?;
        Ok(Self(arr))
    }

    /// Encode a SEC1 public key (compressed or uncompressed) on the scheme's curve
    pub fn from_sec1_bytes(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self> {
        match scheme {
            SignatureScheme::Secp256k1 => {
                use k256::elliptic_curve::sec1::ToEncodedPoint;

                let pk = k256::PublicKey::from_sec1_bytes(bytes)
                    .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
                let point = pk.to_encoded_point(false);
                Self::from_encoded_coordinates(point.x(), point.y())
            }
            SignatureScheme::WebAuthn => {
                use p256::elliptic_curve::sec1::ToEncodedPoint;

                let pk = p256::PublicKey::from_sec1_bytes(bytes)
                    .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
                let point = pk.to_encoded_point(false);
                Self::from_encoded_coordinates(point.x(), point.y())
            }
        }
    }

    fn from_encoded_coordinates<X, Y>(x: Option<&X>, y: Option<&Y>) -> Result<Self>
    where
        X: AsRef<[u8]> + ?Sized,
        Y: AsRef<[u8]> + ?Sized,
    {
        match (x, y) {
            (Some(x), Some(y)) => Self::from_coordinates(x.as_ref(), y.as_ref()),
            _ => Err(Error::InvalidPublicKey("point at infinity".to_string())),
        }
    }

    /// Split back into `(x, y)`
    pub fn coordinates(&self) -> ([u8; COORDINATE_SIZE], [u8; COORDINATE_SIZE]) {
        (self.x(), self.y())
    }

    pub fn x(&self) -> [u8; COORDINATE_SIZE] {
        let mut x = [0u8; COORDINATE_SIZE];
        x.copy_from_slice(&self.0[..COORDINATE_SIZE]);
        x
    }

    pub fn y(&self) -> [u8; COORDINATE_SIZE] {
        let mut y = [0u8; COORDINATE_SIZE];
        y.copy_from_slice(&self.0[COORDINATE_SIZE..]);
        y
    }

    pub fn as_bytes(&self) -> &[u8; OWNER_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        to_hex_prefixed(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_slice(&from_hex_prefixed(s)?)
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owner({})", self.to_hex())
    }
}

impl AsRef<[u8]> for Owner {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Owner {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Owner {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coordinates_layout() {
        let owner = Owner::from_coordinates(&[0x11; 32], &[0x22; 32]).unwrap();
        assert_eq!(&owner.as_bytes()[..32], &[0x11; 32]);
        assert_eq!(&owner.as_bytes()[32..], &[0x22; 32]);
        assert_eq!(owner.coordinates(), ([0x11; 32], [0x22; 32]));
    }

    #[test]
    fn test_short_and_long_coordinates_rejected() {
        assert_eq!(
            Owner::from_coordinates(&[0u8; 31], &[0u8; 32]),
            Err(Error::InvalidCoordinateLength { coordinate: "x", len: 31 })
        );
        assert_eq!(
            Owner::from_coordinates(&[0u8; 32], &[0u8; 33]),
            Err(Error::InvalidCoordinateLength { coordinate: "y", len: 33 })
        );
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("secp256k1".parse::<SignatureScheme>().unwrap(), SignatureScheme::Secp256k1);
        assert_eq!("webauthn".parse::<SignatureScheme>().unwrap(), SignatureScheme::WebAuthn);
        assert_eq!(
            "ed25519".parse::<SignatureScheme>(),
            Err(Error::UnsupportedCircuitType("ed25519".to_string()))
        );
        // Wire names are exact
        assert!("WebAuthn".parse::<SignatureScheme>().is_err());
    }

    #[test]
    fn test_sec1_compressed_and_uncompressed_agree() {
        use k256::elliptic_curve::sec1::ToEncodedPoint;

        let pk = k256::SecretKey::from_slice(&[0x42; 32]).unwrap().public_key();
        let compressed = pk.to_encoded_point(true);
        let uncompressed = pk.to_encoded_point(false);

        let a = Owner::from_sec1_bytes(SignatureScheme::Secp256k1, compressed.as_bytes()).unwrap();
        let b = Owner::from_sec1_bytes(SignatureScheme::Secp256k1, uncompressed.as_bytes()).unwrap();
        assert_eq!(a, b);
        // Uncompressed SEC1 is 0x04 || x || y; the owner drops the tag
        assert_eq!(a.as_bytes()[..], uncompressed.as_bytes()[1..]);
    }

    #[test]
    fn test_sec1_rejects_off_curve() {
        let mut bogus = [0u8; 65];
        bogus[0] = 0x04;
        assert!(matches!(
            Owner::from_sec1_bytes(SignatureScheme::WebAuthn, &bogus),
            Err(Error::InvalidPublicKey(_))
        ));
    }
}
