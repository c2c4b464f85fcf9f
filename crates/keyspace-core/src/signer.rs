//! Signer private keys
//!
//! A signer is selected explicitly by scheme; each variant derives its public
//! point with its own curve and then goes through the same owner encoding.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::owner::{Owner, SignatureScheme};
use crate::types::from_hex_prefixed;

/// secp256k1 private scalar
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secp256k1PrivateKey {
    scalar: [u8; 32],
}

impl Secp256k1PrivateKey {
    /// Wrap a scalar, rejecting zero and values outside the curve order
    pub fn from_bytes(scalar: [u8; 32]) -> Result<Self> {
        k256::SecretKey::from_bytes(&scalar.into())
            .map_err(|_| Error::InvalidPrivateKey("scalar out of range for secp256k1".to_string()))?;
        Ok(Self { scalar })
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(scalar_from_hex(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.scalar
    }

    /// Uncompressed public point `(x, y)`
    pub fn public_point(&self) -> Result<([u8; 32], [u8; 32])> {
        use k256::elliptic_curve::sec1::ToEncodedPoint;

        let secret = k256::SecretKey::from_bytes(&self.scalar.into())
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        let point = secret.public_key().to_encoded_point(false);
        split_point(point.x().map(|x| x.as_slice()), point.y().map(|y| y.as_slice()))
    }

    pub fn owner(&self) -> Result<Owner> {
        let (x, y) = self.public_point()?;
        Owner::from_coordinates(&x, &y)
    }
}

/// P-256 private scalar of a WebAuthn credential
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WebAuthnPrivateKey {
    scalar: [u8; 32],
}

impl WebAuthnPrivateKey {
    /// Wrap a scalar, rejecting zero and values outside the curve order
    pub fn from_bytes(scalar: [u8; 32]) -> Result<Self> {
        p256::SecretKey::from_bytes(&scalar.into())
            .map_err(|_| Error::InvalidPrivateKey("scalar out of range for P-256".to_string()))?;
        Ok(Self { scalar })
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(scalar_from_hex(s)?)
    }

    /// Parse an EC private key JWK (`kty: EC`, `crv: P-256`, with `d`)
    pub fn from_jwk(jwk: &str) -> Result<Self> {
        let secret = p256::SecretKey::from_jwk_str(jwk)
            .map_err(|e| Error::InvalidPrivateKey(format!("invalid JWK: {}", e)))?;
        let mut bytes = secret.to_bytes();
        let mut scalar = [0u8; 32];
        scalar.copy_from_slice(&bytes);
        bytes.as_mut_slice().zeroize();
        Ok(Self { scalar })
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.scalar
    }

    /// Uncompressed public point `(x, y)`
    pub fn public_point(&self) -> Result<([u8; 32], [u8; 32])> {
        use p256::elliptic_curve::sec1::ToEncodedPoint;

        let secret = p256::SecretKey::from_bytes(&self.scalar.into())
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        let point = secret.public_key().to_encoded_point(false);
        split_point(point.x().map(|x| x.as_slice()), point.y().map(|y| y.as_slice()))
    }

    pub fn owner(&self) -> Result<Owner> {
        let (x, y) = self.public_point()?;
        Owner::from_coordinates(&x, &y)
    }
}

/// Private key of a registry signer, tagged with its scheme
#[derive(Clone)]
pub enum SignerKey {
    Secp256k1(Secp256k1PrivateKey),
    WebAuthn(WebAuthnPrivateKey),
}

impl SignerKey {
    /// Parse a private key for the given scheme.
    ///
    /// secp256k1 keys are hex scalars. WebAuthn keys are either hex scalars or a
    /// JWK document.
    pub fn parse(scheme: SignatureScheme, input: &str) -> Result<Self> {
        let input = input.trim();
        match scheme {
            SignatureScheme::Secp256k1 => Ok(Self::Secp256k1(Secp256k1PrivateKey::from_hex(input)?)),
            SignatureScheme::WebAuthn if input.starts_with('{') => {
                Ok(Self::WebAuthn(WebAuthnPrivateKey::from_jwk(input)?))
            }
            SignatureScheme::WebAuthn => Ok(Self::WebAuthn(WebAuthnPrivateKey::from_hex(input)?)),
        }
    }

    pub fn scheme(&self) -> SignatureScheme {
        match self {
            SignerKey::Secp256k1(_) => SignatureScheme::Secp256k1,
            SignerKey::WebAuthn(_) => SignatureScheme::WebAuthn,
        }
    }

    pub fn public_point(&self) -> Result<([u8; 32], [u8; 32])> {
        match self {
            SignerKey::Secp256k1(key) => key.public_point(),
            SignerKey::WebAuthn(key) => key.public_point(),
        }
    }

    pub fn owner(&self) -> Result<Owner> {
        match self {
            SignerKey::Secp256k1(key) => key.owner(),
            SignerKey::WebAuthn(key) => key.owner(),
        }
    }
}

impl std::fmt::Debug for SignerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SignerKey({}, <redacted>)", self.scheme())
    }
}

fn scalar_from_hex(s: &str) -> Result<[u8; 32]> {
    let mut bytes = from_hex_prefixed(s)?;
    let scalar: Result<[u8; 32]> = bytes.as_slice().try_into().map_err(|_| {
        Error::InvalidPrivateKey(format!("expected 32 bytes, got {}", bytes.len()))
    });
    bytes.zeroize();
    scalar
}

fn split_point(x: Option<&[u8]>, y: Option<&[u8]>) -> Result<([u8; 32], [u8; 32])> {
    let (x, y) = match (x, y) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(Error::InvalidPublicKey("point at infinity".to_string())),
    };
    let x: [u8; 32] = x.try_into().map_err(|_| Error::InvalidCoordinateLength {
        coordinate: "x",
        len: x.len(),
    })?;
    let y: [u8; 32] = y.try_into().map_err(|_| Error::InvalidCoordinateLength {
        coordinate: "y",
        len: y.len(),
    })?;
    Ok((x, y))
}
