//! # secp256k1 Keys
//!
//! ECDSA over secp256k1 with Ethereum-style recoverable signatures.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SECP256K1 ENCODINGS                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Private key    32 bytes, big-endian scalar, 0 < d < n                  │
//! │                                                                         │
//! │  Public key     33 bytes   02|03 ‖ X            (canonical)             │
//! │                 65 bytes   04 ‖ X ‖ Y           (accepted)              │
//! │                 64 bytes   X ‖ Y                (accepted)              │
//! │                                                                         │
//! │  Signature      65 bytes   R(32) ‖ S(32) ‖ V(1)                         │
//! │                 RFC 6979 nonce, low-S, V = recovery id (0 or 1)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Signing operates on a 32-byte digest. Hashing the message is the
//! caller's responsibility.

use std::fmt;

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::CryptoRngCore;
use zeroize::ZeroizeOnDrop;

use crate::error::{Error, Result};

/// Size of a private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of a compressed public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 33;

/// Size of an uncompressed (0x04-prefixed) public key in bytes
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Size of a recoverable signature in bytes
pub const SIGNATURE_SIZE: usize = 65;

/// Size of the digest accepted by `sign` and `verify`
pub const DIGEST_SIZE: usize = 32;

/// secp256k1 private key
#[derive(Clone, ZeroizeOnDrop)]
pub struct Secp256k1PrivateKey {
    #[zeroize(skip)] // k256::SecretKey handles its own zeroization
    key: k256::SecretKey,
}

impl Secp256k1PrivateKey {
    /// Parse a 32-byte big-endian scalar
    ///
    /// Fails with `UnusableSeed` if the scalar is zero or not below the
    /// curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(Error::BadKeyLength("secp256k1"));
        }

        let key = k256::SecretKey::from_slice(bytes).map_err(|_| Error::UnusableSeed)?;
        Ok(Self { key })
    }

    /// Generate a new random private key
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            key: k256::SecretKey::random(rng),
        }
    }

    /// Get the raw 32-byte scalar
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        let mut out = [0u8; PRIVATE_KEY_SIZE];
        out.copy_from_slice(&self.key.to_bytes());
        out
    }

    /// Derive the public key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey {
            key: self.key.public_key(),
        }
    }

    /// Sign a 32-byte digest, returning `R ‖ S ‖ V`
    pub fn sign(&self, digest: &[u8]) -> Result<[u8; SIGNATURE_SIZE]> {
        if digest.len() != DIGEST_SIZE {
            return Err(Error::InputValidation(format!(
                "secp256k1 signs a {}-byte digest, got {} bytes",
                DIGEST_SIZE,
                digest.len()
            )));
        }

        let signing_key = SigningKey::from(&self.key);
        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| Error::SigningFailed(e.to_string()))?;

        let mut out = [0u8; SIGNATURE_SIZE];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        Ok(out)
    }

    pub(crate) fn secret_key(&self) -> &k256::SecretKey {
        &self.key
    }
}

impl fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1PrivateKey")
            .field("public", &hex::encode(self.public_key().bytes()))
            .finish()
    }
}

/// secp256k1 public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey {
    key: k256::PublicKey,
}

impl Secp256k1PublicKey {
    /// Parse a compressed, uncompressed or raw `X ‖ Y` point
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let parsed = match bytes.len() {
            PUBLIC_KEY_SIZE | UNCOMPRESSED_PUBLIC_KEY_SIZE => k256::PublicKey::from_sec1_bytes(bytes),
            64 => {
                let mut prefixed = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
                prefixed[0] = 0x04;
                prefixed[1..].copy_from_slice(bytes);
                k256::PublicKey::from_sec1_bytes(&prefixed)
            }
            other => return Err(Error::InvalidLength(other)),
        };

        let key = parsed
            .map_err(|_| Error::InvalidPublicKey("not a secp256k1 point".into()))?;
        Ok(Self { key })
    }

    /// Get the 33-byte compressed encoding
    pub fn bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        out.copy_from_slice(self.key.to_encoded_point(true).as_bytes());
        out
    }

    /// Get the 65-byte `0x04 ‖ X ‖ Y` encoding
    pub fn uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_SIZE] {
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
        out.copy_from_slice(self.key.to_encoded_point(false).as_bytes());
        out
    }

    /// Verify a 64- or 65-byte signature over a 32-byte digest
    ///
    /// A trailing recovery id is ignored. High-S signatures are rejected.
    pub fn verify(&self, digest: &[u8], signature: &[u8]) -> bool {
        if digest.len() != DIGEST_SIZE {
            return false;
        }

        let rs = match signature.len() {
            64 | SIGNATURE_SIZE => &signature[..64],
            _ => return false,
        };

        let Ok(signature) = Signature::from_slice(rs) else {
            return false;
        };

        VerifyingKey::from(&self.key)
            .verify_prehash(digest, &signature)
            .is_ok()
    }

    pub(crate) fn inner(&self) -> &k256::PublicKey {
        &self.key
    }
}

// ============================================================================
// TESTS
// ============================================================================
