//! # secp256r1 Keys
//!
//! ECDSA over NIST P-256. Signatures are deterministic (RFC 6979) and
//! normalized to low-S before being encoded as a fixed 64-byte `R ‖ S`.
//! Signing and verification operate on a caller-supplied digest. Digests
//! shorter than 32 bytes are read as big-endian integers, i.e. left-padded
//! with zeros; longer ones are truncated to their leftmost 256 bits.

use std::borrow::Cow;
use std::fmt;

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::CryptoRngCore;
use zeroize::ZeroizeOnDrop;

use crate::error::{Error, Result};

/// Size of a private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of a compressed public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 33;

/// Size of an uncompressed public key in bytes
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Size of a signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Size of a field element in bytes
const FIELD_SIZE: usize = 32;

fn padded_digest(digest: &[u8]) -> Cow<'_, [u8]> {
    if digest.len() >= FIELD_SIZE {
        return Cow::Borrowed(digest);
    }

    let mut padded = vec![0u8; FIELD_SIZE];
    padded[FIELD_SIZE - digest.len()..].copy_from_slice(digest);
    Cow::Owned(padded)
}

/// secp256r1 private key
#[derive(Clone, ZeroizeOnDrop)]
pub struct Secp256r1PrivateKey {
    #[zeroize(skip)] // p256::SecretKey handles its own zeroization
    key: p256::SecretKey,
}

impl Secp256r1PrivateKey {
    /// Parse a 32-byte big-endian scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(Error::BadKeyLength("secp256r1"));
        }

        let key = p256::SecretKey::from_slice(bytes).map_err(|_| Error::UnusableSeed)?;
        Ok(Self { key })
    }

    /// Generate a new random private key
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            key: p256::SecretKey::random(rng),
        }
    }

    /// Get the raw 32-byte scalar
    pub fn bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        let mut out = [0u8; PRIVATE_KEY_SIZE];
        out.copy_from_slice(&self.key.to_bytes());
        out
    }

    /// Derive the public key
    pub fn public_key(&self) -> Secp256r1PublicKey {
        Secp256r1PublicKey {
            key: self.key.public_key(),
        }
    }

    /// Sign a digest, returning a low-S `R ‖ S`
    pub fn sign(&self, digest: &[u8]) -> Result<[u8; SIGNATURE_SIZE]> {
        let signing_key = SigningKey::from(&self.key);
        let signature: Signature = signing_key
            .sign_prehash(&padded_digest(digest))
            .map_err(|e| Error::SigningFailed(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);

        let mut out = [0u8; SIGNATURE_SIZE];
        out.copy_from_slice(&signature.to_bytes());
        Ok(out)
    }

    pub(crate) fn secret_key(&self) -> &p256::SecretKey {
        &self.key
    }
}

impl fmt::Debug for Secp256r1PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256r1PrivateKey")
            .field("public", &hex::encode(self.public_key().bytes()))
            .finish()
    }
}

/// secp256r1 public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secp256r1PublicKey {
    key: p256::PublicKey,
}

impl Secp256r1PublicKey {
    /// Parse a compressed or uncompressed SEC1 point
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            PUBLIC_KEY_SIZE | UNCOMPRESSED_PUBLIC_KEY_SIZE => {}
            other => return Err(Error::InvalidLength(other)),
        }

        let key = p256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| Error::InvalidPublicKey("not a secp256r1 point".into()))?;
        Ok(Self { key })
    }

    /// Get the 33-byte compressed encoding
    pub fn bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        out.copy_from_slice(self.key.to_encoded_point(true).as_bytes());
        out
    }

    /// Get the 65-byte uncompressed encoding
    pub fn uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_SIZE] {
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
        out.copy_from_slice(self.key.to_encoded_point(false).as_bytes());
        out
    }

    /// Verify a 64-byte `R ‖ S` signature over a digest
    pub fn verify(&self, digest: &[u8], signature: &[u8]) -> bool {
        if signature.len() != SIGNATURE_SIZE {
            return false;
        }

        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };

        VerifyingKey::from(&self.key)
            .verify_prehash(&padded_digest(digest), &signature)
            .is_ok()
    }

    pub(crate) fn inner(&self) -> &p256::PublicKey {
        &self.key
    }
}

// ============================================================================
// TESTS
// ============================================================================
