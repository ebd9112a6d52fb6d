//! # ed25519 Keys
//!
//! Edwards-curve signatures. The private key is stored as its 32-byte seed;
//! the 64-byte `seed ‖ public` form is accepted on input.
//!
//! The same key pair also serves as an X25519 key pair for key exchange and
//! the NaCl secret-key suite:
//!
//! ```text
//! Seed (32 bytes)
//!       │
//!       ├──► SHA-512 ─► clamp(h[0..32]) ─────────► X25519 scalar
//!       │
//!       └──► Edwards public point ─► to_montgomery ─► X25519 public key
//! ```

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand_core::CryptoRngCore;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Size of the private key seed in bytes
pub const SEED_SIZE: usize = 32;

/// Size of the expanded `seed ‖ public` private key in bytes
pub const KEYPAIR_SIZE: usize = 64;

/// Size of a public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of a signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// ed25519 private key
#[derive(Clone, ZeroizeOnDrop)]
pub struct Ed25519PrivateKey {
    #[zeroize(skip)] // ed25519_dalek::SigningKey handles its own zeroization
    key: SigningKey,
}

impl Ed25519PrivateKey {
    /// Parse a 32-byte seed or a 64-byte `seed ‖ public` key
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            SEED_SIZE => {
                let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
                seed.copy_from_slice(bytes);
                Ok(Self {
                    key: SigningKey::from_bytes(&seed),
                })
            }
            KEYPAIR_SIZE => {
                let mut keypair = Zeroizing::new([0u8; KEYPAIR_SIZE]);
                keypair.copy_from_slice(bytes);
                let key = SigningKey::from_keypair_bytes(&keypair).map_err(|_| {
                    Error::InvalidKeyLength("ed25519 public half does not match the seed".into())
                })?;
                Ok(Self { key })
            }
            _ => Err(Error::BadKeyLength("ed25519")),
        }
    }

    /// Generate a new random private key
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            key: SigningKey::generate(rng),
        }
    }

    /// Get the 32-byte seed
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn bytes(&self) -> [u8; SEED_SIZE] {
        self.key.to_bytes()
    }

    /// Get the 64-byte `seed ‖ public` form
    pub fn keypair_bytes(&self) -> [u8; KEYPAIR_SIZE] {
        self.key.to_keypair_bytes()
    }

    /// Derive the public key
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey {
            key: self.key.verifying_key(),
        }
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        self.key.sign(message).to_bytes()
    }

    /// Clamped X25519 scalar bytes derived from the seed
    pub(crate) fn x25519_scalar_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.key.to_scalar_bytes())
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519PrivateKey")
            .field("public", &hex::encode(self.public_key().bytes()))
            .finish()
    }
}

/// ed25519 public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    key: VerifyingKey,
}

impl Ed25519PublicKey {
    /// Parse a 32-byte compressed Edwards point
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; PUBLIC_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidLength(bytes.len()))?;

        let key = VerifyingKey::from_bytes(bytes)
            .map_err(|e| Error::InvalidPublicKey(format!("ed25519: {}", e)))?;
        Ok(Self { key })
    }

    /// Get the 32-byte encoding
    pub fn bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.key.to_bytes()
    }

    /// Verify a 64-byte signature
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        self.key.verify(message, &signature).is_ok()
    }

    /// X25519 public key bytes (Montgomery form of this point)
    pub(crate) fn x25519_bytes(&self) -> [u8; 32] {
        self.key.to_montgomery().to_bytes()
    }
}

// ============================================================================
// TESTS
// ============================================================================
