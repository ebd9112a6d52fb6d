//! # Key Algebra
//!
//! One key type per curve family, unified behind the closed [`PrivateKey`]
//! and [`PublicKey`] enums.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           KEY ALGEBRA                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   PrivateKey ──────────────────────────────┐                            │
//! │   ├── Secp256k1(Secp256k1PrivateKey)       │ public_key()               │
//! │   ├── Ed25519(Ed25519PrivateKey)           ▼                            │
//! │   ├── Sr25519(Sr25519PrivateKey)       PublicKey                        │
//! │   └── Secp256r1(Secp256r1PrivateKey)   ├── Secp256k1(...)               │
//! │                                        ├── Ed25519(...)                 │
//! │   sign(message) ──► signature          ├── Sr25519(...)                 │
//! │                         │              └── Secp256r1(...)               │
//! │                         └──────────────► verify(message, signature)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-curve behavior
//!
//! | Curve | Private bytes | Public bytes | Signs | Signature |
//! |-------|---------------|--------------|-------|-----------|
//! | secp256k1 | 32 (scalar) | 33 (compressed) | 32-byte digest | 65 `R‖S‖V` |
//! | ed25519 | 32 (seed) | 32 | message | 64 |
//! | sr25519 | 32 (seed) or 64 | 32 | message | 64 |
//! | secp256r1 | 32 (scalar) | 33 (compressed) | digest | 64 `R‖S`, low-S |
//!
//! Public keys serialize with serde as the hex of their descriptive bytes
//! (`curve id ‖ key bytes`), so the curve survives a round trip.

pub mod ed25519;
pub mod ids;
pub mod secp256k1;
pub mod secp256r1;
pub mod sr25519;

use rand_core::CryptoRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

pub use ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
pub use ids::KeyKind;
pub use secp256k1::{Secp256k1PrivateKey, Secp256k1PublicKey};
pub use secp256r1::{Secp256r1PrivateKey, Secp256r1PublicKey};
pub use sr25519::{Sr25519PrivateKey, Sr25519PublicKey};

/// A private key of any supported curve family
#[derive(Debug, Clone)]
pub enum PrivateKey {
    /// secp256k1 private key
    Secp256k1(Secp256k1PrivateKey),
    /// ed25519 private key
    Ed25519(Ed25519PrivateKey),
    /// sr25519 private key
    Sr25519(Sr25519PrivateKey),
    /// secp256r1 private key
    Secp256r1(Secp256r1PrivateKey),
}

impl PrivateKey {
    /// Parse private key bytes for the given curve family
    pub fn from_bytes(kind: KeyKind, bytes: &[u8]) -> Result<Self> {
        Ok(match kind {
            KeyKind::Secp256k1 => Self::Secp256k1(Secp256k1PrivateKey::from_bytes(bytes)?),
            KeyKind::Ed25519 => Self::Ed25519(Ed25519PrivateKey::from_bytes(bytes)?),
            KeyKind::Sr25519 => Self::Sr25519(Sr25519PrivateKey::from_bytes(bytes)?),
            KeyKind::Secp256r1 => Self::Secp256r1(Secp256r1PrivateKey::from_bytes(bytes)?),
        })
    }

    /// Generate a new random key of the given curve family
    pub fn generate(kind: KeyKind, rng: &mut impl CryptoRngCore) -> Self {
        match kind {
            KeyKind::Secp256k1 => Self::Secp256k1(Secp256k1PrivateKey::generate(rng)),
            KeyKind::Ed25519 => Self::Ed25519(Ed25519PrivateKey::generate(rng)),
            KeyKind::Sr25519 => Self::Sr25519(Sr25519PrivateKey::generate(rng)),
            KeyKind::Secp256r1 => Self::Secp256r1(Secp256r1PrivateKey::generate(rng)),
        }
    }

    /// The curve family of this key
    pub fn kind(&self) -> KeyKind {
        match self {
            Self::Secp256k1(_) => KeyKind::Secp256k1,
            Self::Ed25519(_) => KeyKind::Ed25519,
            Self::Sr25519(_) => KeyKind::Sr25519,
            Self::Secp256r1(_) => KeyKind::Secp256r1,
        }
    }

    /// Canonical private key bytes (scalar or seed)
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            Self::Secp256k1(key) => key.bytes().to_vec(),
            Self::Ed25519(key) => key.bytes().to_vec(),
            Self::Sr25519(key) => key.bytes(),
            Self::Secp256r1(key) => key.bytes().to_vec(),
        }
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Secp256k1(key) => PublicKey::Secp256k1(key.public_key()),
            Self::Ed25519(key) => PublicKey::Ed25519(key.public_key()),
            Self::Sr25519(key) => PublicKey::Sr25519(key.public_key()),
            Self::Secp256r1(key) => PublicKey::Secp256r1(key.public_key()),
        }
    }

    /// Sign with the curve's native algorithm
    ///
    /// secp256k1 and secp256r1 expect a digest; ed25519 and sr25519 sign the
    /// message itself.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(match self {
            Self::Secp256k1(key) => key.sign(message)?.to_vec(),
            Self::Ed25519(key) => key.sign(message).to_vec(),
            Self::Sr25519(key) => key.sign(message).to_vec(),
            Self::Secp256r1(key) => key.sign(message)?.to_vec(),
        })
    }
}

impl From<Secp256k1PrivateKey> for PrivateKey {
    fn from(key: Secp256k1PrivateKey) -> Self {
        Self::Secp256k1(key)
    }
}

impl From<Ed25519PrivateKey> for PrivateKey {
    fn from(key: Ed25519PrivateKey) -> Self {
        Self::Ed25519(key)
    }
}

impl From<Sr25519PrivateKey> for PrivateKey {
    fn from(key: Sr25519PrivateKey) -> Self {
        Self::Sr25519(key)
    }
}

impl From<Secp256r1PrivateKey> for PrivateKey {
    fn from(key: Secp256r1PrivateKey) -> Self {
        Self::Secp256r1(key)
    }
}

/// A public key of any supported curve family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// secp256k1 public key
    Secp256k1(Secp256k1PublicKey),
    /// ed25519 public key
    Ed25519(Ed25519PublicKey),
    /// sr25519 public key
    Sr25519(Sr25519PublicKey),
    /// secp256r1 public key
    Secp256r1(Secp256r1PublicKey),
}

impl PublicKey {
    /// Parse public key bytes for the given curve family
    pub fn from_bytes(kind: KeyKind, bytes: &[u8]) -> Result<Self> {
        Ok(match kind {
            KeyKind::Secp256k1 => Self::Secp256k1(Secp256k1PublicKey::from_bytes(bytes)?),
            KeyKind::Ed25519 => Self::Ed25519(Ed25519PublicKey::from_bytes(bytes)?),
            KeyKind::Sr25519 => Self::Sr25519(Sr25519PublicKey::from_bytes(bytes)?),
            KeyKind::Secp256r1 => Self::Secp256r1(Secp256r1PublicKey::from_bytes(bytes)?),
        })
    }

    /// The curve family of this key
    pub fn kind(&self) -> KeyKind {
        match self {
            Self::Secp256k1(_) => KeyKind::Secp256k1,
            Self::Ed25519(_) => KeyKind::Ed25519,
            Self::Sr25519(_) => KeyKind::Sr25519,
            Self::Secp256r1(_) => KeyKind::Secp256r1,
        }
    }

    /// Canonical public key bytes (compressed where the curve has a choice)
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            Self::Secp256k1(key) => key.bytes().to_vec(),
            Self::Ed25519(key) => key.bytes().to_vec(),
            Self::Sr25519(key) => key.bytes().to_vec(),
            Self::Secp256r1(key) => key.bytes().to_vec(),
        }
    }

    /// Verify a signature produced by the matching private key
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self {
            Self::Secp256k1(key) => key.verify(message, signature),
            Self::Ed25519(key) => key.verify(message, signature),
            Self::Sr25519(key) => key.verify(message, signature),
            Self::Secp256r1(key) => key.verify(message, signature),
        }
    }
}

impl From<Secp256k1PublicKey> for PublicKey {
    fn from(key: Secp256k1PublicKey) -> Self {
        Self::Secp256k1(key)
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        Self::Ed25519(key)
    }
}

impl From<Sr25519PublicKey> for PublicKey {
    fn from(key: Sr25519PublicKey) -> Self {
        Self::Sr25519(key)
    }
}

impl From<Secp256r1PublicKey> for PublicKey {
    fn from(key: Secp256r1PublicKey) -> Self {
        Self::Secp256r1(key)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let descriptive = crate::registry::descriptive_bytes_from_public_key(self);
        serializer.serialize_str(&hex::encode(descriptive))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        crate::registry::public_key_from_descriptive_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================
