//! # sr25519 Keys
//!
//! Schnorr signatures over the Ristretto group (schnorrkel), as used by
//! Substrate-based chains.
//!
//! | Form | Size | Notes |
//! |------|------|-------|
//! | Mini secret (seed) | 32 bytes | Expanded in Ed25519 mode |
//! | Expanded secret | 64 bytes | `scalar(32) ‖ nonce(32)` |
//! | Public key | 32 bytes | Compressed Ristretto point |
//! | Signature | 64 bytes | Signing context `"substrate"` |

use std::fmt;

use rand_core::CryptoRngCore;
use schnorrkel::{ExpansionMode, MiniSecretKey, SecretKey, Signature};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Size of the mini secret seed in bytes
pub const SEED_SIZE: usize = 32;

/// Size of an expanded secret key in bytes
pub const SECRET_KEY_SIZE: usize = 64;

/// Size of a public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of a signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Signing context shared with Substrate tooling
pub const SIGNING_CONTEXT: &[u8] = b"substrate";

/// sr25519 private key
///
/// Keeps the seed when the key was built from one, so `bytes()` can hand
/// back the same 32 bytes it was given.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Sr25519PrivateKey {
    seed: Option<[u8; SEED_SIZE]>,
    #[zeroize(skip)] // schnorrkel::SecretKey handles its own zeroization
    secret: SecretKey,
}

impl Sr25519PrivateKey {
    /// Parse a 32-byte mini secret or a 64-byte expanded secret key
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            SEED_SIZE => {
                let mini = MiniSecretKey::from_bytes(bytes)
                    .map_err(|e| Error::InvalidKey(format!("sr25519 seed: {}", e)))?;
                let mut seed = [0u8; SEED_SIZE];
                seed.copy_from_slice(bytes);
                Ok(Self {
                    seed: Some(seed),
                    secret: mini.expand(ExpansionMode::Ed25519),
                })
            }
            SECRET_KEY_SIZE => {
                let secret = SecretKey::from_bytes(bytes)
                    .map_err(|e| Error::InvalidKey(format!("sr25519 secret: {}", e)))?;
                Ok(Self { seed: None, secret })
            }
            _ => Err(Error::BadKeyLength("sr25519")),
        }
    }

    /// Generate a new random private key
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        let mini = MiniSecretKey::generate_with(&mut *rng);
        Self {
            seed: Some(mini.to_bytes()),
            secret: mini.expand(ExpansionMode::Ed25519),
        }
    }

    /// Get the seed, or the 64-byte expanded key if no seed is known
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn bytes(&self) -> Vec<u8> {
        match &self.seed {
            Some(seed) => seed.to_vec(),
            None => self.secret.to_bytes().to_vec(),
        }
    }

    /// Derive the public key
    pub fn public_key(&self) -> Sr25519PublicKey {
        Sr25519PublicKey {
            key: self.secret.to_public(),
        }
    }

    /// Sign a message under the `"substrate"` context
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        let public = self.secret.to_public();
        self.secret
            .sign_simple(SIGNING_CONTEXT, message, &public)
            .to_bytes()
    }

    /// Canonical secret scalar bytes, used for key exchange
    pub(crate) fn scalar_bytes(&self) -> Zeroizing<[u8; 32]> {
        let expanded = Zeroizing::new(self.secret.to_bytes());
        let mut scalar = Zeroizing::new([0u8; 32]);
        scalar.copy_from_slice(&expanded[..32]);
        scalar
    }
}

impl fmt::Debug for Sr25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sr25519PrivateKey")
            .field("public", &hex::encode(self.public_key().bytes()))
            .finish()
    }
}

/// sr25519 public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sr25519PublicKey {
    key: schnorrkel::PublicKey,
}

impl Sr25519PublicKey {
    /// Parse a 32-byte compressed Ristretto point
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(Error::InvalidLength(bytes.len()));
        }

        let key = schnorrkel::PublicKey::from_bytes(bytes)
            .map_err(|e| Error::InvalidPublicKey(format!("sr25519: {}", e)))?;
        Ok(Self { key })
    }

    /// Get the 32-byte encoding
    pub fn bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.key.to_bytes()
    }

    /// Verify a 64-byte signature made under the `"substrate"` context
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_bytes(signature) else {
            return false;
        };
        self.key
            .verify_simple(SIGNING_CONTEXT, message, &signature)
            .is_ok()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_bytes_returns_seed() {
        assert_eq!(
            hex::encode(testing::sr25519_alice().bytes()),
            "5c6d7adf75bda1180c225d25f3aa8dc174bbfb3cddee11ae9a85982f6faf791a"
        );
    }

    #[test]
    fn test_expanded_key_round_trip() {
        let bob = testing::sr25519_bob();
        let expanded = bob.secret.to_bytes();

        let restored = Sr25519PrivateKey::from_bytes(&expanded).unwrap();
        assert_eq!(restored.bytes(), expanded.to_vec());
        assert_eq!(restored.public_key(), bob.public_key());
    }

    #[test]
    fn test_bad_key_length() {
        assert_eq!(
            Sr25519PrivateKey::from_bytes(&[1u8; 48]).unwrap_err(),
            Error::BadKeyLength("sr25519")
        );
        assert_eq!(
            Sr25519PublicKey::from_bytes(&[0x72, 0x3c, 0xaa, 0x23]).unwrap_err(),
            Error::InvalidLength(4)
        );
    }

    #[test]
    fn test_public_key_round_trip() {
        let public = testing::sr25519_eve().public_key();
        assert_eq!(Sr25519PublicKey::from_bytes(&public.bytes()).unwrap(), public);
    }

    #[test]
    fn test_verify_known_signatures() {
        let bob_signature = hex::decode(
            "6251aa51a4b415a3fa2886a4c674d747f91d2733f5f2010011351c7c791a0628\
             ca2da1aba22734fe8023e29c87b6daa312f0c2ef3e561bac48c62ac5e6cd8580",
        )
        .unwrap();
        assert!(testing::sr25519_bob()
            .public_key()
            .verify(b"message", &bob_signature));

        let alice_signature = hex::decode(
            "5661629c9b2fd6ff80b405355ef412a5c5aafee4297d3411842dfa2c76bc1b74\
             614bc66bc261a565dc2b0844643b72d42fbede7ec980e3d9357f370dd342e783",
        )
        .unwrap();
        assert!(testing::sr25519_alice()
            .public_key()
            .verify(b"egassem", &alice_signature));
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        // An ed25519 signature lacks the schnorrkel marker bit.
        let ed25519_signature = testing::ed25519_bob().sign(b"message");
        assert!(!testing::sr25519_alice()
            .public_key()
            .verify(b"egassem", &ed25519_signature));
    }

    #[test]
    fn test_sign_and_verify() {
        let alice = testing::sr25519_alice();
        let signature = alice.sign(b"message");

        assert!(alice.public_key().verify(b"message", &signature));
        assert!(!alice.public_key().verify(b"egassem", &signature));
        assert!(!testing::sr25519_bob().public_key().verify(b"message", &signature));
    }

    #[test]
    fn test_generate() {
        let mut rng = ChaCha20Rng::seed_from_u64(25519);
        let key = Sr25519PrivateKey::generate(&mut rng);
        assert_eq!(key.bytes().len(), SEED_SIZE);

        let again = Sr25519PrivateKey::from_bytes(&key.bytes()).unwrap();
        assert_eq!(again.public_key(), key.public_key());
    }
}
