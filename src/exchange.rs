//! # Key Exchange
//!
//! Per-curve Diffie-Hellman. Every curve family yields a 32-byte shared
//! secret so the ciphers above can consume it uniformly.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SHARED SECRET PER CURVE                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  secp256k1   SHA-256( X coordinate of d·Q )                             │
//! │  secp256r1   SHA-256( X coordinate of d·Q )                             │
//! │  ed25519     X25519( clamp(SHA-512(seed)[..32]), to_montgomery(Q) )     │
//! │  sr25519     compress_ristretto( s·Q )                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The initiator generates an ephemeral key with [`KeyExchange::ephemeral_key`]
//! and computes the secret against the recipient's public key; the recipient
//! computes the same secret from its private key and the ephemeral public key.

use curve25519_dalek::ristretto::CompressedRistretto;
use curve25519_dalek::Scalar;
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha256};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};
use crate::keys::{
    Ed25519PrivateKey, Ed25519PublicKey, KeyKind, PrivateKey, PublicKey, Secp256k1PrivateKey,
    Secp256k1PublicKey, Secp256r1PrivateKey, Secp256r1PublicKey, Sr25519PrivateKey,
    Sr25519PublicKey,
};

/// Size of every shared secret in bytes
pub const SHARED_SECRET_SIZE: usize = 32;

/// A 32-byte shared secret
///
/// Zeroized when dropped.
#[derive(ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl SharedSecret {
    /// Get the raw bytes (for key derivation)
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.0
    }
}

/// Key exchange for one curve family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyExchange {
    kind: KeyKind,
}

impl KeyExchange {
    /// Key exchange over the given curve family
    pub fn for_kind(kind: KeyKind) -> Self {
        Self { kind }
    }

    /// The curve family this exchange runs on
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Generate a fresh ephemeral private key on this curve
    pub fn ephemeral_key(&self, rng: &mut impl CryptoRngCore) -> PrivateKey {
        PrivateKey::generate(self.kind, rng)
    }

    /// Compute the shared secret between a private and a public key
    ///
    /// Both keys must belong to this exchange's curve family.
    pub fn shared_secret(&self, private_key: &PrivateKey, public_key: &PublicKey) -> Result<SharedSecret> {
        if private_key.kind() != self.kind {
            return Err(Error::UnsupportedKeyType(format!(
                "{} private key given to {} key exchange",
                private_key.kind(),
                self.kind
            )));
        }

        let secret = match (private_key, public_key) {
            (PrivateKey::Secp256k1(sk), PublicKey::Secp256k1(pk)) => secp256k1_shared(sk, pk),
            (PrivateKey::Ed25519(sk), PublicKey::Ed25519(pk)) => ed25519_shared(sk, pk)?,
            (PrivateKey::Sr25519(sk), PublicKey::Sr25519(pk)) => sr25519_shared(sk, pk)?,
            (PrivateKey::Secp256r1(sk), PublicKey::Secp256r1(pk)) => secp256r1_shared(sk, pk),
            (_, public_key) => {
                return Err(Error::UnsupportedKeyType(format!(
                    "{} public key given to {} key exchange",
                    public_key.kind(),
                    self.kind
                )))
            }
        };

        Ok(SharedSecret(secret))
    }
}

/// Raw big-endian X coordinate of the secp256k1 ECDH point
pub(crate) fn secp256k1_raw_x(
    private_key: &Secp256k1PrivateKey,
    public_key: &Secp256k1PublicKey,
) -> Zeroizing<[u8; 32]> {
    let shared = k256::ecdh::diffie_hellman(
        private_key.secret_key().to_nonzero_scalar(),
        public_key.inner().as_affine(),
    );
    let mut out = Zeroizing::new([0u8; 32]);
    out.copy_from_slice(shared.raw_secret_bytes());
    out
}

fn secp256k1_shared(private_key: &Secp256k1PrivateKey, public_key: &Secp256k1PublicKey) -> [u8; 32] {
    let x = secp256k1_raw_x(private_key, public_key);
    Sha256::digest(x.as_slice()).into()
}

fn secp256r1_shared(private_key: &Secp256r1PrivateKey, public_key: &Secp256r1PublicKey) -> [u8; 32] {
    let shared = p256::ecdh::diffie_hellman(
        private_key.secret_key().to_nonzero_scalar(),
        public_key.inner().as_affine(),
    );
    Sha256::digest(shared.raw_secret_bytes()).into()
}

fn ed25519_shared(private_key: &Ed25519PrivateKey, public_key: &Ed25519PublicKey) -> Result<[u8; 32]> {
    let secret = x25519_dalek::StaticSecret::from(*private_key.x25519_scalar_bytes());
    let public = x25519_dalek::PublicKey::from(public_key.x25519_bytes());

    let shared = secret.diffie_hellman(&public);
    if !shared.was_contributory() {
        return Err(Error::KeyExchangeFailed("low-order ed25519 public key".into()));
    }
    Ok(shared.to_bytes())
}

fn sr25519_shared(private_key: &Sr25519PrivateKey, public_key: &Sr25519PublicKey) -> Result<[u8; 32]> {
    let scalar = Scalar::from_bytes_mod_order(*private_key.scalar_bytes());
    let point = CompressedRistretto(public_key.bytes())
        .decompress()
        .ok_or_else(|| Error::KeyExchangeFailed("sr25519 public key is not a ristretto point".into()))?;

    Ok((scalar * point).compress().to_bytes())
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

    fn agree(a: PrivateKey, b: PrivateKey) -> ([u8; 32], [u8; 32]) {
        let exchange = KeyExchange::for_kind(a.kind());
        let ab = exchange.shared_secret(&a, &b.public_key()).unwrap();
        let ba = exchange.shared_secret(&b, &a.public_key()).unwrap();
        (*ab.as_bytes(), *ba.as_bytes())
    }

    #[test]
    fn test_secp256k1_shared_secret() {
        let (ab, ba) = agree(testing::secp256k1_alice().into(), testing::secp256k1_bob().into());
        assert_eq!(ab, ba);
        assert_eq!(
            hex::encode(ab),
            "32968b92310431b6305d13cde95e9dac02835d6b7801628a9bf1a63a12faa74f"
        );
    }

    #[test]
    fn test_ed25519_shared_secret() {
        let (ab, ba) = agree(testing::ed25519_alice().into(), testing::ed25519_bob().into());
        assert_eq!(ab, ba);
        assert_eq!(
            hex::encode(ab),
            "f148bcc6b73d8cb3dd858e26b14778fa9bfac8c3ddd5dd9fe71e2666d61cf04d"
        );
    }

    #[test]
    fn test_sr25519_shared_secret() {
        let (ab, ba) = agree(testing::sr25519_alice().into(), testing::sr25519_bob().into());
        assert_eq!(ab, ba);

        let (ae, _) = agree(testing::sr25519_alice().into(), testing::sr25519_eve().into());
        assert_ne!(ab, ae);
    }

    #[test]
    fn test_secp256r1_shared_secret() {
        let (ab, ba) = agree(testing::secp256r1_alice().into(), testing::secp256r1_bob().into());
        assert_eq!(ab, ba);

        let (ac, _) = agree(testing::secp256r1_alice().into(), testing::secp256r1_carlos().into());
        assert_ne!(ab, ac);
    }

    #[test]
    fn test_ephemeral_keys() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for kind in KeyKind::ALL {
            let exchange = KeyExchange::for_kind(kind);
            let ephemeral = exchange.ephemeral_key(&mut rng);
            let recipient = exchange.ephemeral_key(&mut rng);
            assert_eq!(ephemeral.kind(), kind);

            let sent = exchange.shared_secret(&ephemeral, &recipient.public_key()).unwrap();
            let received = exchange.shared_secret(&recipient, &ephemeral.public_key()).unwrap();
            assert_eq!(sent.as_bytes(), received.as_bytes());
        }
    }

    #[test]
    fn test_mismatched_curves() {
        let exchange = KeyExchange::for_kind(KeyKind::Ed25519);
        let ed = PrivateKey::from(testing::ed25519_alice());
        let sr = PrivateKey::from(testing::sr25519_bob());

        assert!(matches!(
            exchange.shared_secret(&ed, &sr.public_key()),
            Err(Error::UnsupportedKeyType(_))
        ));
        assert!(matches!(
            exchange.shared_secret(&sr, &ed.public_key()),
            Err(Error::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn test_ed25519_low_order_point_rejected() {
        // The identity point encodes as y = 1.
        let mut identity = [0u8; 32];
        identity[0] = 1;
        let public = PublicKey::from_bytes(KeyKind::Ed25519, &identity).unwrap();

        let exchange = KeyExchange::for_kind(KeyKind::Ed25519);
        let result = exchange.shared_secret(&testing::ed25519_alice().into(), &public);
        assert!(matches!(result, Err(Error::KeyExchangeFailed(_))));
    }
}
