//! Hardened child-key derivation.
//!
//! Compatible with the `Ed25519HDKD` convention used by Substrate wallets:
//! the child seed is `BLAKE2b-256(prefix ‖ parent seed ‖ chain code)`.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use zeroize::Zeroizing;

use super::ChainCode;
use crate::error::{Error, Result};
use crate::keys::{Ed25519PrivateKey, PrivateKey};

/// SCALE-encoded `"Ed25519HDKD"` (compact length byte followed by the text)
const ED25519_HDKD_PREFIX: [u8; 12] = [44, 69, 100, 50, 53, 53, 49, 57, 72, 68, 75, 68];

/// Derive a hardened child key
///
/// Only ed25519 parents are supported.
pub fn derive_hardened_key(parent: &PrivateKey, chain_code: &ChainCode) -> Result<PrivateKey> {
    match parent {
        PrivateKey::Ed25519(key) => Ok(derive_ed25519(key, chain_code)?.into()),
        other => Err(Error::UnsupportedKeyType(format!(
            "hardened derivation is not supported for {} keys",
            other.kind()
        ))),
    }
}

/// Derive along a path of chain codes, one hardened step per element
///
/// An empty path returns a copy of the parent.
pub fn derive_hardened_path(parent: &PrivateKey, path: &[ChainCode]) -> Result<PrivateKey> {
    tracing::debug!(depth = path.len(), curve = %parent.kind(), "Deriving hardened path");

    path.iter()
        .try_fold(parent.clone(), |key, chain_code| derive_hardened_key(&key, chain_code))
}

fn derive_ed25519(parent: &Ed25519PrivateKey, chain_code: &ChainCode) -> Result<Ed25519PrivateKey> {
    let seed = Zeroizing::new(parent.bytes());

    let mut hasher = Blake2b::<U32>::new();
    hasher.update(ED25519_HDKD_PREFIX);
    hasher.update(seed.as_slice());
    hasher.update(chain_code.as_bytes());

    let child_seed = Zeroizing::new(<[u8; 32]>::from(hasher.finalize()));
    Ed25519PrivateKey::from_bytes(child_seed.as_slice())
        .map_err(|e| Error::KeyDerivationFailed(e.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use proptest::prelude::*;

    fn seed_hex(key: &PrivateKey) -> String {
        hex::encode(key.bytes())
    }

    fn path(indices: &[u64]) -> Vec<ChainCode> {
        indices.iter().copied().map(ChainCode::from_index).collect()
    }

    #[test]
    fn test_prefix_is_tagged_name() {
        assert_eq!(ED25519_HDKD_PREFIX[0] as usize, "Ed25519HDKD".len() << 2);
        assert_eq!(&ED25519_HDKD_PREFIX[1..], b"Ed25519HDKD");
    }

    #[test]
    fn test_alice_vectors() {
        let alice = PrivateKey::from(testing::ed25519_alice());

        assert_eq!(
            seed_hex(&derive_hardened_path(&alice, &path(&[0])).unwrap()),
            "860feceae0ebccf975cc85092a38ae24e4674e55d3d6aa707a18de71358ccc33"
        );
        assert_eq!(
            seed_hex(&derive_hardened_path(&alice, &path(&[1])).unwrap()),
            "729b9cbc57779d707d587e5f860a7cd3db8804ae39f755cd0036fda853da2139"
        );
        assert_eq!(
            seed_hex(&derive_hardened_path(&alice, &path(&[1, 2])).unwrap()),
            "ed9ab0b26b9a3e6d48d55030ba15ec66823fe7d12ca8fad690a8d4bc9b9488cc"
        );
    }

    #[test]
    fn test_bob_vectors() {
        let bob = PrivateKey::from(testing::ed25519_bob());

        assert_eq!(
            seed_hex(&derive_hardened_path(&bob, &path(&[0])).unwrap()),
            "ccd684257e55f16dd50eea4e52bd04843716e13295a542a143a09792c419191c"
        );
        assert_eq!(
            seed_hex(&derive_hardened_path(&bob, &path(&[1])).unwrap()),
            "76f7e8aa3e95bfc13d4ab8b59f6bd82ad3621449fbb66c123cc9c310c7d8d286"
        );
        assert_eq!(
            seed_hex(&derive_hardened_path(&bob, &path(&[1, 2])).unwrap()),
            "d2c0014e75ccce7b3319f5be5f494e9af56b9596fb7546af0eaef4a9c7caecc3"
        );
        assert_eq!(
            seed_hex(&derive_hardened_key(&bob, &ChainCode::from_string("test.string")).unwrap()),
            "8a4f41889ae03047e2427ec156be5505fa64374007a70aa4ee191c7a76f8e3a4"
        );
    }

    #[test]
    fn test_empty_path_returns_parent() {
        let alice = PrivateKey::from(testing::ed25519_alice());
        let same = derive_hardened_path(&alice, &[]).unwrap();
        assert_eq!(same.bytes(), alice.bytes());
    }

    #[test]
    fn test_unsupported_parents() {
        let parents: Vec<PrivateKey> = vec![
            testing::secp256k1_alice().into(),
            testing::sr25519_alice().into(),
            testing::secp256r1_alice().into(),
        ];

        for parent in parents {
            assert!(matches!(
                derive_hardened_key(&parent, &ChainCode::from_index(0)),
                Err(Error::UnsupportedKeyType(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn test_derivation_is_deterministic(seed in any::<[u8; 32]>(), index in any::<u64>()) {
            let parent = PrivateKey::Ed25519(Ed25519PrivateKey::from_bytes(&seed).unwrap());
            let code = ChainCode::from_index(index);

            let first = derive_hardened_key(&parent, &code).unwrap();
            let second = derive_hardened_key(&parent, &code).unwrap();
            prop_assert_eq!(first.bytes(), second.bytes());
        }

        #[test]
        fn test_path_equals_sequential_steps(seed in any::<[u8; 32]>(), a in any::<u64>(), b in any::<u64>()) {
            let parent = PrivateKey::Ed25519(Ed25519PrivateKey::from_bytes(&seed).unwrap());

            let stepped = derive_hardened_key(&parent, &ChainCode::from_index(a))
                .and_then(|child| derive_hardened_key(&child, &ChainCode::from_index(b)))
                .unwrap();
            let folded = derive_hardened_path(&parent, &path(&[a, b])).unwrap();
            prop_assert_eq!(stepped.bytes(), folded.bytes());
        }
    }
}
