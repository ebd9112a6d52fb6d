//! Recovery phrase to derived identity, messaging key and signatures.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use umbra_multikey::cipher::{self, Decrypter, Encrypter, EncrypterKind};
use umbra_multikey::encoding::{decode_messaging_public_key, encode_messaging_public_key};
use umbra_multikey::{
    derive_hardened_path, mnemonic, registry, signatures, ChainCode, Error, KeyKind, PrivateKey,
    PublicKey,
};

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon about";

fn identity() -> PrivateKey {
    let seed = mnemonic::to_seed(PHRASE, "");
    PrivateKey::from_bytes(KeyKind::Ed25519, seed.as_slice()).unwrap()
}

#[test]
fn test_phrase_to_derived_messaging_key() {
    let root = identity();
    let path = [ChainCode::from_string("mailchain"), ChainCode::from_index(0)];
    let messaging = derive_hardened_path(&root, &path).unwrap();

    assert_eq!(messaging.kind(), KeyKind::Ed25519);
    assert_ne!(messaging.bytes(), root.bytes());

    // Same phrase, same path, same key.
    let again = derive_hardened_path(&identity(), &path).unwrap();
    assert_eq!(again.public_key(), messaging.public_key());

    let encoded = encode_messaging_public_key(&messaging.public_key()).unwrap();
    assert!(encoded.starts_with("MsgKey"));
    assert_eq!(decode_messaging_public_key(&encoded).unwrap(), messaging.public_key());
}

#[test]
fn test_provided_messaging_key_signature() {
    let root = identity();
    let messaging = derive_hardened_path(&root, &[ChainCode::from_index(1)]).unwrap();

    let signature = signatures::sign_provided_messaging_key(
        &root,
        &messaging.public_key(),
        "alice@mailchain.com",
        "mailchain",
    )
    .unwrap();

    assert!(signatures::verify_provided_messaging_key(
        &root.public_key(),
        &signature,
        &messaging.public_key(),
        "alice@mailchain.com",
        "mailchain",
    )
    .unwrap());
}

#[test]
fn test_descriptive_bytes_round_trip_through_registry() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);

    for kind in KeyKind::ALL {
        let key = PrivateKey::generate(kind, &mut rng);
        let descriptive = registry::descriptive_bytes_from_public_key(&key.public_key());
        assert_eq!(descriptive[0], kind.id());

        let parsed = registry::public_key_from_descriptive_bytes(&descriptive).unwrap();
        assert_eq!(parsed, key.public_key());

        let json = serde_json::to_string(&key.public_key()).unwrap();
        assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), key.public_key());
    }
}

#[test]
fn test_resolve_key_kind_from_raw_bytes() {
    let key = identity();
    let resolved =
        registry::resolve_key_kind(&key.public_key().bytes(), &key.bytes()).unwrap();
    assert_eq!(resolved.kind(), KeyKind::Ed25519);

    let other = derive_hardened_path(&key, &[ChainCode::from_index(7)]).unwrap();
    assert_eq!(
        registry::resolve_key_kind(&other.public_key().bytes(), &key.bytes()).unwrap_err(),
        Error::NoMatch
    );
}

#[test]
fn test_derived_key_receives_encrypted_content() {
    let child = derive_hardened_path(&identity(), &[ChainCode::from_index(2)]).unwrap();

    let content = cipher::encrypter(EncrypterKind::NaclEcdh, child.public_key())
        .unwrap()
        .encrypt(b"welcome")
        .unwrap();
    assert_eq!(cipher::decrypter(child).decrypt(&content).unwrap(), b"welcome");
}

#[test]
fn test_derivation_requires_ed25519() {
    let seed = mnemonic::to_seed(PHRASE, "");
    let secp = PrivateKey::from_bytes(KeyKind::Secp256k1, seed.as_slice()).unwrap();
    assert!(matches!(
        derive_hardened_path(&secp, &[ChainCode::from_index(0)]),
        Err(Error::UnsupportedKeyType(_))
    ));
}
