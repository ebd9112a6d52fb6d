//! Fixture keys shared by unit tests.
//!
//! Every key here is publicly known. Never use them outside tests.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use rand_core::{CryptoRng, RngCore};

use crate::keys::{
    Ed25519PrivateKey, PrivateKey, Secp256k1PrivateKey, Secp256r1PrivateKey, Sr25519PrivateKey,
};

fn decode(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("fixture hex")
}

pub fn secp256k1_alice() -> Secp256k1PrivateKey {
    Secp256k1PrivateKey::from_bytes(&decode(
        "01901e63389ef02eaa7c5782e08b40d98faef835f28bd144eecf5614a415943f",
    ))
    .unwrap()
}

pub fn secp256k1_bob() -> Secp256k1PrivateKey {
    Secp256k1PrivateKey::from_bytes(&decode(
        "df4ba9f6106ad2846472f759476535e55c5805d8337df5a11c3b139f438b98b3",
    ))
    .unwrap()
}

pub fn ed25519_alice() -> Ed25519PrivateKey {
    Ed25519PrivateKey::from_bytes(&decode(
        "0d9b4a3c10721991c6b806f0f343535dc2b46c74bece50a0a0d6b9f0070d3157",
    ))
    .unwrap()
}

pub fn ed25519_bob() -> Ed25519PrivateKey {
    Ed25519PrivateKey::from_bytes(&decode(
        "39d4c97d6a7f9e3306a2b5aae604ee67ec8b1387fffb39128fc055656cff05bb",
    ))
    .unwrap()
}

pub fn ed25519_charlie() -> Ed25519PrivateKey {
    Ed25519PrivateKey::from_bytes(&decode(
        "cd81ad6a71da3cbe070c6e73a6ab591a9987a3e6ce2ba2ef6c2a3846ed3cdb08",
    ))
    .unwrap()
}

pub fn sr25519_alice() -> Sr25519PrivateKey {
    Sr25519PrivateKey::from_bytes(&decode(
        "5c6d7adf75bda1180c225d25f3aa8dc174bbfb3cddee11ae9a85982f6faf791a",
    ))
    .unwrap()
}

pub fn sr25519_bob() -> Sr25519PrivateKey {
    Sr25519PrivateKey::from_bytes(&decode(
        "23b063a581fd8e5e847c4e2b9c494247298791530f5293be369e8bf23a45d2bd",
    ))
    .unwrap()
}

pub fn sr25519_eve() -> Sr25519PrivateKey {
    Sr25519PrivateKey::from_bytes(&decode(
        "000102030405060708090a0b0c0d0e0f000102030405060708090a0b0c0d0e0f",
    ))
    .unwrap()
}

pub fn secp256r1_alice() -> Secp256r1PrivateKey {
    Secp256r1PrivateKey::from_bytes(&decode(
        "3cdee0ff28337463455cd1cc43d29b1bf749d9615576525853ccc02b83c8b433",
    ))
    .unwrap()
}

pub fn secp256r1_bob() -> Secp256r1PrivateKey {
    Secp256r1PrivateKey::from_bytes(&decode(
        "a1e65c4677435cea57950b39379a9ec7ec0c64edc97efe36cdaae3c386fe2b71",
    ))
    .unwrap()
}

pub fn secp256r1_carlos() -> Secp256r1PrivateKey {
    Secp256r1PrivateKey::from_bytes(&decode(
        "7198ec54092518b49b2c66468a058f1fdbf0fdf0b1e281a027c692bb0ee1d1ed",
    ))
    .unwrap()
}

/// One Alice key per curve family
pub fn all_private_keys() -> Vec<PrivateKey> {
    vec![
        secp256k1_alice().into(),
        ed25519_alice().into(),
        sr25519_alice().into(),
        secp256r1_alice().into(),
    ]
}

/// BLAKE2b-256 of `"hello from mailchain"`
pub fn hello_digest() -> [u8; 32] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(b"hello from mailchain");
    hasher.finalize().into()
}

/// An RNG that replays a fixed byte string, then repeats it.
///
/// Only for pinning nonces and IVs in golden-vector tests.
pub struct FixedBytesRng {
    bytes: Vec<u8>,
    pos: usize,
}

impl FixedBytesRng {
    pub fn new(bytes: &[u8]) -> Self {
        assert!(!bytes.is_empty());
        Self {
            bytes: bytes.to_vec(),
            pos: 0,
        }
    }
}

impl RngCore for FixedBytesRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.bytes[self.pos % self.bytes.len()];
            self.pos += 1;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for FixedBytesRng {}
