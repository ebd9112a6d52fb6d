//! # NaCl Suites (`0x2a`, `0x2b`)
//!
//! XSalsa20-Poly1305 secretbox sealing, keyed either by an ephemeral ECDH
//! secret or directly by the holder's private key.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PUBLIC-KEY VARIANT (0x2a)                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Sender                                   Recipient                     │
//! │  ──────                                   ─────────                     │
//! │  e = ephemeral key on recipient's curve                                 │
//! │  k = shared_secret(e, R)                  k = shared_secret(r, E)       │
//! │  box = seal(k, nonce, m)                  m = open(k, box)              │
//! │                                                                         │
//! │  ┌──────┬──────────┬─────────────────┬───────────┬─────────┬──────┐     │
//! │  │ 0x2a │ curve id │ E (32 or 33)    │ nonce(24) │ tag(16) │ ct   │     │
//! │  └──────┴──────────┴─────────────────┴───────────┴─────────┴──────┘     │
//! │                                                                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                        PRIVATE-KEY VARIANT (0x2b)                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  k = key bytes of the private key itself                                │
//! │      ed25519              clamped X25519 scalar                         │
//! │      secp256k1/secp256r1  raw 32-byte scalar                            │
//! │      sr25519              not supported                                 │
//! │                                                                         │
//! │  ┌──────┬────────┬───────────┬─────────┬──────┐                         │
//! │  │ 0x2b │ key id │ nonce(24) │ tag(16) │ ct   │                         │
//! │  └──────┴────────┴───────────┴─────────┴──────┘                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use rand::rngs::OsRng;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use super::{Decrypter, Encrypter, NACL_ECDH, NACL_SECRET_KEY};
use crate::error::{Error, Result};
use crate::exchange::KeyExchange;
use crate::keys::ids::{ID_ED25519, ID_SECP256K1, ID_SECP256R1, ID_SR25519};
use crate::keys::{KeyKind, PrivateKey, PublicKey};

/// Size of the secretbox nonce in bytes
pub const NONCE_SIZE: usize = 24;

/// Size of the Poly1305 tag in bytes
pub const TAG_SIZE: usize = 16;

/// Seal `plaintext` under `key` with a fresh nonce: `nonce ‖ tag ‖ ciphertext`
pub fn easy_seal(plaintext: &[u8], key: &[u8], rng: &mut impl CryptoRngCore) -> Result<Vec<u8>> {
    let cipher = XSalsa20Poly1305::new_from_slice(key)
        .map_err(|_| Error::EncryptionFailed("secretbox key must be 32 bytes".into()))?;

    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let sealed = cipher
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|_| Error::EncryptionFailed("secretbox seal failed".into()))?;

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Open `nonce ‖ tag ‖ ciphertext` under `key`
pub fn easy_open(sealed: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(Error::DecryptionFailed);
    }

    let cipher = XSalsa20Poly1305::new_from_slice(key).map_err(|_| Error::DecryptionFailed)?;
    let (nonce, boxed) = sealed.split_at(NONCE_SIZE);

    cipher
        .decrypt(GenericArray::from_slice(nonce), boxed)
        .map_err(|_| Error::DecryptionFailed)
}

// ============================================================================
// PUBLIC-KEY VARIANT
// ============================================================================

/// Encrypts to a recipient public key with an ephemeral key
#[derive(Debug, Clone)]
pub struct NaclPublicKeyEncrypter {
    public_key: PublicKey,
    exchange: KeyExchange,
}

impl NaclPublicKeyEncrypter {
    /// Create an encrypter for any supported curve
    pub fn new(public_key: PublicKey) -> Self {
        let exchange = KeyExchange::for_kind(public_key.kind());
        Self {
            public_key,
            exchange,
        }
    }

    /// Encrypt with a caller-supplied randomness source
    pub fn encrypt_with_rng(&self, plaintext: &[u8], rng: &mut impl CryptoRngCore) -> Result<Vec<u8>> {
        let ephemeral = self.exchange.ephemeral_key(rng);
        let secret = self.exchange.shared_secret(&ephemeral, &self.public_key)?;
        let sealed = easy_seal(plaintext, secret.as_bytes(), rng)?;

        let ephemeral_public = ephemeral.public_key();
        let key_bytes = ephemeral_public.bytes();

        let mut out = Vec::with_capacity(2 + key_bytes.len() + sealed.len());
        out.push(NACL_ECDH);
        out.push(ephemeral_public.kind().id());
        out.extend_from_slice(&key_bytes);
        out.extend_from_slice(&sealed);
        Ok(out)
    }
}

impl Encrypter for NaclPublicKeyEncrypter {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }
}

/// Decrypts public-key content with the recipient's private key
#[derive(Debug, Clone)]
pub struct NaclPublicKeyDecrypter {
    private_key: PrivateKey,
    exchange: KeyExchange,
}

impl NaclPublicKeyDecrypter {
    /// Create a decrypter for any supported curve
    pub fn new(private_key: PrivateKey) -> Self {
        let exchange = KeyExchange::for_kind(private_key.kind());
        Self {
            private_key,
            exchange,
        }
    }
}

impl Decrypter for NaclPublicKeyDecrypter {
    fn decrypt(&self, content: &[u8]) -> Result<Vec<u8>> {
        let (ephemeral_public, sealed) = parse_public_key_content(content)?;
        let secret = self.exchange.shared_secret(&self.private_key, &ephemeral_public)?;

        let result = easy_open(sealed, secret.as_bytes());
        if result.is_err() {
            tracing::debug!("nacl-ecdh content rejected");
        }
        result
    }
}

fn parse_public_key_content(content: &[u8]) -> Result<(PublicKey, &[u8])> {
    if content.is_empty() {
        return Err(Error::MalformedFraming("empty content"));
    }
    if content[0] != NACL_ECDH {
        return Err(Error::MalformedFraming("invalid prefix"));
    }
    if content.len() < 35 {
        return Err(Error::MalformedFraming("content too short"));
    }

    let (kind, key_len) = match content[1] {
        ID_ED25519 => (KeyKind::Ed25519, 32),
        ID_SR25519 => (KeyKind::Sr25519, 32),
        ID_SECP256K1 => (KeyKind::Secp256k1, 33),
        ID_SECP256R1 => (KeyKind::Secp256r1, 33),
        other => return Err(Error::UnknownCurveId(other)),
    };

    let public_key = PublicKey::from_bytes(kind, &content[2..2 + key_len])
        .map_err(|_| Error::DecryptionFailed)?;
    Ok((public_key, &content[2 + key_len..]))
}

// ============================================================================
// PRIVATE-KEY VARIANT
// ============================================================================

/// Encrypts with a key derived from the holder's own private key
#[derive(Debug, Clone)]
pub struct NaclPrivateKeyEncrypter {
    private_key: PrivateKey,
}

impl NaclPrivateKeyEncrypter {
    /// Create an encrypter; sr25519 keys fail at encryption time
    pub fn new(private_key: PrivateKey) -> Self {
        Self { private_key }
    }

    /// Encrypt with a caller-supplied randomness source
    pub fn encrypt_with_rng(&self, plaintext: &[u8], rng: &mut impl CryptoRngCore) -> Result<Vec<u8>> {
        let key = encryption_key_bytes(&self.private_key)?;
        let sealed = easy_seal(plaintext, key.as_slice(), rng)?;

        let mut out = Vec::with_capacity(2 + sealed.len());
        out.push(NACL_SECRET_KEY);
        out.push(self.private_key.kind().id());
        out.extend_from_slice(&sealed);
        Ok(out)
    }
}

impl Encrypter for NaclPrivateKeyEncrypter {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }
}

/// Decrypts private-key content with the same private key
#[derive(Debug, Clone)]
pub struct NaclPrivateKeyDecrypter {
    private_key: PrivateKey,
}

impl NaclPrivateKeyDecrypter {
    /// Create a decrypter
    pub fn new(private_key: PrivateKey) -> Self {
        Self { private_key }
    }
}

impl Decrypter for NaclPrivateKeyDecrypter {
    fn decrypt(&self, content: &[u8]) -> Result<Vec<u8>> {
        if content.is_empty() {
            return Err(Error::MalformedFraming("empty content"));
        }
        if content[0] != NACL_SECRET_KEY {
            return Err(Error::MalformedFraming("invalid prefix"));
        }
        if content.len() < 3 {
            return Err(Error::MalformedFraming("content too short"));
        }

        if content[1] != self.private_key.kind().id() {
            return Err(Error::KeyIdMismatch);
        }

        let key = encryption_key_bytes(&self.private_key)?;
        let result = easy_open(&content[2..], key.as_slice());
        if result.is_err() {
            tracing::debug!("nacl secret-key content rejected");
        }
        result
    }
}

/// Secretbox key taken directly from a private key
fn encryption_key_bytes(private_key: &PrivateKey) -> Result<Zeroizing<[u8; 32]>> {
    match private_key {
        PrivateKey::Ed25519(key) => Ok(key.x25519_scalar_bytes()),
        PrivateKey::Secp256k1(key) => Ok(Zeroizing::new(key.bytes())),
        PrivateKey::Secp256r1(key) => Ok(Zeroizing::new(key.bytes())),
        PrivateKey::Sr25519(_) => Err(Error::UnsupportedKeyType(
            "sr25519 private keys are not supported".into(),
        )),
    }
}

// ============================================================================
// TESTS
// ============================================================================
