//! # Key Registry
//!
//! Maps curve identifier bytes and curve names to key types, builds and
//! parses descriptive key bytes, and resolves the curve of a key pair when
//! only raw bytes are known.
//!
//! ## Descriptive Key Bytes
//!
//! ```text
//! ┌──────────┬───────────────────────────────────────┐
//! │ id (1)   │ key bytes (32 or 33 for public keys)  │
//! └──────────┴───────────────────────────────────────┘
//!   0xe1 secp256k1 · 0xe2 ed25519 · 0xe3 sr25519 · 0xe4 secp256r1
//! ```
//!
//! ## Resolving a Key Pair
//!
//! Raw byte layouts of different curves overlap (every curve here accepts a
//! 32-byte private key), so [`resolve_key_kind`] parses the private key as
//! every curve in turn and keeps the ones whose derived public key equals
//! the supplied public key byte for byte.

use std::str::FromStr;

use crate::encoding::{self, Encoding};
use crate::error::{Error, Result};
use crate::keys::{KeyKind, PrivateKey, PublicKey};

/// Curve identifier byte of a public key
pub fn id_from_public_key(key: &PublicKey) -> u8 {
    key.kind().id()
}

/// Curve identifier byte of a private key
pub fn id_from_private_key(key: &PrivateKey) -> u8 {
    key.kind().id()
}

/// Curve name of a public key
pub fn kind_from_public_key(key: &PublicKey) -> &'static str {
    key.kind().name()
}

/// Curve name of a private key
pub fn kind_from_private_key(key: &PrivateKey) -> &'static str {
    key.kind().name()
}

/// Curve name for an identifier byte
pub fn kind_from_id(id: u8) -> Result<&'static str> {
    Ok(KeyKind::from_id(id)?.name())
}

/// Identifier byte for a curve name
pub fn id_from_kind(name: &str) -> Result<u8> {
    Ok(key_kind(name)?.id())
}

/// Parse private key bytes for the named curve
pub fn private_key_from_bytes(name: &str, bytes: &[u8]) -> Result<PrivateKey> {
    PrivateKey::from_bytes(key_kind(name)?, bytes)
}

/// Parse public key bytes for the named curve
pub fn public_key_from_bytes(name: &str, bytes: &[u8]) -> Result<PublicKey> {
    PublicKey::from_bytes(key_kind(name)?, bytes)
}

/// `id ‖ public key bytes`
pub fn descriptive_bytes_from_public_key(key: &PublicKey) -> Vec<u8> {
    let bytes = key.bytes();
    let mut out = Vec::with_capacity(1 + bytes.len());
    out.push(id_from_public_key(key));
    out.extend_from_slice(&bytes);
    out
}

/// `id ‖ private key bytes`
///
/// ## Security Warning
///
/// The output contains secret key material.
pub fn descriptive_bytes_from_private_key(key: &PrivateKey) -> Vec<u8> {
    let bytes = key.bytes();
    let mut out = Vec::with_capacity(1 + bytes.len());
    out.push(id_from_private_key(key));
    out.extend_from_slice(&bytes);
    out
}

/// Parse `id ‖ public key bytes`
pub fn public_key_from_descriptive_bytes(bytes: &[u8]) -> Result<PublicKey> {
    if bytes.len() <= 1 {
        return Err(Error::InputValidation(
            "input must contain id and public key".into(),
        ));
    }

    let kind = KeyKind::from_id(bytes[0])?;
    PublicKey::from_bytes(kind, &bytes[1..])
}

/// Decode text with the named encoding, then parse it as descriptive bytes
pub fn public_key_from_encoded_descriptive(text: &str, encoding: &str) -> Result<PublicKey> {
    let encoding = Encoding::from_str(encoding)?;
    let bytes = encoding::decode(encoding, text)?;
    public_key_from_descriptive_bytes(&bytes)
}

/// Find the single curve under which `private_key` derives `public_key`
///
/// Curves are tried in [`KeyKind::ALL`] order. Zero matches fail with
/// `NoMatch`, more than one with `Inconclusive`.
pub fn resolve_key_kind(public_key: &[u8], private_key: &[u8]) -> Result<PrivateKey> {
    let matches: Vec<PrivateKey> = KeyKind::ALL
        .into_iter()
        .filter_map(|kind| PrivateKey::from_bytes(kind, private_key).ok())
        .filter(|candidate| candidate.public_key().bytes() == public_key)
        .collect();

    single_match(matches)
}

fn single_match(mut matches: Vec<PrivateKey>) -> Result<PrivateKey> {
    match matches.len() {
        0 => {
            tracing::debug!("No curve matched the supplied key pair");
            Err(Error::NoMatch)
        }
        1 => {
            let key = matches.remove(0);
            tracing::debug!(kind = %key.kind(), "Resolved key pair");
            Ok(key)
        }
        count => {
            tracing::debug!(count, "Key pair matched more than one curve");
            Err(Error::Inconclusive)
        }
    }
}

fn key_kind(name: &str) -> Result<KeyKind> {
    KeyKind::from_str(name).map_err(|_| Error::UnknownKeyType(name.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
