//! Text encodings for keys and identifiers.
//!
//! | Name | Encoding |
//! |------|----------|
//! | `hex/plain` | lowercase hex |
//! | `hex/0x-prefix` | lowercase hex with a `0x` prefix |
//! | `base58/plain` | Bitcoin-alphabet base58 |
//! | `base64/plain` | standard padded base64 |
//!
//! Messaging public keys are base58 strings that always start with
//! `MsgKey`, produced by a fixed six-byte prefix in front of the descriptive
//! key bytes.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;

use crate::error::{Error, Result};
use crate::keys::ids::ID_SECP256K1;
use crate::keys::PublicKey;
use crate::registry;

/// Bytes placed in front of a messaging key so its base58 form reads `MsgKey…`
pub const MESSAGING_KEY_PREFIX: [u8; 6] = [0x1f, 0xf8, 0x39, 0xbf, 0x85, 0x99];

/// A supported text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Lowercase hex
    Hex,
    /// Lowercase hex with `0x` prefix
    Hex0xPrefix,
    /// Base58, Bitcoin alphabet
    Base58,
    /// Standard base64 with padding
    Base64,
}

impl Encoding {
    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Hex => "hex/plain",
            Encoding::Hex0xPrefix => "hex/0x-prefix",
            Encoding::Base58 => "base58/plain",
            Encoding::Base64 => "base64/plain",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hex/plain" => Ok(Encoding::Hex),
            "hex/0x-prefix" => Ok(Encoding::Hex0xPrefix),
            "base58/plain" => Ok(Encoding::Base58),
            "base64/plain" => Ok(Encoding::Base64),
            other => Err(Error::EncodingError(format!("unsupported encoding {:?}", other))),
        }
    }
}

/// Encode bytes as text
pub fn encode(encoding: Encoding, bytes: &[u8]) -> String {
    match encoding {
        Encoding::Hex => hex::encode(bytes),
        Encoding::Hex0xPrefix => encode_hex_0x_prefix(bytes),
        Encoding::Base58 => bs58::encode(bytes).into_string(),
        Encoding::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}

/// Decode text into bytes
pub fn decode(encoding: Encoding, text: &str) -> Result<Vec<u8>> {
    Ok(match encoding {
        Encoding::Hex => hex::decode(text)?,
        Encoding::Hex0xPrefix => decode_hex_0x_prefix(text)?,
        Encoding::Base58 => bs58::decode(text).into_vec()?,
        Encoding::Base64 => base64::engine::general_purpose::STANDARD.decode(text)?,
    })
}

/// `0x`-prefixed lowercase hex
pub fn encode_hex_0x_prefix(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode `0x`-prefixed hex; the prefix is required
pub fn decode_hex_0x_prefix(text: &str) -> Result<Vec<u8>> {
    let stripped = text
        .strip_prefix("0x")
        .ok_or_else(|| Error::EncodingError("hex: missing 0x prefix".into()))?;
    Ok(hex::decode(stripped)?)
}

/// Encode a public key as a `MsgKey…` messaging key
///
/// secp256k1 keys are not accepted as messaging keys.
pub fn encode_messaging_public_key(key: &PublicKey) -> Result<String> {
    let descriptive = registry::descriptive_bytes_from_public_key(key);
    if descriptive[0] == ID_SECP256K1 {
        return Err(Error::UnsupportedKeyType(
            "secp256k1 not supported as a messaging key".into(),
        ));
    }

    let mut out = Vec::with_capacity(MESSAGING_KEY_PREFIX.len() + descriptive.len());
    out.extend_from_slice(&MESSAGING_KEY_PREFIX);
    out.extend_from_slice(&descriptive);
    Ok(bs58::encode(out).into_string())
}

/// Decode a `MsgKey…` messaging key back into a public key
pub fn decode_messaging_public_key(text: &str) -> Result<PublicKey> {
    let bytes = bs58::decode(text).into_vec()?;
    let descriptive = bytes
        .strip_prefix(MESSAGING_KEY_PREFIX.as_slice())
        .ok_or_else(|| Error::EncodingError("missing messaging key prefix".into()))?;

    let key = registry::public_key_from_descriptive_bytes(descriptive)?;
    if descriptive[0] == ID_SECP256K1 {
        return Err(Error::UnsupportedKeyType(
            "secp256k1 not supported as a messaging key".into(),
        ));
    }
    Ok(key)
}

// ============================================================================
// TESTS
// ============================================================================
