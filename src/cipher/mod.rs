//! # Cipher Engine
//!
//! Hybrid public-key encryption under interchangeable suites. Every
//! encrypted buffer starts with a one-byte suite tag, so a decrypter can pick
//! the right protocol without outside metadata.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ENCRYPTED CONTENT                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  0x20  noop        tag ‖ plaintext                                      │
//! │                                                                         │
//! │  0x2a  nacl-ecdh   tag ‖ curve id ‖ ephemeral public (32|33)            │
//! │                        ‖ nonce(24) ‖ poly1305 tag(16) ‖ ciphertext      │
//! │                                                                         │
//! │  0x2b  nacl-sk     tag ‖ key id ‖ nonce(24) ‖ poly1305 tag(16)          │
//! │                        ‖ ciphertext                                     │
//! │                                                                         │
//! │  0x2e  aes256cbc   tag ‖ iv(16) ‖ compressed ephemeral public(33)       │
//! │                        ‖ hmac-sha256(32) ‖ ciphertext                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Choosing a Suite
//!
//! | Suite | Curves | Use |
//! |-------|--------|-----|
//! | `noop` | any | Debugging only, no confidentiality |
//! | `nacl-ecdh` | all four | Default, ephemeral key per message |
//! | `nacl-sk` | secp256k1, ed25519, secp256r1 | Same key identity on both ends |
//! | `aes256cbc` | secp256k1 | Compatibility with ECIES peers |
//!
//! [`encrypter`] builds an encrypter by suite name. [`decrypter`] returns a
//! decrypter that reads the tag and hands the buffer to the matching suite.

pub mod aes256cbc;
pub mod nacl;
pub mod noop;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};

pub use aes256cbc::{AesCbcDecrypter, AesCbcEncrypter};
pub use nacl::{
    NaclPrivateKeyDecrypter, NaclPrivateKeyEncrypter, NaclPublicKeyDecrypter,
    NaclPublicKeyEncrypter,
};
pub use noop::{NoopDecrypter, NoopEncrypter};

/// Suite tag for unencrypted content
pub const NO_OPERATION: u8 = 0x20;

/// Suite tag for NaCl public-key (ephemeral ECDH) encryption
pub const NACL_ECDH: u8 = 0x2a;

/// Suite tag for NaCl private-key encryption
pub const NACL_SECRET_KEY: u8 = 0x2b;

/// Suite tag for AES-256-CBC hybrid encryption
pub const AES256CBC: u8 = 0x2e;

/// Encrypts plaintext into tagged content
pub trait Encrypter: Send + Sync {
    /// Encrypt using the operating system's randomness
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;
}

/// Decrypts tagged content back into plaintext
pub trait Decrypter: Send + Sync {
    /// Decrypt content produced by the matching encrypter
    fn decrypt(&self, content: &[u8]) -> Result<Vec<u8>>;
}

/// A suite that can encrypt to a public key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncrypterKind {
    /// No encryption
    Noop,
    /// NaCl box with an ephemeral key
    #[default]
    NaclEcdh,
    /// AES-256-CBC hybrid scheme
    Aes256Cbc,
}

impl EncrypterKind {
    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            EncrypterKind::Noop => "noop",
            EncrypterKind::NaclEcdh => "nacl-ecdh",
            EncrypterKind::Aes256Cbc => "aes256cbc",
        }
    }

    /// Suite tag written by this encrypter
    pub fn tag(&self) -> u8 {
        match self {
            EncrypterKind::Noop => NO_OPERATION,
            EncrypterKind::NaclEcdh => NACL_ECDH,
            EncrypterKind::Aes256Cbc => AES256CBC,
        }
    }
}

impl fmt::Display for EncrypterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for EncrypterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "noop" => Ok(EncrypterKind::Noop),
            "nacl-ecdh" => Ok(EncrypterKind::NaclEcdh),
            "aes256cbc" => Ok(EncrypterKind::Aes256Cbc),
            "" => Err(Error::InputValidation(
                "encryption provided is set to empty".into(),
            )),
            other => Err(Error::UnknownCipher(other.to_string())),
        }
    }
}

impl Serialize for EncrypterKind {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for EncrypterKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Build an encrypter for the given suite and recipient
pub fn encrypter(kind: EncrypterKind, public_key: PublicKey) -> Result<Box<dyn Encrypter>> {
    tracing::debug!(suite = %kind, curve = %public_key.kind(), "Selecting encrypter");

    Ok(match kind {
        EncrypterKind::Noop => Box::new(NoopEncrypter::new()),
        EncrypterKind::NaclEcdh => Box::new(NaclPublicKeyEncrypter::new(public_key)),
        EncrypterKind::Aes256Cbc => Box::new(AesCbcEncrypter::new(public_key)?),
    })
}

/// Build a decrypter that dispatches on the suite tag
pub fn decrypter(private_key: PrivateKey) -> TaggedDecrypter {
    TaggedDecrypter { private_key }
}

/// Decrypter for any suite, chosen by the first byte of the content
#[derive(Debug, Clone)]
pub struct TaggedDecrypter {
    private_key: PrivateKey,
}

impl Decrypter for TaggedDecrypter {
    fn decrypt(&self, content: &[u8]) -> Result<Vec<u8>> {
        let Some(&tag) = content.first() else {
            return Err(Error::MalformedFraming("empty content"));
        };

        tracing::debug!(tag = format_args!("{:#04x}", tag), "Dispatching decryption");

        match tag {
            NO_OPERATION => NoopDecrypter::new().decrypt(content),
            NACL_ECDH => NaclPublicKeyDecrypter::new(self.private_key.clone()).decrypt(content),
            NACL_SECRET_KEY => {
                NaclPrivateKeyDecrypter::new(self.private_key.clone()).decrypt(content)
            }
            AES256CBC => AesCbcDecrypter::new(self.private_key.clone())?.decrypt(content),
            other => Err(Error::UnknownCipher(format!("{:#04x}", other))),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_encrypter_kind_names() {
        for kind in [
            EncrypterKind::Noop,
            EncrypterKind::NaclEcdh,
            EncrypterKind::Aes256Cbc,
        ] {
            assert_eq!(kind.name().parse::<EncrypterKind>().unwrap(), kind);
        }
        assert_eq!(EncrypterKind::default(), EncrypterKind::NaclEcdh);
    }

    #[test]
    fn test_encrypter_kind_errors() {
        assert_eq!(
            "".parse::<EncrypterKind>().unwrap_err(),
            Error::InputValidation("encryption provided is set to empty".into())
        );
        assert_eq!(
            "rot13".parse::<EncrypterKind>().unwrap_err(),
            Error::UnknownCipher("rot13".into())
        );
    }

    #[test]
    fn test_every_suite_round_trips_through_decrypter() {
        let alice = PrivateKey::from(testing::secp256k1_alice());
        let decrypter = decrypter(alice.clone());

        for kind in [
            EncrypterKind::Noop,
            EncrypterKind::NaclEcdh,
            EncrypterKind::Aes256Cbc,
        ] {
            let encrypter = encrypter(kind, alice.public_key()).unwrap();
            let content = encrypter.encrypt(b"message").unwrap();
            assert_eq!(content[0], kind.tag());
            assert_eq!(decrypter.decrypt(&content).unwrap(), b"message");
        }

        let secret_key = NaclPrivateKeyEncrypter::new(alice.clone());
        let content = secret_key.encrypt(b"message").unwrap();
        assert_eq!(content[0], NACL_SECRET_KEY);
        assert_eq!(decrypter.decrypt(&content).unwrap(), b"message");
    }

    #[test]
    fn test_aes_rejects_non_secp256k1_recipient() {
        let public = PublicKey::from(testing::ed25519_alice().public_key());
        assert!(matches!(
            encrypter(EncrypterKind::Aes256Cbc, public),
            Err(Error::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn test_decrypter_framing_errors() {
        let decrypter = decrypter(testing::ed25519_alice().into());
        assert_eq!(
            decrypter.decrypt(&[]).unwrap_err(),
            Error::MalformedFraming("empty content")
        );
        assert_eq!(
            decrypter.decrypt(&[0x99, 0x01]).unwrap_err(),
            Error::UnknownCipher("0x99".into())
        );
    }

    #[test]
    fn test_encrypter_kind_serde() {
        let json = serde_json::to_string(&EncrypterKind::Aes256Cbc).unwrap();
        assert_eq!(json, "\"aes256cbc\"");
        assert!(serde_json::from_str::<EncrypterKind>("\"des\"").is_err());
    }
}
