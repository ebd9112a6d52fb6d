//! # Umbra Multikey
//!
//! Multi-curve key algebra, hybrid public-key encryption and hierarchical
//! key derivation for messaging identities.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        UMBRA MULTIKEY MODULES                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐    │
//! │  │  Mnemonic   │  │ Derivation  │  │ Signatures  │  │   Cipher     │    │
//! │  │             │  │             │  │             │  │              │    │
//! │  │ - BIP39     │  │ - Chain     │  │ - Username  │  │ - noop       │    │
//! │  │ - Seed      │  │   codes     │  │ - Delivery  │  │ - nacl-ecdh  │    │
//! │  │             │  │ - Hardened  │  │ - Msg keys  │  │ - nacl-sk    │    │
//! │  │             │  │   children  │  │             │  │ - aes256cbc  │    │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬───────┘    │
//! │         │                │                │                │            │
//! │         └────────────────┴───────┬────────┴────────────────┤            │
//! │                                  │                         │            │
//! │  ┌─────────────┐  ┌──────────────▼─────────────┐  ┌────────▼────────┐   │
//! │  │  Registry   │  │          Keys              │  │    Exchange     │   │
//! │  │             │◄─┤                            │◄─┤                 │   │
//! │  │ - Ids       │  │ secp256k1  ed25519         │  │ - Ephemeral     │   │
//! │  │ - Names     │  │ sr25519    secp256r1       │  │ - Shared secret │   │
//! │  │ - Resolve   │  │                            │  │                 │   │
//! │  └─────────────┘  └────────────────────────────┘  └─────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`keys`] - Private and public keys for every curve family
//! - [`registry`] - Curve ids, names, descriptive bytes and key resolution
//! - [`exchange`] - Per-curve Diffie-Hellman
//! - [`cipher`] - Tagged hybrid encryption suites
//! - [`derivation`] - Chain codes and hardened child keys
//! - [`mnemonic`] - BIP39 recovery phrases
//! - [`signatures`] - Domain message signing helpers
//! - [`encoding`] - Text encodings and messaging key strings
//! - [`config`] - Cipher configuration
//!
//! ## Quick Start
//!
//! ```ignore
//! use umbra_multikey::cipher::{self, Decrypter, EncrypterKind};
//! use umbra_multikey::{KeyKind, PrivateKey};
//!
//! let bob = PrivateKey::generate(KeyKind::Ed25519, &mut rand::rngs::OsRng);
//! let content = cipher::encrypter(EncrypterKind::NaclEcdh, bob.public_key())?
//!     .encrypt(b"hello bob")?;
//! let plaintext = cipher::decrypter(bob).decrypt(&content)?;
//! ```
//!
//! ## Security Model
//!
//! | Concern | Measure |
//! |---------|---------|
//! | Secret material | Private keys zeroize on drop and redact themselves in `Debug` |
//! | Decryption oracles | Every post-framing failure is the same `DecryptionFailed` |
//! | MAC checks | Constant-time comparison |
//! | Randomness | Caller-supplied `CryptoRngCore`, `OsRng` by default |
//! | Logging | `tracing` events never carry keys or plaintext |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod cipher;
pub mod config;
pub mod derivation;
pub mod encoding;
pub mod error;
pub mod exchange;
pub mod keys;
pub mod mnemonic;
pub mod registry;
pub mod signatures;

#[cfg(test)]
mod testing;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use cipher::{Decrypter, Encrypter, EncrypterKind};
pub use config::CipherConfig;
pub use derivation::{derive_hardened_key, derive_hardened_path, ChainCode};
pub use error::{Error, Result};
pub use exchange::{KeyExchange, SharedSecret};
pub use keys::{KeyKind, PrivateKey, PublicKey};
pub use mnemonic::RecoveryPhrase;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of Umbra Multikey
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
