//! Cipher configuration.
//!
//! Selects the suite used when encrypting to a recipient. Decryption never
//! needs configuration since the suite tag travels with the content.
//!
//! ```json
//! { "encrypter": "aes256cbc" }
//! ```
//!
//! A missing `encrypter` field falls back to `nacl-ecdh`.

use serde::{Deserialize, Serialize};

use crate::cipher::{self, Encrypter, EncrypterKind};
use crate::error::Result;
use crate::keys::PublicKey;

/// Configuration for building encrypters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherConfig {
    /// Suite used for new content
    #[serde(default)]
    pub encrypter: EncrypterKind,
}

impl CipherConfig {
    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the configured encrypter for a recipient
    pub fn encrypter(&self, public_key: PublicKey) -> Result<Box<dyn Encrypter>> {
        cipher::encrypter(self.encrypter, public_key)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{decrypter, Decrypter, AES256CBC};
    use crate::error::Error;
    use crate::keys::PrivateKey;
    use crate::testing;

    #[test]
    fn test_default() {
        assert_eq!(CipherConfig::default().encrypter, EncrypterKind::NaclEcdh);
        assert_eq!(CipherConfig::from_json("{}").unwrap(), CipherConfig::default());
    }

    #[test]
    fn test_from_json() {
        let config = CipherConfig::from_json(r#"{"encrypter": "aes256cbc"}"#).unwrap();
        assert_eq!(config.encrypter, EncrypterKind::Aes256Cbc);

        let bob = PrivateKey::from(testing::secp256k1_bob());
        let content = config.encrypter(bob.public_key()).unwrap().encrypt(b"message").unwrap();
        assert_eq!(content[0], AES256CBC);
        assert_eq!(decrypter(bob).decrypt(&content).unwrap(), b"message");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            CipherConfig::from_json(r#"{"encrypter": "rot13"}"#),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            CipherConfig::from_json(r#"{"encrypter": ""}"#),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            CipherConfig::from_json("not json"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_serialize() {
        let config = CipherConfig {
            encrypter: EncrypterKind::Noop,
        };
        assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"encrypter":"noop"}"#);
    }
}
