//! # Recovery Phrases (BIP39)
//!
//! Mnemonic phrases that stretch into a 32-byte key seed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PHRASE TO KEY SEED                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  "abandon abandon ... about"   (any text, used byte for byte)           │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  PBKDF2-HMAC-SHA512(                                                    │
//! │    password   = phrase,                                                 │
//! │    salt       = "mnemonic" ‖ password,                                  │
//! │    iterations = 2048,                                                   │
//! │  )  → 64 bytes                                                          │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  first 32 bytes ─────────► seed for PrivateKey::from_bytes              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Aspect | Measure |
//! |--------|---------|
//! | Generated entropy | 256 bits (24 words) |
//! | Checksum | Validated by [`RecoveryPhrase::from_phrase`], not by [`to_seed`] |
//! | Display | [`RecoveryPhrase`] redacts itself in `Debug` |

use bip39::{Language, Mnemonic};
use rand_core::CryptoRngCore;
use sha2::Sha512;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Number of words in a generated phrase
pub const WORD_COUNT: usize = 24;

/// Size of the stretched key seed in bytes
pub const SEED_SIZE: usize = 32;

/// Entropy size in bytes for 24 words (256 bits)
const ENTROPY_BYTES: usize = 32;

/// PBKDF2 rounds for seed stretching
const PBKDF2_ROUNDS: u32 = 2048;

/// A validated English BIP39 phrase
///
/// ## Security Warning
///
/// The phrase recovers every key derived from it. Never log it.
#[derive(Clone, ZeroizeOnDrop)]
pub struct RecoveryPhrase {
    #[zeroize(skip)] // bip39::Mnemonic doesn't implement Zeroize
    mnemonic: Mnemonic,
}

impl RecoveryPhrase {
    /// Generate a new 24-word phrase
    pub fn generate(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let mut entropy = Zeroizing::new([0u8; ENTROPY_BYTES]);
        rng.fill_bytes(entropy.as_mut_slice());

        let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy.as_slice())
            .map_err(|e| Error::KeyDerivationFailed(format!("Failed to generate mnemonic: {}", e)))?;

        Ok(Self { mnemonic })
    }

    /// Parse and validate a phrase (word list and checksum)
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
            .map_err(|e| Error::InvalidRecoveryPhrase(e.to_string()))?;

        Ok(Self { mnemonic })
    }

    /// Number of words in this phrase
    pub fn word_count(&self) -> usize {
        self.mnemonic.word_count()
    }

    /// Get the words
    pub fn words(&self) -> Vec<&'static str> {
        self.mnemonic.words().collect()
    }

    /// Get the phrase as a single string
    ///
    /// ## Security Warning
    ///
    /// Only use this for display to the user.
    pub fn phrase(&self) -> String {
        self.mnemonic.to_string()
    }

    /// Stretch into a 32-byte seed
    pub fn to_seed(&self, password: &str) -> Zeroizing<[u8; SEED_SIZE]> {
        let phrase = Zeroizing::new(self.phrase());
        to_seed(&phrase, password)
    }
}

impl std::fmt::Debug for RecoveryPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecoveryPhrase([REDACTED])")
    }
}

/// Stretch `phrase` into a 32-byte seed
///
/// The phrase is not checked against the word list. Parse it with
/// [`RecoveryPhrase::from_phrase`] first when it comes from a user.
pub fn to_seed(phrase: &str, password: &str) -> Zeroizing<[u8; SEED_SIZE]> {
    let salt = Zeroizing::new(format!("mnemonic{}", password));

    let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
    pbkdf2::pbkdf2_hmac::<Sha512>(
        phrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        seed.as_mut_slice(),
    );
    seed
}

/// Generate a new 24-word phrase
pub fn generate(rng: &mut impl CryptoRngCore) -> Result<RecoveryPhrase> {
    RecoveryPhrase::generate(rng)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{KeyKind, PrivateKey};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    #[test]
    fn test_known_seed() {
        assert_eq!(
            hex::encode(*to_seed(ABANDON_ABOUT, "")),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
        );
    }

    #[test]
    fn test_known_seed_with_password() {
        assert_eq!(
            hex::encode(*to_seed(ABANDON_ABOUT, "TREZOR")),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553"
        );
    }

    #[test]
    fn test_generate() {
        let mut rng = ChaCha20Rng::seed_from_u64(24);
        let phrase = generate(&mut rng).unwrap();
        assert_eq!(phrase.word_count(), WORD_COUNT);

        let parsed = RecoveryPhrase::from_phrase(&phrase.phrase()).unwrap();
        assert_eq!(*parsed.to_seed(""), *phrase.to_seed(""));
    }

    #[test]
    fn test_seed_makes_usable_keys() {
        let seed = to_seed(ABANDON_ABOUT, "");
        for kind in KeyKind::ALL {
            assert!(PrivateKey::from_bytes(kind, seed.as_slice()).is_ok());
        }
    }

    #[test]
    fn test_known_seed_deputy_other() {
        let phrase = "deputy other grain consider empty next inform myself combine dish \
                      parent maple priority outdoor inherit lonely battle add humble jar \
                      silly tank item balance";
        assert_eq!(
            *to_seed(phrase, ""),
            [
                196, 61, 147, 66, 207, 131, 22, 179, 98, 3, 83, 23, 116, 171, 96, 65, 14, 243,
                147, 40, 21, 137, 42, 185, 147, 169, 115, 33, 38, 53, 82, 88
            ]
        );
    }

    #[test]
    fn test_to_seed_accepts_any_text() {
        let seed = to_seed("any arbitrary passphrase string", "");
        assert_ne!(*seed, [0u8; SEED_SIZE]);
        assert_ne!(*seed, *to_seed("any arbitrary passphrase string", "salt"));
        assert!(RecoveryPhrase::from_phrase("any arbitrary passphrase string").is_err());
    }

    #[test]
    fn test_invalid_phrases() {
        let bad_checksum = "abandon abandon abandon abandon abandon abandon \
                            abandon abandon abandon abandon abandon abandon";
        assert!(matches!(
            RecoveryPhrase::from_phrase(bad_checksum),
            Err(Error::InvalidRecoveryPhrase(_))
        ));
        assert!(matches!(
            RecoveryPhrase::from_phrase("notaword abandon abandon"),
            Err(Error::InvalidRecoveryPhrase(_))
        ));
        assert!(matches!(
            RecoveryPhrase::from_phrase(""),
            Err(Error::InvalidRecoveryPhrase(_))
        ));
    }

    #[test]
    fn test_debug_redacts() {
        let phrase = RecoveryPhrase::from_phrase(ABANDON_ABOUT).unwrap();
        let debug = format!("{:?}", phrase);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("abandon"));
    }
}
