//! # Error Handling
//!
//! This module provides the error types for Umbra Multikey.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Key Material Errors                                               │
//! │  │   ├── UnsupportedKeyType    - Curve family not handled here         │
//! │  │   ├── BadKeyLength          - Matches no accepted private width     │
//! │  │   ├── InvalidKeyLength      - Inconsistent key material             │
//! │  │   ├── InvalidLength         - Matches no accepted public width      │
//! │  │   ├── UnusableSeed          - Scalar is zero or >= curve order      │
//! │  │   ├── InvalidPublicKey      - Bytes are not a curve point           │
//! │  │   ├── InvalidKey            - Curve library rejected the key        │
//! │  │   └── SigningFailed         - Curve library refused to sign         │
//! │  │                                                                      │
//! │  ├── Registry Errors                                                   │
//! │  │   ├── UnknownKeyType        - Key type not registered               │
//! │  │   ├── UnknownCurveId        - Identifier byte not registered        │
//! │  │   ├── UnknownKeyKind        - Curve name not registered             │
//! │  │   ├── NoMatch               - No curve family matched the bytes     │
//! │  │   └── Inconclusive          - More than one family matched          │
//! │  │                                                                      │
//! │  ├── Cipher Errors                                                     │
//! │  │   ├── MalformedFraming      - Too short or wrong suite tag          │
//! │  │   ├── DecryptionFailed      - MAC, padding or box failure           │
//! │  │   ├── EncryptionFailed      - Sealing failed                        │
//! │  │   ├── KeyIdMismatch         - Secret-key box for another curve      │
//! │  │   ├── UnknownCipher         - Suite tag or name not registered      │
//! │  │   └── KeyExchangeFailed     - Degenerate shared secret              │
//! │  │                                                                      │
//! │  ├── Derivation Errors                                                 │
//! │  │   ├── KeyDerivationFailed   - Child key could not be built          │
//! │  │   └── InvalidRecoveryPhrase - Not a valid BIP39 phrase              │
//! │  │                                                                      │
//! │  └── Input Errors                                                      │
//! │      ├── InputValidation       - Empty or invalid caller argument      │
//! │      ├── EncodingError         - Hex / base58 / base64 decode failure  │
//! │      └── ConfigError           - Configuration could not be parsed     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `DecryptionFailed` deliberately carries no detail. Every check after the
//! framing is parsed collapses into it, so callers (and logs) cannot learn
//! whether the MAC, the padding or the box failed.

use thiserror::Error;

/// Result type alias for Umbra Multikey operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Umbra Multikey
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Key Material Errors (100-199)
    // ========================================================================

    /// The operation does not support keys of this curve family
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// Private key bytes match neither the seed nor the expanded width
    #[error("{0}: bad key length")]
    BadKeyLength(&'static str),

    /// Key material is internally inconsistent
    #[error("Invalid key length: {0}")]
    InvalidKeyLength(String),

    /// Public key bytes match none of the accepted encodings
    #[error("Invalid key length {0}")]
    InvalidLength(usize),

    /// Private scalar is zero or not below the curve order
    #[error("Unusable seed")]
    UnusableSeed,

    /// Public key bytes do not decode to a valid point
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Key bytes have the right width but are rejected by the curve library
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signing failed inside the curve library
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ========================================================================
    // Registry Errors (200-299)
    // ========================================================================

    /// Key is of a type the registry does not know
    #[error("Unknown key type: {0}")]
    UnknownKeyType(String),

    /// Curve identifier byte is not registered
    #[error("Unknown curve identifier: {0:#04x}")]
    UnknownCurveId(u8),

    /// Curve name is not registered
    #[error("Unknown key kind: {0:?}")]
    UnknownKeyKind(String),

    /// No curve family matched the supplied key bytes
    #[error("No match found")]
    NoMatch,

    /// More than one curve family matched the supplied key bytes
    #[error("Multiple matches found")]
    Inconclusive,

    // ========================================================================
    // Cipher Errors (300-399)
    // ========================================================================

    /// Encrypted content is too short or carries the wrong suite tag
    #[error("Malformed framing: {0}")]
    MalformedFraming(&'static str),

    /// Decryption failed (undifferentiated)
    #[error("Decryption failed")]
    DecryptionFailed,

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Secret-key content was produced for a different curve family
    #[error("Key id does not match")]
    KeyIdMismatch,

    /// Cipher suite tag or name is not registered
    #[error("Unknown cipher: {0}")]
    UnknownCipher(String),

    /// Key exchange produced a degenerate secret
    #[error("Key exchange failed: {0}")]
    KeyExchangeFailed(String),

    // ========================================================================
    // Derivation Errors (400-499)
    // ========================================================================

    /// Key derivation failed
    #[error("Failed to derive key: {0}")]
    KeyDerivationFailed(String),

    /// Invalid recovery phrase
    #[error("Invalid recovery phrase: {0}")]
    InvalidRecoveryPhrase(String),

    // ========================================================================
    // Input Errors (500-599)
    // ========================================================================

    /// Caller supplied an empty or invalid argument
    #[error("Invalid input: {0}")]
    InputValidation(String),

    /// Text could not be decoded
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Key material
    /// - 200-299: Registry
    /// - 300-399: Cipher
    /// - 400-499: Derivation
    /// - 500-599: Input
    pub fn code(&self) -> i32 {
        match self {
            // Key material (100-199)
            Error::UnsupportedKeyType(_) => 100,
            Error::BadKeyLength(_) => 101,
            Error::InvalidKeyLength(_) => 102,
            Error::InvalidLength(_) => 103,
            Error::UnusableSeed => 104,
            Error::InvalidPublicKey(_) => 105,
            Error::SigningFailed(_) => 106,
            Error::InvalidKey(_) => 107,

            // Registry (200-299)
            Error::UnknownCurveId(_) => 200,
            Error::UnknownKeyKind(_) => 201,
            Error::NoMatch => 202,
            Error::Inconclusive => 203,
            Error::UnknownKeyType(_) => 204,

            // Cipher (300-399)
            Error::MalformedFraming(_) => 300,
            Error::DecryptionFailed => 301,
            Error::EncryptionFailed(_) => 302,
            Error::KeyIdMismatch => 303,
            Error::UnknownCipher(_) => 304,
            Error::KeyExchangeFailed(_) => 305,

            // Derivation (400-499)
            Error::KeyDerivationFailed(_) => 400,
            Error::InvalidRecoveryPhrase(_) => 401,

            // Input (500-599)
            Error::InputValidation(_) => 500,
            Error::EncodingError(_) => 501,
            Error::ConfigError(_) => 502,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Cryptographic failures are never transient. Only errors caused by
    /// caller-correctable input are reported as recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InputValidation(_) | Error::ConfigError(_))
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::EncodingError(format!("hex: {}", err))
    }
}

impl From<bs58::decode::Error> for Error {
    fn from(err: bs58::decode::Error) -> Self {
        Error::EncodingError(format!("base58: {}", err))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::EncodingError(format!("base64: {}", err))
    }
}

// ============================================================================
// TESTS
// ============================================================================
